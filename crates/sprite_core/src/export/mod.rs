//! Multi-format export of the finished timeline and per-clip raw parts.
//!
//! ```text
//! timeline.raw ──ffmpeg──► <base>.aiff ──afconvert──► <base>.caf  (macOS only)
//!              ├─ffmpeg──► <base>.ac3
//!              ├─ffmpeg──► <base>.mp3
//!              ├─ffmpeg──► <base>.m4a
//!              └─ffmpeg──► <base>.ogg
//! ```

mod exporter;
mod registry;

pub use exporter::Exporter;
pub use registry::{ExportFormat, FormatRegistry, AIFF, CAF};
