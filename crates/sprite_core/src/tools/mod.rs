//! External media tools.
//!
//! Everything that spawns a process lives here:
//!
//! - **Locate**: resolve `ffmpeg` / `afconvert` from settings or `PATH`
//! - **MediaTools**: the trait the pipeline talks to (decode, encode, derive)
//! - **FfmpegTools**: the real implementation backed by subprocesses
//!
//! The pipeline never builds command lines itself, so tests can swap in a
//! fake implementation and run the whole build without ffmpeg installed.

mod ffmpeg;
mod locate;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use ffmpeg::FfmpegTools;
pub use locate::{find_in_path, locate_tool, AFCONVERT, FFMPEG};
pub use types::{MediaTools, ToolError, ToolOutput, ToolResult};
