//! Pipeline step implementations.

mod assemble;
mod export;
mod manifest;
mod silence;

pub use assemble::AssembleStep;
pub use export::ExportStep;
pub use manifest::ManifestStep;
pub use silence::SilenceStep;
