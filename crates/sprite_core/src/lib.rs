//! Sprite Core - Backend logic for audiosprite
//!
//! This crate decodes a list of audio clips through an external transcoder,
//! concatenates them into one padded raw PCM timeline, exports that timeline
//! to compressed formats and writes the JSON sprite manifest.
//! It has no CLI dependencies and can be driven by any front end.

pub mod config;
pub mod decoder;
pub mod export;
pub mod logging;
pub mod manifest;
pub mod models;
pub mod orchestrator;
pub mod timeline;
pub mod tools;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
