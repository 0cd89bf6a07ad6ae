//! The JSON manifest describing the sprite layout and exported files.

mod builder;

pub use builder::{resolve_autoplay, Autoplay, Manifest};
