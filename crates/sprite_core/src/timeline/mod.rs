//! Raw PCM timeline assembly.
//!
//! The timeline is one append-only `s16le` file plus a cursor. Clips are
//! copied in verbatim and each one is followed by silence that carries the
//! cursor to the next whole second plus one more second:
//!
//! ```text
//! |beep 1.75s|pad 1.25s|boop 1.27s|pad 1.73s|
//! 0          1.75      3.0        4.27      6.0
//! ```
//!
//! The padding keeps decoder look-ahead near a clip boundary from bleeding
//! the tail of one clip into the start of the next.

mod assembler;
pub mod silence;

pub use assembler::{Appended, Timeline};
