//! Read text files backwards, one line at a time.
//!
//! [`ReverseLineReader`] walks a file from its last line to its first, pulling
//! fixed-size chunks from the end so that memory stays bounded regardless of
//! file size. [`tail()`] builds on it to return the last `n` lines in file order.

mod error;
mod reader;
mod tail;

pub use error::{Error, Result};
pub use reader::{ReverseLineReader, ReverseLineReaderBuilder, DEFAULT_CHUNK_SIZE};
pub use tail::{tail, tail_bytes, tail_from};
