//! The last `n` lines of a file, in file order.

use crate::error::Result;
use crate::reader::{decode_lossy, ReverseLineReader};
use std::io::{Read, Seek};
use std::path::Path;

/// Upper bound on the up-front allocation for the result, so a huge `n`
/// against a short file does not reserve memory it will never use.
const MAX_PREALLOC: usize = 1024;

/// Return the last `n` lines of the file at `path`, oldest first.
///
/// Lines are decoded lossily as UTF-8. A file with fewer than `n` lines
/// yields all of them; `n == 0` yields nothing and does not touch the file.
///
/// # Errors
///
/// Any I/O error is returned as-is and lines collected before it are
/// discarded. The file is closed on every path.
///
/// # Examples
///
/// ```
/// use std::io::Write;
///
/// let mut file = tempfile::NamedTempFile::new()?;
/// write!(file, "alpha\nbeta\ngamma\n")?;
///
/// let last = revline::tail(file.path(), 2)?;
/// assert_eq!(last, vec!["beta", "gamma"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn tail(path: impl AsRef<Path>, n: usize) -> Result<Vec<String>> {
    Ok(tail_bytes(path, n)?.into_iter().map(decode_lossy).collect())
}

/// Like [`tail`], but returns the raw bytes of each line.
pub fn tail_bytes(path: impl AsRef<Path>, n: usize) -> Result<Vec<Vec<u8>>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let mut reader = ReverseLineReader::open(path)?;
    let lines = tail_from(&mut reader, n);
    reader.close();
    lines
}

/// Pull up to `n` more lines from an existing reader and return them in file
/// order.
///
/// The reader is left positioned just before the earliest line returned, so
/// calling this again continues further back in the file. On error nothing
/// collected by this call is returned.
pub fn tail_from<R: Read + Seek>(
    reader: &mut ReverseLineReader<R>,
    n: usize,
) -> Result<Vec<Vec<u8>>> {
    let mut lines = Vec::with_capacity(n.min(MAX_PREALLOC));
    while lines.len() < n {
        match reader.read_line_bytes()? {
            Some(line) => lines.push(line),
            None => break,
        }
    }
    lines.reverse();
    Ok(lines)
}
