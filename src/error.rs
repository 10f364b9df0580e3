use std::io::{self, SeekFrom};
use std::path::PathBuf;

/// Errors surfaced while walking a file backwards.
///
/// Reaching the start of the file is not an error: readers signal it by
/// returning `Ok(None)`. Every variant here wraps the [`io::Error`] that caused
/// it, and none of them are retried internally.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file could not be opened, or its size could not be determined.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Seeking the handle failed.
    ///
    /// `target` is `SeekFrom::End(0)` when the failure happened while sizing
    /// a handle passed to [`ReverseLineReader::from_reader`](crate::ReverseLineReader::from_reader).
    #[error("failed to seek to {target:?}: {source}")]
    Seek {
        target: SeekFrom,
        #[source]
        source: io::Error,
    },

    /// Reading the chunk that starts at `offset` failed.
    #[error("failed to read chunk at byte {offset}: {source}")]
    Read {
        offset: u64,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// The kind of the underlying I/O failure.
    ///
    /// Lets callers tell `NotFound` from `PermissionDenied` without matching
    /// on the variant.
    ///
    /// ```
    /// use std::io::ErrorKind;
    ///
    /// let err = revline::ReverseLineReader::open("/no/such/file").unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::NotFound);
    /// ```
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Error::Open { source, .. }
            | Error::Seek { source, .. }
            | Error::Read { source, .. } => source.kind(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
