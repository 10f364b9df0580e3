use crate::error::{Error, Result};
use log::{debug, trace, warn};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Number of bytes requested per backward read unless the builder says otherwise.
///
/// Raise it for very large files to trade memory per fetch for fewer seeks.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

const NEWLINE: u8 = b'\n';

/// Where a reader stands in its walk towards byte 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Progress {
    /// Buffered lines remain, or part of the file has not been read yet.
    HasMore,
    /// Byte 0 has been read and only the first line of the file is left.
    AtLastLine,
    /// Every line has been emitted.
    Exhausted,
}

/// Reads a file line by line, starting from the last line.
///
/// The file is pulled in backwards in chunks of [`DEFAULT_CHUNK_SIZE`] bytes
/// (configurable through [`ReverseLineReader::builder`]), so memory use is
/// bounded by the chunk size plus the longest line, not by the file size.
///
/// Lines are split on `\n` only and returned without it. A single trailing
/// newline at the end of the file does not produce an empty last line, but
/// every other empty line is returned. `\r` and any other bytes are kept as-is.
///
/// The handle is released when the reader is dropped or [`closed`](Self::close).
///
/// # Examples
///
/// ```
/// use revline::ReverseLineReader;
/// use std::io::Cursor;
///
/// let mut reader = ReverseLineReader::from_reader(Cursor::new("one\ntwo\n\nfour\n")).unwrap();
/// assert_eq!(reader.read_line().unwrap().as_deref(), Some("four"));
/// assert_eq!(reader.read_line().unwrap().as_deref(), Some(""));
/// assert_eq!(reader.read_line().unwrap().as_deref(), Some("two"));
/// assert_eq!(reader.read_line().unwrap().as_deref(), Some("one"));
/// assert_eq!(reader.read_line().unwrap(), None);
/// ```
pub struct ReverseLineReader<R = File> {
    inner: R,
    /// Start of the region not yet pulled into `pending`.
    cursor: u64,
    len: u64,
    chunk_size: usize,
    /// Lines of the buffered region in file order. The first entry may be the
    /// tail end of a line that starts before `cursor`.
    pending: Vec<Vec<u8>>,
    progress: Progress,
}

impl<R> std::fmt::Debug for ReverseLineReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReverseLineReader")
            .field("cursor", &self.cursor)
            .field("len", &self.len)
            .field("chunk_size", &self.chunk_size)
            .field("buffered_lines", &self.pending.len())
            .field("progress", &self.progress)
            .finish()
    }
}

impl ReverseLineReader<File> {
    /// Open a file for reverse reading with the default chunk size.
    ///
    /// Only the file size is queried; no content is read until the first
    /// call to [`read_line`](Self::read_line).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Open`] if the file cannot be opened or its metadata
    /// cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder(path).open()
    }

    /// Create a builder for opening a file with non-default settings.
    ///
    /// ```no_run
    /// use revline::ReverseLineReader;
    ///
    /// let reader = ReverseLineReader::builder("/var/log/syslog")
    ///     .chunk_size(64 * 1024)
    ///     .open()?;
    /// # Ok::<(), revline::Error>(())
    /// ```
    pub fn builder(path: impl AsRef<Path>) -> ReverseLineReaderBuilder {
        ReverseLineReaderBuilder {
            path: path.as_ref().to_path_buf(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl<R: Read + Seek> ReverseLineReader<R> {
    /// Wrap an already-open handle, using the default chunk size.
    ///
    /// The handle is sized by seeking to its end. Its current position is
    /// irrelevant; the whole stream is read.
    pub fn from_reader(inner: R) -> Result<Self> {
        Self::from_reader_with_chunk_size(inner, DEFAULT_CHUNK_SIZE)
    }

    /// Wrap an already-open handle, reading `chunk_size` bytes per fetch.
    ///
    /// A `chunk_size` of 0 is treated as 1.
    pub fn from_reader_with_chunk_size(mut inner: R, chunk_size: usize) -> Result<Self> {
        let len = inner.seek(SeekFrom::End(0)).map_err(|source| Error::Seek {
            target: SeekFrom::End(0),
            source,
        })?;
        Ok(Self::with_len(inner, len, chunk_size))
    }

    fn with_len(inner: R, len: u64, chunk_size: usize) -> Self {
        let progress = if len == 0 {
            Progress::Exhausted
        } else {
            Progress::HasMore
        };
        ReverseLineReader {
            inner,
            cursor: len,
            len,
            chunk_size: chunk_size.max(1),
            pending: Vec::new(),
            progress,
        }
    }

    /// Return the next line walking backwards, as raw bytes.
    ///
    /// Returns `Ok(None)` once the first line of the file has been returned,
    /// and on every call after that. Bytes are not decoded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Seek`] or [`Error::Read`] if fetching the next chunk
    /// fails. The reader's position is left untouched, so the call may be
    /// retried.
    pub fn read_line_bytes(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            match self.progress {
                Progress::Exhausted => return Ok(None),
                Progress::AtLastLine => {
                    self.progress = Progress::Exhausted;
                    return Ok(self.pending.pop());
                }
                // The first buffered entry may still be incomplete, so it is
                // never emitted from here.
                Progress::HasMore if self.pending.len() > 1 => return Ok(self.pending.pop()),
                Progress::HasMore if self.cursor == 0 => self.progress = Progress::AtLastLine,
                Progress::HasMore => self.fetch_chunk()?,
            }
        }
    }

    /// Return the next line walking backwards, decoded as UTF-8.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD rather than reported as an error.
    /// Use [`read_line_bytes`](Self::read_line_bytes) to get the exact bytes.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        Ok(self.read_line_bytes()?.map(decode_lossy))
    }

    /// Pull the chunk just before `cursor` and re-split the buffer.
    fn fetch_chunk(&mut self) -> Result<()> {
        let step = self.cursor.min(self.chunk_size as u64);
        let start = self.cursor - step;

        self.inner
            .seek(SeekFrom::Start(start))
            .map_err(|source| Error::Seek {
                target: SeekFrom::Start(start),
                source,
            })?;

        let mut chunk = Vec::with_capacity(step as usize);
        let n = (&mut self.inner)
            .take(step)
            .read_to_end(&mut chunk)
            .map_err(|source| Error::Read {
                offset: start,
                source,
            })?;
        if (n as u64) < step {
            warn!("short read at byte {start}: expected {step} bytes, got {n}");
        }
        trace!("fetched {n} bytes at offset {start}");

        match self.pending.pop() {
            // Leftover fragment continues the last line of this chunk.
            Some(fragment) => chunk.extend_from_slice(&fragment),
            // First fetch: the chunk ends at end of file.
            None => {
                if chunk.last() == Some(&NEWLINE) {
                    chunk.pop();
                }
            }
        }

        self.pending = chunk.split(|&b| b == NEWLINE).map(<[u8]>::to_vec).collect();
        self.cursor = start;
        Ok(())
    }

    /// Byte offset of the earliest content read so far.
    ///
    /// Starts at the file size and reaches 0 once the first chunk of the file
    /// has been fetched.
    pub fn position(&self) -> u64 {
        self.cursor
    }

    /// Size of the underlying file when the reader was created.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` if the underlying file was empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bytes requested per backward read.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Release the handle.
    ///
    /// Dropping the reader does the same; this exists to make the end of a
    /// traversal explicit.
    pub fn close(self) {
        drop(self.inner);
    }

    /// Give back the handle. Its position is unspecified.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// Yields lines from last to first.
///
/// After yielding an error the iterator ends, so adapters such as
/// `filter_map(Result::ok)` terminate even if the handle keeps failing. Call
/// [`read_line_bytes`](ReverseLineReader::read_line_bytes) directly to retry
/// after an error instead.
impl<R: Read + Seek> Iterator for ReverseLineReader<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.read_line_bytes().transpose();
        if matches!(item, Some(Err(_))) {
            self.progress = Progress::Exhausted;
        }
        item
    }
}

/// Builder for a [`ReverseLineReader`] over a file.
///
/// Created by [`ReverseLineReader::builder`].
#[derive(Debug, Clone)]
pub struct ReverseLineReaderBuilder {
    path: PathBuf,
    chunk_size: usize,
}

impl ReverseLineReaderBuilder {
    /// Set the number of bytes read per backward fetch. 0 is treated as 1.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Open the file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Open`] if the file cannot be opened or sized.
    pub fn open(self) -> Result<ReverseLineReader<File>> {
        let file = File::open(&self.path).map_err(|source| Error::Open {
            path: self.path.clone(),
            source,
        })?;
        let len = file
            .metadata()
            .map_err(|source| Error::Open {
                path: self.path.clone(),
                source,
            })?
            .len();

        debug!(
            "opened {} for reverse reading ({len} bytes, {}-byte chunks)",
            self.path.display(),
            self.chunk_size
        );
        Ok(ReverseLineReader::with_len(file, len, self.chunk_size))
    }
}

/// Decode a line as UTF-8, reusing the buffer when it is already valid.
pub(crate) fn decode_lossy(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
