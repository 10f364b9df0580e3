mod common;

use common::write_file;
use revline::{tail, tail_bytes, tail_from, Error, ReverseLineReader};
use std::io::{self, Cursor, ErrorKind, Read, Seek, SeekFrom};
use tempfile::tempdir;

#[test]
fn test_tail_fewer_than_available() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "one\ntwo\nthree\nfour\n");

    assert_eq!(tail(&path, 2).unwrap(), vec!["three", "four"]);
}

#[test]
fn test_tail_exactly_all_lines() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "one\ntwo\nthree");

    assert_eq!(tail(&path, 3).unwrap(), vec!["one", "two", "three"]);
}

#[test]
fn test_tail_more_than_available() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "one\ntwo\n");

    assert_eq!(tail(&path, 10).unwrap(), vec!["one", "two"]);
}

#[test]
fn test_tail_huge_n_does_not_preallocate() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "only\n");

    assert_eq!(tail(&path, usize::MAX).unwrap(), vec!["only"]);
}

#[test]
fn test_tail_zero() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "one\ntwo\n");

    assert!(tail(&path, 0).unwrap().is_empty());
    // Zero lines never touches the file, even a missing one.
    assert!(tail(dir.path().join("missing"), 0).unwrap().is_empty());
}

#[test]
fn test_tail_empty_file() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "");

    assert!(tail(&path, 5).unwrap().is_empty());
}

#[test]
fn test_tail_keeps_empty_lines() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "1st line\n2nd line\n3rd line\n\n4th line\n\n");

    assert_eq!(tail(&path, 4).unwrap(), vec!["3rd line", "", "4th line", ""]);
}

#[test]
fn test_tail_across_chunks() {
    let dir = tempdir().unwrap();
    let content: String = (0..5000).map(|i| format!("{i:05}\n")).collect();
    let path = write_file(dir.path(), &content);

    let last = tail(&path, 1500).unwrap();
    assert_eq!(last.len(), 1500);
    assert_eq!(last.first().map(String::as_str), Some("03500"));
    assert_eq!(last.last().map(String::as_str), Some("04999"));
}

#[test]
fn test_tail_bytes_is_binary_safe() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), [b'a', b'\n', 0xff, 0x00, b'\n']);

    assert_eq!(
        tail_bytes(&path, 5).unwrap(),
        vec![b"a".to_vec(), vec![0xff, 0x00]]
    );
}

#[test]
fn test_tail_missing_file() {
    let dir = tempdir().unwrap();

    let err = tail(dir.path().join("missing"), 3).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_tail_from_continues_backwards() {
    let mut reader =
        ReverseLineReader::from_reader_with_chunk_size(Cursor::new("1\n2\n3\n4\n5\n"), 2).unwrap();

    assert_eq!(
        tail_from(&mut reader, 2).unwrap(),
        vec![b"4".to_vec(), b"5".to_vec()]
    );
    assert_eq!(
        tail_from(&mut reader, 2).unwrap(),
        vec![b"2".to_vec(), b"3".to_vec()]
    );
    assert_eq!(tail_from(&mut reader, 2).unwrap(), vec![b"1".to_vec()]);
    assert!(tail_from(&mut reader, 2).unwrap().is_empty());
}

/// Serves the first chunk, then fails every read after the second seek.
struct FailsOnSecondChunk {
    inner: Cursor<Vec<u8>>,
    chunk_seeks: usize,
}

impl Read for FailsOnSecondChunk {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.chunk_seeks >= 2 {
            return Err(io::Error::other("device went away"));
        }
        self.inner.read(buf)
    }
}

impl Seek for FailsOnSecondChunk {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        if let SeekFrom::Start(_) = pos {
            self.chunk_seeks += 1;
        }
        self.inner.seek(pos)
    }
}

#[test]
fn test_tail_from_drops_collected_lines_on_error() {
    let handle = FailsOnSecondChunk {
        inner: Cursor::new(b"1\n2\n3\n4\n".to_vec()),
        chunk_seeks: 0,
    };
    let mut reader = ReverseLineReader::from_reader_with_chunk_size(handle, 4).unwrap();

    // "4" comes out of the first chunk before the second one fails.
    let result = tail_from(&mut reader, 4);
    match result {
        Err(Error::Read { offset, .. }) => assert_eq!(offset, 0),
        other => panic!("expected a read error and no lines, got {other:?}"),
    }
}
