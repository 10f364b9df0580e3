#![allow(dead_code)]

use revline::ReverseLineReader;
use std::fs;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

pub fn write_file(dir: &Path, content: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join("input.txt");
    fs::write(&path, content).unwrap();
    path
}

/// Read every remaining line, asserting the reader stays exhausted afterwards.
pub fn drain<R: Read + Seek>(reader: &mut ReverseLineReader<R>) -> Vec<Vec<u8>> {
    let mut lines = Vec::new();
    while let Some(line) = reader.read_line_bytes().unwrap() {
        lines.push(line);
    }
    assert_eq!(reader.read_line_bytes().unwrap(), None);
    lines
}

pub fn drain_strings<R: Read + Seek>(reader: &mut ReverseLineReader<R>) -> Vec<String> {
    drain(reader)
        .into_iter()
        .map(|l| String::from_utf8(l).unwrap())
        .collect()
}

/// Lines of `content` read front to back, with one trailing newline ignored.
pub fn forward_lines(content: &[u8]) -> Vec<Vec<u8>> {
    if content.is_empty() {
        return Vec::new();
    }
    let body = content.strip_suffix(b"\n").unwrap_or(content);
    body.split(|&b| b == b'\n').map(<[u8]>::to_vec).collect()
}

pub fn reversed(content: &[u8]) -> Vec<Vec<u8>> {
    let mut lines = forward_lines(content);
    lines.reverse();
    lines
}
