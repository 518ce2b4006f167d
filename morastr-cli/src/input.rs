//! Reading text from a file or standard input

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::error::CliError;

/// Read raw bytes from `path`, or from standard input when absent
///
/// Decoding is left to the core `*_bytes` entry points so malformed input
/// is reported with the offset of the first bad byte.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => read_file(path),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read standard input")?;
            Ok(buf)
        }
    }
}

/// Read a file's bytes
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()).into());
    }
    fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Remove line breaks so lines are counted as one text
///
/// CR and LF never occur inside a multi-byte UTF-8 sequence.
pub fn strip_line_breaks(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .copied()
        .filter(|&b| b != b'\n' && b != b'\r')
        .collect()
}
