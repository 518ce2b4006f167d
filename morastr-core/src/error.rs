//! Layered error types
//!
//! Validation failures carry the offset and the rule that was violated so
//! callers can branch on them without parsing messages.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Segmentation rule violated by a character in strict mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValidationKind {
    /// Small kana with no preceding syllable to merge into
    OrphanCombining,
    /// Small kana following a mora that already merged one
    StackedCombining,
    /// Length mark with no preceding syllable to extend
    OrphanLengthMark,
    /// Non-Japanese content while it is disallowed
    DisallowedContent,
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationKind::OrphanCombining => write!(f, "small kana without a preceding syllable"),
            ValidationKind::StackedCombining => {
                write!(f, "small kana after an already combined mora")
            }
            ValidationKind::OrphanLengthMark => {
                write!(f, "length mark without a preceding syllable")
            }
            ValidationKind::DisallowedContent => write!(f, "non-Japanese content"),
        }
    }
}

/// Strict-mode segmentation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("ill-formed mora string: {kind} '{ch}' (U+{code:04X}) at offset {offset}", code = code_point(.ch))]
pub struct ValidationError {
    /// Code-point offset of the offending character in the normalized text
    pub offset: usize,
    /// The offending character
    pub ch: char,
    /// Which rule was violated
    pub kind: ValidationKind,
}

fn code_point(ch: &char) -> u32 {
    u32::from(*ch)
}

/// Errors raised while loading mapping tables
#[derive(Error, Debug)]
pub enum TableError {
    /// The mapping document could not be parsed
    #[error("failed to parse mapping table {name}: {reason}")]
    Parse {
        /// Name of the table source
        name: String,
        /// Parser message
        reason: String,
    },

    /// The mapping file could not be read
    #[error("failed to read mapping table: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by the public operations
#[derive(Error, Debug)]
pub enum MoraError {
    /// Input bytes are not valid UTF-8
    #[error("encoding error: invalid UTF-8 after byte {valid_up_to}")]
    Encoding {
        /// Length of the longest valid prefix
        valid_up_to: usize,
    },

    /// Strict segmentation rejected the text
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Mora index out of range
    #[error("mora index {index} out of range for length {len}")]
    Index {
        /// The requested index
        index: usize,
        /// Number of morae in the string
        len: usize,
    },

    /// Mapping table error
    #[error(transparent)]
    Table(#[from] TableError),
}

impl From<std::str::Utf8Error> for MoraError {
    fn from(err: std::str::Utf8Error) -> Self {
        MoraError::Encoding {
            valid_up_to: err.valid_up_to(),
        }
    }
}

impl MoraError {
    /// The validation failure, if this is one
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            MoraError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for mora operations
pub type Result<T> = std::result::Result<T, MoraError>;
