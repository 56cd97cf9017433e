use thiserror::Error;

use crate::record::{RecordError, RecordType};

use super::Architecture;

/// Document-level parse failure. Always carries the 0-based index of the
/// offending line; a bad line anywhere invalidates the whole document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RecordError,
    },

    #[error("line {line}: {record_type} record must carry {expected} data bytes, got {actual}")]
    RecordLength {
        line: usize,
        record_type: RecordType,
        expected: usize,
        actual: usize,
    },
}

impl ParseError {
    /// 0-based index of the line that failed.
    pub fn line(&self) -> usize {
        match self {
            Self::Record { line, .. } | Self::RecordLength { line, .. } => *line,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("section {start:#X}..{end:#X} exceeds the {architecture} address ceiling {ceiling:#X}")]
    AddressRange {
        start: u32,
        end: u64,
        architecture: Architecture,
        ceiling: u32,
    },

    #[error("bytes_per_line must not be zero")]
    InvalidBytesPerLine,
}
