//! Error types for model decoding.

use std::fmt;

use thiserror::Error;

use crate::section::SectionKind;

/// Result alias used throughout the crate.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// The region of an `.rhm` payload that ran out of bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// The vertex record with the given index was incomplete.
    Vertices { index: usize },
    /// The index array was incomplete.
    Indices,
    /// The trailing checksum was incomplete.
    Checksum,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertices { index } => write!(f, "vertex {index}"),
            Self::Indices => f.write_str("indices"),
            Self::Checksum => f.write_str("checksum"),
        }
    }
}

/// The kind of literal a recognized key expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    String,
    Vector,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Integer => "an integer",
            Self::String => "a quoted string",
            Self::Vector => "a (x, y, z) vector",
        })
    }
}

/// Errors produced while decoding `.meta` or `.rhm` data.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("expected {expected} section, found {}", describe_found(.found))]
    UnexpectedHeader {
        expected: &'static str,
        found: Option<String>,
    },

    #[error("line {line}: line without =")]
    MissingEquals { line: usize },

    #[error("line {line}: {key} must be {kind}, got {value:?}")]
    InvalidValue {
        line: usize,
        key: String,
        kind: ValueKind,
        value: String,
    },

    #[error("line {line}: {key} must not be negative, got {value}")]
    NegativeValue {
        line: usize,
        key: String,
        value: i64,
    },

    #[error("no {key} defined in {section} section")]
    MissingField {
        section: SectionKind,
        key: &'static str,
    },

    #[error("ChunkStart is {0}, not 0; chunk layout of this file is unsupported")]
    NonZeroChunkStart(i64),

    #[error("error reading mesh {index}: {source}")]
    Mesh {
        index: usize,
        #[source]
        source: Box<DecodeError>,
    },

    #[error("error reading chunk {index}: {source}")]
    Chunk {
        index: usize,
        #[source]
        source: Box<DecodeError>,
    },

    #[error("error reading {region}: unexpected end of file")]
    Truncated { region: Region },

    #[error("rhm data is {count} byte(s) longer than expected")]
    TrailingBytes { count: usize },

    #[error("chunk {chunk} of mesh {mesh} spans indices {start}..{end}, but only {len} exist")]
    ChunkOutOfRange {
        mesh: usize,
        chunk: usize,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("index {position} refers to vertex {value}, but only {vertices} exist")]
    IndexOutOfRange {
        position: usize,
        value: u16,
        vertices: usize,
    },

    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}

#[allow(clippy::ref_option)]
fn describe_found(found: &Option<String>) -> String {
    match found {
        Some(line) => format!("{line:?}"),
        None => "end of file".to_string(),
    }
}

impl DecodeError {
    /// The innermost error, with mesh/chunk context stripped.
    #[must_use]
    pub fn root_cause(&self) -> &DecodeError {
        match self {
            Self::Mesh { source, .. } | Self::Chunk { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_message_carries_positions() {
        let err = DecodeError::Mesh {
            index: 1,
            source: Box::new(DecodeError::Chunk {
                index: 0,
                source: Box::new(DecodeError::MissingField {
                    section: SectionKind::Chunk,
                    key: "StartIndex",
                }),
            }),
        };
        assert_eq!(
            err.to_string(),
            "error reading mesh 1: error reading chunk 0: no StartIndex defined in [Chunk] section"
        );
        assert!(matches!(
            err.root_cause(),
            DecodeError::MissingField { key: "StartIndex", .. }
        ));
    }

    #[test]
    fn truncation_names_region() {
        let err = DecodeError::Truncated {
            region: Region::Vertices { index: 4 },
        };
        assert_eq!(err.to_string(), "error reading vertex 4: unexpected end of file");
    }

    #[test]
    fn header_mismatch_at_eof() {
        let err = DecodeError::UnexpectedHeader {
            expected: "[Mesh]",
            found: None,
        };
        assert_eq!(err.to_string(), "expected [Mesh] section, found end of file");
    }
}
