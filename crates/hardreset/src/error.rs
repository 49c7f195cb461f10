//! Error types for loading models from disk.

use std::path::PathBuf;

use hardreset_decode::DecodeError;
use thiserror::Error;

/// Result type for model loading.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a model pair.
#[derive(Debug, Error)]
pub enum Error {
    /// The path given to the loader does not name a `.meta` file.
    #[error("no .meta file: {}", .0.display())]
    NotMetaFile(PathBuf),

    /// One of the two files could not be opened or read.
    #[error("could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One of the two files is malformed.
    #[error("{}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

impl Error {
    /// The decode failure behind this error, if there is one.
    #[must_use]
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            Self::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}
