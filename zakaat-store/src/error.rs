//! Store error type.
//!
//! Absence is not an error: `get` returns `None` and `delete` returns `false`.
//! Everything here is an I/O or data problem the caller must see.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// Collection names are lowercase identifiers
    InvalidCollection(String),
    InvalidKey(String),
    /// Collection file exists but could not be read
    Read { path: PathBuf, source: io::Error },
    /// Collection file is not a JSON object of records
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// A record does not have the shape the caller asked for
    Decode {
        collection: String,
        key: String,
        source: serde_json::Error,
    },
    /// A record could not be serialized
    Encode(serde_json::Error),
    /// Collection file could not be written durably
    Write { path: PathBuf, source: io::Error },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCollection(name) => write!(f, "invalid collection name: `{name}`"),
            Self::InvalidKey(key) => write!(f, "invalid record key: `{key}`"),
            Self::Read { path, .. } => write!(f, "failed to read {}", path.display()),
            Self::Corrupt { path, .. } => write!(f, "corrupt collection file {}", path.display()),
            Self::Decode {
                collection, key, ..
            } => write!(f, "record `{key}` in `{collection}` has an unexpected shape"),
            Self::Encode(_) => write!(f, "failed to encode record"),
            Self::Write { path, .. } => write!(f, "failed to write {}", path.display()),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidCollection(_) | Self::InvalidKey(_) => None,
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Corrupt { source, .. } | Self::Decode { source, .. } => Some(source),
            Self::Encode(source) => Some(source),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}
