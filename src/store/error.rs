use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by document stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record {id} not found in collection {collection}")]
    NotFound { collection: String, id: String },

    #[error("invalid snapshot token {0:?}: expected a decimal version")]
    InvalidSnapshot(String),

    #[error("invalid version token {0:?}: expected a decimal version of at most 19 digits")]
    InvalidVersion(String),

    #[error("version clock exhausted: no version left after {0}")]
    VersionExhausted(u64),

    #[error("invalid {kind} name {name:?}")]
    InvalidName { kind: &'static str, name: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed record file {}: {source}", path.display())]
    Serde {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("corrupt record file {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}
