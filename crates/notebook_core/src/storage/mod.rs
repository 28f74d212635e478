//! Local key-value blob storage.
//!
//! # Responsibility
//! - Define the narrow `get`/`set` contract the note store persists through.
//! - Provide a SQLite-backed implementation and an in-memory one.
//!
//! # Invariants
//! - A key maps to at most one blob; `set` replaces the previous value.
//! - Backends report failures as `StorageError` and never panic.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryBlobStorage;
pub use sqlite::SqliteBlobStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by a blob storage backend.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Write would grow the backend past its byte quota.
    QuotaExceeded { limit: usize, requested: usize },
    /// Backend cannot be reached at all.
    Unavailable(String),
    /// Collection could not be serialized into a blob.
    Encode(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::QuotaExceeded { limit, requested } => write!(
                f,
                "storage quota exceeded: {requested} bytes requested, limit is {limit}"
            ),
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
            Self::Encode(err) => write!(f, "cannot encode blob: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::QuotaExceeded { .. } | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Named-blob persistence contract.
pub trait BlobStorage {
    /// Reads the blob stored under `key`, `None` when absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous blob.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<T: BlobStorage + ?Sized> BlobStorage for Box<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}
