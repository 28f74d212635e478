//! In-memory blob storage.
//!
//! Mirrors browser local-storage semantics, including an optional byte quota
//! so quota failures can be exercised without a real backend.

use super::{BlobStorage, StorageError, StorageResult};
use std::collections::HashMap;

/// `HashMap`-backed blob storage with an optional total byte quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStorage {
    blobs: HashMap<String, String>,
    quota_bytes: Option<usize>,
    unavailable: bool,
}

impl MemoryBlobStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the summed length of all keys and values.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Seeds one blob directly, bypassing the quota.
    pub fn with_blob(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.blobs.insert(key.into(), value.into());
        self
    }

    /// Makes every subsequent read and write fail with `Unavailable`.
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Returns the raw blob without going through the storage contract.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.blobs
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }

    fn ensure_available(&self) -> StorageResult<()> {
        if self.unavailable {
            return Err(StorageError::Unavailable(
                "memory storage disabled".to_string(),
            ));
        }
        Ok(())
    }
}

impl BlobStorage for MemoryBlobStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.ensure_available()?;
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.ensure_available()?;
        if let Some(limit) = self.quota_bytes {
            let requested = self.used_bytes_without(key) + key.len() + value.len();
            if requested > limit {
                return Err(StorageError::QuotaExceeded { limit, requested });
            }
        }
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
