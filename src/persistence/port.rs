//! Key-value storage port
//!
//! The adapter only ever talks to storage through this trait. Browser builds
//! bind it to `localStorage`/`sessionStorage`; tests and native builds use
//! [`super::MemoryStorage`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Backend missing or disabled (e.g. storage blocked by privacy settings)
    #[error("storage backend unavailable")]
    Unavailable,
    /// Backend refused the operation (quota exceeded, security error, ...)
    #[error("storage operation rejected: {0}")]
    Rejected(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A text key-value store with synchronous calls
pub trait StoragePort {
    /// Short label for log lines
    fn name(&self) -> &str;

    /// `Ok(None)` when the key is absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Best-effort; removing an absent key is not an error
    fn remove(&self, key: &str) -> StorageResult<()>;
}
