//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use cinelog_core::StorageBackend;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait.
/// This allows the submission pipeline to work with any storage backend
/// without coupling to specific implementation details.
///
/// Storing a blob and resolving its public locator are deliberately two
/// calls: `upload` reports completion only, and `public_url` is invoked
/// afterwards for the same key. Callers chain the two explicitly.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload a blob under the given storage key. Completion is the only
    /// signal; no progress is surfaced.
    async fn upload(
        &self,
        storage_key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<()>;

    /// Resolve the publicly accessible URL for a previously stored key.
    async fn public_url(&self, storage_key: &str) -> StorageResult<String>;

    /// Delete a blob by its storage key. Deleting an absent key is not an
    /// error for backends that can tell the difference.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if a blob exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
