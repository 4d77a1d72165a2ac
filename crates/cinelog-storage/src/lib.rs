//! Cinelog Storage Library
//!
//! This crate provides the blob-storage abstraction and implementations for
//! Cinelog: the `Storage` trait plus S3 and local-filesystem backends.
//!
//! # Storage key format
//!
//! Cover photos are stored under `movies/{millis}_{filename}` where `millis`
//! is a monotonically increasing timestamp component, so two uploads of files
//! sharing a name never collide. Keys must not contain `..` or a leading `/`.
//! Key generation is centralized in the `keys` module so all backends stay
//! consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use cinelog_core::StorageBackend;
pub use factory::create_storage;
pub use keys::{photo_key, sanitize_filename};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
