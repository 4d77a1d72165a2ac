//! Document store abstraction
//!
//! Capability contract of the document-database collaborator: add a document
//! to a named collection and receive its server-assigned identifier, patch an
//! existing document, and read documents back. Implementations must not
//! interpret document contents.

use async_trait::async_trait;
use cinelog_core::AppError;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Document database abstraction
///
/// All document backends (Postgres, in-memory) must implement this trait.
/// Documents are schemaless JSON values grouped into named collections; the
/// store assigns each added document its identifier.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a new document in `collection` and return the server-assigned
    /// identifier.
    async fn add_document(&self, collection: &str, document: JsonValue)
        -> Result<Uuid, AppError>;

    /// Merge `patch` into an existing document's fields.
    ///
    /// Returns `AppError::NotFound` when the document does not exist.
    async fn update_document(
        &self,
        collection: &str,
        id: Uuid,
        patch: JsonValue,
    ) -> Result<(), AppError>;

    /// Fetch a document by identifier.
    async fn get_document(&self, collection: &str, id: Uuid)
        -> Result<Option<JsonValue>, AppError>;

    /// List all documents in a collection, oldest first.
    async fn list_documents(&self, collection: &str) -> Result<Vec<JsonValue>, AppError>;
}
