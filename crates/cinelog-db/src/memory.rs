//! In-memory document store
//!
//! Backs tests and local development without a database. Mirrors the
//! Postgres store's observable behavior, including id assignment and
//! patch-merge semantics.

use async_trait::async_trait;
use cinelog_core::AppError;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::documents::DocumentStore;

/// In-memory document store keyed by (collection, id). Insertion order per
/// collection is preserved for listing.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<Mutex<HashMap<(String, Uuid), JsonValue>>>,
    order: Arc<Mutex<Vec<(String, Uuid)>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn add_document(
        &self,
        collection: &str,
        document: JsonValue,
    ) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        let key = (collection.to_string(), id);
        self.documents.lock().unwrap().insert(key.clone(), document);
        self.order.lock().unwrap().push(key);
        Ok(id)
    }

    async fn update_document(
        &self,
        collection: &str,
        id: Uuid,
        patch: JsonValue,
    ) -> Result<(), AppError> {
        let mut documents = self.documents.lock().unwrap();
        let existing = documents
            .get_mut(&(collection.to_string(), id))
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Document {} not found in collection {}",
                    id, collection
                ))
            })?;

        match (existing.as_object_mut(), patch.as_object()) {
            (Some(target), Some(fields)) => {
                for (k, v) in fields {
                    target.insert(k.clone(), v.clone());
                }
            }
            _ => *existing = patch,
        }

        Ok(())
    }

    async fn get_document(
        &self,
        collection: &str,
        id: Uuid,
    ) -> Result<Option<JsonValue>, AppError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .get(&(collection.to_string(), id))
            .cloned())
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<JsonValue>, AppError> {
        let documents = self.documents.lock().unwrap();
        let order = self.order.lock().unwrap();
        Ok(order
            .iter()
            .filter(|(c, _)| c == collection)
            .filter_map(|key| documents.get(key).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_add_and_get() {
        let store = MemoryDocumentStore::new();
        let id = store
            .add_document("movies", json!({"name": "Dune"}))
            .await
            .unwrap();

        let document = store.get_document("movies", id).await.unwrap().unwrap();
        assert_eq!(document["name"], "Dune");

        assert!(store
            .get_document("other", id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryDocumentStore::new();
        let id = store
            .add_document("movies", json!({"name": "Dune", "rating": 5}))
            .await
            .unwrap();

        store
            .update_document("movies", id, json!({"id": id}))
            .await
            .unwrap();

        let document = store.get_document("movies", id).await.unwrap().unwrap();
        assert_eq!(document["name"], "Dune");
        assert_eq!(document["rating"], 5);
        assert_eq!(document["id"], json!(id));
    }

    #[tokio::test]
    async fn test_update_missing_document_is_not_found() {
        let store = MemoryDocumentStore::new();
        let result = store
            .update_document("movies", Uuid::new_v4(), json!({"id": "x"}))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = MemoryDocumentStore::new();
        store
            .add_document("movies", json!({"name": "First"}))
            .await
            .unwrap();
        store
            .add_document("movies", json!({"name": "Second"}))
            .await
            .unwrap();
        store
            .add_document("books", json!({"name": "Elsewhere"}))
            .await
            .unwrap();

        let listed = store.list_documents("movies").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0]["name"], "First");
        assert_eq!(listed[1]["name"], "Second");
    }
}
