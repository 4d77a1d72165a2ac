//! Typed movie collection over the document store.

use cinelog_core::constants::MOVIES_COLLECTION;
use cinelog_core::models::{MovieDraft, MovieRecord};
use cinelog_core::AppError;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::documents::DocumentStore;

/// Movie records in the shared `movies` collection.
///
/// `create` preserves the collaborator call sequence the catalog relies on:
/// the document is added first, then the server-assigned identifier is
/// written back into the document body, so every persisted record's `id`
/// field equals its own document key.
#[derive(Clone)]
pub struct MovieCollection {
    store: Arc<dyn DocumentStore>,
}

impl MovieCollection {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Persist a draft and return the full record.
    ///
    /// The id write-back is awaited and its failure propagated; a record
    /// without a self-referencing id never counts as created.
    pub async fn create(&self, draft: &MovieDraft) -> Result<MovieRecord, AppError> {
        let document = serde_json::to_value(draft)?;
        let id = self.store.add_document(MOVIES_COLLECTION, document).await?;

        self.store
            .update_document(MOVIES_COLLECTION, id, json!({ "id": id }))
            .await?;

        tracing::info!(movie_id = %id, name = %draft.name, "Movie record created");

        Ok(MovieRecord::from_draft(id, draft))
    }

    /// Fetch one movie record.
    pub async fn get(&self, id: Uuid) -> Result<Option<MovieRecord>, AppError> {
        let document = self.store.get_document(MOVIES_COLLECTION, id).await?;
        Ok(document.and_then(|d| serde_json::from_value(d).ok()))
    }

    /// List the shared movie collection, oldest first. Documents that fail to
    /// deserialize are skipped with a warning rather than failing the listing.
    pub async fn list(&self) -> Result<Vec<MovieRecord>, AppError> {
        let documents = self.store.list_documents(MOVIES_COLLECTION).await?;

        let mut records = Vec::with_capacity(documents.len());
        for document in documents {
            match serde_json::from_value::<MovieRecord>(document) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed movie document");
                }
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocumentStore;

    fn draft() -> MovieDraft {
        MovieDraft {
            name: "Dune".to_string(),
            rating: 5,
            analysis: "Great.".to_string(),
            photo_locator: "https://cdn.example.com/movies/1_poster.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_writes_id_into_document() {
        let store = Arc::new(MemoryDocumentStore::new());
        let movies = MovieCollection::new(store.clone());

        let record = movies.create(&draft()).await.unwrap();

        let document = store
            .get_document(MOVIES_COLLECTION, record.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(document["id"], json!(record.id));
        assert_eq!(document["name"], "Dune");
        assert_eq!(
            document["photo_locator"],
            "https://cdn.example.com/movies/1_poster.jpg"
        );
    }

    #[tokio::test]
    async fn test_get_roundtrip() {
        let movies = MovieCollection::new(Arc::new(MemoryDocumentStore::new()));
        let created = movies.create(&draft()).await.unwrap();

        let fetched = movies.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.rating, 5);

        assert!(movies.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_skips_malformed_documents() {
        let store = Arc::new(MemoryDocumentStore::new());
        let movies = MovieCollection::new(store.clone());

        movies.create(&draft()).await.unwrap();
        store
            .add_document(MOVIES_COLLECTION, json!({"unexpected": true}))
            .await
            .unwrap();

        let listed = movies.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Dune");
    }
}
