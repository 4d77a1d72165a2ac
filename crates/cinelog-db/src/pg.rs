//! Postgres-backed document store (JSONB rows in the `documents` table).

use async_trait::async_trait;
use cinelog_core::AppError;
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

use crate::documents::DocumentStore;

/// Document store over a Postgres pool. Each document is one JSONB row keyed
/// by (collection, id); patches merge via the JSONB `||` operator.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn add_document(
        &self,
        collection: &str,
        document: JsonValue,
    ) -> Result<Uuid, AppError> {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO documents (collection, data) VALUES ($1, $2) RETURNING id",
        )
        .bind(collection)
        .bind(&document)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(collection = %collection, id = %id, "Document added");

        Ok(id)
    }

    async fn update_document(
        &self,
        collection: &str,
        id: Uuid,
        patch: JsonValue,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE documents SET data = data || $3, updated_at = now() \
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .bind(&patch)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Document {} not found in collection {}",
                id, collection
            )));
        }

        tracing::debug!(collection = %collection, id = %id, "Document updated");

        Ok(())
    }

    async fn get_document(
        &self,
        collection: &str,
        id: Uuid,
    ) -> Result<Option<JsonValue>, AppError> {
        let document: Option<JsonValue> =
            sqlx::query_scalar("SELECT data FROM documents WHERE collection = $1 AND id = $2")
                .bind(collection)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(document)
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<JsonValue>, AppError> {
        let documents: Vec<JsonValue> = sqlx::query_scalar(
            "SELECT data FROM documents WHERE collection = $1 ORDER BY created_at ASC",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }
}
