//! Movie-submission pipeline
//!
//! The one workflow with real sequencing and partial-failure exposure: given
//! a valid draft and a staged cover photo, store the blob, resolve its public
//! locator, and persist the record referencing that locator. The three stages
//! are an explicit awaited call chain; each stage starts only after the
//! previous one completed.

use cinelog_core::models::{MovieDraft, MovieRecord, StagedAsset};
use cinelog_core::AppError;
use cinelog_db::MovieCollection;
use cinelog_storage::{keys, Storage};
use std::sync::Arc;
use uuid::Uuid;

use super::drafts::DraftSessions;

/// Orchestrates one submission attempt per call.
///
/// Preconditions (draft validity, staged asset, no submission already in
/// flight for the session) are checked synchronously before any collaborator
/// interaction. Failures in any stage leave the session's draft and staged
/// asset intact for retry; a failure after the blob was stored deletes the
/// blob again so no orphan remains.
#[derive(Clone)]
pub struct MovieSubmissionService {
    storage: Arc<dyn Storage>,
    movies: MovieCollection,
    sessions: DraftSessions,
}

impl MovieSubmissionService {
    pub fn new(storage: Arc<dyn Storage>, movies: MovieCollection, sessions: DraftSessions) -> Self {
        Self {
            storage,
            movies,
            sessions,
        }
    }

    /// Run the full pipeline for a session.
    #[tracing::instrument(skip(self), fields(session_id = %session_id))]
    pub async fn submit(&self, session_id: Uuid) -> Result<MovieRecord, AppError> {
        let (mut draft, asset) = self.sessions.begin_submission(session_id)?;

        match self.run_pipeline(&mut draft, &asset).await {
            Ok(record) => {
                self.sessions.finish_submission_success(session_id);
                Ok(record)
            }
            Err(e) => {
                self.sessions.finish_submission_failure(session_id);
                Err(e)
            }
        }
    }

    async fn run_pipeline(
        &self,
        draft: &mut MovieDraft,
        asset: &StagedAsset,
    ) -> Result<MovieRecord, AppError> {
        // Time-based component keeps keys unique across uploads of files
        // sharing a name.
        let storage_key = keys::photo_key(&asset.original_filename);

        // Stage 1: store the blob. Completion is the only signal we need.
        self.storage
            .upload(&storage_key, &asset.content_type, asset.data.to_vec())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, key = %storage_key, "Cover upload failed");
                AppError::Storage(format!("Failed to upload cover: {}", e))
            })?;

        // Stage 2: resolve the public locator, strictly after the upload
        // completed.
        let locator = self.storage.public_url(&storage_key).await.map_err(|e| {
            tracing::error!(error = %e, key = %storage_key, "Locator resolution failed");
            AppError::Storage(format!("Failed to resolve cover locator: {}", e))
        })?;

        tracing::info!(key = %storage_key, locator = %locator, "Cover stored");

        // Stage 3: persist the record referencing the locator. The collection
        // writes the server-assigned id back into the document.
        draft.photo_locator = locator;

        match self.movies.create(draft).await {
            Ok(record) => Ok(record),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    key = %storage_key,
                    "Movie persist failed; removing uploaded cover"
                );
                // Compensation: don't leave an orphaned blob behind.
                if let Err(cleanup_err) = self.storage.delete(&storage_key).await {
                    tracing::warn!(
                        error = %cleanup_err,
                        key = %storage_key,
                        "Failed to clean up cover after persist error"
                    );
                }
                Err(e)
            }
        }
    }
}
