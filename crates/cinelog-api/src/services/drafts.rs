//! Per-session draft state.
//!
//! Each client session owns one movie draft, at most one staged cover photo,
//! an in-flight submission flag, and a close-notification channel. The store
//! is shared behind a mutex with short critical sections; no lock is held
//! across await points.

use cinelog_core::models::{MovieDraft, StagedAsset};
use cinelog_core::AppError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use utoipa::ToSchema;
use uuid::Uuid;

/// User-facing message when the draft fails validation on submit.
pub const FILL_IN_ALL_FIELDS: &str = "Fill in all fields correctly.";

/// User-facing message when no cover photo is staged on submit.
pub const SELECT_COVER_IMAGE: &str = "Select a cover image for the movie.";

const CLOSE_CHANNEL_CAPACITY: usize = 8;

/// Partial draft update. Unknown fields (notably `photo_locator`, which only
/// the pipeline may write) are rejected.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct DraftUpdate {
    pub name: Option<String>,
    pub rating: Option<i32>,
    pub analysis: Option<String>,
}

/// Client-facing view of a session's draft state.
#[derive(Debug, Serialize, ToSchema)]
pub struct DraftView {
    pub draft: MovieDraft,
    pub asset_staged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_data_uri: Option<String>,
}

struct DraftSession {
    draft: MovieDraft,
    asset: Option<StagedAsset>,
    in_flight: bool,
    close_tx: broadcast::Sender<()>,
}

impl DraftSession {
    fn new() -> Self {
        let (close_tx, _) = broadcast::channel(CLOSE_CHANNEL_CAPACITY);
        DraftSession {
            draft: MovieDraft::default(),
            asset: None,
            in_flight: false,
            close_tx,
        }
    }

    fn view(&self) -> DraftView {
        DraftView {
            draft: self.draft.clone(),
            asset_staged: self.asset.is_some(),
            asset_filename: self.asset.as_ref().map(|a| a.original_filename.clone()),
            preview_data_uri: self
                .asset
                .as_ref()
                .and_then(|a| a.preview_data_uri.clone()),
        }
    }
}

/// Shared store of per-session draft state.
#[derive(Clone, Default)]
pub struct DraftSessions {
    sessions: Arc<Mutex<HashMap<Uuid, DraftSession>>>,
}

impl DraftSessions {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_session<R>(&self, session_id: Uuid, f: impl FnOnce(&mut DraftSession) -> R) -> R {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions.entry(session_id).or_insert_with(DraftSession::new);
        f(session)
    }

    /// Current draft state for a session.
    pub fn view(&self, session_id: Uuid) -> DraftView {
        self.with_session(session_id, |s| s.view())
    }

    /// Apply a partial update to the draft. Ratings overwrite as-is with no
    /// range check.
    pub fn update_draft(&self, session_id: Uuid, update: DraftUpdate) -> DraftView {
        self.with_session(session_id, |s| {
            if let Some(name) = update.name {
                s.draft.name = name;
            }
            if let Some(rating) = update.rating {
                s.draft.set_rating(rating);
            }
            if let Some(analysis) = update.analysis {
                s.draft.analysis = analysis;
            }
            s.view()
        })
    }

    /// Stage a cover photo, replacing any prior staged asset, and derive its
    /// preview in the background. Preview derivation is best-effort and never
    /// a submission prerequisite.
    pub fn stage_asset(&self, session_id: Uuid, asset: StagedAsset) -> DraftView {
        let asset_id = asset.id;
        let preview_source = asset.clone();

        let view = self.with_session(session_id, |s| {
            s.asset = Some(asset);
            s.view()
        });

        let sessions = self.clone();
        tokio::spawn(async move {
            match tokio::task::spawn_blocking(move || preview_source.derive_preview_data_uri())
                .await
            {
                Ok(uri) => sessions.set_preview(session_id, asset_id, uri),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to derive cover preview");
                }
            }
        });

        view
    }

    /// Attach a derived preview to the staged asset, unless the asset was
    /// replaced since derivation started.
    pub fn set_preview(&self, session_id: Uuid, asset_id: Uuid, preview_data_uri: String) {
        self.with_session(session_id, |s| match s.asset.as_mut() {
            Some(asset) if asset.id == asset_id => {
                asset.preview_data_uri = Some(preview_data_uri);
            }
            _ => {
                tracing::debug!(asset_id = %asset_id, "Discarding preview for replaced asset");
            }
        });
    }

    /// User-initiated cancel: draft and staged asset return to their initial
    /// empty state.
    pub fn clear(&self, session_id: Uuid) {
        self.with_session(session_id, |s| {
            s.draft.reset();
            s.asset = None;
        });
    }

    /// Check submission preconditions and mark the session in flight.
    ///
    /// Returns a snapshot of the draft and staged asset for the pipeline. No
    /// collaborator interaction happens before this returns Ok.
    pub fn begin_submission(
        &self,
        session_id: Uuid,
    ) -> Result<(MovieDraft, StagedAsset), AppError> {
        self.with_session(session_id, |s| {
            if !s.draft.is_valid() {
                return Err(AppError::InvalidInput(FILL_IN_ALL_FIELDS.to_string()));
            }
            let asset = match s.asset.as_ref() {
                Some(asset) => asset.clone(),
                None => return Err(AppError::InvalidInput(SELECT_COVER_IMAGE.to_string())),
            };
            if s.in_flight {
                return Err(AppError::SubmissionInFlight);
            }
            s.in_flight = true;
            Ok((s.draft.clone(), asset))
        })
    }

    /// Successful submission: reset the session to its initial state and emit
    /// one zero-payload close signal.
    pub fn finish_submission_success(&self, session_id: Uuid) {
        self.with_session(session_id, |s| {
            s.draft.reset();
            s.asset = None;
            s.in_flight = false;
            // No subscriber is fine; the signal carries no payload and
            // expects no acknowledgment.
            let _ = s.close_tx.send(());
        });
    }

    /// Failed submission: only the in-flight flag is cleared; draft and
    /// staged asset stay intact for retry.
    pub fn finish_submission_failure(&self, session_id: Uuid) {
        self.with_session(session_id, |s| {
            s.in_flight = false;
        });
    }

    /// Subscribe to the session's close signal.
    pub fn subscribe_close(&self, session_id: Uuid) -> broadcast::Receiver<()> {
        self.with_session(session_id, |s| s.close_tx.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn asset(filename: &str) -> StagedAsset {
        StagedAsset::new(
            filename.to_string(),
            "image/jpeg".to_string(),
            Bytes::from_static(b"fake image bytes"),
        )
    }

    fn valid_update() -> DraftUpdate {
        DraftUpdate {
            name: Some("Dune".to_string()),
            rating: Some(5),
            analysis: Some("Great.".to_string()),
        }
    }

    #[tokio::test]
    async fn test_update_draft_applies_fields() {
        let sessions = DraftSessions::new();
        let session_id = Uuid::new_v4();

        let view = sessions.update_draft(session_id, valid_update());
        assert_eq!(view.draft.name, "Dune");
        assert_eq!(view.draft.rating, 5);
        assert_eq!(view.draft.analysis, "Great.");
        assert_eq!(view.draft.photo_locator, "");
        assert!(!view.asset_staged);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let sessions = DraftSessions::new();
        let session_id = Uuid::new_v4();
        sessions.update_draft(session_id, valid_update());

        let view = sessions.update_draft(
            session_id,
            DraftUpdate {
                rating: Some(2),
                ..Default::default()
            },
        );
        assert_eq!(view.draft.name, "Dune");
        assert_eq!(view.draft.rating, 2);
    }

    #[tokio::test]
    async fn test_restaging_replaces_asset() {
        let sessions = DraftSessions::new();
        let session_id = Uuid::new_v4();

        sessions.stage_asset(session_id, asset("first.jpg"));
        let view = sessions.stage_asset(session_id, asset("second.jpg"));

        assert!(view.asset_staged);
        assert_eq!(view.asset_filename.as_deref(), Some("second.jpg"));
    }

    #[tokio::test]
    async fn test_stale_preview_is_discarded() {
        let sessions = DraftSessions::new();
        let session_id = Uuid::new_v4();

        let first = asset("first.jpg");
        let first_id = first.id;
        sessions.stage_asset(session_id, first);
        sessions.stage_asset(session_id, asset("second.jpg"));

        sessions.set_preview(session_id, first_id, "data:stale".to_string());

        let view = sessions.view(session_id);
        assert_eq!(view.asset_filename.as_deref(), Some("second.jpg"));
        assert_ne!(view.preview_data_uri.as_deref(), Some("data:stale"));
    }

    #[tokio::test]
    async fn test_begin_submission_rejects_invalid_draft() {
        let sessions = DraftSessions::new();
        let session_id = Uuid::new_v4();
        sessions.stage_asset(session_id, asset("poster.jpg"));

        let err = sessions.begin_submission(session_id).unwrap_err();
        match err {
            AppError::InvalidInput(msg) => assert_eq!(msg, FILL_IN_ALL_FIELDS),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_begin_submission_rejects_missing_asset() {
        let sessions = DraftSessions::new();
        let session_id = Uuid::new_v4();
        sessions.update_draft(session_id, valid_update());

        let err = sessions.begin_submission(session_id).unwrap_err();
        match err {
            AppError::InvalidInput(msg) => assert_eq!(msg, SELECT_COVER_IMAGE),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_begin_submission_rejects_concurrent_attempt() {
        let sessions = DraftSessions::new();
        let session_id = Uuid::new_v4();
        sessions.update_draft(session_id, valid_update());
        sessions.stage_asset(session_id, asset("poster.jpg"));

        sessions.begin_submission(session_id).unwrap();
        let err = sessions.begin_submission(session_id).unwrap_err();
        assert!(matches!(err, AppError::SubmissionInFlight));

        // A failed attempt releases the guard for retry.
        sessions.finish_submission_failure(session_id);
        assert!(sessions.begin_submission(session_id).is_ok());
    }

    #[tokio::test]
    async fn test_success_resets_state_and_emits_close_once() {
        let sessions = DraftSessions::new();
        let session_id = Uuid::new_v4();
        sessions.update_draft(session_id, valid_update());
        sessions.stage_asset(session_id, asset("poster.jpg"));

        let mut close_rx = sessions.subscribe_close(session_id);

        sessions.begin_submission(session_id).unwrap();
        sessions.finish_submission_success(session_id);

        let view = sessions.view(session_id);
        assert_eq!(view.draft, MovieDraft::default());
        assert!(!view.asset_staged);
        assert!(view.preview_data_uri.is_none());

        assert!(close_rx.try_recv().is_ok());
        assert!(close_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_failure_leaves_draft_and_asset_intact() {
        let sessions = DraftSessions::new();
        let session_id = Uuid::new_v4();
        sessions.update_draft(session_id, valid_update());
        sessions.stage_asset(session_id, asset("poster.jpg"));

        let mut close_rx = sessions.subscribe_close(session_id);

        sessions.begin_submission(session_id).unwrap();
        sessions.finish_submission_failure(session_id);

        let view = sessions.view(session_id);
        assert_eq!(view.draft.name, "Dune");
        assert!(view.asset_staged);
        assert!(close_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_clear_resets_draft_and_asset() {
        let sessions = DraftSessions::new();
        let session_id = Uuid::new_v4();
        sessions.update_draft(session_id, valid_update());
        sessions.stage_asset(session_id, asset("poster.jpg"));

        sessions.clear(session_id);

        let view = sessions.view(session_id);
        assert_eq!(view.draft, MovieDraft::default());
        assert!(!view.asset_staged);
    }
}
