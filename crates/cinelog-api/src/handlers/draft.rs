use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use cinelog_core::models::StagedAsset;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::services::drafts::{DraftUpdate, DraftView};
use crate::session::SessionContext;
use crate::state::AppState;
use crate::utils::upload::{extract_multipart_file, validate_content_type, validate_file_size};

/// Get the session's current draft state
#[utoipa::path(
    get,
    path = "/api/v0/movies/draft",
    tag = "drafts",
    responses(
        (status = 200, description = "Current draft state", body = DraftView),
        (status = 401, description = "Missing or invalid session header", body = ErrorResponse)
    )
)]
pub async fn get_draft(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
) -> Json<DraftView> {
    Json(state.sessions.view(session.session_id))
}

/// Update draft fields
///
/// Partial update: only the provided fields change. `rating` overwrites
/// as-is with no range check; `photo_locator` is not accepted from clients.
#[utoipa::path(
    patch,
    path = "/api/v0/movies/draft",
    tag = "drafts",
    request_body = DraftUpdate,
    responses(
        (status = 200, description = "Updated draft state", body = DraftView),
        (status = 400, description = "Malformed body or unknown field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session header", body = ErrorResponse)
    )
)]
pub async fn update_draft(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
    ValidatedJson(update): ValidatedJson<DraftUpdate>,
) -> Json<DraftView> {
    Json(state.sessions.update_draft(session.session_id, update))
}

/// Stage a cover photo
///
/// Accepts exactly one multipart field named `file`. The staged asset
/// replaces any prior one; a non-authoritative preview is derived in the
/// background and exposed on the draft view once ready.
#[utoipa::path(
    post,
    path = "/api/v0/movies/draft/photo",
    tag = "drafts",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Photo staged", body = DraftView),
        (status = 400, description = "Invalid file or content type", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session header", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(session_id = %session.session_id))]
pub async fn stage_photo(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
    multipart: Multipart,
) -> Result<Json<DraftView>, HttpAppError> {
    let (data, original_filename, content_type) = extract_multipart_file(multipart).await?;

    validate_file_size(data.len(), state.config.max_photo_size_bytes())?;
    validate_content_type(&content_type, state.config.photo_allowed_content_types())?;

    tracing::info!(
        filename = %original_filename,
        content_type = %content_type,
        size_bytes = data.len(),
        "Cover photo staged"
    );

    let asset = StagedAsset::new(original_filename, content_type, Bytes::from(data));
    let view = state.sessions.stage_asset(session.session_id, asset);

    Ok(Json(view))
}

/// Cancel the draft
///
/// Clears the draft, the staged asset, and its preview.
#[utoipa::path(
    delete,
    path = "/api/v0/movies/draft",
    tag = "drafts",
    responses(
        (status = 204, description = "Draft cleared"),
        (status = 401, description = "Missing or invalid session header", body = ErrorResponse)
    )
)]
pub async fn cancel_draft(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
) -> StatusCode {
    state.sessions.clear(session.session_id);
    StatusCode::NO_CONTENT
}

/// Wait for the session's close signal
///
/// Long-polls the zero-payload close notification emitted when a submission
/// completes, so a host view can dismiss the creation form. No payload, no
/// acknowledgment.
#[utoipa::path(
    get,
    path = "/api/v0/movies/draft/close-signal",
    tag = "drafts",
    responses(
        (status = 204, description = "Close signal received"),
        (status = 401, description = "Missing or invalid session header", body = ErrorResponse)
    )
)]
pub async fn close_signal(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
) -> StatusCode {
    let mut rx = state.sessions.subscribe_close(session.session_id);
    // Lagged still means a close fired; Closed cannot happen while the
    // session entry (and its sender) is alive in the store.
    let _ = rx.recv().await;
    StatusCode::NO_CONTENT
}
