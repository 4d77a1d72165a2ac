use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use cinelog_core::models::MovieResponse;

use crate::error::{ErrorResponse, HttpAppError};
use crate::session::SessionContext;
use crate::state::AppState;

/// Submit the session's draft
///
/// Runs the three-stage creation pipeline: store the cover blob, resolve its
/// public locator, persist the record referencing that locator (with the
/// server-assigned id written back into the document). On success the draft
/// and staged asset reset and the session's close signal fires once.
#[utoipa::path(
    post,
    path = "/api/v0/movies",
    tag = "movies",
    responses(
        (status = 201, description = "Movie created", body = MovieResponse),
        (status = 400, description = "Draft invalid or no cover staged", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session header", body = ErrorResponse),
        (status = 409, description = "A submission is already in flight", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(session_id = %session.session_id))]
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
) -> Result<(StatusCode, Json<MovieResponse>), HttpAppError> {
    let record = state.submissions.submit(session.session_id).await?;

    Ok((StatusCode::CREATED, Json(MovieResponse::from(record))))
}

/// List the shared movie catalog
#[utoipa::path(
    get,
    path = "/api/v0/movies",
    tag = "movies",
    responses(
        (status = 200, description = "All movie records, oldest first", body = [MovieResponse]),
        (status = 401, description = "Missing or invalid session header", body = ErrorResponse)
    )
)]
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    _session: SessionContext,
) -> Result<Json<Vec<MovieResponse>>, HttpAppError> {
    let records = state.movies.list().await?;
    Ok(Json(records.into_iter().map(MovieResponse::from).collect()))
}
