use std::sync::Arc;

use axum::{extract::State, http::StatusCode};
use cinelog_core::models::RegistrationRequest;
use cinelog_core::AppError;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

/// User-facing message when a registration field is missing.
pub const FILL_IN_ALL_FIELDS: &str = "Fill in all fields.";

/// Register a new account
///
/// Checks that all four fields are non-empty and forwards them verbatim to
/// the authentication collaborator. No other validation happens here: no
/// email shape check, no password strength, no password-match check. The
/// provider call is awaited and its failure propagated.
#[utoipa::path(
    post,
    path = "/api/v0/auth/register",
    tag = "auth",
    request_body = RegistrationRequest,
    responses(
        (status = 201, description = "Registration forwarded to the provider"),
        (status = 400, description = "A required field is empty", body = ErrorResponse),
        (status = 502, description = "Auth provider unavailable or rejected the request", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<RegistrationRequest>,
) -> Result<StatusCode, HttpAppError> {
    if !request.is_valid() {
        return Err(AppError::InvalidInput(FILL_IN_ALL_FIELDS.to_string()).into());
    }

    state.auth.register(&request).await?;

    Ok(StatusCode::CREATED)
}
