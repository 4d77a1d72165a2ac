//! Client session extraction.
//!
//! Draft state is keyed by a client-chosen session identifier carried in the
//! `X-Session-Id` header. Authentication-provider mechanics are out of scope;
//! this extractor only gives each connected form instance its own draft.

use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use uuid::Uuid;

use crate::constants::SESSION_HEADER;
use crate::error::ErrorResponse;

/// Session context extracted from the request headers.
#[derive(Debug, Clone, Copy)]
pub struct SessionContext {
    pub session_id: Uuid,
}

fn rejection(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: message.to_string(),
            details: None,
            error_type: None,
            code: "MISSING_SESSION".to_string(),
            recoverable: false,
            suggested_action: Some(format!("Send a UUID in the {} header", SESSION_HEADER)),
        }),
    )
}

// Implemented over request parts so the extractor composes with Multipart
// bodies, which consume the request.
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| rejection("Missing session header"))?;

        let session_id = raw
            .parse::<Uuid>()
            .map_err(|_| rejection("Invalid session header"))?;

        Ok(SessionContext { session_id })
    }
}
