//! API-wide constants.

/// Prefix for all versioned API routes.
pub const API_PREFIX: &str = "/api/v0";

/// Header carrying the client session identifier.
pub const SESSION_HEADER: &str = "x-session-id";
