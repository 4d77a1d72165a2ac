//! Shared constants.

/// Name of the document collection holding movie records.
pub const MOVIES_COLLECTION: &str = "movies";

/// Key prefix under which cover photos are stored.
pub const PHOTO_KEY_PREFIX: &str = "movies";
