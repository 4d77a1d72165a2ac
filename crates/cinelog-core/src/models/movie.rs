use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// In-memory, not-yet-persisted movie entry being created.
///
/// `name` and `analysis` are required; `rating` defaults to 0 and is
/// overwritten as-is (no range validation). `photo_locator` is populated by
/// the submission pipeline, not by direct user input, so it carries no
/// required constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct MovieDraft {
    #[validate(length(min = 1))]
    pub name: String,
    pub rating: i32,
    #[validate(length(min = 1))]
    pub analysis: String,
    #[serde(default)]
    pub photo_locator: String,
}

impl Default for MovieDraft {
    fn default() -> Self {
        MovieDraft {
            name: String::new(),
            rating: 0,
            analysis: String::new(),
            photo_locator: String::new(),
        }
    }
}

impl MovieDraft {
    /// Overwrite the rating. No clamping is performed; the caller is trusted
    /// to pass a valid selector value.
    pub fn set_rating(&mut self, rating: i32) {
        self.rating = rating;
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Return the draft to its initial empty state.
    pub fn reset(&mut self) {
        *self = MovieDraft::default();
    }
}

/// Persisted movie record. The server-assigned `id` is also written into the
/// stored document body, so a record always carries its own document key.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MovieRecord {
    pub id: Uuid,
    pub name: String,
    pub rating: i32,
    pub analysis: String,
    pub photo_locator: String,
}

impl MovieRecord {
    pub fn from_draft(id: Uuid, draft: &MovieDraft) -> Self {
        MovieRecord {
            id,
            name: draft.name.clone(),
            rating: draft.rating,
            analysis: draft.analysis.clone(),
            photo_locator: draft.photo_locator.clone(),
        }
    }
}

/// API response for a movie record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MovieResponse {
    pub id: Uuid,
    pub name: String,
    pub rating: i32,
    pub analysis: String,
    pub photo_locator: String,
}

impl From<MovieRecord> for MovieResponse {
    fn from(record: MovieRecord) -> Self {
        MovieResponse {
            id: record.id,
            name: record.name,
            rating: record.rating,
            analysis: record.analysis,
            photo_locator: record.photo_locator,
        }
    }
}
