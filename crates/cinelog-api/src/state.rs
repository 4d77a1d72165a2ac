//! Application state.
//!
//! One shared state behind `Arc`: collaborators (storage, movie collection,
//! auth provider), per-session draft state, and the submission service wired
//! over them.

use cinelog_core::Config;
use cinelog_db::{DocumentStore, MovieCollection};
use cinelog_storage::Storage;
use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::services::drafts::DraftSessions;
use crate::services::submission::MovieSubmissionService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub movies: MovieCollection,
    pub sessions: DraftSessions,
    pub auth: Arc<dyn AuthProvider>,
    pub submissions: MovieSubmissionService,
    pub is_production: bool,
}

impl AppState {
    /// Assemble the state from its collaborators.
    pub fn build(
        config: Config,
        storage: Arc<dyn Storage>,
        documents: Arc<dyn DocumentStore>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        let movies = MovieCollection::new(documents);
        let sessions = DraftSessions::new();
        let submissions =
            MovieSubmissionService::new(storage.clone(), movies.clone(), sessions.clone());
        let is_production = config.is_production();

        AppState {
            config,
            storage,
            movies,
            sessions,
            auth,
            submissions,
            is_production,
        }
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
