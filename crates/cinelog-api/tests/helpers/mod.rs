//! Test helpers: build AppState and router for integration tests.
//!
//! The app runs over in-memory collaborators (local blob storage in a temp
//! dir, in-memory document store, recording auth provider), so the suite
//! needs no external services.

#![allow(dead_code)]

pub mod collaborators;
pub mod fixtures;

use axum_test::TestServer;
use cinelog_api::setup::routes::setup_routes;
use cinelog_api::state::AppState;
use cinelog_core::config::{AppConfig, BaseConfig};
use cinelog_core::{Config, StorageBackend};
use cinelog_db::MemoryDocumentStore;
use cinelog_storage::LocalStorage;
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

use self::collaborators::RecordingAuthProvider;

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", cinelog_api::constants::API_PREFIX, path)
}

/// Fresh session id header value.
pub fn new_session() -> String {
    Uuid::new_v4().to_string()
}

pub fn test_config() -> Config {
    Config(Box::new(AppConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec![],
            db_max_connections: 5,
            db_timeout_seconds: 5,
            environment: "test".to_string(),
        },
        database_url: "postgres://unused-in-tests".to_string(),
        storage_backend: Some(StorageBackend::Local),
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        local_storage_path: None,
        local_storage_base_url: None,
        auth_provider_url: None,
        max_photo_size_bytes: 5 * 1024 * 1024,
        photo_allowed_content_types: vec![
            "image/jpeg".to_string(),
            "image/png".to_string(),
        ],
    }))
}

/// Test application: server, shared state, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub auth: Arc<RecordingAuthProvider>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Setup test app with local storage and an in-memory document store.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp storage dir");

    let storage = Arc::new(
        LocalStorage::new(
            temp_dir.path(),
            "http://localhost:3000/media".to_string(),
        )
        .await
        .expect("Failed to create local storage"),
    );
    let documents = Arc::new(MemoryDocumentStore::new());
    let auth = Arc::new(RecordingAuthProvider::new());

    let config = test_config();
    let state = Arc::new(AppState::build(
        config.clone(),
        storage,
        documents,
        auth.clone(),
    ));

    let router = setup_routes(&config, state.clone()).expect("Failed to build router");
    let server =
        TestServer::new(router.into_make_service()).expect("Failed to start test server");

    TestApp {
        server,
        state,
        auth,
        _temp_dir: temp_dir,
    }
}
