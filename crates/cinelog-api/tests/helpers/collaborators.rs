//! Recording mock collaborators.
//!
//! These mocks stand in for the blob storage, document database, and auth
//! provider. They share an ordered call log so tests can assert the causal
//! ordering of pipeline stages, and they expose failure toggles for
//! partial-failure scenarios.

use async_trait::async_trait;
use cinelog_api::auth::AuthProvider;
use cinelog_core::models::RegistrationRequest;
use cinelog_core::{AppError, StorageBackend};
use cinelog_db::{DocumentStore, MemoryDocumentStore};
use cinelog_storage::{Storage, StorageError, StorageResult};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Ordered log of collaborator calls, shared across mocks.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }
}

/// In-memory blob storage that records calls in arrival order.
pub struct RecordingStorage {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    log: CallLog,
    pub fail_uploads: AtomicBool,
    pub fail_public_url: AtomicBool,
}

impl RecordingStorage {
    pub fn new(log: CallLog) -> Self {
        Self {
            blobs: Mutex::new(HashMap::new()),
            log,
            fail_uploads: AtomicBool::new(false),
            fail_public_url: AtomicBool::new(false),
        }
    }

    pub fn blob_keys(&self) -> Vec<String> {
        self.blobs.lock().unwrap().keys().cloned().collect()
    }

    pub fn blob(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn upload(
        &self,
        storage_key: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<()> {
        self.log.push(format!("upload:{}", storage_key));
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed(
                "injected upload failure".to_string(),
            ));
        }
        self.blobs
            .lock()
            .unwrap()
            .insert(storage_key.to_string(), data);
        Ok(())
    }

    async fn public_url(&self, storage_key: &str) -> StorageResult<String> {
        self.log.push(format!("public_url:{}", storage_key));
        if self.fail_public_url.load(Ordering::SeqCst) {
            return Err(StorageError::BackendError(
                "injected locator failure".to_string(),
            ));
        }
        Ok(format!("https://cdn.test/{}", storage_key))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.log.push(format!("delete:{}", storage_key));
        self.blobs.lock().unwrap().remove(storage_key);
        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self.blobs.lock().unwrap().contains_key(storage_key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// Document store that records writes in arrival order, delegating storage to
/// the in-memory implementation.
pub struct RecordingDocumentStore {
    inner: MemoryDocumentStore,
    log: CallLog,
    pub fail_add_document: AtomicBool,
    pub fail_update_document: AtomicBool,
}

impl RecordingDocumentStore {
    pub fn new(log: CallLog) -> Self {
        Self {
            inner: MemoryDocumentStore::new(),
            log,
            fail_add_document: AtomicBool::new(false),
            fail_update_document: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl DocumentStore for RecordingDocumentStore {
    async fn add_document(
        &self,
        collection: &str,
        document: JsonValue,
    ) -> Result<Uuid, AppError> {
        self.log.push(format!("add_document:{}", collection));
        if self.fail_add_document.load(Ordering::SeqCst) {
            return Err(AppError::Internal(
                "injected database failure".to_string(),
            ));
        }
        self.inner.add_document(collection, document).await
    }

    async fn update_document(
        &self,
        collection: &str,
        id: Uuid,
        patch: JsonValue,
    ) -> Result<(), AppError> {
        self.log.push(format!("update_document:{}:{}", collection, id));
        if self.fail_update_document.load(Ordering::SeqCst) {
            return Err(AppError::Internal(
                "injected database failure".to_string(),
            ));
        }
        self.inner.update_document(collection, id, patch).await
    }

    async fn get_document(
        &self,
        collection: &str,
        id: Uuid,
    ) -> Result<Option<JsonValue>, AppError> {
        self.inner.get_document(collection, id).await
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<JsonValue>, AppError> {
        self.inner.list_documents(collection).await
    }
}

/// Auth provider that records forwarded registration requests.
#[derive(Default)]
pub struct RecordingAuthProvider {
    requests: Mutex<Vec<RegistrationRequest>>,
    pub fail: AtomicBool,
}

impl RecordingAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<RegistrationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthProvider for RecordingAuthProvider {
    async fn register(&self, request: &RegistrationRequest) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::AuthProvider(
                "injected provider failure".to_string(),
            ));
        }
        self.requests.lock().unwrap().push(request.clone());
        Ok(())
    }
}
