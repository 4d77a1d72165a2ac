//! Authentication collaborator.
//!
//! Account creation is delegated to an external provider; only its
//! registration capability matters here. The call is awaited and its failure
//! propagated, so a rejected registration is surfaced to the caller instead
//! of being silently dropped.

use async_trait::async_trait;
use cinelog_core::models::RegistrationRequest;
use cinelog_core::{AppError, Config};
use std::sync::Arc;

/// Registration capability of the external authentication provider.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn register(&self, request: &RegistrationRequest) -> Result<(), AppError>;
}

/// HTTP-backed provider client. Posts the four raw registration fields as
/// JSON to `{base_url}/register`.
pub struct HttpAuthProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AuthProvider for HttpAuthProvider {
    async fn register(&self, request: &RegistrationRequest) -> Result<(), AppError> {
        let url = format!("{}/register", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, url = %url, "Auth provider request failed");
                AppError::AuthProvider(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(status = %status, url = %url, "Auth provider rejected registration");
            return Err(AppError::AuthProvider(format!(
                "provider returned status {}",
                status
            )));
        }

        tracing::info!(email = %request.email, "Registration forwarded to auth provider");

        Ok(())
    }
}

/// Placeholder provider used when no AUTH_PROVIDER_URL is configured.
/// Registration attempts fail with a configuration error instead of being
/// silently accepted.
pub struct UnconfiguredAuthProvider;

#[async_trait]
impl AuthProvider for UnconfiguredAuthProvider {
    async fn register(&self, _request: &RegistrationRequest) -> Result<(), AppError> {
        Err(AppError::AuthProvider(
            "AUTH_PROVIDER_URL not configured".to_string(),
        ))
    }
}

/// Create the auth provider from configuration.
pub fn create_auth_provider(config: &Config) -> Arc<dyn AuthProvider> {
    match config.auth_provider_url() {
        Some(url) => Arc::new(HttpAuthProvider::new(url.to_string())),
        None => {
            tracing::warn!("AUTH_PROVIDER_URL not configured; registration is disabled");
            Arc::new(UnconfiguredAuthProvider)
        }
    }
}
