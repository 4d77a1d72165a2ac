//! Configuration module
//!
//! This module provides configuration structures for the API service,
//! including database, storage, and authentication-provider settings.
//! Values are read from the environment (a `.env` file is honored).

use std::env;

use crate::storage_types::StorageBackend;

// Common defaults
const DEFAULT_SERVER_PORT: u16 = 3000;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_PHOTO_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Base configuration shared by service binaries
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub base: BaseConfig,
    pub database_url: String,
    // Storage configuration
    pub storage_backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Authentication collaborator
    pub auth_provider_url: Option<String>,
    // Cover photo limits
    pub max_photo_size_bytes: usize,
    pub photo_allowed_content_types: Vec<String>,
}

/// Application configuration handle.
#[derive(Clone, Debug)]
pub struct Config(pub Box<AppConfig>);

fn env_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_list(key: &str, default: &[&str]) -> Vec<String> {
    env::var(key)
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_else(|_| default.iter().map(|s| s.to_string()).collect())
}

impl AppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // Load .env if present; ignore when absent
        dotenvy::dotenv().ok();

        let base = BaseConfig {
            server_port: env_parse("SERVER_PORT", DEFAULT_SERVER_PORT),
            cors_origins: env_list("CORS_ORIGINS", &[]),
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", MAX_CONNECTIONS),
            db_timeout_seconds: env_parse("DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS),
            environment: env_string("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        };

        let storage_backend = match env_string("STORAGE_BACKEND") {
            Some(raw) => Some(
                raw.parse::<StorageBackend>()
                    .map_err(|e| anyhow::anyhow!(e))?,
            ),
            None => None,
        };

        Ok(AppConfig {
            base,
            database_url: env_string("DATABASE_URL")
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL not configured"))?,
            storage_backend,
            s3_bucket: env_string("S3_BUCKET"),
            s3_region: env_string("S3_REGION").or_else(|| env_string("AWS_REGION")),
            s3_endpoint: env_string("S3_ENDPOINT"),
            local_storage_path: env_string("LOCAL_STORAGE_PATH"),
            local_storage_base_url: env_string("LOCAL_STORAGE_BASE_URL"),
            auth_provider_url: env_string("AUTH_PROVIDER_URL"),
            max_photo_size_bytes: env_parse("MAX_PHOTO_SIZE_BYTES", DEFAULT_MAX_PHOTO_SIZE_BYTES),
            photo_allowed_content_types: env_list(
                "PHOTO_ALLOWED_CONTENT_TYPES",
                &["image/jpeg", "image/png", "image/webp", "image/gif"],
            ),
        })
    }

    /// Fail fast on inconsistent settings before any service starts.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        match self.storage_backend.unwrap_or(StorageBackend::S3) {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    anyhow::bail!("S3_BUCKET not configured for the s3 storage backend");
                }
                if self.s3_region.is_none() {
                    anyhow::bail!("S3_REGION or AWS_REGION not configured for the s3 storage backend");
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    anyhow::bail!("LOCAL_STORAGE_PATH not configured for the local storage backend");
                }
                if self.local_storage_base_url.is_none() {
                    anyhow::bail!(
                        "LOCAL_STORAGE_BASE_URL not configured for the local storage backend"
                    );
                }
            }
        }
        if self.max_photo_size_bytes == 0 {
            anyhow::bail!("MAX_PHOTO_SIZE_BYTES must be greater than zero");
        }
        Ok(())
    }
}

impl Config {
    fn as_app(&self) -> &AppConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = AppConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_app().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.as_app().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_app().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_app().base.cors_origins
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_app().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_app().base.db_timeout_seconds
    }

    pub fn environment(&self) -> &str {
        &self.as_app().base.environment
    }

    pub fn database_url(&self) -> &str {
        &self.as_app().database_url
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.as_app().storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.as_app().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.as_app().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_app().s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.as_app().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.as_app().local_storage_base_url.as_deref()
    }

    pub fn auth_provider_url(&self) -> Option<&str> {
        self.as_app().auth_provider_url.as_deref()
    }

    pub fn max_photo_size_bytes(&self) -> usize {
        self.as_app().max_photo_size_bytes
    }

    pub fn photo_allowed_content_types(&self) -> &[String] {
        &self.as_app().photo_allowed_content_types
    }
}
