//! SeaORM storage backend
//!
//! Durable store for links and submissions over SQLite, MySQL/MariaDB, or
//! PostgreSQL. Code uniqueness is enforced by the primary-key constraint on
//! `links.code`; everything above this layer treats that constraint as the
//! single enforcement point.

mod connection;
mod converters;
mod links;
mod retry;
mod submissions;

use std::time::Duration;

use moka::sync::Cache;
use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::errors::{GatelinkError, Result};
use crate::storage::models::StorageInfo;

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{link_to_active_model, model_to_link, model_to_submission,
    submission_to_active_model};
pub use retry::{RetryConfig, is_unique_violation};

/// Infer the database backend from the connection URL.
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(GatelinkError::database_config(format!(
            "cannot infer database type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    /// COUNT cache for paginated listings (30 s TTL).
    count_cache: Cache<String, u64>,
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(GatelinkError::database_config(
                "database_url is not set".to_string(),
            ));
        }

        let config = crate::config::get_config();
        let retry_config = retry::RetryConfig {
            max_retries: config.database.retry_count,
            base_delay_ms: config.database.retry_base_delay_ms,
            max_delay_ms: config.database.retry_max_delay_ms,
        };

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            count_cache: Cache::builder()
                .time_to_live(Duration::from_secs(30))
                .max_capacity(100)
                .build(),
            retry_config,
        };

        run_migrations(&storage.db).await?;

        warn!(
            "{} storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn info(&self) -> StorageInfo {
        StorageInfo {
            backend: self.backend_name.clone(),
        }
    }

    pub(crate) fn retry_config(&self) -> retry::RetryConfig {
        self.retry_config
    }

    /// Clear the pagination COUNT cache. Called on every mutation.
    pub fn invalidate_count_cache(&self) {
        self.count_cache.invalidate_all();
    }

    pub(crate) fn count_cache(&self) -> &Cache<String, u64> {
        &self.count_cache
    }
}
