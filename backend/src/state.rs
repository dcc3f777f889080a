//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use crate::config::AppConfig;
use crate::events::ChangeFeed;
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared application state
///
/// All fields are cheap to clone: the pool, the change feed and the
/// Prometheus handle are reference counted internally.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Store change notifications
    pub events: ChangeFeed,
    /// Present when the binary installed a Prometheus recorder
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        let events = ChangeFeed::new(config.events.channel_capacity);
        Self {
            db,
            config: Arc::new(config),
            events,
            metrics: None,
        }
    }

    /// Expose `/metrics` through the given recorder handle
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &SqlitePool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the change feed
    #[inline]
    pub fn events(&self) -> &ChangeFeed {
        &self.events
    }
}
