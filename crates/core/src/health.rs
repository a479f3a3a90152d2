//! Liveness report for the `/health` endpoint

use crate::repository::CatalogStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::warn;

/// Database probe outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Healthy,
    Unhealthy,
}

/// Body returned by `/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Always `ok` while the process is serving requests
    pub status: String,
    pub service: String,
    pub version: String,
    pub database: ComponentStatus,
    pub timestamp: DateTime<Utc>,
}

impl ServiceHealth {
    /// Probe the store, treating a probe slower than `probe_timeout` as unhealthy
    pub async fn check(
        service: &str,
        version: &str,
        store: &dyn CatalogStore,
        probe_timeout: Duration,
    ) -> Self {
        let database = match timeout(probe_timeout, store.ping()).await {
            Ok(Ok(())) => ComponentStatus::Healthy,
            Ok(Err(e)) => {
                warn!(error = %e, "Database health check failed");
                ComponentStatus::Unhealthy
            }
            Err(_) => {
                warn!(timeout = ?probe_timeout, "Database health check timed out");
                ComponentStatus::Unhealthy
            }
        };

        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            database,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryCatalogStore;

    #[test]
    fn test_healthy_store() {
        let store = InMemoryCatalogStore::new();
        let health = tokio_test::block_on(ServiceHealth::check(
            "movie-catalog",
            "0.1.0",
            &store,
            Duration::from_secs(1),
        ));

        assert_eq!(health.status, "ok");
        assert_eq!(health.database, ComponentStatus::Healthy);

        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(json["database"], "healthy");
        assert_eq!(json["service"], "movie-catalog");
    }
}
