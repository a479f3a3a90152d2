//! Sync run audit records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sync type recorded for runs triggered through the API
pub const SYNC_TYPE_MANUAL: &str = "manual";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Success,
    Failed,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "failed" => Ok(Self::Failed),
            other => Err(format!("unknown sync status '{}'", other)),
        }
    }
}

/// Persisted outcome of one sync invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncLog {
    pub id: i64,
    pub sync_type: String,
    pub status: SyncStatus,
    pub movies_added: i32,
    pub movies_updated: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub synced_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Sync log row before it is persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSyncLog {
    pub sync_type: String,
    pub status: SyncStatus,
    pub movies_added: i32,
    pub movies_updated: i32,
    pub error_message: Option<String>,
    pub synced_at: DateTime<Utc>,
}

impl NewSyncLog {
    /// Log for a manual run starting now
    ///
    /// Starts out `failed` so that an aborted run never reports success.
    pub fn manual(synced_at: DateTime<Utc>) -> Self {
        Self {
            sync_type: SYNC_TYPE_MANUAL.to_string(),
            status: SyncStatus::Failed,
            movies_added: 0,
            movies_updated: 0,
            error_message: None,
            synced_at,
        }
    }

    /// Unsaved log as it would be returned, used when persisting fails
    pub fn into_unsaved(self) -> SyncLog {
        SyncLog {
            id: 0,
            sync_type: self.sync_type,
            status: self.status,
            movies_added: self.movies_added,
            movies_updated: self.movies_updated,
            error_message: self.error_message,
            synced_at: self.synced_at,
            created_at: self.synced_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        assert_eq!("success".parse::<SyncStatus>(), Ok(SyncStatus::Success));
        assert_eq!("failed".parse::<SyncStatus>(), Ok(SyncStatus::Failed));
        assert!("pending".parse::<SyncStatus>().is_err());
    }

    #[test]
    fn test_manual_log_starts_failed() {
        let log = NewSyncLog::manual(Utc::now());
        assert_eq!(log.sync_type, "manual");
        assert_eq!(log.status, SyncStatus::Failed);
        assert_eq!(log.movies_added, 0);
    }

    #[test]
    fn test_error_message_omitted_when_absent() {
        let log = NewSyncLog::manual(Utc::now()).into_unsaved();
        let json = serde_json::to_value(&log).unwrap();
        assert!(json.get("error_message").is_none());
        assert_eq!(json["status"], "failed");
    }
}
