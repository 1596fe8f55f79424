use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use serde::Serialize;
use uuid::Uuid;

use crate::core::parser::ParsedReport;
use crate::core::stats::{EmployeeStatistics, GlobalStatistics};

/// One uploaded batch: the parsed blocks plus everything computed from them,
/// kept so follow-up requests (detail views, exports) do not re-parse or
/// re-hit the database.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredReport {
    pub report: ParsedReport,
    pub statistics: Vec<EmployeeStatistics>,
    pub global: GlobalStatistics,
    pub created_at: DateTime<Utc>,
}

/// Token-addressed in-memory store for uploaded batches.
///
/// Capacity and TTL are both bounded; an entry that expires simply makes the
/// client re-upload. The predecessor of this store was a process-global map
/// that grew for the lifetime of the process.
#[derive(Clone)]
pub struct ReportStore {
    cache: Cache<String, Arc<StoredReport>>,
}

impl ReportStore {
    pub fn new(capacity: u64, ttl_minutes: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(Duration::from_secs(ttl_minutes * 60))
            .build();
        Self { cache }
    }

    /// Stash a batch and hand back its access token.
    pub async fn insert(&self, report: StoredReport) -> String {
        let token = Uuid::new_v4().to_string();
        self.cache.insert(token.clone(), Arc::new(report)).await;
        token
    }

    pub async fn get(&self, token: &str) -> Option<Arc<StoredReport>> {
        self.cache.get(token).await
    }

    pub async fn remove(&self, token: &str) {
        self.cache.invalidate(token).await;
    }
}
