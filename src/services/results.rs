use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::models::MatchOutcome;

/// A computed outcome kept for a later export request
#[derive(Debug, Clone, Serialize)]
pub struct StoredResult {
    pub outcome: MatchOutcome,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Short-lived store of match results keyed by export token
///
/// Every match request gets its own token, so concurrent requests never see each
/// other's results. Entries expire after the configured TTL.
#[derive(Clone)]
pub struct ResultStore {
    entries: moka::future::Cache<Uuid, Arc<StoredResult>>,
}

impl ResultStore {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { entries }
    }

    /// Keep an outcome and return the token that retrieves it
    pub async fn insert(&self, outcome: MatchOutcome) -> Uuid {
        let token = Uuid::new_v4();
        let stored = StoredResult {
            outcome,
            created_at: chrono::Utc::now(),
        };

        self.entries.insert(token, Arc::new(stored)).await;
        tracing::trace!("Stored match result {}", token);
        token
    }

    pub async fn get(&self, token: &Uuid) -> Option<Arc<StoredResult>> {
        self.entries.get(token).await
    }

    pub async fn remove(&self, token: &Uuid) {
        self.entries.invalidate(token).await;
    }
}
