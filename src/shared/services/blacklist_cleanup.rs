use std::sync::Arc;
use chrono::Utc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use crate::shared::database::RevocationStore;

/// Token blacklist cleanup scheduler
///
/// Revoked tokens only need to stay blacklisted until they would have expired
/// anyway. This periodically drops entries past their expiry.
#[derive(Clone)]
pub struct BlacklistCleanupScheduler {
    revocations: Arc<dyn RevocationStore>,
    period: Duration,
}

impl BlacklistCleanupScheduler {
    pub fn new(revocations: Arc<dyn RevocationStore>, period: Duration) -> Self {
        Self {
            revocations,
            period,
        }
    }

    /// Spawn the background task
    pub fn start(&self) -> tokio::task::JoinHandle<()> {
        let scheduler = self.clone();

        tokio::spawn(async move {
            let mut ticker = interval(scheduler.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                scheduler.run_once().await;
            }
        })
    }

    /// One purge pass; failures are logged and retried on the next tick
    pub async fn run_once(&self) -> u64 {
        match self.revocations.purge_expired(Utc::now()).await {
            Ok(0) => 0,
            Ok(purged) => {
                tracing::info!(purged, "purged expired blacklist entries");
                purged
            }
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "blacklist cleanup failed");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::database::MemoryStore;

    #[tokio::test]
    async fn purges_only_expired_entries() {
        let store = Arc::new(MemoryStore::new());
        store.blacklist("old", Utc::now() - chrono::Duration::minutes(5)).await.unwrap();
        store.blacklist("live", Utc::now() + chrono::Duration::minutes(5)).await.unwrap();

        let scheduler = BlacklistCleanupScheduler::new(store.clone(), Duration::from_secs(3600));
        assert_eq!(scheduler.run_once().await, 1);

        assert!(!store.is_blacklisted("old").await.unwrap());
        assert!(store.is_blacklisted("live").await.unwrap());
    }
}
