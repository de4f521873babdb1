use crate::infrastructure::repositories::FileRepository;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Periodically delete uploads and outputs older than `max_age`.
///
/// The first sweep runs immediately, then once per `interval`.
pub fn spawn_retention_sweeper(
    storage: Arc<FileRepository>,
    interval: Duration,
    max_age: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let max_age = match chrono::Duration::from_std(max_age) {
            Ok(max_age) => max_age,
            Err(e) => {
                tracing::error!(error = %e, "Invalid retention period, sweeper disabled");
                return;
            }
        };

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let removed = storage.sweep_expired(max_age).await;
            if removed > 0 {
                tracing::info!(
                    removed_files = removed,
                    max_age_secs = max_age.num_seconds(),
                    "Retention sweep completed"
                );
            }
        }
    })
}
