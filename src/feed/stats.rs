use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::domain::FeedFilter;
use crate::feed::FeedQuery;

#[derive(Debug, Clone, Serialize)]
pub struct FeedStats {
    pub total: i64,
    pub refreshed_at: DateTime<Utc>,
}

/// Polls the feed count on a fixed interval and publishes the latest value
/// through a watch channel. The poller's lifecycle is independent of any
/// feed window; it stops only when cancelled.
pub struct FeedStatsPoller {
    rx: watch::Receiver<FeedStats>,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl FeedStatsPoller {
    pub fn spawn(feed: Arc<FeedQuery>, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(FeedStats {
            total: 0,
            refreshed_at: Utc::now(),
        });
        let token = CancellationToken::new();
        let child_token = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = child_token.cancelled() => break,
                    _ = ticker.tick() => {
                        let outcome = feed.count(&FeedFilter::default()).await;
                        // Keep the last good value on a failed poll.
                        if outcome.error.is_none() {
                            let _ = tx.send(FeedStats {
                                total: outcome.count,
                                refreshed_at: Utc::now(),
                            });
                        }
                    }
                }
            }
            tracing::debug!("Feed stats poller stopped");
        });

        Self { rx, token, handle }
    }

    pub fn latest(&self) -> FeedStats {
        self.rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedStats> {
        self.rx.clone()
    }

    /// Requests teardown without waiting for the task to finish.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Cancels and waits for the polling task to exit.
    pub async fn shutdown(self) {
        self.token.cancel();
        let _ = self.handle.await;
    }
}
