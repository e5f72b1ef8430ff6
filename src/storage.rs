use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

use crate::client::feed::FeedSource;
use crate::core::record::CompetitorRecord;
use crate::error::WatchResult;

pub type SharedRows = Arc<Vec<CompetitorRecord>>;

struct CachedFeed {
    fetched_at: Instant,
    rows: SharedRows,
}

/// Last successful fetch of a feed, reused while younger than `ttl`.
///
/// The lock is held across the upstream call, so concurrent requests hitting an
/// expired cache trigger a single fetch. A failed refresh keeps the previous state.
pub struct FeedCache {
    source: Box<dyn FeedSource>,
    ttl: Duration,
    state: Mutex<Option<CachedFeed>>,
}

impl FeedCache {
    pub fn new(source: Box<dyn FeedSource>, ttl: Duration) -> FeedCache {
        FeedCache {
            source,
            ttl,
            state: Mutex::new(None),
        }
    }

    pub fn source(&self) -> &str {
        self.source.source()
    }

    pub async fn get_or_refresh(&self, now: Instant) -> WatchResult<SharedRows> {
        let mut state = self.state.lock().await;

        if let Some(cached) = state.as_ref() {
            let age = now.saturating_duration_since(cached.fetched_at);
            if age < self.ttl {
                debug!("Serving {} cached rows, {:?} old", cached.rows.len(), age);
                return Ok(cached.rows.clone());
            }
        }

        debug!("Feed cache expired, refreshing from {}", self.source());
        let rows: SharedRows = Arc::new(self.source.rows().await?);
        *state = Some(CachedFeed {
            fetched_at: now,
            rows: rows.clone(),
        });
        Ok(rows)
    }
}
