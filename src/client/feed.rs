use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::info;

use crate::core::record::CompetitorRecord;
use crate::error::{WatchError, WatchResult};

/// Anything able to produce the full list of competitors.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn rows(&self) -> WatchResult<Vec<CompetitorRecord>>;

    /// Where the rows come from, echoed back to API clients.
    fn source(&self) -> &str;
}

/// Registration leaderboard published as a JSON array.
pub struct Feed {
    http_client: Client,
    url: String,
}

impl Feed {
    pub fn new(url: String, timeout: Duration) -> WatchResult<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self { http_client, url })
    }

    async fn get(&self) -> WatchResult<String> {
        let response = self.http_client.get(&self.url).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.text().await?),
            status => Err(WatchError::Fetch(format!("{} answered {}", self.url, status))),
        }
    }
}

#[async_trait]
impl FeedSource for Feed {
    async fn rows(&self) -> WatchResult<Vec<CompetitorRecord>> {
        let body = self.get().await?;
        let rows = parse_rows(&body)?;
        info!("Fetched {} rows from {}", rows.len(), self.url);
        Ok(rows)
    }

    fn source(&self) -> &str {
        &self.url
    }
}

/// The body must be a JSON array of objects. Fields of each object are read
/// leniently, but any other document shape is refused.
pub fn parse_rows(body: &str) -> WatchResult<Vec<CompetitorRecord>> {
    let document = serde_json::from_str::<Value>(body)?;
    let Value::Array(items) = document else {
        return Err(WatchError::Fetch(
            "unexpected API response, expected a JSON list".to_string(),
        ));
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(row) => Ok(CompetitorRecord::from_json(row)),
            _ => Err(WatchError::Fetch(format!(
                "unexpected API response, item #{idx} is not an object"
            ))),
        })
        .collect::<WatchResult<Vec<CompetitorRecord>>>()
}
