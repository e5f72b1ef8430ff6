use crate::{
    error::{WatchError, WatchResult},
    utils::format_utc_timestamp,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Place of the watched competitor, as served by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankResult {
    pub name: String,
    pub form: i64,
    pub place: Option<u32>,
    pub source: String,
}

/// Result persisted by the snapshot mode.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    #[serde(flatten)]
    pub result: RankResult,
    pub updated_at: String,
}

pub fn render_result(name: &str, form: i64, place: Option<u32>, source: &str) -> RankResult {
    RankResult {
        name: name.to_string(),
        form,
        place,
        source: source.to_string(),
    }
}

impl Snapshot {
    pub fn new(result: RankResult, timestamp: DateTime<Utc>) -> Self {
        Snapshot {
            result,
            updated_at: format_utc_timestamp(timestamp),
        }
    }

    /// Pretty printed JSON document terminated by a newline.
    pub fn to_document(&self) -> WatchResult<String> {
        let mut document =
            serde_json::to_string_pretty(self).map_err(|e| WatchError::Io(e.to_string()))?;
        document.push('\n');
        Ok(document)
    }
}
