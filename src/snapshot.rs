//! One-shot snapshot of the competitor's place, written to disk.

use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::info;

use crate::client::feed::FeedSource;
use crate::core::{
    display::{render_result, RankResult, Snapshot},
    standings::compute_place,
};
use crate::error::WatchResult;

/// Fetches the feed once, computes the place and replaces the file at `path`.
///
/// The file is only written after the fetch and the rendering succeeded, so a
/// failing feed leaves any previous snapshot in place.
pub async fn write_snapshot(
    source: &dyn FeedSource,
    name: &str,
    form: i64,
    path: &Path,
    now: DateTime<Utc>,
) -> WatchResult<RankResult> {
    let rows = source.rows().await?;

    let place = compute_place(&rows, name, form);
    let result = render_result(name, form, place, source.source());

    let document = Snapshot::new(result.clone(), now).to_document()?;
    tokio::fs::write(path, document).await?;
    info!("Snapshot written to {}.", path.display());

    Ok(result)
}
