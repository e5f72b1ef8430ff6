//! Displayed place of one competitor on a third-party leaderboard feed.
//!
//! The crate fetches the feed, reproduces the site's tie-breaking and blank-rank
//! rules for the competitor's cohort, and renders the result for the HTTP service
//! (`rankwatch`) or the one-shot snapshot writer (`rankwatch-snapshot`).

pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod error;
pub mod server;
pub mod snapshot;
pub mod storage;
pub mod utils;

pub use crate::client::feed::{Feed, FeedSource};
pub use crate::core::display::{render_result, RankResult, Snapshot};
pub use crate::core::record::CompetitorRecord;
pub use crate::core::standings::{compute_place, Standing};
pub use crate::error::{WatchError, WatchResult};
pub use crate::snapshot::write_snapshot;
pub use crate::storage::FeedCache;
