use chrono::{DateTime, Utc};
use itertools::Itertools;

/// Trimmed, lowercased, with inner whitespace runs collapsed to one space.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().split_whitespace().join(" ")
}

pub fn format_utc_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
