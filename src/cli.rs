use clap::Parser;
use serde::Serialize;

/// Command line overrides. Only flags actually given are merged on top of the
/// environment, so every field is optional.
#[derive(Debug, Default, Parser, Serialize)]
#[command(version, about)]
pub struct Cli {
    /// URL of the JSON leaderboard feed
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reg_api_url: Option<String>,
    /// Display name of the competitor to look up
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
    /// Cohort (form) of the competitor
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_form: Option<i64>,
    /// Seconds during which a fetched feed is served from memory
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_ttl_seconds: Option<u64>,
    /// Port of the HTTP listener
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Output file of the snapshot mode
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_file: Option<String>,
}
