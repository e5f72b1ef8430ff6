use crate::cli::Cli;
use crate::error::WatchResult;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::time::Duration;
use tracing::Level;

const TRACE_LEVELS: [&str; 5] = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];

pub const LOCAL_SETTINGS_FILE: &str = ".env.local.yaml";

// Upstream timeouts when `feed_timeout_sec` is not configured.
const SERVICE_FEED_TIMEOUT_SEC: u64 = 30;
const SNAPSHOT_FEED_TIMEOUT_SEC: u64 = 60;

// All settings may be configured via environment variables. Example:
// TARGET_FORM="9" would set target_form to 9.
// A local yaml file is read first, the environment overrides it, and command
// line flags override both.
#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    #[serde(default = "default_trace_level")]
    #[serde(deserialize_with = "string_or_scalar")]
    trace_level: String,
    #[serde(default = "default_reg_api_url")]
    #[serde(deserialize_with = "string_or_scalar")]
    pub reg_api_url: String,
    #[serde(default = "default_target_name")]
    #[serde(deserialize_with = "string_or_scalar")]
    pub target_name: String,
    #[serde(default = "default_target_form")]
    pub target_form: i64,
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_out_file")]
    #[serde(deserialize_with = "string_or_scalar")]
    pub out_file: String,
    pub feed_timeout_sec: Option<u64>,
}

impl Settings {
    pub fn load(cli: &Cli) -> WatchResult<Self> {
        Ok(Settings::figment(cli).extract()?)
    }

    pub fn figment(cli: &Cli) -> Figment {
        Figment::new()
            .merge(Yaml::file(LOCAL_SETTINGS_FILE))
            .merge(Env::raw())
            .merge(Serialized::defaults(cli))
    }

    pub fn has_local_file() -> bool {
        Path::new(LOCAL_SETTINGS_FILE).exists()
    }

    pub fn get_trace_level(&self) -> Level {
        get_trace_level(&self.trace_level)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn service_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_timeout_sec.unwrap_or(SERVICE_FEED_TIMEOUT_SEC))
    }

    pub fn snapshot_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_timeout_sec.unwrap_or(SNAPSHOT_FEED_TIMEOUT_SEC))
    }
}

fn get_trace_level(level_str: &str) -> Level {
    match level_str {
        level if level == TRACE_LEVELS[0] => Level::TRACE,
        level if level == TRACE_LEVELS[1] => Level::DEBUG,
        level if level == TRACE_LEVELS[2] => Level::INFO,
        level if level == TRACE_LEVELS[3] => Level::WARN,
        level if level == TRACE_LEVELS[4] => Level::ERROR,
        // Default trace level
        _ => Level::INFO,
    }
}

// Environment values that look like numbers or booleans are typed by figment.
// Text settings take them back as written.
fn string_or_scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Flag(bool),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Signed(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Flag(b) => b.to_string(),
    })
}

fn default_trace_level() -> String {
    "INFO".to_string()
}

fn default_reg_api_url() -> String {
    "https://reg.algocode.ru/_api/reg_2026.json".to_string()
}

fn default_target_name() -> String {
    "Сагдуллин Марсель".to_string()
}

fn default_target_form() -> i64 {
    11
}

fn default_cache_ttl_seconds() -> u64 {
    30
}

fn default_port() -> u16 {
    8000
}

fn default_out_file() -> String {
    "place.json".to_string()
}
