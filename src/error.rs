use std::error::Error;
use std::fmt;

/// Custom Error and Result types to unify errors from all sources.
pub type WatchResult<T> = Result<T, WatchError>;

#[derive(Debug)]
pub enum WatchError {
    Fetch(String),
    Compute(String),
    Io(String),
    Config(String),
    Server(String),
}

impl fmt::Display for WatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WatchError::Fetch(s) => write!(f, "Fetch Error: {}", s),
            WatchError::Compute(s) => write!(f, "Compute Error: {}", s),
            WatchError::Io(s) => write!(f, "IO Error: {}", s),
            WatchError::Config(s) => write!(f, "Config Error: {}", s),
            WatchError::Server(s) => write!(f, "Server Error: {}", s),
        }
    }
}

impl Error for WatchError {}

impl From<reqwest::Error> for WatchError {
    fn from(error: reqwest::Error) -> Self {
        WatchError::Fetch(error.to_string())
    }
}

// Only the feed body is ever parsed, so a JSON error is a fetch failure.
impl From<serde_json::Error> for WatchError {
    fn from(error: serde_json::Error) -> Self {
        WatchError::Fetch(format!("invalid JSON body. {error}"))
    }
}

impl From<std::io::Error> for WatchError {
    fn from(error: std::io::Error) -> Self {
        WatchError::Io(error.to_string())
    }
}

impl From<figment::Error> for WatchError {
    fn from(error: figment::Error) -> Self {
        WatchError::Config(error.to_string())
    }
}

impl From<minijinja::Error> for WatchError {
    fn from(error: minijinja::Error) -> Self {
        WatchError::Compute(format!("template rendering failed. {error}"))
    }
}
