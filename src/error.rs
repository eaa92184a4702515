use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolarError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("date offset of {0} days is out of range")]
    DateOutOfRange(i64),

    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid or unexpected response payload: {0}")]
    PayloadShape(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot locate the executable directory: {0}")]
    Locate(#[source] std::io::Error),

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
