use std::path::PathBuf;

use thiserror::Error;

/// A sprite could not be resolved. Fatal at startup.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("missing sprite `{name}` (expected {path:?})")]
    Missing { name: &'static str, path: PathBuf },
    #[error("failed to read sprite `{name}` from {path:?}")]
    Unreadable {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("sprite `{name}` in {path:?} is empty")]
    Empty { name: &'static str, path: PathBuf },
}

#[derive(Clone, Debug, Error)]
#[error("invalid value {value:?} for {var}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot open log file {path:?}")]
    Log {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("terminal i/o failed")]
    Io(#[from] std::io::Error),
}
