use thiserror::Error;

/// Problems with a simulation configuration, detected before the simulation is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },
    #[error("parameter `{name}` has invalid value {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("scenario is missing the `{0}` entry")]
    MissingKey(&'static str),
    #[error("unknown scenario entry `{0}`")]
    UnknownKey(String),
    #[error("scenario entry `{key}` has unparsable value `{value}`")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid configuration json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Problems writing a replay to disk.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("could not write replay: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not serialize replay: {0}")]
    Json(#[from] serde_json::Error),
}
