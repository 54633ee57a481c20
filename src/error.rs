use thiserror::Error;

/// Custom error type for the warlock monitor
#[derive(Error, Debug)]
pub enum WarlockError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Notification failed: {0}")]
    Notification(String),

    #[error("Metric collection failed: {0}")]
    MetricCollection(String),

    #[error("Invalid rule: {0}")]
    InvalidRule(String),
}

/// Result type alias for the warlock monitor
pub type Result<T> = std::result::Result<T, WarlockError>;

impl WarlockError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        WarlockError::Config(msg.into())
    }

    pub fn notification<S: Into<String>>(msg: S) -> Self {
        WarlockError::Notification(msg.into())
    }

    pub fn metric_collection<S: Into<String>>(msg: S) -> Self {
        WarlockError::MetricCollection(msg.into())
    }

    pub fn invalid_rule<S: Into<String>>(msg: S) -> Self {
        WarlockError::InvalidRule(msg.into())
    }
}
