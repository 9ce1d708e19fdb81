// src/error.rs

use thiserror::Error;

/// Library-level failures. Degraded sensing is deliberately NOT here: low
/// reliability is answered with a FAIL_SAFE decision, never an error, and a
/// report requested before any cycle ran is `None` rather than a failure.
#[derive(Error, Debug)]
pub enum AebError {
    /// Scenario object carried a class tag outside the closed set.
    #[error("invalid object class: {0:?}")]
    InvalidObjectClass(String),

    /// Safety limits file could not be read.
    #[error("config error: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Safety limits file could not be parsed.
    #[error("config error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

pub type AebResult<T> = Result<T, AebError>;
