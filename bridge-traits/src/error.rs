use thiserror::Error;

/// Failures reported by host-provided diagnostic sinks.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Log sink unavailable: {0}")]
    SinkUnavailable(String),

    #[error("Log sink write failed: {0}")]
    SinkFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
