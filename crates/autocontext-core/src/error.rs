use thiserror::Error;

/// Top-level error type for autocontext.
#[derive(Debug, Error)]
pub enum AutoContextError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Malformed hook request.
    #[error("input error: {0}")]
    Input(String),

    /// A keyword could not be compiled into a matcher.
    #[error("pattern error: {0}")]
    Pattern(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
