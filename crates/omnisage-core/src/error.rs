use thiserror::Error;

/// Top-level error type for OmniSage.
///
/// Subsystem crates define their own error types and implement
/// `From<OmniSageError>` where they need to lift core failures (config,
/// I/O) into their own taxonomy.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OmniSageError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing credential: {0} is not set")]
    MissingCredential(&'static str),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for OmniSageError {
    fn from(err: toml::de::Error) -> Self {
        OmniSageError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for OmniSageError {
    fn from(err: toml::ser::Error) -> Self {
        OmniSageError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for OmniSageError {
    fn from(err: serde_json::Error) -> Self {
        OmniSageError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for OmniSage operations.
pub type Result<T> = std::result::Result<T, OmniSageError>;
