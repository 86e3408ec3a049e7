use thiserror::Error;

/// Unified error type for git-chronicle operations
#[derive(Error, Debug)]
pub enum ChronicleError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Changelog parse error: {0}")]
    Changelog(String),

    #[error("Unknown component: {0}")]
    Component(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in git-chronicle
pub type Result<T> = std::result::Result<T, ChronicleError>;

impl ChronicleError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChronicleError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ChronicleError::Version(msg.into())
    }

    /// Create a changelog parse error with context
    pub fn changelog(msg: impl Into<String>) -> Self {
        ChronicleError::Changelog(msg.into())
    }

    /// Create an unknown-component error
    pub fn component(id: impl Into<String>) -> Self {
        ChronicleError::Component(id.into())
    }
}
