/// Centralized error types for code-graph using thiserror
///
/// Provides domain-specific error types for better error handling and user-facing messages.
use thiserror::Error;

/// Main error type for the graph builder
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Programming-error class: a pipeline invariant was violated.
    /// Never expected during normal operation, even on malformed input.
    #[error("Internal invariant violation: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(String),
}

/// Errors related to acquiring a syntax tree from tree-sitter
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Failed to set parser language '{language}': {reason}")]
    LanguageSetupFailed { language: String, reason: String },

    #[error("Failed to parse source code as {0}")]
    ParseFailed(String),

    #[error("Source size exceeds maximum: {size} > {max}")]
    SourceTooLarge { size: usize, max: usize },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),
}

// Conversion from anyhow::Error to GraphError
impl From<anyhow::Error> for GraphError {
    fn from(err: anyhow::Error) -> Self {
        GraphError::Other(format!("{:#}", err))
    }
}

// Helper methods for GraphError
impl GraphError {
    /// Create a new error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        GraphError::Other(msg.into())
    }

    /// Create an internal invariant-violation error
    pub fn internal(msg: impl Into<String>) -> Self {
        GraphError::Internal(msg.into())
    }

    /// Convert to a user-facing error string
    pub fn to_user_string(&self) -> String {
        format!("{}", self)
    }

    /// Check if this is a user error (bad input) vs system error.
    ///
    /// Parse failures are user errors: the surrounding application should
    /// present them as "could not parse this code / language" rather than
    /// treating them as crashes.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            GraphError::Parse(_) | GraphError::Config(ConfigError::InvalidValue { .. })
        )
    }
}

/// Result alias used throughout the graph pipeline
pub type Result<T> = std::result::Result<T, GraphError>;
