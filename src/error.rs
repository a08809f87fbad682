//! Error handling for the action sheet demo host
//!
//! The sheet widget itself never fails: empty action lists, missing icons and
//! missing handlers are all valid input. Errors only arise around it, while
//! loading configuration and driving the terminal.

use thiserror::Error;

/// Application result type alias
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Main application error enum
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Layered configuration errors (file + environment)
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// TOML parse errors
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Terminal/UI operation errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Application state errors
    #[error("State error: {message}")]
    State { message: String },

    /// Generic application errors
    #[error("Application error: {message}")]
    Application { message: String },
}

impl AppError {
    /// Create a new State error
    pub fn state<S: Into<String>>(message: S) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    /// Create a new Application error
    pub fn application<S: Into<String>>(message: S) -> Self {
        Self::Application {
            message: message.into(),
        }
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            AppError::Io(_) => false,
            AppError::Config(_) => false,
            AppError::TomlDe(_) => false,
            AppError::TomlSer(_) => true,
            AppError::Terminal(_) => false,
            AppError::State { .. } => true,
            AppError::Application { .. } => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Io(_) => ErrorSeverity::High,
            AppError::Config(_) => ErrorSeverity::High,
            AppError::TomlDe(_) => ErrorSeverity::High,
            AppError::TomlSer(_) => ErrorSeverity::Medium,
            AppError::Terminal(_) => ErrorSeverity::Critical,
            AppError::State { .. } => ErrorSeverity::Medium,
            AppError::Application { .. } => ErrorSeverity::Medium,
        }
    }
}

/// Error severity levels for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Convert severity to string for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorSeverity::Low => "LOW",
            ErrorSeverity::Medium => "MEDIUM",
            ErrorSeverity::High => "HIGH",
            ErrorSeverity::Critical => "CRITICAL",
        }
    }
}
