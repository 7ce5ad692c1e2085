//! Error types for stencil-core

use thiserror::Error;

/// Result type alias using stencil-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Stencil
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// Template is not part of the configured catalog
    #[error("Unknown template: {template}. Available templates: {available}")]
    UnknownTemplate { template: String, available: String },

    /// Template identifier is not a usable relative directory path
    #[error("Invalid template identifier '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an unknown template error
    pub fn unknown_template(template: impl Into<String>, available: impl Into<String>) -> Self {
        Self::UnknownTemplate {
            template: template.into(),
            available: available.into(),
        }
    }

    /// Create an invalid template error
    pub fn invalid_template(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            template: template.into(),
            reason: reason.into(),
        }
    }
}
