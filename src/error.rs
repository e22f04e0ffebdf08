//! Error types and handling for the nearby finder

use thiserror::Error;

/// Main error type for the nearby finder
#[derive(Error, Debug)]
pub enum FinderError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Caller input validation errors (center, radius, coordinate text)
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A listing that cannot be ranked because its geodata is unusable
    #[error("Invalid listing '{id}': {reason}")]
    InvalidListing { id: String, reason: String },

    /// A listing source could not be reached or answered unsuccessfully
    #[error("Listing source error: {message}")]
    Source { message: String },

    /// A listing document was not a well-formed listing array
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl FinderError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new invalid listing error
    pub fn invalid_listing<I: Into<String>, R: Into<String>>(id: I, reason: R) -> Self {
        Self::InvalidListing {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a new listing source error
    pub fn listing_source<S: Into<String>>(message: S) -> Self {
        Self::Source {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            FinderError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            FinderError::Validation { message } => format!("Invalid input: {message}"),
            FinderError::InvalidListing { id, .. } => {
                format!("Listing '{id}' has no usable location and was left out.")
            }
            FinderError::Source { .. } => {
                "Unable to load listings. The built-in listings are shown instead.".to_string()
            }
            FinderError::Parse { .. } => {
                "The listing document is malformed. The built-in listings are shown instead."
                    .to_string()
            }
            FinderError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
