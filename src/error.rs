//! Error types and handling for `FitDash`

use std::fmt;

use thiserror::Error;

/// Contact form field that failed local validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Message => "message",
        };
        f.write_str(name)
    }
}

/// Main error type for `FitDash`
#[derive(Error, Debug)]
pub enum FitDashError {
    /// Local input validation failed; nothing was sent
    #[error("Invalid {field}: {message}")]
    Validation {
        field: ContactField,
        message: String,
    },

    /// The request never produced a response
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The server answered with a non-2xx status
    #[error("Server error ({status}){}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Server { status: u16, message: Option<String> },

    /// A 2xx response whose body could not be decoded
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// The trigger control is disabled by an operation still in flight
    #[error("Operation already in progress")]
    Busy,

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl FitDashError {
    /// Create a new validation error for `field`
    pub fn validation<S: Into<String>>(field: ContactField, message: S) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a new server error
    #[must_use]
    pub fn server(status: u16, message: Option<String>) -> Self {
        Self::Server { status, message }
    }

    /// Create a new invalid-response error
    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Field that failed validation, if this is a validation error
    #[must_use]
    pub fn field(&self) -> Option<ContactField> {
        match self {
            FitDashError::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Get a user-facing message. `fallback` is used for server errors
    /// that carry no message of their own.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            FitDashError::Validation { message, .. } => message.clone(),
            FitDashError::Transport { .. } => {
                "Connection error. Please try again.".to_string()
            }
            FitDashError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            FitDashError::Server { message: None, .. } | FitDashError::InvalidResponse { .. } => {
                fallback.to_string()
            }
            FitDashError::Busy => "Please wait, still working on it.".to_string(),
            FitDashError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
        }
    }
}
