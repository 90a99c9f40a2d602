//! Unified error types and result handling.
//!
//! Every component converts collaborator failures into this enum at its boundary
//! and keeps the rendered [`Error::user_message`] as its last-error field.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Local validation failed; the request never left the process.
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The action needs a logged-in user.
    #[error("You must be logged in to {action}")]
    AuthRequired { action: &'static str },

    /// The request could not be delivered or the response never arrived.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The collaborator answered with a failure status.
    #[error("Service error (HTTP {status}): {message}")]
    Service { status: u16, message: String },

    /// The target record no longer exists.
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl Error {
    /// Short message rendered next to the control that triggered the failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput { .. } | Self::AuthRequired { .. } | Self::NotFound { .. } => {
                self.to_string()
            }
            Self::Network { .. } => "Could not reach the server. Please try again.".to_string(),
            Self::Service { status, .. } => {
                format!("The server rejected the request (HTTP {status}). Please try again.")
            }
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }

    /// Convenience constructor for validation failures.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        if let Some(status) = value.status() {
            Self::Service {
                status: status.as_u16(),
                message: value.to_string(),
            }
        } else if value.is_decode() {
            Self::Service {
                status: 200,
                message: format!("Malformed response body: {value}"),
            }
        } else {
            Self::Network {
                message: value.to_string(),
            }
        }
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
