//! Unified error handling.
//!
//! Provides a unified `AppError` type for every user action. Nothing here is
//! fatal: the runtime turns each error into a toast via
//! [`AppError::toast_message`] and keeps rendering the current view.

use thiserror::Error;

use craftify_core::{EmailError, PriceError};

/// Application-level error type for the marketplace.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required input is missing or malformed.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Email address failed to parse.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Price failed to parse.
    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    /// Email and password don't match any account.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Another account already uses this email.
    #[error("Email already registered")]
    EmailTaken,

    /// Referenced entity doesn't exist (or no longer exists).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The acting user may not perform this action.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Template rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// File I/O failed (image upload, invoice export).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Shorthand for a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Message shown to the user as a toast.
    ///
    /// Internal failures are logged and replaced by a generic message.
    #[must_use]
    pub fn toast_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::NotFound(msg) | Self::Forbidden(msg) => msg.clone(),
            Self::InvalidEmail(_) => "Enter a valid email address".to_string(),
            Self::InvalidPrice(err) => format!("Invalid price: {err}"),
            Self::InvalidCredentials | Self::EmailTaken => self.to_string(),
            Self::Render(_) | Self::Io(_) => {
                tracing::error!(error = %self, "Action failed");
                "Something went wrong".to_string()
            }
        }
    }

    /// Whether this error means the user entered something invalid.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidEmail(_)
                | Self::InvalidPrice(_)
                | Self::InvalidCredentials
                | Self::EmailTaken
        )
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
