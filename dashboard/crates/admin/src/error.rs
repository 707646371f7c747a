//! Admin Error Types
//!
//! This module provides access-layer error variants that integrate
//! with the unified `kernel::error::AppError` system. Every variant's
//! `Display` is the message shown to the operator.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::config::ConfigError;
use platform::csv::CsvError;
use platform::token_store::TokenStoreError;
use thiserror::Error;

use crate::domain::value_object::BlockDurationError;
use crate::infra::endpoints::InvalidId;

/// Admin-specific result type alias
pub type AdminResult<T> = Result<T, AdminError>;

/// Admin-specific error variants
#[derive(Debug, Error)]
pub enum AdminError {
    /// No token, or the backend rejected it twice
    #[error("Session expired. Please sign in again.")]
    SessionExpired,

    /// 403 from the backend
    #[error("Insufficient privileges to perform this operation")]
    Forbidden,

    /// 404 on a block/unblock command
    #[error("User not found")]
    UserNotFound,

    /// 404 on any other request
    #[error("{0}")]
    NotFound(String),

    /// 5xx from the backend
    #[error("Server error, please try again later")]
    Server,

    /// Other 4xx, carrying the backend message
    #[error("{0}")]
    Rejected(String),

    /// Client-side validation failed; nothing was sent
    #[error("{0}")]
    InvalidInput(String),

    /// No response from the backend
    #[error("{}", .0.message())]
    Transport(AppError),

    /// Response body did not match the expected shape
    #[error("Unexpected response from the server: {0}")]
    Decode(String),

    /// Token file could not be read or written
    #[error("Token storage error: {0}")]
    Storage(#[from] TokenStoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build CSV export: {0}")]
    Export(#[from] CsvError),

    #[error("Failed to send SMS code: {0}")]
    SmsSendFailed(#[source] Box<AdminError>),

    #[error("Invalid code or authorization failed: {0}")]
    SmsConfirmFailed(#[source] Box<AdminError>),
}

impl AdminError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdminError::SessionExpired => ErrorKind::AuthExpired,
            AdminError::Forbidden => ErrorKind::Forbidden,
            AdminError::UserNotFound | AdminError::NotFound(_) => ErrorKind::NotFound,
            AdminError::Server => ErrorKind::ServerError,
            AdminError::Rejected(_) | AdminError::InvalidInput(_) => ErrorKind::Validation,
            AdminError::Transport(e) => e.kind(),
            AdminError::Decode(_)
            | AdminError::Storage(_)
            | AdminError::Config(_)
            | AdminError::Export(_) => ErrorKind::NetworkOrUnknown,
            AdminError::SmsSendFailed(inner) | AdminError::SmsConfirmFailed(inner) => inner.kind(),
        }
    }

    /// Whether the operator has to sign in again
    #[inline]
    pub fn requires_reauth(&self) -> bool {
        self.kind().requires_reauth()
    }

    /// Convert to AppError, with a suggested next step where one exists
    pub fn to_app_error(&self) -> AppError {
        let error = AppError::new(self.kind(), self.to_string());
        match self.kind() {
            ErrorKind::AuthExpired => {
                error.with_action("Sign in again with `admin-console login send-code`")
            }
            ErrorKind::ServerError => error.with_action("Retry the operation later"),
            ErrorKind::NetworkOrUnknown => match self {
                AdminError::Storage(_) => error.with_action("Check ADMIN_TOKEN_PATH permissions"),
                AdminError::Config(_) => {
                    error.with_action("Fix the variable in the environment or .env")
                }
                AdminError::Export(_) => error,
                _ => error.with_action("Check ADMIN_API_URL and your network connection"),
            },
            _ => error,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AdminError::Server => {
                tracing::error!("Backend server error");
            }
            AdminError::Transport(e) => {
                tracing::error!(error = %e, "Backend unreachable");
            }
            AdminError::Decode(msg) => {
                tracing::error!(message = %msg, "Unexpected backend response");
            }
            AdminError::Storage(e) => {
                tracing::error!(error = %e, "Token storage error");
            }
            AdminError::SessionExpired => {
                tracing::warn!("Session expired");
            }
            AdminError::Forbidden => {
                tracing::warn!("Operation forbidden for this account");
            }
            AdminError::SmsSendFailed(inner) | AdminError::SmsConfirmFailed(inner) => {
                tracing::warn!(error = %inner, "Sign-in failed");
            }
            _ => {
                tracing::debug!(error = %self, "Admin error");
            }
        }
    }
}

impl From<AppError> for AdminError {
    fn from(err: AppError) -> Self {
        AdminError::Transport(err)
    }
}

impl From<BlockDurationError> for AdminError {
    fn from(err: BlockDurationError) -> Self {
        AdminError::InvalidInput(err.to_string())
    }
}

impl From<InvalidId> for AdminError {
    fn from(err: InvalidId) -> Self {
        AdminError::InvalidInput(err.to_string())
    }
}

impl From<AdminError> for AppError {
    fn from(err: AdminError) -> Self {
        err.log();
        err.to_app_error()
    }
}
