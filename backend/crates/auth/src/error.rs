//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::role::Role;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Required request fields missing or empty
    #[error("All fields are required")]
    MissingFields,

    /// Input failed validation (malformed email, weak password, ...)
    #[error("{0}")]
    Validation(String),

    /// An account with this email already exists for the role
    #[error("An account with this email already exists")]
    DuplicateIdentity,

    /// Unknown email or wrong password; the two are deliberately
    /// indistinguishable to prevent account enumeration
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Account exists but the signup OTP was never verified
    #[error("Please verify your email before logging in")]
    UnverifiedAccount,

    /// No live OTP for this email
    #[error("OTP not found. Please request a new one.")]
    OtpNotFound,

    /// OTP past its 5-minute window (stale record deleted on detection)
    #[error("OTP expired. Please request a new one.")]
    OtpExpired,

    /// Submitted code does not match the stored one
    #[error("Invalid OTP")]
    OtpMismatch,

    /// No principal behind the email in an OTP/resend flow
    #[error("Account not found. Please register first.")]
    IdentityNotFound,

    /// Outbound mail dispatch failed; the OTP stays in the ledger
    #[error("Failed to send OTP. Please try again.")]
    DeliveryFailed,

    /// No Authorization header / not a Bearer token
    #[error("Access token required")]
    MissingToken,

    /// Malformed token or bad signature
    #[error("Invalid or expired token")]
    TokenInvalid,

    /// Token past its 7-day expiry
    #[error("Invalid or expired token")]
    TokenExpired,

    /// Token valid but its principal no longer resolves
    #[error("Invalid token - user not found")]
    TokenPrincipalNotFound,

    /// Token carries a different role than the route requires
    #[error("Please authenticate as {}", .0.label())]
    WrongRole(Role),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingFields
            | AuthError::Validation(_)
            | AuthError::DuplicateIdentity
            | AuthError::InvalidCredentials
            | AuthError::UnverifiedAccount
            | AuthError::OtpNotFound
            | AuthError::OtpExpired
            | AuthError::OtpMismatch
            | AuthError::IdentityNotFound => StatusCode::BAD_REQUEST,
            AuthError::MissingToken
            | AuthError::TokenPrincipalNotFound
            | AuthError::WrongRole(_) => StatusCode::UNAUTHORIZED,
            AuthError::TokenInvalid | AuthError::TokenExpired => StatusCode::FORBIDDEN,
            AuthError::DeliveryFailed | AuthError::Database(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingFields
            | AuthError::Validation(_)
            | AuthError::DuplicateIdentity
            | AuthError::InvalidCredentials
            | AuthError::UnverifiedAccount
            | AuthError::OtpNotFound
            | AuthError::OtpExpired
            | AuthError::OtpMismatch
            | AuthError::IdentityNotFound => ErrorKind::BadRequest,
            AuthError::MissingToken
            | AuthError::TokenPrincipalNotFound
            | AuthError::WrongRole(_) => ErrorKind::Unauthorized,
            AuthError::TokenInvalid | AuthError::TokenExpired => ErrorKind::Forbidden,
            AuthError::DeliveryFailed | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::DeliveryFailed => {
                tracing::error!("OTP delivery failed");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::OtpMismatch => {
                tracing::warn!("OTP mismatch");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}
