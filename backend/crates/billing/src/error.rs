//! Billing Error Types
//!
//! This module provides billing-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::gateway::GatewayError;

/// Billing-specific result type alias
pub type BillingResult<T> = Result<T, BillingError>;

/// Billing-specific error variants
#[derive(Debug, Error)]
pub enum BillingError {
    /// Required request fields missing or empty
    #[error("All fields are required")]
    MissingFields,

    /// Plan type string not one of trial/monthly/yearly
    #[error("Unknown plan type.")]
    UnknownPlan,

    /// The gym owner has consumed their one trial
    #[error("Trial already used.")]
    TrialAlreadyUsed,

    /// Signature does not match HMAC(order_id|payment_id)
    #[error("Invalid payment signature.")]
    InvalidSignature,

    /// No subscription behind the presented id
    #[error("Subscription not found.")]
    SubscriptionNotFound,

    /// Gym owner has no active subscription
    #[error("No active subscription found.")]
    NoActiveSubscription,

    /// Order API call failed
    #[error("Payment gateway error: {0}")]
    Gateway(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BillingError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BillingError::MissingFields
            | BillingError::UnknownPlan
            | BillingError::TrialAlreadyUsed
            | BillingError::InvalidSignature => StatusCode::BAD_REQUEST,
            BillingError::SubscriptionNotFound | BillingError::NoActiveSubscription => {
                StatusCode::NOT_FOUND
            }
            BillingError::Gateway(_) | BillingError::Database(_) | BillingError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BillingError::MissingFields
            | BillingError::UnknownPlan
            | BillingError::TrialAlreadyUsed
            | BillingError::InvalidSignature => ErrorKind::BadRequest,
            BillingError::SubscriptionNotFound | BillingError::NoActiveSubscription => {
                ErrorKind::NotFound
            }
            BillingError::Gateway(_) | BillingError::Database(_) | BillingError::Internal(_) => {
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
            BillingError::Database(e) => {
                tracing::error!(error = %e, "Billing database error");
            }
            BillingError::Gateway(msg) => {
                tracing::error!(message = %msg, "Payment gateway error");
            }
            BillingError::Internal(msg) => {
                tracing::error!(message = %msg, "Billing internal error");
            }
            BillingError::InvalidSignature => {
                tracing::warn!("Payment signature rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Billing error");
            }
        }
    }
}

impl From<BillingError> for AppError {
    fn from(err: BillingError) -> Self {
        err.to_app_error()
    }
}

impl From<GatewayError> for BillingError {
    fn from(err: GatewayError) -> Self {
        BillingError::Gateway(err.to_string())
    }
}

impl IntoResponse for BillingError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
