//! Billing Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Subscription entity, repository and gateway traits
//! - `application/` - Use cases
//! - `infra/` - Database implementation, sandbox gateway
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Trust Model
//! - The payment gateway's order API is an external collaborator behind
//!   the `PaymentGateway` trait
//! - Payment confirmations are only trusted after the HMAC-SHA256
//!   signature over `order_id|payment_id` checks out (constant-time)
//! - One trial subscription ever per gym owner

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::BillingConfig;
pub use error::{BillingError, BillingResult};
pub use infra::postgres::PgBillingRepository;
pub use infra::sandbox::SandboxGateway;
pub use presentation::router::billing_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgBillingRepository as BillingStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
