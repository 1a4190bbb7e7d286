//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations and external channels
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Gym-owner and admin registration with email + password
//! - Email OTP as second factor for signup verification and login
//! - Stateless HMAC-signed bearer tokens (7-day expiry)
//! - Role-gated access (GymOwner, Admin)
//!
//! ## Security Model
//! - Passwords hashed with bcrypt (cost factor 10)
//! - OTP codes are 6 digits, single-use, valid for 5 minutes
//! - Unknown-email and wrong-password logins are indistinguishable
//! - OTP values never appear in logs

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::{TokenClaims, TokenService};
pub use domain::value_object::role::Role;
pub use error::{AuthError, AuthResult};
pub use infra::email::LogMailer;
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAuthRepository as AuthStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

#[cfg(test)]
mod tests;
