//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

pub mod email;
pub mod postgres;

pub use email::LogMailer;
pub use postgres::PgAuthRepository;
