//! Infrastructure Layer
//!
//! Database implementation and the sandbox gateway.

pub mod postgres;
pub mod sandbox;

pub use postgres::PgBillingRepository;
pub use sandbox::SandboxGateway;
