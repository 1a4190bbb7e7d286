//! Domain Layer
//!
//! Contains entities, value objects, repository traits, and the outbound
//! mail capability.

pub mod entity;
pub mod mailer;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{otp::OtpChallenge, principal::Principal};
pub use mailer::{MailError, OtpMailer, OtpPurpose};
pub use repository::{OtpRepository, PrincipalRepository};
