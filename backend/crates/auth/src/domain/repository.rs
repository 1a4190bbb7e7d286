//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! The credential store is one trait taking a [`Role`]: each role keeps its
//! own collection underneath, but the authentication engine stays generic.

use crate::domain::entity::{otp::OtpChallenge, principal::Principal};
use crate::domain::value_object::{email::Email, principal_id::PrincipalId, role::Role};
use crate::error::AuthResult;

/// Credential store trait
#[trait_variant::make(PrincipalRepository: Send)]
pub trait LocalPrincipalRepository {
    /// Create a new principal (the record's own `role` picks the collection)
    async fn create(&self, principal: &Principal) -> AuthResult<()>;

    /// Find a principal by ID within a role's collection
    async fn find_by_id(
        &self,
        role: Role,
        principal_id: &PrincipalId,
    ) -> AuthResult<Option<Principal>>;

    /// Find a principal by email within a role's collection
    async fn find_by_email(&self, role: Role, email: &Email) -> AuthResult<Option<Principal>>;

    /// Check if an email is already registered for a role
    async fn exists_by_email(&self, role: Role, email: &Email) -> AuthResult<bool>;

    /// Flip the verification flag

    async fn mark_verified(&self, role: Role, principal_id: &PrincipalId) -> AuthResult<()>;
}

/// OTP ledger trait
///
/// The ledger enforces nothing itself: single-live-code-per-email is the
/// callers' delete-then-put discipline, and `put` replaces whatever row
/// exists for the address.
#[trait_variant::make(OtpRepository: Send)]
pub trait LocalOtpRepository {
    /// Store a challenge, replacing any existing row for its email
    async fn put(&self, challenge: &OtpChallenge) -> AuthResult<()>;

    /// Fetch the live challenge for an email, if any
    async fn get(&self, email: &Email) -> AuthResult<Option<OtpChallenge>>;

    /// Remove the challenge for an email (idempotent)
    async fn delete(&self, email: &Email) -> AuthResult<()>;
}
