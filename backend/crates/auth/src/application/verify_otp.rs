//! Verify OTP Use Case
//!
//! Both verification flows (signup and login) run the same ledger checks;
//! the purpose only decides whether the principal's verification flag is
//! flipped. The check is stateless: any live matching challenge verifies,
//! regardless of when or where the preceding request ran.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::register::required;
use crate::application::token::TokenService;
use crate::domain::entity::principal::Principal;
use crate::domain::mailer::OtpPurpose;
use crate::domain::repository::{OtpRepository, PrincipalRepository};
use crate::domain::value_object::email::Email;
use crate::domain::value_object::role::Role;
use crate::error::{AuthError, AuthResult};

/// Verify OTP input
pub struct VerifyOtpInput {
    pub role: Role,
    pub email: Option<String>,
    pub otp: Option<String>,
}

/// Verify OTP output
#[derive(Debug)]
pub struct VerifyOtpOutput {
    /// Freshly minted session token
    pub token: String,
    /// Principal as of this verification (flag already flipped for signup)
    pub principal: Principal,
}

/// Verify OTP use case
pub struct VerifyOtpUseCase<P, O>
where
    P: PrincipalRepository,
    O: OtpRepository,
{
    principal_repo: Arc<P>,
    otp_repo: Arc<O>,
    tokens: TokenService,
}

impl<P, O> VerifyOtpUseCase<P, O>
where
    P: PrincipalRepository,
    O: OtpRepository,
{
    pub fn new(principal_repo: Arc<P>, otp_repo: Arc<O>, config: Arc<AuthConfig>) -> Self {
        let tokens = TokenService::new(&config);
        Self {
            principal_repo,
            otp_repo,
            tokens,
        }
    }

    pub async fn execute(
        &self,
        input: VerifyOtpInput,
        purpose: OtpPurpose,
    ) -> AuthResult<VerifyOtpOutput> {
        let role = input.role;

        let email_raw = required(input.email)?;
        let submitted = required(input.otp)?;

        let email = Email::new(email_raw)?;

        let challenge = self
            .otp_repo
            .get(&email)
            .await?
            .ok_or(AuthError::OtpNotFound)?;

        if challenge.is_expired() {
            // Lazy garbage collection: the stale row goes now.
            self.otp_repo.delete(&email).await?;
            return Err(AuthError::OtpExpired);
        }

        if !challenge.code.matches_str(&submitted) {
            return Err(AuthError::OtpMismatch);
        }

        let mut principal = self
            .principal_repo
            .find_by_email(role, &email)
            .await?
            .ok_or(AuthError::IdentityNotFound)?;

        if purpose == OtpPurpose::Signup && !principal.is_verified {
            self.principal_repo
                .mark_verified(role, &principal.principal_id)
                .await?;
            principal.mark_verified();
        }

        let token = self.tokens.mint(&principal.principal_id, role)?;

        // Consume the challenge: a second attempt with the same code must
        // find nothing.
        self.otp_repo.delete(&email).await?;

        tracing::info!(
            principal_id = %principal.principal_id,
            role = %role,
            purpose = %purpose,
            "OTP verified, session token minted"
        );

        Ok(VerifyOtpOutput { token, principal })
    }
}
