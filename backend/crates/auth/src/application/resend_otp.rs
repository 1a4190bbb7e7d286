//! Resend OTP Use Case
//!
//! Replaces whatever challenge the address has with a fresh one. The
//! message always uses the login wording, even when the pending action
//! is a registration (see DESIGN.md).

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::issue_otp::OtpIssuer;
use crate::application::register::required;
use crate::domain::mailer::{OtpMailer, OtpPurpose};
use crate::domain::repository::{OtpRepository, PrincipalRepository};
use crate::domain::value_object::{email::Email, role::Role};
use crate::error::{AuthError, AuthResult};

/// Resend OTP input
pub struct ResendOtpInput {
    pub role: Role,
    pub email: Option<String>,
}

/// Resend OTP output
#[derive(Debug)]
pub struct ResendOtpOutput {
    pub email: String,
}

/// Resend OTP use case
pub struct ResendOtpUseCase<P, O, M>
where
    P: PrincipalRepository,
    O: OtpRepository,
    M: OtpMailer,
{
    principal_repo: Arc<P>,
    otp_issuer: OtpIssuer<O, M>,
}

impl<P, O, M> ResendOtpUseCase<P, O, M>
where
    P: PrincipalRepository,
    O: OtpRepository,
    M: OtpMailer,
{
    pub fn new(
        principal_repo: Arc<P>,
        otp_repo: Arc<O>,
        mailer: Arc<M>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            principal_repo,
            otp_issuer: OtpIssuer::new(otp_repo, mailer, config),
        }
    }

    pub async fn execute(&self, input: ResendOtpInput) -> AuthResult<ResendOtpOutput> {
        let role = input.role;

        let email = Email::new(required(input.email)?)?;

        let principal = self
            .principal_repo
            .find_by_email(role, &email)
            .await?
            .ok_or(AuthError::IdentityNotFound)?;

        self.otp_issuer
            .issue(&principal.email, &principal.display_name, OtpPurpose::Login)
            .await?;

        tracing::info!(
            principal_id = %principal.principal_id,
            role = %role,
            "OTP resent"
        );

        Ok(ResendOtpOutput {
            email: principal.email.to_string(),
        })
    }
}
