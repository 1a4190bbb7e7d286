//! Login Use Case
//!
//! Password check followed by a login-purpose OTP; no token is issued
//! until the code comes back through `verify_otp`.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::issue_otp::OtpIssuer;
use crate::application::register::required;
use crate::domain::mailer::{OtpMailer, OtpPurpose};
use crate::domain::repository::{OtpRepository, PrincipalRepository};
use crate::domain::value_object::{email::Email, password::RawPassword, role::Role};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub role: Role,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub email: String,
    /// Always true on success; the session starts at OTP verification
    pub requires_otp: bool,
}

/// Login use case
pub struct LoginUseCase<P, O, M>
where
    P: PrincipalRepository,
    O: OtpRepository,
    M: OtpMailer,
{
    principal_repo: Arc<P>,
    otp_issuer: OtpIssuer<O, M>,
}

impl<P, O, M> LoginUseCase<P, O, M>
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

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let role = input.role;

        let email_raw = required(input.email)?;
        let password_raw = required(input.password)?;

        // A malformed email cannot belong to an account; same response
        // as an unknown one.
        let email = Email::new(email_raw).map_err(|_| AuthError::InvalidCredentials)?;

        let principal = self
            .principal_repo
            .find_by_email(role, &email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Checked before the password; the distinct message leaks
        // verification state (see DESIGN.md).
        if !principal.is_verified {
            return Err(AuthError::UnverifiedAccount);
        }

        let raw_password =
            RawPassword::new(password_raw).map_err(|_| AuthError::InvalidCredentials)?;

        if !principal.password_hash.verify(&raw_password) {
            return Err(AuthError::InvalidCredentials);
        }

        // Supersedes any stale challenge for the address before sending
        // the login code.
        self.otp_issuer
            .issue(&principal.email, &principal.display_name, OtpPurpose::Login)
            .await?;

        tracing::info!(
            principal_id = %principal.principal_id,
            role = %role,
            "Credentials verified, login OTP pending"
        );

        Ok(LoginOutput {
            email: principal.email.to_string(),
            requires_otp: true,
        })
    }
}
