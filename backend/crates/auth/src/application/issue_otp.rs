//! OTP Issuance & Delivery
//!
//! Shared by registration, login, and resend: generate a code, replace
//! whatever live challenge the address has, then dispatch the message
//! through the injected channel.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::otp::OtpChallenge;
use crate::domain::mailer::{OtpMailer, OtpPurpose};
use crate::domain::repository::OtpRepository;
use crate::domain::value_object::{email::Email, otp_code::OtpCode};
use crate::error::{AuthError, AuthResult};

/// OTP issuance service
pub struct OtpIssuer<O, M>
where
    O: OtpRepository,
    M: OtpMailer,
{
    otp_repo: Arc<O>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<O, M> OtpIssuer<O, M>
where
    O: OtpRepository,
    M: OtpMailer,
{
    pub fn new(otp_repo: Arc<O>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            otp_repo,
            mailer,
            config,
        }
    }

    /// Issue a fresh challenge for an address and dispatch it
    ///
    /// The delete-then-put pair keeps the single-live-code invariant; the
    /// ledger itself does not enforce it. If dispatch fails the stored
    /// code is NOT rolled back: the caller reports `DeliveryFailed` and
    /// resend remains the recovery path.
    pub async fn issue(
        &self,
        email: &Email,
        display_name: &str,
        purpose: OtpPurpose,
    ) -> AuthResult<()> {
        let code = OtpCode::generate();
        let ttl = chrono::Duration::from_std(self.config.otp_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid OTP TTL: {e}")))?;

        let challenge = OtpChallenge::new(email.clone(), code, ttl);

        self.otp_repo.delete(email).await?;
        self.otp_repo.put(&challenge).await?;

        if let Err(e) = self
            .mailer
            .send_otp(email, display_name, &challenge.code, purpose)
            .await
        {
            tracing::error!(
                error = %e,
                email = %email,
                purpose = %purpose,
                "OTP dispatch failed; code kept in ledger"
            );
            return Err(AuthError::DeliveryFailed);
        }

        tracing::info!(email = %email, purpose = %purpose, "OTP dispatched");

        Ok(())
    }
}
