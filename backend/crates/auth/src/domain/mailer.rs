//! Outbound Mail Capability
//!
//! The delivery channel is an external collaborator: the engine only
//! needs "send a message to an address". Implementations decide the
//! transport (SMTP, HTTP API, log-only for development).

use std::fmt;

use thiserror::Error;

use crate::domain::value_object::{email::Email, otp_code::OtpCode};

/// What the code is for; affects message wording only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
    Signup,
    Login,
}

impl OtpPurpose {
    /// Mail subject line for this purpose
    pub fn subject(&self, display_name: &str) -> String {
        match self {
            OtpPurpose::Signup => "Gymkhaana - OTP Verification".to_string(),
            OtpPurpose::Login => format!("Gymkhaana Login - {display_name}"),
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OtpPurpose::Signup => f.write_str("signup"),
            OtpPurpose::Login => f.write_str("login"),
        }
    }
}

/// Mail dispatch errors
#[derive(Debug, Error)]
pub enum MailError {
    /// The channel refused or failed to deliver
    #[error("Failed to send mail: {0}")]
    Send(String),
}

/// Mail delivery abstraction
#[trait_variant::make(OtpMailer: Send)]
pub trait LocalOtpMailer {
    /// Deliver a one-time code to an address, or fail
    async fn send_otp(
        &self,
        to: &Email,
        display_name: &str,
        code: &OtpCode,
        purpose: OtpPurpose,
    ) -> Result<(), MailError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_per_purpose() {
        assert_eq!(
            OtpPurpose::Signup.subject("Acme Gym"),
            "Gymkhaana - OTP Verification"
        );
        assert_eq!(
            OtpPurpose::Login.subject("Acme Gym"),
            "Gymkhaana Login - Acme Gym"
        );
    }
}
