//! Mail Channel Implementations
//!
//! The production transport (SMTP or a mail API) is wired at deployment;
//! this module carries the development sender.

use crate::domain::mailer::{MailError, OtpMailer, OtpPurpose};
use crate::domain::value_object::{email::Email, otp_code::OtpCode};

/// Local dev sender that logs the dispatch instead of sending real mail
///
/// The code value itself never reaches the logs.
#[derive(Clone, Debug, Default)]
pub struct LogMailer;

impl OtpMailer for LogMailer {
    async fn send_otp(
        &self,
        to: &Email,
        display_name: &str,
        _code: &OtpCode,
        purpose: OtpPurpose,
    ) -> Result<(), MailError> {
        tracing::info!(
            to = %to,
            name = %display_name,
            subject = %purpose.subject(display_name),
            "otp mail dispatch (log sender)"
        );
        Ok(())
    }
}
