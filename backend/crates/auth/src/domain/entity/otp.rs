//! OTP Challenge Entity
//!
//! The single live one-time code for an email address. At most one row
//! exists per email; callers replace (delete-then-put) rather than stack.
//! TTL is provided by the application layer (config), not hard-coded here.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{email::Email, otp_code::OtpCode};

/// OTP challenge entity
#[derive(Debug, Clone)]
pub struct OtpChallenge {
    /// Target address, also the ledger key
    pub email: Email,
    /// 6-digit code
    pub code: OtpCode,
    /// Hard validity cutoff (issued-at + configured TTL)
    pub expires_at: DateTime<Utc>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl OtpChallenge {
    /// Create a new challenge expiring `ttl` from now
    pub fn new(email: Email, code: OtpCode, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            email,
            code,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    /// A challenge past its cutoff must never verify, even if the row
    /// has not been garbage-collected yet.
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}
