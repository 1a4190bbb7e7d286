//! OTP Code Value Object
//!
//! A 6-digit numeric one-time code. Codes are drawn uniformly from
//! 100000..=999999 so every generated code is exactly six digits with
//! no leading zero. The value is treated like a credential: `Debug`
//! output is redacted and nothing in this crate logs it.

use rand::Rng;
use std::fmt;

/// Number of digits in a code
pub const OTP_CODE_LEN: usize = 6;

/// One-time code value object
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Generate a fresh uniformly random code
    pub fn generate() -> Self {
        let n: u32 = rand::thread_rng().gen_range(100_000..=999_999);
        Self(n.to_string())
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the code digits (for the outbound mail body)
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare a user-submitted string against this code
    ///
    /// Anything that is not the exact stored digits is a mismatch; no
    /// format pre-check so that malformed input fails the same way a
    /// wrong code does.
    pub fn matches_str(&self, submitted: &str) -> bool {
        self.0 == submitted
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OtpCode").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_six_digits() {
        for _ in 0..100 {
            let code = OtpCode::generate();
            assert_eq!(code.as_str().len(), OTP_CODE_LEN);
            assert!(code.as_str().chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_generate_range() {
        for _ in 0..100 {
            let code = OtpCode::generate();
            let n: u32 = code.as_str().parse().unwrap();
            assert!((100_000..=999_999).contains(&n));
        }
    }

    #[test]
    fn test_matches_str() {
        let code = OtpCode::from_db("123456");
        assert!(code.matches_str("123456"));
        assert!(!code.matches_str("123457"));
        assert!(!code.matches_str("12345"));
        assert!(!code.matches_str(" 123456"));
        assert!(!code.matches_str(""));
    }

    #[test]
    fn test_debug_redaction() {
        let code = OtpCode::from_db("654321");
        let debug = format!("{:?}", code);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("654321"));
    }
}
