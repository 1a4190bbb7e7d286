//! Session Token Service
//!
//! Mints and validates stateless bearer tokens. A token is
//! `base64url(claims-json) + "." + base64url(hmac-sha256)` signed with the
//! server secret; nothing is persisted, so validity is purely signature
//! plus expiry, and compromise recovery means rotating the secret.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::value_object::{principal_id::PrincipalId, role::Role};
use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Signed claim set carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub principal_id: Uuid,
    pub role: Role,
    pub issued_at_ms: i64,
    pub expires_at_ms: i64,
}

/// Stateless token mint/validate service
#[derive(Clone)]
pub struct TokenService {
    secret: [u8; 32],
    ttl_ms: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.token_secret,
            ttl_ms: config.token_ttl_ms(),
        }
    }

    /// Mint a token for a principal
    pub fn mint(&self, principal_id: &PrincipalId, role: Role) -> AuthResult<String> {
        let now_ms = Utc::now().timestamp_millis();

        let claims = TokenClaims {
            principal_id: *principal_id.as_uuid(),
            role,
            issued_at_ms: now_ms,
            expires_at_ms: now_ms + self.ttl_ms,
        };

        let payload = serde_json::to_vec(&claims)
            .map_err(|e| AuthError::Internal(format!("Claims serialization failed: {e}")))?;
        let payload_b64 = URL_SAFE_NO_PAD.encode(&payload);

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(payload_b64.as_bytes());
        let signature = mac.finalize().into_bytes();

        Ok(format!(
            "{}.{}",
            payload_b64,
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// Validate a token against the current clock
    pub fn validate(&self, token: &str) -> AuthResult<TokenClaims> {
        self.validate_at(token, Utc::now().timestamp_millis())
    }

    /// Validate a token at an explicit instant
    ///
    /// A token is accepted through its expiry instant and rejected
    /// strictly after it.
    pub fn validate_at(&self, token: &str, now_ms: i64) -> AuthResult<TokenClaims> {
        let (payload_b64, signature_b64) = token.split_once('.').ok_or(AuthError::TokenInvalid)?;
        if signature_b64.contains('.') {
            return Err(AuthError::TokenInvalid);
        }

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(payload_b64.as_bytes());

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| AuthError::TokenInvalid)?;

        mac.verify_slice(&signature)
            .map_err(|_| AuthError::TokenInvalid)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| AuthError::TokenInvalid)?;

        let claims: TokenClaims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::TokenInvalid)?;

        if now_ms > claims.expires_at_ms {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> TokenService {
        TokenService::new(&AuthConfig::with_random_secret())
    }

    #[test]
    fn mint_and_validate_roundtrip() {
        let service = test_service();
        let principal_id = PrincipalId::new();

        let token = service.mint(&principal_id, Role::GymOwner).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(&claims.principal_id, principal_id.as_uuid());
        assert_eq!(claims.role, Role::GymOwner);
        assert_eq!(
            claims.expires_at_ms - claims.issued_at_ms,
            7 * 24 * 3600 * 1000
        );
    }

    #[test]
    fn admin_role_survives_roundtrip() {
        let service = test_service();
        let token = service.mint(&PrincipalId::new(), Role::Admin).unwrap();
        assert_eq!(service.validate(&token).unwrap().role, Role::Admin);
    }

    #[test]
    fn malformed_token_fails_validation() {
        let service = test_service();
        assert!(matches!(
            service.validate("not-a-valid-token"),
            Err(AuthError::TokenInvalid)
        ));
        assert!(matches!(
            service.validate("a.b.c"),
            Err(AuthError::TokenInvalid)
        ));
        assert!(matches!(service.validate(""), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn wrong_secret_fails_validation() {
        let service1 = test_service();
        let service2 = test_service();

        let token = service1.mint(&PrincipalId::new(), Role::GymOwner).unwrap();
        assert!(matches!(
            service2.validate(&token),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn tampered_payload_fails_validation() {
        let service = test_service();
        let token = service.mint(&PrincipalId::new(), Role::GymOwner).unwrap();

        let (payload_b64, signature_b64) = token.split_once('.').unwrap();
        let mut payload = URL_SAFE_NO_PAD.decode(payload_b64).unwrap();
        let json = String::from_utf8(payload.clone()).unwrap();
        let forged = json.replace("\"gymOwner\"", "\"admin\"");
        payload = forged.into_bytes();

        let forged_token = format!("{}.{}", URL_SAFE_NO_PAD.encode(&payload), signature_b64);
        assert!(matches!(
            service.validate(&forged_token),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn expiry_boundary_both_sides() {
        let service = test_service();
        let token = service.mint(&PrincipalId::new(), Role::GymOwner).unwrap();
        let claims = service.validate(&token).unwrap();

        // One minute before the 7-day mark: accepted
        assert!(
            service
                .validate_at(&token, claims.expires_at_ms - 60_000)
                .is_ok()
        );

        // At the exact expiry instant: still accepted
        assert!(service.validate_at(&token, claims.expires_at_ms).is_ok());

        // One second past: rejected as expired, not invalid
        assert!(matches!(
            service.validate_at(&token, claims.expires_at_ms + 1_000),
            Err(AuthError::TokenExpired)
        ));
    }
}
