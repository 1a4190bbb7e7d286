//! Unit tests for the auth crate
//!
//! The engine tests run against an in-memory store and a capturing
//! mailer, so every OTP the "user" receives is observable.

mod support {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use crate::application::config::AuthConfig;
    use crate::application::{
        LoginInput, LoginOutput, LoginUseCase, RegisterInput, RegisterOutput, RegisterUseCase,
        ResendOtpInput, ResendOtpOutput, ResendOtpUseCase, VerifyOtpInput, VerifyOtpOutput,
        VerifyOtpUseCase,
    };
    use crate::domain::entity::{otp::OtpChallenge, principal::Principal};
    use crate::domain::mailer::{MailError, OtpMailer, OtpPurpose};
    use crate::domain::repository::{OtpRepository, PrincipalRepository};
    use crate::domain::value_object::{
        email::Email, otp_code::OtpCode, principal_id::PrincipalId, role::Role,
    };
    use crate::error::AuthResult;

    /// In-memory credential store + OTP ledger
    #[derive(Clone, Default)]
    pub struct MemoryAuthStore {
        principals: Arc<Mutex<Vec<Principal>>>,
        otps: Arc<Mutex<HashMap<String, OtpChallenge>>>,
    }

    impl MemoryAuthStore {
        pub fn stored_challenge(&self, email: &str) -> Option<OtpChallenge> {
            self.otps.lock().unwrap().get(email).cloned()
        }

        pub fn stored_principal(&self, role: Role, email: &str) -> Option<Principal> {
            self.principals
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.role == role && p.email.as_str() == email)
                .cloned()
        }

        /// Plant a challenge directly, bypassing issuance
        pub fn plant_challenge(&self, challenge: OtpChallenge) {
            self.otps
                .lock()
                .unwrap()
                .insert(challenge.email.as_str().to_string(), challenge);
        }
    }

    impl PrincipalRepository for MemoryAuthStore {
        async fn create(&self, principal: &Principal) -> AuthResult<()> {
            self.principals.lock().unwrap().push(principal.clone());
            Ok(())
        }

        async fn find_by_id(
            &self,
            role: Role,
            principal_id: &PrincipalId,
        ) -> AuthResult<Option<Principal>> {
            Ok(self
                .principals
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.role == role && &p.principal_id == principal_id)
                .cloned())
        }

        async fn find_by_email(&self, role: Role, email: &Email) -> AuthResult<Option<Principal>> {
            Ok(self
                .principals
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.role == role && p.email == *email)
                .cloned())
        }

        async fn exists_by_email(&self, role: Role, email: &Email) -> AuthResult<bool> {
            Ok(self
                .principals
                .lock()
                .unwrap()
                .iter()
                .any(|p| p.role == role && p.email == *email))
        }

        async fn mark_verified(&self, role: Role, principal_id: &PrincipalId) -> AuthResult<()> {
            let mut principals = self.principals.lock().unwrap();
            if let Some(p) = principals
                .iter_mut()
                .find(|p| p.role == role && &p.principal_id == principal_id)
            {
                p.mark_verified();
            }
            Ok(())
        }
    }

    impl OtpRepository for MemoryAuthStore {
        async fn put(&self, challenge: &OtpChallenge) -> AuthResult<()> {
            self.otps
                .lock()
                .unwrap()
                .insert(challenge.email.as_str().to_string(), challenge.clone());
            Ok(())
        }

        async fn get(&self, email: &Email) -> AuthResult<Option<OtpChallenge>> {
            Ok(self.otps.lock().unwrap().get(email.as_str()).cloned())
        }

        async fn delete(&self, email: &Email) -> AuthResult<()> {
            self.otps.lock().unwrap().remove(email.as_str());
            Ok(())
        }
    }

    /// A delivered message as the user would see it
    #[derive(Clone)]
    pub struct SentMail {
        pub to: String,
        pub code: String,
        pub purpose: OtpPurpose,
    }

    /// Mailer that records every dispatch (and can fail once on demand)
    #[derive(Clone, Default)]
    pub struct CaptureMailer {
        pub sent: Arc<Mutex<Vec<SentMail>>>,
        pub fail_next: Arc<AtomicBool>,
    }

    impl OtpMailer for CaptureMailer {
        async fn send_otp(
            &self,
            to: &Email,
            _display_name: &str,
            code: &OtpCode,
            purpose: OtpPurpose,
        ) -> Result<(), MailError> {
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(MailError::Send("smtp unavailable".to_string()));
            }
            self.sent.lock().unwrap().push(SentMail {
                to: to.to_string(),
                code: code.as_str().to_string(),
                purpose,
            });
            Ok(())
        }
    }

    /// All four use cases over the same store and mailer
    pub struct TestEngine {
        pub store: MemoryAuthStore,
        pub mailer: CaptureMailer,
        pub config: Arc<AuthConfig>,
    }

    impl TestEngine {
        pub fn new() -> Self {
            Self {
                store: MemoryAuthStore::default(),
                mailer: CaptureMailer::default(),
                config: Arc::new(AuthConfig::with_random_secret()),
            }
        }

        fn repo(&self) -> Arc<MemoryAuthStore> {
            Arc::new(self.store.clone())
        }

        pub async fn register(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
            RegisterUseCase::new(
                self.repo(),
                self.repo(),
                Arc::new(self.mailer.clone()),
                self.config.clone(),
            )
            .execute(input)
            .await
        }

        pub async fn login(&self, role: Role, email: &str, password: &str) -> AuthResult<LoginOutput> {
            LoginUseCase::new(
                self.repo(),
                self.repo(),
                Arc::new(self.mailer.clone()),
                self.config.clone(),
            )
            .execute(LoginInput {
                role,
                email: Some(email.to_string()),
                password: Some(password.to_string()),
            })
            .await
        }

        pub async fn verify(
            &self,
            role: Role,
            email: &str,
            otp: &str,
            purpose: OtpPurpose,
        ) -> AuthResult<VerifyOtpOutput> {
            VerifyOtpUseCase::new(self.repo(), self.repo(), self.config.clone())
                .execute(
                    VerifyOtpInput {
                        role,
                        email: Some(email.to_string()),
                        otp: Some(otp.to_string()),
                    },
                    purpose,
                )
                .await
        }

        pub async fn resend(&self, role: Role, email: &str) -> AuthResult<ResendOtpOutput> {
            ResendOtpUseCase::new(
                self.repo(),
                self.repo(),
                Arc::new(self.mailer.clone()),
                self.config.clone(),
            )
            .execute(ResendOtpInput {
                role,
                email: Some(email.to_string()),
            })
            .await
        }

        /// The code from the most recent delivered mail
        pub fn last_code(&self) -> String {
            self.mailer
                .sent
                .lock()
                .unwrap()
                .last()
                .expect("no mail delivered")
                .code
                .clone()
        }

        pub fn last_purpose(&self) -> OtpPurpose {
            self.mailer
                .sent
                .lock()
                .unwrap()
                .last()
                .expect("no mail delivered")
                .purpose
        }

        pub fn delivered_count(&self) -> usize {
            self.mailer.sent.lock().unwrap().len()
        }
    }

    pub fn gym_owner_input(email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            role: Role::GymOwner,
            display_name: Some("Acme Gym".to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            address: Some("12 Main St".to_string()),
            contact_number: Some("9876543210".to_string()),
        }
    }

    pub fn admin_input(email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            role: Role::Admin,
            display_name: Some("Root".to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            address: None,
            contact_number: None,
        }
    }
}

#[cfg(test)]
mod engine_tests {
    use super::support::{TestEngine, admin_input, gym_owner_input};
    use crate::application::TokenService;
    use crate::domain::entity::otp::OtpChallenge;
    use crate::domain::mailer::OtpPurpose;
    use crate::domain::value_object::{email::Email, otp_code::OtpCode, role::Role};
    use crate::error::AuthError;

    const EMAIL: &str = "owner@acme.example";
    const PASSWORD: &str = "TrainHard#2025";

    #[tokio::test]
    async fn signup_code_verifies_exactly_once() {
        let engine = TestEngine::new();
        engine
            .register(gym_owner_input(EMAIL, PASSWORD))
            .await
            .unwrap();

        let code = engine.last_code();
        let output = engine
            .verify(Role::GymOwner, EMAIL, &code, OtpPurpose::Signup)
            .await
            .unwrap();
        assert!(!output.token.is_empty());
        assert!(output.principal.is_verified);

        // The challenge is consumed: same code again finds nothing.
        let second = engine
            .verify(Role::GymOwner, EMAIL, &code, OtpPurpose::Signup)
            .await;
        assert!(matches!(second, Err(AuthError::OtpNotFound)));
    }

    #[tokio::test]
    async fn expired_code_always_rejected_and_row_deleted() {
        let engine = TestEngine::new();
        engine
            .register(gym_owner_input(EMAIL, PASSWORD))
            .await
            .unwrap();

        // Replace the live challenge with one already past its cutoff,
        // keeping the same digits the user received.
        let code = engine.last_code();
        engine.store.plant_challenge(OtpChallenge::new(
            Email::new(EMAIL).unwrap(),
            OtpCode::from_db(code.clone()),
            chrono::Duration::seconds(-1),
        ));

        let result = engine
            .verify(Role::GymOwner, EMAIL, &code, OtpPurpose::Signup)
            .await;
        assert!(matches!(result, Err(AuthError::OtpExpired)));

        // Lazy cleanup removed the stale row.
        assert!(engine.store.stored_challenge(EMAIL).is_none());
    }

    #[tokio::test]
    async fn unverified_login_never_issues_code() {
        let engine = TestEngine::new();
        engine
            .register(gym_owner_input(EMAIL, PASSWORD))
            .await
            .unwrap();
        let signup_code = engine.last_code();

        // Correct credentials, but the signup OTP was never verified.
        let result = engine.login(Role::GymOwner, EMAIL, PASSWORD).await;
        assert!(matches!(result, Err(AuthError::UnverifiedAccount)));

        // Only the signup mail went out, and the ledger still holds the
        // signup challenge untouched.
        assert_eq!(engine.delivered_count(), 1);
        let stored = engine.store.stored_challenge(EMAIL).unwrap();
        assert!(stored.code.matches_str(&signup_code));
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_indistinguishable() {
        let engine = TestEngine::new();
        engine
            .register(gym_owner_input(EMAIL, PASSWORD))
            .await
            .unwrap();
        let code = engine.last_code();
        engine
            .verify(Role::GymOwner, EMAIL, &code, OtpPurpose::Signup)
            .await
            .unwrap();

        let unknown = engine
            .login(Role::GymOwner, "nobody@acme.example", PASSWORD)
            .await
            .unwrap_err();
        let wrong = engine
            .login(Role::GymOwner, EMAIL, "NotThePassword1!")
            .await
            .unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert_eq!(unknown.status_code(), wrong.status_code());
    }

    #[tokio::test]
    async fn fresh_issue_supersedes_old_code() {
        let engine = TestEngine::new();
        engine
            .register(gym_owner_input(EMAIL, PASSWORD))
            .await
            .unwrap();
        let code = engine.last_code();
        engine
            .verify(Role::GymOwner, EMAIL, &code, OtpPurpose::Signup)
            .await
            .unwrap();

        engine.login(Role::GymOwner, EMAIL, PASSWORD).await.unwrap();
        let login_code = engine.last_code();

        engine.resend(Role::GymOwner, EMAIL).await.unwrap();
        let resent_code = engine.last_code();

        // The login code is dead the moment the resend lands.
        if login_code != resent_code {
            let stale = engine
                .verify(Role::GymOwner, EMAIL, &login_code, OtpPurpose::Login)
                .await;
            assert!(matches!(stale, Err(AuthError::OtpMismatch)));
        }

        let fresh = engine
            .verify(Role::GymOwner, EMAIL, &resent_code, OtpPurpose::Login)
            .await
            .unwrap();
        assert!(!fresh.token.is_empty());
    }

    #[tokio::test]
    async fn delivery_failure_keeps_stored_code() {
        let engine = TestEngine::new();
        engine
            .register(gym_owner_input(EMAIL, PASSWORD))
            .await
            .unwrap();
        let code = engine.last_code();
        engine
            .verify(Role::GymOwner, EMAIL, &code, OtpPurpose::Signup)
            .await
            .unwrap();

        engine
            .mailer
            .fail_next
            .store(true, std::sync::atomic::Ordering::SeqCst);
        let result = engine.login(Role::GymOwner, EMAIL, PASSWORD).await;
        assert!(matches!(result, Err(AuthError::DeliveryFailed)));

        // The code the user never received is still live server-side; a
        // verify against it succeeds without a resend.
        let stored = engine.store.stored_challenge(EMAIL).unwrap();
        let stranded_code = stored.code.as_str().to_string();
        let verified = engine
            .verify(Role::GymOwner, EMAIL, &stranded_code, OtpPurpose::Login)
            .await
            .unwrap();
        assert!(!verified.token.is_empty());
    }

    #[tokio::test]
    async fn verify_login_needs_no_prior_login_call() {
        let engine = TestEngine::new();
        engine
            .register(gym_owner_input(EMAIL, PASSWORD))
            .await
            .unwrap();
        let code = engine.last_code();
        engine
            .verify(Role::GymOwner, EMAIL, &code, OtpPurpose::Signup)
            .await
            .unwrap();

        // A live challenge planted out-of-band (e.g. issued by another
        // process) verifies fine; the check is stateless.
        engine.store.plant_challenge(OtpChallenge::new(
            Email::new(EMAIL).unwrap(),
            OtpCode::from_db("246801"),
            chrono::Duration::minutes(5),
        ));

        let output = engine
            .verify(Role::GymOwner, EMAIL, "246801", OtpPurpose::Login)
            .await
            .unwrap();
        assert!(!output.token.is_empty());
    }

    #[tokio::test]
    async fn resend_always_uses_login_wording() {
        let engine = TestEngine::new();
        engine
            .register(gym_owner_input(EMAIL, PASSWORD))
            .await
            .unwrap();
        assert_eq!(engine.last_purpose(), OtpPurpose::Signup);

        // Retained asymmetry: the pending action is a registration, the
        // resent message still uses the login template.
        engine.resend(Role::GymOwner, EMAIL).await.unwrap();
        assert_eq!(engine.last_purpose(), OtpPurpose::Login);
    }

    #[tokio::test]
    async fn resend_for_unknown_email_fails() {
        let engine = TestEngine::new();
        let result = engine.resend(Role::GymOwner, "nobody@acme.example").await;
        assert!(matches!(result, Err(AuthError::IdentityNotFound)));
    }

    #[tokio::test]
    async fn serialized_resend_then_verify_with_old_code_mismatches() {
        // Documents the accepted race: a verify and a resend for the same
        // email are not coordinated, so when the resend's delete+put lands
        // first, the correctly-entered old code fails as a mismatch. With
        // serialized storage operations exactly one of the two requests
        // loses, deterministically.
        let engine = TestEngine::new();
        engine
            .register(gym_owner_input(EMAIL, PASSWORD))
            .await
            .unwrap();
        let code = engine.last_code();
        engine
            .verify(Role::GymOwner, EMAIL, &code, OtpPurpose::Signup)
            .await
            .unwrap();

        engine.login(Role::GymOwner, EMAIL, PASSWORD).await.unwrap();
        let typed_by_user = engine.last_code();

        // Concurrent resend commits before the user's verify is served.
        engine.resend(Role::GymOwner, EMAIL).await.unwrap();
        let replacement = engine.last_code();

        if typed_by_user != replacement {
            let result = engine
                .verify(Role::GymOwner, EMAIL, &typed_by_user, OtpPurpose::Login)
                .await;
            assert!(matches!(result, Err(AuthError::OtpMismatch)));
        }
    }

    #[tokio::test]
    async fn register_duplicate_email_fails() {
        let engine = TestEngine::new();
        engine
            .register(gym_owner_input(EMAIL, PASSWORD))
            .await
            .unwrap();

        let result = engine.register(gym_owner_input(EMAIL, PASSWORD)).await;
        assert!(matches!(result, Err(AuthError::DuplicateIdentity)));
    }

    #[tokio::test]
    async fn register_missing_or_empty_fields_fail_alike() {
        let engine = TestEngine::new();

        let mut missing = gym_owner_input(EMAIL, PASSWORD);
        missing.contact_number = None;
        assert!(matches!(
            engine.register(missing).await,
            Err(AuthError::MissingFields)
        ));

        let mut empty = gym_owner_input(EMAIL, PASSWORD);
        empty.address = Some("   ".to_string());
        assert!(matches!(
            engine.register(empty).await,
            Err(AuthError::MissingFields)
        ));
    }

    #[tokio::test]
    async fn end_to_end_register_verify_login_verify() {
        let engine = TestEngine::new();
        let tokens = TokenService::new(&engine.config);

        // register → pending
        let output = engine
            .register(gym_owner_input("a@x.com", "pw123secure"))
            .await
            .unwrap();
        assert_eq!(output.email, "a@x.com");

        // verify-signup-otp → token, verified flag flipped
        let signup_code = engine.last_code();
        let verified = engine
            .verify(Role::GymOwner, "a@x.com", &signup_code, OtpPurpose::Signup)
            .await
            .unwrap();
        assert!(verified.principal.is_verified);
        assert!(
            engine
                .store
                .stored_principal(Role::GymOwner, "a@x.com")
                .unwrap()
                .is_verified
        );

        // login → requiresOtp, no token yet
        let login = engine
            .login(Role::GymOwner, "a@x.com", "pw123secure")
            .await
            .unwrap();
        assert!(login.requires_otp);

        // verify-login-otp with the fresh code → a second, distinct token
        let login_code = engine.last_code();
        let session = engine
            .verify(Role::GymOwner, "a@x.com", &login_code, OtpPurpose::Login)
            .await
            .unwrap();

        let claims1 = tokens.validate(&verified.token).unwrap();
        let claims2 = tokens.validate(&session.token).unwrap();
        assert_eq!(claims1.principal_id, claims2.principal_id);
        assert_eq!(claims2.role, Role::GymOwner);
    }

    #[tokio::test]
    async fn admin_track_is_isolated_from_gym_owners() {
        let engine = TestEngine::new();
        let tokens = TokenService::new(&engine.config);

        engine
            .register(admin_input("root@hq.example", PASSWORD))
            .await
            .unwrap();
        let code = engine.last_code();

        // The same email is unknown on the gym-owner track.
        let cross = engine
            .verify(Role::GymOwner, "root@hq.example", &code, OtpPurpose::Signup)
            .await;
        assert!(matches!(cross, Err(AuthError::IdentityNotFound)));

        let output = engine
            .verify(Role::Admin, "root@hq.example", &code, OtpPurpose::Signup)
            .await
            .unwrap();
        assert_eq!(tokens.validate(&output.token).unwrap().role, Role::Admin);
    }
}

#[cfg(test)]
mod dto_tests {
    use crate::presentation::dto::*;

    #[test]
    fn test_register_request_camel_case() {
        let json = r#"{"gymName":"Acme Gym","email":"a@x.com","password":"pw123secure","address":"12 Main St","contactNumber":"9876543210"}"#;
        let request: RegisterGymOwnerRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.gym_name.as_deref(), Some("Acme Gym"));
        assert_eq!(request.contact_number.as_deref(), Some("9876543210"));
    }

    #[test]
    fn test_register_request_missing_fields_default_to_none() {
        let request: RegisterGymOwnerRequest = serde_json::from_str("{}").unwrap();
        assert!(request.gym_name.is_none());
        assert!(request.email.is_none());
    }

    #[test]
    fn test_login_response_serialization() {
        let response = LoginResponse {
            success: true,
            message: "Credentials verified! Check your email for OTP.".to_string(),
            email: "a@x.com".to_string(),
            requires_otp: true,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""requiresOtp":true"#));
        assert!(json.contains(r#""success":true"#));
    }

    #[test]
    fn test_verify_response_user_shape() {
        let response = VerifyOtpResponse {
            success: true,
            message: "Login successful".to_string(),
            token: "abc.def".to_string(),
            user: PrincipalProfile {
                id: "00000000-0000-0000-0000-000000000000".to_string(),
                name: "Acme Gym".to_string(),
                email: "a@x.com".to_string(),
                role: "gymOwner".to_string(),
            },
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""token":"abc.def""#));
        assert!(json.contains(r#""role":"gymOwner""#));
    }
}
