//! Register Use Case
//!
//! Creates an unverified principal and kicks off signup verification.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::issue_otp::OtpIssuer;
use crate::domain::entity::principal::Principal;
use crate::domain::mailer::{OtpMailer, OtpPurpose};
use crate::domain::repository::{OtpRepository, PrincipalRepository};
use crate::domain::value_object::{
    email::Email,
    password::{PasswordHash, RawPassword},
    role::Role,
};
use crate::error::{AuthError, AuthResult};

/// Register input
///
/// Fields arrive as deserialized optionals; presence is checked here so
/// a missing field and an empty one fail the same way.
pub struct RegisterInput {
    pub role: Role,
    /// Admin name or gym name
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// Required for gym owners, ignored for admins
    pub address: Option<String>,
    /// Required for gym owners, ignored for admins
    pub contact_number: Option<String>,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub email: String,
}

/// Register use case
pub struct RegisterUseCase<P, O, M>
where
    P: PrincipalRepository,
    O: OtpRepository,
    M: OtpMailer,
{
    principal_repo: Arc<P>,
    otp_issuer: OtpIssuer<O, M>,
}

impl<P, O, M> RegisterUseCase<P, O, M>
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

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let role = input.role;

        let display_name = required(input.display_name)?;
        let email_raw = required(input.email)?;
        let password_raw = required(input.password)?;

        let (address, contact_number) = match role {
            Role::GymOwner => (
                Some(required(input.address)?),
                Some(required(input.contact_number)?),
            ),
            Role::Admin => (None, None),
        };

        let email = Email::new(email_raw)?;

        if self.principal_repo.exists_by_email(role, &email).await? {
            return Err(AuthError::DuplicateIdentity);
        }

        let raw_password = RawPassword::new(password_raw)?;
        let password_hash = PasswordHash::from_raw(&raw_password)?;

        let principal = match role {
            Role::GymOwner => Principal::new_gym_owner(
                display_name.clone(),
                email.clone(),
                address.unwrap_or_default(),
                contact_number.unwrap_or_default(),
                password_hash,
            ),
            Role::Admin => Principal::new_admin(display_name.clone(), email.clone(), password_hash),
        };

        self.principal_repo.create(&principal).await?;

        self.otp_issuer
            .issue(&email, &display_name, OtpPurpose::Signup)
            .await?;

        tracing::info!(
            principal_id = %principal.principal_id,
            role = %role,
            "Principal registered, verification pending"
        );

        Ok(RegisterOutput {
            email: email.to_string(),
        })
    }
}

/// Presence check shared by the engine's use cases
pub(crate) fn required(field: Option<String>) -> AuthResult<String> {
    match field {
        Some(value) => {
            let value = value.trim().to_string();
            if value.is_empty() {
                Err(AuthError::MissingFields)
            } else {
                Ok(value)
            }
        }
        None => Err(AuthError::MissingFields),
    }
}
