//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{otp::OtpChallenge, principal::Principal};
use crate::domain::repository::{OtpRepository, PrincipalRepository};
use crate::domain::value_object::{
    email::Email, otp_code::OtpCode, password::PasswordHash, principal_id::PrincipalId, role::Role,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed credential store + OTP ledger
///
/// Each role keeps its own table (`gym_owners`, `admins`); the OTP ledger
/// is a single table keyed by email, shared across roles.
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete OTP rows past their cutoff
    ///
    /// Expiry is otherwise handled lazily on read; this is a best-effort
    /// startup sweep, not a scheduled job.
    pub async fn cleanup_expired_otps(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM otp_challenges WHERE expires_at < $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(otps_deleted = deleted, "Cleaned up expired OTP challenges");

        Ok(deleted)
    }
}

// ============================================================================
// Principal Repository Implementation
// ============================================================================

impl PrincipalRepository for PgAuthRepository {
    async fn create(&self, principal: &Principal) -> AuthResult<()> {
        match principal.role {
            Role::GymOwner => {
                sqlx::query(
                    r#"
                    INSERT INTO gym_owners (
                        principal_id,
                        gym_name,
                        email,
                        address,
                        contact_number,
                        password_hash,
                        is_verified,
                        created_at,
                        updated_at
                    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                    "#,
                )
                .bind(principal.principal_id.as_uuid())
                .bind(&principal.display_name)
                .bind(principal.email.as_str())
                .bind(&principal.address)
                .bind(&principal.contact_number)
                .bind(principal.password_hash.as_str())
                .bind(principal.is_verified)
                .bind(principal.created_at)
                .bind(principal.updated_at)
                .execute(&self.pool)
                .await?;
            }
            Role::Admin => {
                sqlx::query(
                    r#"
                    INSERT INTO admins (
                        principal_id,
                        name,
                        email,
                        password_hash,
                        is_verified,
                        created_at,
                        updated_at
                    ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                    "#,
                )
                .bind(principal.principal_id.as_uuid())
                .bind(&principal.display_name)
                .bind(principal.email.as_str())
                .bind(principal.password_hash.as_str())
                .bind(principal.is_verified)
                .bind(principal.created_at)
                .bind(principal.updated_at)
                .execute(&self.pool)
                .await?;
            }
        }

        Ok(())
    }

    async fn find_by_id(
        &self,
        role: Role,
        principal_id: &PrincipalId,
    ) -> AuthResult<Option<Principal>> {
        match role {
            Role::GymOwner => {
                let row = sqlx::query_as::<_, GymOwnerRow>(
                    r#"
                    SELECT
                        principal_id,
                        gym_name,
                        email,
                        address,
                        contact_number,
                        password_hash,
                        is_verified,
                        created_at,
                        updated_at
                    FROM gym_owners
                    WHERE principal_id = $1
                    "#,
                )
                .bind(principal_id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;

                row.map(|r| r.into_principal()).transpose()
            }
            Role::Admin => {
                let row = sqlx::query_as::<_, AdminRow>(
                    r#"
                    SELECT
                        principal_id,
                        name,
                        email,
                        password_hash,
                        is_verified,
                        created_at,
                        updated_at
                    FROM admins
                    WHERE principal_id = $1
                    "#,
                )
                .bind(principal_id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;

                row.map(|r| r.into_principal()).transpose()
            }
        }
    }

    async fn find_by_email(&self, role: Role, email: &Email) -> AuthResult<Option<Principal>> {
        match role {
            Role::GymOwner => {
                let row = sqlx::query_as::<_, GymOwnerRow>(
                    r#"
                    SELECT
                        principal_id,
                        gym_name,
                        email,
                        address,
                        contact_number,
                        password_hash,
                        is_verified,
                        created_at,
                        updated_at
                    FROM gym_owners
                    WHERE email = $1
                    "#,
                )
                .bind(email.as_str())
                .fetch_optional(&self.pool)
                .await?;

                row.map(|r| r.into_principal()).transpose()
            }
            Role::Admin => {
                let row = sqlx::query_as::<_, AdminRow>(
                    r#"
                    SELECT
                        principal_id,
                        name,
                        email,
                        password_hash,
                        is_verified,
                        created_at,
                        updated_at
                    FROM admins
                    WHERE email = $1
                    "#,
                )
                .bind(email.as_str())
                .fetch_optional(&self.pool)
                .await?;

                row.map(|r| r.into_principal()).transpose()
            }
        }
    }

    async fn exists_by_email(&self, role: Role, email: &Email) -> AuthResult<bool> {
        let query = match role {
            Role::GymOwner => "SELECT EXISTS(SELECT 1 FROM gym_owners WHERE email = $1)",
            Role::Admin => "SELECT EXISTS(SELECT 1 FROM admins WHERE email = $1)",
        };

        let exists = sqlx::query_scalar::<_, bool>(query)
            .bind(email.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn mark_verified(&self, role: Role, principal_id: &PrincipalId) -> AuthResult<()> {
        let query = match role {
            Role::GymOwner => {
                "UPDATE gym_owners SET is_verified = TRUE, updated_at = $2 WHERE principal_id = $1"
            }
            Role::Admin => {
                "UPDATE admins SET is_verified = TRUE, updated_at = $2 WHERE principal_id = $1"
            }
        };

        sqlx::query(query)
            .bind(principal_id.as_uuid())
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// OTP Repository Implementation
// ============================================================================

impl OtpRepository for PgAuthRepository {
    async fn put(&self, challenge: &OtpChallenge) -> AuthResult<()> {
        // Upsert: a second put for the same address replaces the row.
        sqlx::query(
            r#"
            INSERT INTO otp_challenges (email, code, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE SET
                code = EXCLUDED.code,
                expires_at = EXCLUDED.expires_at,
                created_at = EXCLUDED.created_at
            "#,
        )
        .bind(challenge.email.as_str())
        .bind(challenge.code.as_str())
        .bind(challenge.expires_at)
        .bind(challenge.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, email: &Email) -> AuthResult<Option<OtpChallenge>> {
        let row = sqlx::query_as::<_, OtpRow>(
            r#"
            SELECT email, code, expires_at, created_at
            FROM otp_challenges
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_challenge()))
    }

    async fn delete(&self, email: &Email) -> AuthResult<()> {
        sqlx::query("DELETE FROM otp_challenges WHERE email = $1")
            .bind(email.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct GymOwnerRow {
    principal_id: Uuid,
    gym_name: String,
    email: String,
    address: Option<String>,
    contact_number: Option<String>,
    password_hash: String,
    is_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GymOwnerRow {
    fn into_principal(self) -> AuthResult<Principal> {
        let password_hash = PasswordHash::from_hash_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Principal {
            principal_id: PrincipalId::from_uuid(self.principal_id),
            role: Role::GymOwner,
            display_name: self.gym_name,
            email: Email::from_db(self.email),
            address: self.address,
            contact_number: self.contact_number,
            password_hash,
            is_verified: self.is_verified,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AdminRow {
    principal_id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    is_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AdminRow {
    fn into_principal(self) -> AuthResult<Principal> {
        let password_hash = PasswordHash::from_hash_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Principal {
            principal_id: PrincipalId::from_uuid(self.principal_id),
            role: Role::Admin,
            display_name: self.name,
            email: Email::from_db(self.email),
            address: None,
            contact_number: None,
            password_hash,
            is_verified: self.is_verified,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct OtpRow {
    email: String,
    code: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl OtpRow {
    fn into_challenge(self) -> OtpChallenge {
        OtpChallenge {
            email: Email::from_db(self.email),
            code: OtpCode::from_db(self.code),
            expires_at: self.expires_at,
            created_at: self.created_at,
        }
    }
}
