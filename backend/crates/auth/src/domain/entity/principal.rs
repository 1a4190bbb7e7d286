//! Principal Entity
//!
//! One record per authenticated identity: a gym owner or an admin.
//! Created unverified at registration; `is_verified` flips to true once,
//! on the first successful signup-OTP verification.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, password::PasswordHash, principal_id::PrincipalId, role::Role,
};

/// Principal entity
///
/// The two role tracks share one shape; `address` and `contact_number`
/// are only populated for gym owners.
#[derive(Debug, Clone)]
pub struct Principal {
    /// Internal UUID identifier
    pub principal_id: PrincipalId,
    /// Which credential collection this record lives in
    pub role: Role,
    /// Admin name or gym name
    pub display_name: String,
    /// Unique within the role's collection
    pub email: Email,
    /// Gym owner only
    pub address: Option<String>,
    /// Gym owner only
    pub contact_number: Option<String>,
    /// bcrypt hash
    pub password_hash: PasswordHash,
    /// Signup OTP verified
    pub is_verified: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Principal {
    /// Create a new unverified gym owner
    pub fn new_gym_owner(
        gym_name: String,
        email: Email,
        address: String,
        contact_number: String,
        password_hash: PasswordHash,
    ) -> Self {
        let now = Utc::now();

        Self {
            principal_id: PrincipalId::new(),
            role: Role::GymOwner,
            display_name: gym_name,
            email,
            address: Some(address),
            contact_number: Some(contact_number),
            password_hash,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new unverified admin
    pub fn new_admin(name: String, email: Email, password_hash: PasswordHash) -> Self {
        let now = Utc::now();

        Self {
            principal_id: PrincipalId::new(),
            role: Role::Admin,
            display_name: name,
            email,
            address: None,
            contact_number: None,
            password_hash,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record successful signup verification
    pub fn mark_verified(&mut self) {
        self.is_verified = true;
        self.updated_at = Utc::now();
    }
}
