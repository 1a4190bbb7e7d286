//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::principal::Principal;

// ============================================================================
// Register
// ============================================================================

/// Gym owner register request
///
/// Fields are optional on the wire; the engine treats absent and empty
/// the same way (one "All fields are required" response).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterGymOwnerRequest {
    #[serde(default)]
    pub gym_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
}

/// Admin register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAdminRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Register response (201, verification pending)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub email: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Login response (credentials ok, OTP on its way)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub email: String,
    pub requires_otp: bool,
}

// ============================================================================
// OTP verification
// ============================================================================

/// Verify OTP request (signup and login flavors share the shape)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub otp: Option<String>,
}

/// Verify OTP response, carrying the freshly minted session token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: PrincipalProfile,
}

// ============================================================================
// Resend OTP
// ============================================================================

/// Resend OTP request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendOtpRequest {
    #[serde(default)]
    pub email: Option<String>,
}

/// Resend OTP response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendOtpResponse {
    pub success: bool,
    pub message: String,
}

// ============================================================================
// Public principal profile
// ============================================================================

/// Non-sensitive principal view for API responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&Principal> for PrincipalProfile {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.principal_id.to_string(),
            name: principal.display_name.clone(),
            email: principal.email.to_string(),
            role: principal.role.code().to_string(),
        }
    }
}
