//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, ResendOtpInput, ResendOtpUseCase,
    VerifyOtpInput, VerifyOtpUseCase,
};
use crate::domain::mailer::{OtpMailer, OtpPurpose};
use crate::domain::repository::{OtpRepository, PrincipalRepository};
use crate::domain::value_object::role::Role;
use crate::error::AuthResult;
use crate::presentation::dto::{
    LoginRequest, LoginResponse, PrincipalProfile, RegisterAdminRequest, RegisterGymOwnerRequest,
    RegisterResponse, ResendOtpRequest, ResendOtpResponse, VerifyOtpRequest, VerifyOtpResponse,
};

/// Shared state for auth handlers
///
/// One instance per mounted role track; `role` decides which credential
/// collection the engine works against.
#[derive(Clone)]
pub struct AuthAppState<R, M>
where
    R: PrincipalRepository + OtpRepository + Clone + Send + Sync + 'static,
    M: OtpMailer + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<AuthConfig>,
    pub role: Role,
}

// ============================================================================
// Register
// ============================================================================

/// POST /register (gym owner track)
pub async fn register_gym_owner<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<RegisterGymOwnerRequest>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    R: PrincipalRepository + OtpRepository + Clone + Send + Sync + 'static,
    M: OtpMailer + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let input = RegisterInput {
        role: state.role,
        display_name: req.gym_name,
        email: req.email,
        password: req.password,
        address: req.address,
        contact_number: req.contact_number,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "OTP sent to your email. Please verify to complete registration.".to_string(),
            email: output.email,
        }),
    ))
}

/// POST /register (admin track)
pub async fn register_admin<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<RegisterAdminRequest>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    R: PrincipalRepository + OtpRepository + Clone + Send + Sync + 'static,
    M: OtpMailer + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let input = RegisterInput {
        role: state.role,
        display_name: req.name,
        email: req.email,
        password: req.password,
        address: None,
        contact_number: None,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "OTP sent to your email. Please verify to complete registration.".to_string(),
            email: output.email,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: PrincipalRepository + OtpRepository + Clone + Send + Sync + 'static,
    M: OtpMailer + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let input = LoginInput {
        role: state.role,
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Credentials verified! Check your email for OTP.".to_string(),
        email: output.email,
        requires_otp: output.requires_otp,
    }))
}

// ============================================================================
// OTP verification
// ============================================================================

/// POST /verify-signup-otp
pub async fn verify_signup_otp<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<VerifyOtpRequest>,
) -> AuthResult<Json<VerifyOtpResponse>>
where
    R: PrincipalRepository + OtpRepository + Clone + Send + Sync + 'static,
    M: OtpMailer + Clone + Send + Sync + 'static,
{
    verify_otp(state, req, OtpPurpose::Signup, "Registration verified successfully").await
}

/// POST /verify-login-otp
pub async fn verify_login_otp<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<VerifyOtpRequest>,
) -> AuthResult<Json<VerifyOtpResponse>>
where
    R: PrincipalRepository + OtpRepository + Clone + Send + Sync + 'static,
    M: OtpMailer + Clone + Send + Sync + 'static,
{
    verify_otp(state, req, OtpPurpose::Login, "Login successful").await
}

async fn verify_otp<R, M>(
    state: AuthAppState<R, M>,
    req: VerifyOtpRequest,
    purpose: OtpPurpose,
    message: &str,
) -> AuthResult<Json<VerifyOtpResponse>>
where
    R: PrincipalRepository + OtpRepository + Clone + Send + Sync + 'static,
    M: OtpMailer + Clone + Send + Sync + 'static,
{
    let use_case =
        VerifyOtpUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = VerifyOtpInput {
        role: state.role,
        email: req.email,
        otp: req.otp,
    };

    let output = use_case.execute(input, purpose).await?;

    Ok(Json(VerifyOtpResponse {
        success: true,
        message: message.to_string(),
        token: output.token,
        user: PrincipalProfile::from(&output.principal),
    }))
}

// ============================================================================
// Resend OTP
// ============================================================================

/// POST /resend-otp
pub async fn resend_otp<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<ResendOtpRequest>,
) -> AuthResult<Json<ResendOtpResponse>>
where
    R: PrincipalRepository + OtpRepository + Clone + Send + Sync + 'static,
    M: OtpMailer + Clone + Send + Sync + 'static,
{
    let use_case = ResendOtpUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let input = ResendOtpInput {
        role: state.role,
        email: req.email,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(ResendOtpResponse {
        success: true,
        message: format!("New OTP sent to {}", output.email),
    }))
}
