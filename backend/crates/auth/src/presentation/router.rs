//! Auth Router
//!
//! Both role tracks mount the same shapes; only the register payload and
//! the backing credential collection differ.

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::mailer::OtpMailer;
use crate::domain::repository::{OtpRepository, PrincipalRepository};
use crate::domain::value_object::role::Role;
use crate::infra::email::LogMailer;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create an auth router for one role track with the PostgreSQL store
pub fn auth_router(
    repo: PgAuthRepository,
    mailer: LogMailer,
    config: AuthConfig,
    role: Role,
) -> Router {
    auth_router_generic(repo, mailer, config, role)
}

/// Create an auth router for any repository/mailer implementation
pub fn auth_router_generic<R, M>(repo: R, mailer: M, config: AuthConfig, role: Role) -> Router
where
    R: PrincipalRepository + OtpRepository + Clone + Send + Sync + 'static,
    M: OtpMailer + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        config: Arc::new(config),
        role,
    };

    let register = match role {
        Role::GymOwner => post(handlers::register_gym_owner::<R, M>),
        Role::Admin => post(handlers::register_admin::<R, M>),
    };

    Router::new()
        .route("/register", register)
        .route("/login", post(handlers::login::<R, M>))
        .route("/verify-signup-otp", post(handlers::verify_signup_otp::<R, M>))
        .route("/verify-login-otp", post(handlers::verify_login_otp::<R, M>))
        .route("/resend-otp", post(handlers::resend_otp::<R, M>))
        .with_state(state)
}
