//! Billing Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::BillingConfig;
use crate::domain::gateway::PaymentGateway;
use crate::domain::repository::SubscriptionRepository;
use crate::infra::postgres::PgBillingRepository;
use crate::infra::sandbox::SandboxGateway;
use crate::presentation::handlers::{self, BillingAppState};

/// Create the billing router with the PostgreSQL store and sandbox gateway
pub fn billing_router(
    repo: PgBillingRepository,
    gateway: SandboxGateway,
    config: BillingConfig,
) -> Router {
    billing_router_generic(repo, gateway, config)
}

/// Create a billing router for any repository/gateway implementation
pub fn billing_router_generic<S, G>(repo: S, gateway: G, config: BillingConfig) -> Router
where
    S: SubscriptionRepository + Clone + Send + Sync + 'static,
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    let state = BillingAppState {
        repo: Arc::new(repo),
        gateway: Arc::new(gateway),
        config: Arc::new(config),
    };

    Router::new()
        .route("/start-trial", post(handlers::start_trial::<S, G>))
        .route("/create-order", post(handlers::create_order::<S, G>))
        .route("/verify-payment", post(handlers::verify_payment::<S, G>))
        .route("/my-subscription", get(handlers::my_subscription::<S, G>))
        .with_state(state)
}
