//! HTTP Handlers
//!
//! All routes sit behind the gym-owner auth middleware, which attaches
//! the resolved [`CurrentPrincipal`] to the request extensions.

use auth::middleware::CurrentPrincipal;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

use crate::application::config::BillingConfig;
use crate::application::{
    CreateOrderInput, CreateOrderUseCase, MySubscriptionUseCase, StartTrialUseCase,
    VerifyPaymentInput, VerifyPaymentUseCase,
};
use crate::domain::gateway::PaymentGateway;
use crate::domain::repository::SubscriptionRepository;
use crate::error::BillingResult;
use crate::presentation::dto::{
    CreateOrderRequest, CreateOrderResponse, MySubscriptionResponse, OrderDto, StartTrialResponse,
    SubscriptionDto, VerifyPaymentRequest, VerifyPaymentResponse,
};

/// Shared state for billing handlers
#[derive(Clone)]
pub struct BillingAppState<S, G>
where
    S: SubscriptionRepository + Clone + Send + Sync + 'static,
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    pub repo: Arc<S>,
    pub gateway: Arc<G>,
    pub config: Arc<BillingConfig>,
}

/// POST /start-trial
pub async fn start_trial<S, G>(
    State(state): State<BillingAppState<S, G>>,
    Extension(principal): Extension<CurrentPrincipal>,
) -> BillingResult<(StatusCode, Json<StartTrialResponse>)>
where
    S: SubscriptionRepository + Clone + Send + Sync + 'static,
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    let use_case = StartTrialUseCase::new(state.repo.clone());
    let subscription = use_case.execute(principal.principal_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(StartTrialResponse {
            success: true,
            message: "Trial started successfully.".to_string(),
            subscription: SubscriptionDto::from(&subscription),
        }),
    ))
}

/// POST /create-order
pub async fn create_order<S, G>(
    State(state): State<BillingAppState<S, G>>,
    Extension(principal): Extension<CurrentPrincipal>,
    Json(req): Json<CreateOrderRequest>,
) -> BillingResult<(StatusCode, Json<CreateOrderResponse>)>
where
    S: SubscriptionRepository + Clone + Send + Sync + 'static,
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    let use_case = CreateOrderUseCase::new(
        state.repo.clone(),
        state.gateway.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(CreateOrderInput {
            gym_owner_id: principal.principal_id,
            plan_type: req.plan_type,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            success: true,
            message: "Order created successfully.".to_string(),
            order: OrderDto::from(&output.order),
            subscription_id: output.subscription.subscription_id.to_string(),
        }),
    ))
}

/// POST /verify-payment
pub async fn verify_payment<S, G>(
    State(state): State<BillingAppState<S, G>>,
    Json(req): Json<VerifyPaymentRequest>,
) -> BillingResult<Json<VerifyPaymentResponse>>
where
    S: SubscriptionRepository + Clone + Send + Sync + 'static,
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    let use_case = VerifyPaymentUseCase::new(state.repo.clone(), state.config.clone());

    let subscription = use_case
        .execute(VerifyPaymentInput {
            order_id: req.order_id,
            payment_id: req.payment_id,
            signature: req.signature,
            subscription_id: req.subscription_id,
        })
        .await?;

    Ok(Json(VerifyPaymentResponse {
        success: true,
        message: "Payment verified successfully.".to_string(),
        subscription: SubscriptionDto::from(&subscription),
    }))
}

/// GET /my-subscription
pub async fn my_subscription<S, G>(
    State(state): State<BillingAppState<S, G>>,
    Extension(principal): Extension<CurrentPrincipal>,
) -> BillingResult<Json<MySubscriptionResponse>>
where
    S: SubscriptionRepository + Clone + Send + Sync + 'static,
    G: PaymentGateway + Clone + Send + Sync + 'static,
{
    let use_case = MySubscriptionUseCase::new(state.repo.clone());
    let subscription = use_case.execute(principal.principal_id).await?;

    Ok(Json(MySubscriptionResponse {
        success: true,
        subscription: SubscriptionDto::from(&subscription),
    }))
}
