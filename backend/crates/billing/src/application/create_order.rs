//! Create Order Use Case
//!
//! Asks the gateway for an order and records a pending, inactive
//! subscription carrying its id; activation waits for the verified
//! payment callback.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::application::config::BillingConfig;
use crate::application::verify_payment::required;
use crate::domain::entities::{PlanType, Subscription};
use crate::domain::gateway::{GatewayOrder, PaymentGateway};
use crate::domain::repository::SubscriptionRepository;
use crate::error::{BillingError, BillingResult};

/// Create order input
pub struct CreateOrderInput {
    pub gym_owner_id: Uuid,
    pub plan_type: Option<String>,
}

/// Create order output
pub struct CreateOrderOutput {
    pub order: GatewayOrder,
    pub subscription: Subscription,
}

/// Create order use case
pub struct CreateOrderUseCase<S, G>
where
    S: SubscriptionRepository,
    G: PaymentGateway,
{
    repo: Arc<S>,
    gateway: Arc<G>,
    config: Arc<BillingConfig>,
}

impl<S, G> CreateOrderUseCase<S, G>
where
    S: SubscriptionRepository,
    G: PaymentGateway,
{
    pub fn new(repo: Arc<S>, gateway: Arc<G>, config: Arc<BillingConfig>) -> Self {
        Self {
            repo,
            gateway,
            config,
        }
    }

    pub async fn execute(&self, input: CreateOrderInput) -> BillingResult<CreateOrderOutput> {
        let plan_code = required(input.plan_type)?;
        let plan = PlanType::from_code(&plan_code).ok_or(BillingError::UnknownPlan)?;

        let receipt = format!("receipt_{}", Utc::now().timestamp_millis());

        let order = self
            .gateway
            .create_order(plan.amount_minor(), &self.config.currency, &receipt)
            .await?;

        let subscription =
            Subscription::new_pending_order(input.gym_owner_id, plan, order.order_id.clone())
                .ok_or_else(|| BillingError::Internal("Subscription term overflow".to_string()))?;

        self.repo.create(&subscription).await?;

        tracing::info!(
            subscription_id = %subscription.subscription_id,
            gym_owner_id = %input.gym_owner_id,
            plan = %plan,
            order_id = %order.order_id,
            "Order created, payment pending"
        );

        Ok(CreateOrderOutput {
            order,
            subscription,
        })
    }
}
