//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entities::Subscription;
use crate::domain::gateway::GatewayOrder;

// ============================================================================
// Requests
// ============================================================================

/// Create order request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub plan_type: Option<String>,
}

/// Verify payment request (gateway confirmation callback payload)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub subscription_id: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// Subscription view for API responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDto {
    pub id: String,
    pub plan_type: String,
    /// Price in major units
    pub amount: i64,
    pub payment_status: String,
    pub is_active: bool,
    pub starts_at_ms: i64,
    pub ends_at_ms: i64,
}

impl From<&Subscription> for SubscriptionDto {
    fn from(subscription: &Subscription) -> Self {
        Self {
            id: subscription.subscription_id.to_string(),
            plan_type: subscription.plan.code().to_string(),
            amount: subscription.amount_minor / 100,
            payment_status: subscription.payment_status.code().to_string(),
            is_active: subscription.is_active,
            starts_at_ms: subscription.starts_at.timestamp_millis(),
            ends_at_ms: subscription.ends_at.timestamp_millis(),
        }
    }
}

/// Gateway order view for API responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub order_id: String,
    /// Amount in minor units, as the gateway expects it
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
}

impl From<&GatewayOrder> for OrderDto {
    fn from(order: &GatewayOrder) -> Self {
        Self {
            order_id: order.order_id.clone(),
            amount: order.amount_minor,
            currency: order.currency.clone(),
            receipt: order.receipt.clone(),
        }
    }
}

/// Start trial response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTrialResponse {
    pub success: bool,
    pub message: String,
    pub subscription: SubscriptionDto,
}

/// Create order response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub success: bool,
    pub message: String,
    pub order: OrderDto,
    pub subscription_id: String,
}

/// Verify payment response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: String,
    pub subscription: SubscriptionDto,
}

/// Current subscription response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MySubscriptionResponse {
    pub success: bool,
    pub subscription: SubscriptionDto,
}
