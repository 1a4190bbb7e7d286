//! Sandbox Gateway
//!
//! Local stand-in for the real order API: generates order ids without
//! leaving the process. The production gateway client is wired at
//! deployment behind the same trait.

use crate::domain::gateway::{GatewayError, GatewayOrder, PaymentGateway};

/// Order-id-generating gateway for development and tests
#[derive(Clone, Debug, Default)]
pub struct SandboxGateway;

impl PaymentGateway for SandboxGateway {
    async fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, GatewayError> {
        let order_id = format!(
            "order_{}",
            platform::crypto::to_hex(&platform::crypto::random_bytes(12))
        );

        tracing::info!(
            order_id = %order_id,
            amount_minor,
            currency,
            "sandbox order created"
        );

        Ok(GatewayOrder {
            order_id,
            amount_minor,
            currency: currency.to_string(),
            receipt: receipt.to_string(),
        })
    }
}
