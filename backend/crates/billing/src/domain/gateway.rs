//! Payment Gateway Capability
//!
//! The gateway's order API is an external collaborator; the core only
//! needs "create an order for an amount". Signature verification of the
//! confirmation happens locally (see `application::verify_payment`).

use thiserror::Error;

/// Order created at the gateway
#[derive(Debug, Clone)]
pub struct GatewayOrder {
    pub order_id: String,
    pub amount_minor: i64,
    pub currency: String,
    pub receipt: String,
}

/// Gateway call errors
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The order API refused or failed
    #[error("Gateway request failed: {0}")]
    Request(String),
}

/// Payment gateway abstraction
#[trait_variant::make(PaymentGateway: Send)]
pub trait LocalPaymentGateway {
    /// Create an order the client can pay against
    async fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, GatewayError>;
}
