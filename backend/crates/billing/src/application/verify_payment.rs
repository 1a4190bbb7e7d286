//! Verify Payment Use Case
//!
//! The gateway's confirmation is only trusted after recomputing the
//! HMAC-SHA256 signature over `order_id|payment_id` with the key secret
//! and comparing in constant time.

use std::sync::Arc;

use hmac::{Hmac, Mac};
use kernel::id::SubscriptionId;
use sha2::Sha256;

use crate::application::config::BillingConfig;
use crate::domain::entities::Subscription;
use crate::domain::repository::SubscriptionRepository;
use crate::error::{BillingError, BillingResult};

type HmacSha256 = Hmac<Sha256>;

/// Verify payment input
pub struct VerifyPaymentInput {
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub signature: Option<String>,
    pub subscription_id: Option<String>,
}

/// Verify payment use case
pub struct VerifyPaymentUseCase<S>
where
    S: SubscriptionRepository,
{
    repo: Arc<S>,
    config: Arc<BillingConfig>,
}

impl<S> VerifyPaymentUseCase<S>
where
    S: SubscriptionRepository,
{
    pub fn new(repo: Arc<S>, config: Arc<BillingConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: VerifyPaymentInput) -> BillingResult<Subscription> {
        let order_id = required(input.order_id)?;
        let payment_id = required(input.payment_id)?;
        let signature = required(input.signature)?;
        let subscription_id = required(input.subscription_id)?;

        let expected = payment_signature(&self.config.key_secret, &order_id, &payment_id);

        if !platform::crypto::constant_time_eq(expected.as_bytes(), signature.as_bytes()) {
            return Err(BillingError::InvalidSignature);
        }

        let subscription_id = subscription_id
            .parse()
            .map(SubscriptionId::from_uuid)
            .map_err(|_| BillingError::SubscriptionNotFound)?;

        let mut subscription = self
            .repo
            .find_by_id(&subscription_id)
            .await?
            .ok_or(BillingError::SubscriptionNotFound)?;

        subscription.record_payment(payment_id, signature);
        self.repo.update(&subscription).await?;

        tracing::info!(
            subscription_id = %subscription.subscription_id,
            gym_owner_id = %subscription.gym_owner_id,
            plan = %subscription.plan,
            "Payment verified, subscription activated"
        );

        Ok(subscription)
    }
}

/// Signature the gateway is expected to present for a paid order
pub fn payment_signature(key_secret: &[u8], order_id: &str, payment_id: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(key_secret).expect("HMAC can take key of any size");
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    platform::crypto::to_hex(&mac.finalize().into_bytes())
}

/// Presence check shared by the billing use cases
pub(crate) fn required(field: Option<String>) -> BillingResult<String> {
    match field {
        Some(value) => {
            let value = value.trim().to_string();
            if value.is_empty() {
                Err(BillingError::MissingFields)
            } else {
                Ok(value)
            }
        }
        None => Err(BillingError::MissingFields),
    }
}
