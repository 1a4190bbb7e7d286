//! Start Trial Use Case
//!
//! One free trial per gym owner, ever; enforced by existence check.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::Subscription;
use crate::domain::repository::SubscriptionRepository;
use crate::error::{BillingError, BillingResult};

/// Start trial use case
pub struct StartTrialUseCase<S>
where
    S: SubscriptionRepository,
{
    repo: Arc<S>,
}

impl<S> StartTrialUseCase<S>
where
    S: SubscriptionRepository,
{
    pub fn new(repo: Arc<S>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, gym_owner_id: Uuid) -> BillingResult<Subscription> {
        if self.repo.has_trial(&gym_owner_id).await? {
            return Err(BillingError::TrialAlreadyUsed);
        }

        let subscription = Subscription::new_trial(gym_owner_id);
        self.repo.create(&subscription).await?;

        tracing::info!(
            subscription_id = %subscription.subscription_id,
            gym_owner_id = %gym_owner_id,
            "Trial subscription started"
        );

        Ok(subscription)
    }
}
