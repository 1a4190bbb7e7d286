//! My Subscription Use Case

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::Subscription;
use crate::domain::repository::SubscriptionRepository;
use crate::error::{BillingError, BillingResult};

/// Current subscription lookup
pub struct MySubscriptionUseCase<S>
where
    S: SubscriptionRepository,
{
    repo: Arc<S>,
}

impl<S> MySubscriptionUseCase<S>
where
    S: SubscriptionRepository,
{
    pub fn new(repo: Arc<S>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, gym_owner_id: Uuid) -> BillingResult<Subscription> {
        self.repo
            .find_latest_active(&gym_owner_id)
            .await?
            .ok_or(BillingError::NoActiveSubscription)
    }
}
