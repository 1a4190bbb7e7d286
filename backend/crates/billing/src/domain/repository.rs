//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::SubscriptionId;
use uuid::Uuid;

use crate::domain::entities::Subscription;
use crate::error::BillingResult;

/// Subscription repository trait
#[trait_variant::make(SubscriptionRepository: Send)]
pub trait LocalSubscriptionRepository {
    /// Persist a new subscription
    async fn create(&self, subscription: &Subscription) -> BillingResult<()>;

    /// Find a subscription by id
    async fn find_by_id(&self, subscription_id: &SubscriptionId)
    -> BillingResult<Option<Subscription>>;

    /// Whether the gym owner has ever had a trial subscription
    async fn has_trial(&self, gym_owner_id: &Uuid) -> BillingResult<bool>;

    /// Most recent active subscription for a gym owner, if any
    async fn find_latest_active(&self, gym_owner_id: &Uuid) -> BillingResult<Option<Subscription>>;

    /// Update a subscription (payment bookkeeping)
    async fn update(&self, subscription: &Subscription) -> BillingResult<()>;
}
