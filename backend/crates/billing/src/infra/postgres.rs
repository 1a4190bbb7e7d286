//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::SubscriptionId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{PaymentStatus, PlanType, Subscription};
use crate::domain::repository::SubscriptionRepository;
use crate::error::{BillingError, BillingResult};

/// PostgreSQL-backed subscription store
#[derive(Clone)]
pub struct PgBillingRepository {
    pool: PgPool,
}

impl PgBillingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SubscriptionRepository for PgBillingRepository {
    async fn create(&self, subscription: &Subscription) -> BillingResult<()> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (
                subscription_id,
                gym_owner_id,
                plan_type,
                amount_minor,
                order_id,
                payment_id,
                signature,
                payment_status,
                is_active,
                starts_at,
                ends_at,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(subscription.subscription_id.as_uuid())
        .bind(subscription.gym_owner_id)
        .bind(subscription.plan.id())
        .bind(subscription.amount_minor)
        .bind(&subscription.order_id)
        .bind(&subscription.payment_id)
        .bind(&subscription.signature)
        .bind(subscription.payment_status.id())
        .bind(subscription.is_active)
        .bind(subscription.starts_at)
        .bind(subscription.ends_at)
        .bind(subscription.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        subscription_id: &SubscriptionId,
    ) -> BillingResult<Option<Subscription>> {
        let row = sqlx::query_as::<_, SubscriptionRow>(
            r#"
            SELECT
                subscription_id,
                gym_owner_id,
                plan_type,
                amount_minor,
                order_id,
                payment_id,
                signature,
                payment_status,
                is_active,
                starts_at,
                ends_at,
                created_at
            FROM subscriptions
            WHERE subscription_id = $1
            "#,
        )
        .bind(subscription_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_subscription()).transpose()
    }

    async fn has_trial(&self, gym_owner_id: &Uuid) -> BillingResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM subscriptions WHERE gym_owner_id = $1 AND plan_type = $2)",
        )
        .bind(gym_owner_id)
        .bind(PlanType::Trial.id())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_latest_active(&self, gym_owner_id: &Uuid) -> BillingResult<Option<Subscription>> {
        let row = sqlx::query_as::<_, SubscriptionRow>(
            r#"
            SELECT
                subscription_id,
                gym_owner_id,
                plan_type,
                amount_minor,
                order_id,
                payment_id,
                signature,
                payment_status,
                is_active,
                starts_at,
                ends_at,
                created_at
            FROM subscriptions
            WHERE gym_owner_id = $1 AND is_active = TRUE
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(gym_owner_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_subscription()).transpose()
    }

    async fn update(&self, subscription: &Subscription) -> BillingResult<()> {
        sqlx::query(
            r#"
            UPDATE subscriptions SET
                payment_id = $2,
                signature = $3,
                payment_status = $4,
                is_active = $5
            WHERE subscription_id = $1
            "#,
        )
        .bind(subscription.subscription_id.as_uuid())
        .bind(&subscription.payment_id)
        .bind(&subscription.signature)
        .bind(subscription.payment_status.id())
        .bind(subscription.is_active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct SubscriptionRow {
    subscription_id: Uuid,
    gym_owner_id: Uuid,
    plan_type: i16,
    amount_minor: i64,
    order_id: Option<String>,
    payment_id: Option<String>,
    signature: Option<String>,
    payment_status: i16,
    is_active: bool,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl SubscriptionRow {
    fn into_subscription(self) -> BillingResult<Subscription> {
        let plan = PlanType::from_id(self.plan_type)
            .ok_or_else(|| BillingError::Internal(format!("Invalid plan id: {}", self.plan_type)))?;
        let payment_status = PaymentStatus::from_id(self.payment_status).ok_or_else(|| {
            BillingError::Internal(format!("Invalid payment status id: {}", self.payment_status))
        })?;

        Ok(Subscription {
            subscription_id: SubscriptionId::from_uuid(self.subscription_id),
            gym_owner_id: self.gym_owner_id,
            plan,
            amount_minor: self.amount_minor,
            order_id: self.order_id,
            payment_id: self.payment_id,
            signature: self.signature,
            payment_status,
            is_active: self.is_active,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            created_at: self.created_at,
        })
    }
}
