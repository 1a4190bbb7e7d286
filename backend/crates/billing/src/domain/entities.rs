//! Domain Entities

use chrono::{DateTime, Duration, Months, Utc};
use kernel::id::SubscriptionId;
use uuid::Uuid;

/// Subscription plan tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum PlanType {
    Trial = 0,
    Monthly = 1,
    Yearly = 2,
}

impl PlanType {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(PlanType::Trial),
            1 => Some(PlanType::Monthly),
            2 => Some(PlanType::Yearly),
            _ => None,
        }
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            PlanType::Trial => "trial",
            PlanType::Monthly => "monthly",
            PlanType::Yearly => "yearly",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "trial" => Some(PlanType::Trial),
            "monthly" => Some(PlanType::Monthly),
            "yearly" => Some(PlanType::Yearly),
            _ => None,
        }
    }

    /// Price in minor units (paise)
    #[inline]
    pub const fn amount_minor(&self) -> i64 {
        match self {
            PlanType::Trial => 0,
            PlanType::Monthly => 499 * 100,
            PlanType::Yearly => 5000 * 100,
        }
    }

    /// Term end for a subscription starting at `starts_at`
    ///
    /// Calendar months/years, not fixed day counts; chrono clamps the day
    /// when the target month is shorter (Jan 31 + 1 month = Feb 28).
    /// `None` only on date overflow at the far end of the calendar.
    pub fn term_end(&self, starts_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            PlanType::Trial => Some(starts_at + Duration::days(7)),
            PlanType::Monthly => starts_at.checked_add_months(Months::new(1)),
            PlanType::Yearly => starts_at.checked_add_months(Months::new(12)),
        }
    }
}

impl std::fmt::Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Payment lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum PaymentStatus {
    Pending = 0,
    Completed = 1,
    Failed = 2,
}

impl PaymentStatus {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(PaymentStatus::Pending),
            1 => Some(PaymentStatus::Completed),
            2 => Some(PaymentStatus::Failed),
            _ => None,
        }
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
        }
    }
}

/// Subscription entity
#[derive(Debug, Clone)]
pub struct Subscription {
    pub subscription_id: SubscriptionId,
    pub gym_owner_id: Uuid,
    pub plan: PlanType,
    /// Price in minor units
    pub amount_minor: i64,
    /// Gateway order reference (absent for trials)
    pub order_id: Option<String>,
    /// Gateway payment reference, set on verified payment
    pub payment_id: Option<String>,
    /// Verified gateway signature
    pub signature: Option<String>,
    pub payment_status: PaymentStatus,
    pub is_active: bool,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    /// Create the one free trial: immediately active, nothing to pay
    pub fn new_trial(gym_owner_id: Uuid) -> Self {
        let now = Utc::now();
        // Trial term is a plain 7 days, never overflows.
        let ends_at = now + Duration::days(7);

        Self {
            subscription_id: SubscriptionId::new(),
            gym_owner_id,
            plan: PlanType::Trial,
            amount_minor: 0,
            order_id: None,
            payment_id: None,
            signature: None,
            payment_status: PaymentStatus::Completed,
            is_active: true,
            starts_at: now,
            ends_at,
            created_at: now,
        }
    }

    /// Create a pending subscription awaiting payment confirmation
    pub fn new_pending_order(gym_owner_id: Uuid, plan: PlanType, order_id: String) -> Option<Self> {
        let now = Utc::now();
        let ends_at = plan.term_end(now)?;

        Some(Self {
            subscription_id: SubscriptionId::new(),
            gym_owner_id,
            plan,
            amount_minor: plan.amount_minor(),
            order_id: Some(order_id),
            payment_id: None,
            signature: None,
            payment_status: PaymentStatus::Pending,
            is_active: false,
            starts_at: now,
            ends_at,
            created_at: now,
        })
    }

    /// Record a signature-verified payment and activate
    pub fn record_payment(&mut self, payment_id: String, signature: String) {
        self.payment_id = Some(payment_id);
        self.signature = Some(signature);
        self.payment_status = PaymentStatus::Completed;
        self.is_active = true;
    }
}
