//! Domain Layer
//!
//! Subscription entity, repository trait, and the payment gateway
//! capability.

pub mod entities;
pub mod gateway;
pub mod repository;

// Re-exports
pub use entities::{PaymentStatus, PlanType, Subscription};
pub use gateway::{GatewayError, GatewayOrder, PaymentGateway};
pub use repository::SubscriptionRepository;
