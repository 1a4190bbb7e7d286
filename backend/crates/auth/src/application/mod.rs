//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod issue_otp;
pub mod login;
pub mod register;
pub mod resend_otp;
pub mod token;
pub mod verify_otp;

// Re-exports
pub use config::AuthConfig;
pub use issue_otp::OtpIssuer;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use resend_otp::{ResendOtpInput, ResendOtpOutput, ResendOtpUseCase};
pub use token::{TokenClaims, TokenService};
pub use verify_otp::{VerifyOtpInput, VerifyOtpOutput, VerifyOtpUseCase};
