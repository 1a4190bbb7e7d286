//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, Base64, hex, constant-time compare)
//! - Password hashing (bcrypt, adaptive cost factor 10)

pub mod crypto;
pub mod password;
