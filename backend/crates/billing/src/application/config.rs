//! Application Configuration

/// Billing application configuration
#[derive(Debug, Clone)]
pub struct BillingConfig {
    /// Gateway key secret used to verify payment signatures
    pub key_secret: Vec<u8>,
    /// ISO currency code for orders
    pub currency: String,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            key_secret: Vec::new(),
            currency: "INR".to_string(),
        }
    }
}

impl BillingConfig {
    /// Create config with a random key secret (for development)
    pub fn development() -> Self {
        Self {
            key_secret: platform::crypto::random_bytes(32),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_currency() {
        assert_eq!(BillingConfig::default().currency, "INR");
    }

    #[test]
    fn test_development_secret_nonzero() {
        let config = BillingConfig::development();
        assert_eq!(config.key_secret.len(), 32);
        assert!(config.key_secret.iter().any(|&b| b != 0));
    }
}
