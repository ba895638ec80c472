//! Payment gateway configuration
//!
//! Credentials for the Razorpay REST API. The key secret doubles as the
//! HMAC key for payment signature verification, so a missing or malformed
//! secret is a fatal startup condition rather than a per-request error.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment gateway (Razorpay) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// Public key id (rzp_test_... or rzp_live_...)
    #[serde(default)]
    pub key_id: String,

    /// Key secret, used for Basic auth and signature HMAC
    #[serde(default = "empty_secret")]
    pub key_secret: SecretString,

    /// Recurring plan id for the Pro subscription
    pub plan_id: Option<String>,
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

impl BillingConfig {
    /// Check if using gateway test mode
    pub fn is_test_mode(&self) -> bool {
        self.key_id.starts_with("rzp_test_")
    }

    /// True when both halves of the credential pair are present.
    ///
    /// Gateway calls must check this before any network I/O.
    pub fn has_credentials(&self) -> bool {
        !self.key_id.is_empty() && !self.key_secret.expose_secret().is_empty()
    }

    /// Validate billing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.key_id.is_empty() {
            return Err(ValidationError::MissingRequired("RAZORPAY_KEY_ID"));
        }
        if self.key_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("RAZORPAY_KEY_SECRET"));
        }
        if !self.key_id.starts_with("rzp_") {
            return Err(ValidationError::InvalidGatewayKeyId);
        }
        if self.plan_id.as_deref().map(str::is_empty).unwrap_or(true) {
            return Err(ValidationError::MissingGatewayPlanId);
        }
        Ok(())
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            key_id: String::new(),
            key_secret: empty_secret(),
            plan_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> BillingConfig {
        BillingConfig {
            key_id: "rzp_test_abc123".to_string(),
            key_secret: SecretString::new("secret123".to_string()),
            plan_id: Some("plan_pro_monthly".to_string()),
        }
    }

    #[test]
    fn test_mode_detected_from_key_prefix() {
        assert!(valid().is_test_mode());

        let live = BillingConfig {
            key_id: "rzp_live_abc123".to_string(),
            ..valid()
        };
        assert!(!live.is_test_mode());
    }

    #[test]
    fn credentials_require_both_halves() {
        assert!(valid().has_credentials());

        let missing_secret = BillingConfig {
            key_secret: SecretString::new(String::new()),
            ..valid()
        };
        assert!(!missing_secret.has_credentials());

        assert!(!BillingConfig::default().has_credentials());
    }

    #[test]
    fn missing_key_id_rejected() {
        let config = BillingConfig {
            key_id: String::new(),
            ..valid()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_secret_rejected() {
        let config = BillingConfig {
            key_secret: SecretString::new(String::new()),
            ..valid()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn wrong_key_prefix_rejected() {
        let config = BillingConfig {
            key_id: "sk_test_abc".to_string(),
            ..valid()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_plan_id_rejected() {
        let config = BillingConfig {
            plan_id: None,
            ..valid()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn valid_config_passes() {
        assert!(valid().validate().is_ok());
    }
}
