//! Billing error taxonomy.
//!
//! Every payment-flow failure is one of these variants; handlers map
//! them to HTTP status codes and a generic envelope, never leaking
//! provider responses or secret material to the caller.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 400 |
//! | UnknownPlan | 400 |
//! | SignatureInvalid | 400 |
//! | Configuration | 500 |
//! | Gateway | 500 |
//! | PersistenceInconsistency | 500 |
//! | Store | 500 |

use crate::domain::foundation::UserId;

use super::BillingProvider;

/// Billing and payment-flow errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingError {
    /// Missing or malformed required request field.
    Validation { field: String, message: String },

    /// No such plan in the catalog.
    UnknownPlan(String),

    /// Required gateway credentials absent.
    Configuration(String),

    /// Computed signature mismatch. Potential tampering signal.
    SignatureInvalid,

    /// Non-success response from the payment provider.
    Gateway {
        status: Option<u16>,
        message: String,
    },

    /// Record update succeeded but the transaction append failed.
    /// Breaks the mutation/audit pairing invariant; logged loudly.
    PersistenceInconsistency {
        user_id: UserId,
        provider: BillingProvider,
        transaction_id: String,
    },

    /// Persistence collaborator failure.
    Store(String),
}

impl BillingError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BillingError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unknown_plan(name: impl Into<String>) -> Self {
        BillingError::UnknownPlan(name.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        BillingError::Configuration(message.into())
    }

    pub fn gateway(status: Option<u16>, message: impl Into<String>) -> Self {
        BillingError::Gateway {
            status,
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        BillingError::Store(message.into())
    }

    /// Message safe to return to the caller.
    ///
    /// Validation detail is descriptive; everything else stays generic,
    /// with the full detail available only in server-side logs.
    pub fn public_message(&self) -> String {
        match self {
            // Validation messages are written to stand alone ("Missing
            // userId", "Invalid action"); the field is for logs.
            BillingError::Validation { message, .. } => message.clone(),
            BillingError::UnknownPlan(name) => format!("Unknown plan: {}", name),
            BillingError::Configuration(_) => "Payment gateway not configured".to_string(),
            BillingError::SignatureInvalid => "Invalid payment signature".to_string(),
            BillingError::Gateway { .. } => "Payment gateway request failed".to_string(),
            BillingError::PersistenceInconsistency { .. } | BillingError::Store(_) => {
                "Failed to record payment".to_string()
            }
        }
    }
}

impl std::fmt::Display for BillingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BillingError::Validation { field, message } => {
                write!(f, "validation failed on '{}': {}", field, message)
            }
            BillingError::UnknownPlan(name) => write!(f, "unknown plan '{}'", name),
            BillingError::Configuration(message) => write!(f, "configuration error: {}", message),
            BillingError::SignatureInvalid => write!(f, "payment signature mismatch"),
            BillingError::Gateway { status, message } => match status {
                Some(code) => write!(f, "gateway returned {}: {}", code, message),
                None => write!(f, "gateway request failed: {}", message),
            },
            BillingError::PersistenceInconsistency {
                user_id,
                provider,
                transaction_id,
            } => write!(
                f,
                "record updated but transaction append failed: user={} provider={} txn={}",
                user_id, provider, transaction_id
            ),
            BillingError::Store(message) => write!(f, "store error: {}", message),
        }
    }
}

impl std::error::Error for BillingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_messages_hide_gateway_detail() {
        let err = BillingError::gateway(Some(502), "upstream body with secrets");
        assert!(!err.public_message().contains("upstream"));
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn public_message_names_the_invalid_signature() {
        assert_eq!(
            BillingError::SignatureInvalid.public_message(),
            "Invalid payment signature"
        );
    }

    #[test]
    fn validation_message_stands_alone() {
        let err = BillingError::validation("userId", "Missing userId");
        assert_eq!(err.public_message(), "Missing userId");
    }

    #[test]
    fn inconsistency_display_names_the_pairing() {
        let err = BillingError::PersistenceInconsistency {
            user_id: UserId::new("user_42").unwrap(),
            provider: BillingProvider::Razorpay,
            transaction_id: "pay_1".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("user_42"));
        assert!(text.contains("pay_1"));
    }
}
