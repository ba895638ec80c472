//! Billing provider origin tag.

use serde::{Deserialize, Serialize};

/// Which external payment system owns a subscription or transaction.
///
/// `Manual` covers records granted by operators without a payment event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingProvider {
    Manual,
    Razorpay,
}

impl BillingProvider {
    /// Stable string form used in storage and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingProvider::Manual => "manual",
            BillingProvider::Razorpay => "razorpay",
        }
    }

    /// Parses the stable string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(BillingProvider::Manual),
            "razorpay" => Some(BillingProvider::Razorpay),
            _ => None,
        }
    }
}

impl std::fmt::Display for BillingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
