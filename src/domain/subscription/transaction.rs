//! Append-only payment transaction records.
//!
//! One row per settled payment event. Rows are created once and never
//! updated or deleted; they are the billing audit trail.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

use super::BillingProvider;

/// Settlement outcome of a payment event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Captured,
    Failed,
    Refunded,
}

impl TransactionStatus {
    /// Stable string form used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Captured => "captured",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Refunded => "refunded",
        }
    }

    /// Parses the stable string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "captured" => Some(TransactionStatus::Captured),
            "failed" => Some(TransactionStatus::Failed),
            "refunded" => Some(TransactionStatus::Refunded),
            _ => None,
        }
    }
}

/// One settled payment event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTransaction {
    pub user_id: UserId,
    pub provider: BillingProvider,
    /// Provider payment id (unique per capture).
    pub transaction_id: String,
    /// Provider order or recurring-subscription id.
    pub order_id: String,
    /// Amount in integer minor currency units.
    pub amount_minor: i64,
    pub currency: String,
    pub status: TransactionStatus,
    /// Commercial label of the plan paid for.
    pub plan_name: String,
    /// The provider signature that authenticated this event.
    pub signature: String,
    /// When the signature was verified by this service.
    pub verified_at: Timestamp,
}

impl PaymentTransaction {
    /// Builds a captured transaction for a verified payment event.
    #[allow(clippy::too_many_arguments)]
    pub fn captured(
        user_id: UserId,
        provider: BillingProvider,
        transaction_id: impl Into<String>,
        order_id: impl Into<String>,
        amount_minor: i64,
        currency: impl Into<String>,
        plan_name: impl Into<String>,
        signature: impl Into<String>,
        verified_at: Timestamp,
    ) -> Self {
        Self {
            user_id,
            provider,
            transaction_id: transaction_id.into(),
            order_id: order_id.into(),
            amount_minor,
            currency: currency.into(),
            status: TransactionStatus::Captured,
            plan_name: plan_name.into(),
            signature: signature.into(),
            verified_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captured_constructor_sets_status() {
        let txn = PaymentTransaction::captured(
            UserId::new("user_42").unwrap(),
            BillingProvider::Razorpay,
            "pay_1",
            "order_1",
            49_900,
            "INR",
            "Mindhaven Pro (Monthly)",
            "sig",
            Timestamp::now(),
        );
        assert_eq!(txn.status, TransactionStatus::Captured);
        assert_eq!(txn.amount_minor, 49_900);
        assert_eq!(txn.order_id, "order_1");
    }

    #[test]
    fn status_string_round_trips() {
        for status in [
            TransactionStatus::Captured,
            TransactionStatus::Failed,
            TransactionStatus::Refunded,
        ] {
            assert_eq!(TransactionStatus::parse(status.as_str()), Some(status));
        }
        assert!(TransactionStatus::parse("pending").is_none());
    }
}
