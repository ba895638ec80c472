//! Entitlement transition for verified payment events.
//!
//! Pure construction of the post-payment subscription record and its
//! paired audit transaction. Orchestration against the stores (including
//! the duplicate-delivery check) lives in the application layer; the
//! pairing itself is decided here so both writes always agree.

use crate::domain::foundation::{Timestamp, UserId};

use super::{
    BillingProvider, FeatureLimits, FeatureUsage, PaymentTransaction, SubscriptionPlan,
    SubscriptionRecord, SubscriptionStatus, BILLING_CYCLE_DAYS,
};

/// A payment event that already passed signature verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedPayment {
    pub provider: BillingProvider,
    /// Provider payment id. Dedup key for redelivered callbacks.
    pub transaction_id: String,
    /// Provider order or recurring-subscription id.
    pub reference_id: String,
    pub amount_minor: i64,
    pub currency: String,
    /// Commercial label recorded on the transaction.
    pub plan_name: String,
    /// The signature that authenticated the event.
    pub signature: String,
    /// When verification happened.
    pub verified_at: Timestamp,
}

/// Result of applying a verified payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Record updated and one transaction appended.
    Applied,
    /// The transaction id was seen before; nothing changed.
    AlreadyProcessed,
}

/// Builds the paired `(record, transaction)` for a verified payment.
///
/// The new entitlement window is a fixed cycle from `now`; the record
/// goes Pro/active with every metered limit unlimited, usage zeroed, and
/// the event's reference id replacing any stale subscription id.
pub fn build_pro_entitlement(
    user_id: &UserId,
    event: &VerifiedPayment,
    now: Timestamp,
) -> (SubscriptionRecord, PaymentTransaction) {
    let record = SubscriptionRecord {
        plan: SubscriptionPlan::Pro,
        plan_name: event.plan_name.clone(),
        status: SubscriptionStatus::Active,
        current_period_end: Some(now.add_days(BILLING_CYCLE_DAYS)),
        provider: event.provider,
        subscription_id: Some(event.reference_id.clone()),
        limits: FeatureLimits::unlimited(),
        usage: FeatureUsage::zero(now),
    };

    let transaction = PaymentTransaction::captured(
        user_id.clone(),
        event.provider,
        event.transaction_id.clone(),
        event.reference_id.clone(),
        event.amount_minor,
        event.currency.clone(),
        event.plan_name.clone(),
        event.signature.clone(),
        event.verified_at,
    );

    (record, transaction)
}
