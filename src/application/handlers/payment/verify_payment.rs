//! VerifyPaymentHandler - verifies payment callbacks and applies the
//! entitlement transition.
//!
//! Both verification variants share the apply path: dedup by provider
//! payment id, replace the subscription record, append exactly one
//! audit transaction. An append failure after a successful replace is
//! the one inconsistency this service must detect and log loudly.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::subscription::{
    build_pro_entitlement, find_offering, BillingError, BillingProvider, PaymentOutcome,
    PaymentSignatureVerifier, VerifiedPayment,
};
use crate::ports::{PaymentGateway, SubscriptionStore, TransactionLog};

/// Command to verify a one-time order capture.
#[derive(Debug, Clone)]
pub struct VerifyOrderCommand {
    pub user_id: UserId,
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Command to verify a recurring-subscription capture.
#[derive(Debug, Clone)]
pub struct VerifySubscriptionCommand {
    pub user_id: UserId,
    pub subscription_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Handler for payment verification and entitlement application.
pub struct VerifyPaymentHandler {
    verifier: Arc<PaymentSignatureVerifier>,
    gateway: Arc<dyn PaymentGateway>,
    store: Arc<dyn SubscriptionStore>,
    log: Arc<dyn TransactionLog>,
}

impl VerifyPaymentHandler {
    pub fn new(
        verifier: Arc<PaymentSignatureVerifier>,
        gateway: Arc<dyn PaymentGateway>,
        store: Arc<dyn SubscriptionStore>,
        log: Arc<dyn TransactionLog>,
    ) -> Self {
        Self {
            verifier,
            gateway,
            store,
            log,
        }
    }

    /// Verifies an order capture and applies the Pro entitlement.
    pub async fn handle_order(
        &self,
        cmd: VerifyOrderCommand,
    ) -> Result<PaymentOutcome, BillingError> {
        if !self
            .verifier
            .verify_order(&cmd.order_id, &cmd.payment_id, &cmd.signature)
        {
            tracing::warn!(
                user_id = %cmd.user_id,
                order_id = %cmd.order_id,
                payment_id = %cmd.payment_id,
                "payment signature rejected - possible tampering"
            );
            return Err(BillingError::SignatureInvalid);
        }

        // The callback carries only ids; the authoritative amount and the
        // plan label come from the order itself.
        let order = self.gateway.fetch_order(&cmd.order_id).await?;
        let plan_name = order
            .notes
            .get("planName")
            .and_then(|v| v.as_str())
            .unwrap_or("Mindhaven Pro")
            .to_string();

        let event = VerifiedPayment {
            provider: BillingProvider::Razorpay,
            transaction_id: cmd.payment_id,
            reference_id: cmd.order_id,
            amount_minor: order.amount_minor,
            currency: order.currency,
            plan_name,
            signature: cmd.signature,
            verified_at: Timestamp::now(),
        };

        self.apply(&cmd.user_id, event).await
    }

    /// Verifies a subscription capture and applies the Pro entitlement.
    ///
    /// Recurring captures settle against the fixed monthly offering; no
    /// order exists to read the amount from.
    pub async fn handle_subscription(
        &self,
        cmd: VerifySubscriptionCommand,
    ) -> Result<PaymentOutcome, BillingError> {
        if !self.verifier.verify_subscription(
            &cmd.payment_id,
            &cmd.subscription_id,
            &cmd.signature,
        ) {
            tracing::warn!(
                user_id = %cmd.user_id,
                subscription_id = %cmd.subscription_id,
                payment_id = %cmd.payment_id,
                "payment signature rejected - possible tampering"
            );
            return Err(BillingError::SignatureInvalid);
        }

        let offering = find_offering("pro_monthly")
            .ok_or_else(|| BillingError::configuration("monthly offering missing from catalog"))?;

        let event = VerifiedPayment {
            provider: BillingProvider::Razorpay,
            transaction_id: cmd.payment_id,
            reference_id: cmd.subscription_id,
            amount_minor: offering.amount_minor,
            currency: offering.currency.to_string(),
            plan_name: offering.label.to_string(),
            signature: cmd.signature,
            verified_at: Timestamp::now(),
        };

        self.apply(&cmd.user_id, event).await
    }

    /// Applies a verified payment: idempotency check, record replace,
    /// one transaction append.
    async fn apply(
        &self,
        user_id: &UserId,
        event: VerifiedPayment,
    ) -> Result<PaymentOutcome, BillingError> {
        // Providers redeliver callbacks at-least-once; a known payment id
        // short-circuits without touching the record or the log.
        let existing = self
            .log
            .find_by_transaction_id(event.provider, &event.transaction_id)
            .await
            .map_err(|e| BillingError::store(e.to_string()))?;

        if existing.is_some() {
            tracing::info!(
                user_id = %user_id,
                transaction_id = %event.transaction_id,
                "duplicate payment callback ignored"
            );
            return Ok(PaymentOutcome::AlreadyProcessed);
        }

        let now = Timestamp::now();
        let (record, transaction) = build_pro_entitlement(user_id, &event, now);

        self.store
            .replace(user_id, &record)
            .await
            .map_err(|e| BillingError::store(e.to_string()))?;

        if let Err(e) = self.log.append(&transaction).await {
            // The record is already updated; without multi-document
            // transactions there is no rollback. Surface the broken
            // pairing as a data-integrity event for reconciliation.
            tracing::error!(
                user_id = %user_id,
                provider = %event.provider,
                transaction_id = %event.transaction_id,
                error = %e,
                "DATA INTEGRITY: subscription record updated but transaction append failed"
            );
            return Err(BillingError::PersistenceInconsistency {
                user_id: user_id.clone(),
                provider: event.provider,
                transaction_id: event.transaction_id,
            });
        }

        tracing::info!(
            user_id = %user_id,
            transaction_id = %transaction.transaction_id,
            order_id = %transaction.order_id,
            amount_minor = transaction.amount_minor,
            "verified payment applied"
        );

        Ok(PaymentOutcome::Applied)
    }
}
