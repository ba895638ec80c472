//! Integration tests for the billing core.
//!
//! End-to-end over the application handlers with in-memory stores and a
//! scripted gateway: order creation, signature verification, entitlement
//! application, duplicate-callback dedup, and the persistence
//! inconsistency path.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;

use mindhaven::adapters::memory::{InMemorySubscriptionStore, InMemoryTransactionLog};
use mindhaven::application::handlers::payment::{
    CreateOrderCommand, CreateOrderHandler, ManageAction, ManageOutcome,
    ManageSubscriptionCommand, ManageSubscriptionHandler, VerifyOrderCommand,
    VerifyPaymentHandler, VerifySubscriptionCommand,
};
use mindhaven::domain::foundation::{Timestamp, UserId};
use mindhaven::domain::subscription::{
    BillingError, PaymentOutcome, PaymentSignatureVerifier, SubscriptionPlan, SubscriptionRecord,
    SubscriptionStatus, TransactionStatus, UNLIMITED,
};
use mindhaven::ports::{
    CreateOrderRequest, CreateSubscriptionRequest, GatewayError, GatewayInvoice, GatewayOrder,
    GatewayOrderDetails, GatewaySubscription, PaymentGateway, SubscriptionStore, TransactionLog,
};

const KEY_SECRET: &str = "integration_key_secret";

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Gateway stub that remembers created orders and serves them back.
struct ScriptedGateway {
    orders: tokio::sync::Mutex<Vec<GatewayOrderDetails>>,
}

impl ScriptedGateway {
    fn new() -> Self {
        Self {
            orders: tokio::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<GatewayOrder, GatewayError> {
        let mut orders = self.orders.lock().await;
        let id = format!("order_{}", orders.len() + 1);
        orders.push(GatewayOrderDetails {
            id: id.clone(),
            amount_minor: request.amount_minor,
            currency: request.currency.clone(),
            notes: request.notes,
        });
        Ok(GatewayOrder {
            id,
            amount_minor: request.amount_minor,
            currency: request.currency,
        })
    }

    async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrderDetails, GatewayError> {
        self.orders
            .lock()
            .await
            .iter()
            .find(|o| o.id == order_id)
            .cloned()
            .ok_or_else(|| GatewayError::Http {
                status: 404,
                body: "order not found".to_string(),
            })
    }

    async fn create_subscription(
        &self,
        _request: CreateSubscriptionRequest,
    ) -> Result<GatewaySubscription, GatewayError> {
        Ok(GatewaySubscription {
            id: "sub_1".to_string(),
        })
    }

    async fn cancel_subscription(&self, _subscription_id: &str) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn pause_subscription(&self, _subscription_id: &str) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn resume_subscription(&self, _subscription_id: &str) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn update_subscription(
        &self,
        _subscription_id: &str,
        _new_plan_id: &str,
    ) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn list_subscription_invoices(
        &self,
        _subscription_id: &str,
    ) -> Result<Vec<GatewayInvoice>, GatewayError> {
        Ok(vec![])
    }
}

struct Harness {
    verifier: Arc<PaymentSignatureVerifier>,
    gateway: Arc<ScriptedGateway>,
    store: Arc<InMemorySubscriptionStore>,
    log: Arc<InMemoryTransactionLog>,
}

impl Harness {
    async fn new() -> Self {
        let harness = Self {
            verifier: Arc::new(PaymentSignatureVerifier::new(SecretString::new(
                KEY_SECRET.to_string(),
            ))),
            gateway: Arc::new(ScriptedGateway::new()),
            store: Arc::new(InMemorySubscriptionStore::new()),
            log: Arc::new(InMemoryTransactionLog::new()),
        };
        harness
            .store
            .seed(&user(), SubscriptionRecord::free_default(Timestamp::now()))
            .await;
        harness
    }

    fn verify_handler(&self) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(
            self.verifier.clone(),
            self.gateway.clone(),
            self.store.clone(),
            self.log.clone(),
        )
    }

    fn order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(self.gateway.clone())
    }

    async fn record(&self) -> SubscriptionRecord {
        self.store.get(&user()).await.unwrap().unwrap()
    }
}

fn user() -> UserId {
    UserId::new("user_42").unwrap()
}

// =============================================================================
// Order Purchase Flow
// =============================================================================

#[tokio::test]
async fn full_order_purchase_flow_grants_pro() {
    let h = Harness::new().await;

    // 1. Client asks for an order for the monthly plan.
    let order = h
        .order_handler()
        .handle(CreateOrderCommand {
            user_id: user(),
            plan_name: "pro_monthly".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(order.amount_minor, 49_900);

    // 2. Checkout completes; the provider signs (order_id, payment_id).
    let signature = h.verifier.sign_order(&order.order_id, "pay_1");

    // 3. The callback is verified and applied.
    let outcome = h
        .verify_handler()
        .handle_order(VerifyOrderCommand {
            user_id: user(),
            order_id: order.order_id.clone(),
            payment_id: "pay_1".to_string(),
            signature,
        })
        .await
        .unwrap();
    assert_eq!(outcome, PaymentOutcome::Applied);

    // 4. The entitlement record is Pro/active/unlimited with the order id.
    let record = h.record().await;
    assert_eq!(record.plan, SubscriptionPlan::Pro);
    assert_eq!(record.status, SubscriptionStatus::Active);
    assert_eq!(record.subscription_id.as_deref(), Some(order.order_id.as_str()));
    assert_eq!(record.limits.video_sessions, UNLIMITED);
    assert_eq!(record.limits.voice_calls, UNLIMITED);
    assert_eq!(record.limits.chat_messages, UNLIMITED);
    assert_eq!(record.usage.chat_messages, 0);

    // 5. Exactly one captured transaction matches the callback, with the
    //    amount read back from the order.
    let transactions = h.log.list_for_user(&user()).await.unwrap();
    assert_eq!(transactions.len(), 1);
    let txn = &transactions[0];
    assert_eq!(txn.status, TransactionStatus::Captured);
    assert_eq!(txn.transaction_id, "pay_1");
    assert_eq!(txn.order_id, order.order_id);
    assert_eq!(txn.amount_minor, 49_900);
    assert_eq!(txn.currency, "INR");
}

#[tokio::test]
async fn entitlement_window_is_thirty_days() {
    let h = Harness::new().await;
    let order = h
        .order_handler()
        .handle(CreateOrderCommand {
            user_id: user(),
            plan_name: "pro_yearly".to_string(),
        })
        .await
        .unwrap();

    let before = Timestamp::now();
    let signature = h.verifier.sign_order(&order.order_id, "pay_1");
    h.verify_handler()
        .handle_order(VerifyOrderCommand {
            user_id: user(),
            order_id: order.order_id,
            payment_id: "pay_1".to_string(),
            signature,
        })
        .await
        .unwrap();

    let end = h.record().await.current_period_end.unwrap();
    assert_eq!(end.days_since(&before), 30);
}

// =============================================================================
// Signature Rejection
// =============================================================================

#[tokio::test]
async fn tampered_signature_leaves_no_trace() {
    let h = Harness::new().await;
    let order = h
        .order_handler()
        .handle(CreateOrderCommand {
            user_id: user(),
            plan_name: "pro_monthly".to_string(),
        })
        .await
        .unwrap();

    let mut signature = h.verifier.sign_order(&order.order_id, "pay_1");
    // Flip one hex character.
    let flipped = if signature.ends_with('0') { "1" } else { "0" };
    signature.replace_range(signature.len() - 1.., flipped);

    let err = h
        .verify_handler()
        .handle_order(VerifyOrderCommand {
            user_id: user(),
            order_id: order.order_id,
            payment_id: "pay_1".to_string(),
            signature,
        })
        .await
        .unwrap_err();

    assert_eq!(err, BillingError::SignatureInvalid);
    assert_eq!(h.record().await.plan, SubscriptionPlan::Free);
    assert!(h.log.is_empty().await);
}

#[tokio::test]
async fn signature_under_foreign_secret_is_rejected() {
    let h = Harness::new().await;
    let order = h
        .order_handler()
        .handle(CreateOrderCommand {
            user_id: user(),
            plan_name: "pro_monthly".to_string(),
        })
        .await
        .unwrap();

    let foreign = PaymentSignatureVerifier::new(SecretString::new("other_secret".to_string()));
    let signature = foreign.sign_order(&order.order_id, "pay_1");

    let err = h
        .verify_handler()
        .handle_order(VerifyOrderCommand {
            user_id: user(),
            order_id: order.order_id,
            payment_id: "pay_1".to_string(),
            signature,
        })
        .await
        .unwrap_err();

    assert_eq!(err, BillingError::SignatureInvalid);
}

// =============================================================================
// Idempotency and Inconsistency
// =============================================================================

#[tokio::test]
async fn duplicate_callback_changes_nothing() {
    let h = Harness::new().await;
    let order = h
        .order_handler()
        .handle(CreateOrderCommand {
            user_id: user(),
            plan_name: "pro_monthly".to_string(),
        })
        .await
        .unwrap();

    let cmd = VerifyOrderCommand {
        user_id: user(),
        order_id: order.order_id,
        payment_id: "pay_1".to_string(),
        signature: h.verifier.sign_order("order_1", "pay_1"),
    };

    assert_eq!(
        h.verify_handler().handle_order(cmd.clone()).await.unwrap(),
        PaymentOutcome::Applied
    );
    let record_after_first = h.record().await;

    assert_eq!(
        h.verify_handler().handle_order(cmd).await.unwrap(),
        PaymentOutcome::AlreadyProcessed
    );

    assert_eq!(h.record().await, record_after_first);
    assert_eq!(h.log.len().await, 1);
}

#[tokio::test]
async fn append_failure_surfaces_as_inconsistency_with_record_updated() {
    let h = Harness::new().await;
    let order = h
        .order_handler()
        .handle(CreateOrderCommand {
            user_id: user(),
            plan_name: "pro_monthly".to_string(),
        })
        .await
        .unwrap();

    h.log.fail_next_append().await;

    let err = h
        .verify_handler()
        .handle_order(VerifyOrderCommand {
            user_id: user(),
            order_id: order.order_id,
            payment_id: "pay_1".to_string(),
            signature: h.verifier.sign_order("order_1", "pay_1"),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, BillingError::PersistenceInconsistency { .. }));
    // The record kept the entitlement; the audit row is the gap.
    assert_eq!(h.record().await.plan, SubscriptionPlan::Pro);
    assert!(h.log.is_empty().await);
}

// =============================================================================
// Subscription Variant
// =============================================================================

#[tokio::test]
async fn subscription_callback_uses_reversed_canonical_string() {
    let h = Harness::new().await;

    let good = h.verifier.sign_subscription("pay_7", "sub_1");
    let outcome = h
        .verify_handler()
        .handle_subscription(VerifySubscriptionCommand {
            user_id: user(),
            subscription_id: "sub_1".to_string(),
            payment_id: "pay_7".to_string(),
            signature: good,
        })
        .await
        .unwrap();
    assert_eq!(outcome, PaymentOutcome::Applied);

    let record = h.record().await;
    assert_eq!(record.subscription_id.as_deref(), Some("sub_1"));
    assert_eq!(record.provider.as_str(), "razorpay");
}

// =============================================================================
// Manage Actions
// =============================================================================

#[tokio::test]
async fn manage_actions_round_trip_through_the_gateway() {
    let h = Harness::new().await;
    let handler = ManageSubscriptionHandler::new(h.gateway.clone());

    for action in [ManageAction::Cancel, ManageAction::Pause, ManageAction::Resume] {
        let outcome = handler
            .handle(ManageSubscriptionCommand {
                subscription_id: "sub_1".to_string(),
                action,
                new_plan_id: None,
            })
            .await
            .unwrap();
        assert!(matches!(outcome, ManageOutcome::Done));
    }

    let outcome = handler
        .handle(ManageSubscriptionCommand {
            subscription_id: "sub_1".to_string(),
            action: ManageAction::Invoices,
            new_plan_id: None,
        })
        .await
        .unwrap();
    assert!(matches!(outcome, ManageOutcome::Invoices(_)));
}
