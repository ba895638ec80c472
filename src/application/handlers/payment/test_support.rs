//! Shared gateway fake for payment handler tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::ports::{
    CreateOrderRequest, CreateSubscriptionRequest, GatewayError, GatewayInvoice, GatewayOrder,
    GatewayOrderDetails, GatewaySubscription, PaymentGateway,
};

/// How the fake responds to every operation.
#[derive(Debug, Clone, Copy)]
pub enum GatewayBehavior {
    /// Canned successful responses.
    Succeed,
    /// Credentials-missing short circuit.
    NotConfigured,
    /// Provider HTTP failure with the given status.
    HttpError(u16),
}

/// Recording `PaymentGateway` fake.
pub struct FakeGateway {
    behavior: GatewayBehavior,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self::with_behavior(GatewayBehavior::Succeed)
    }
}

impl FakeGateway {
    pub fn with_behavior(behavior: GatewayBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Names of the operations invoked, in order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, operation: &str) -> Result<(), GatewayError> {
        self.calls.lock().await.push(operation.to_string());
        match self.behavior {
            GatewayBehavior::Succeed => Ok(()),
            GatewayBehavior::NotConfigured => Err(GatewayError::NotConfigured),
            GatewayBehavior::HttpError(status) => Err(GatewayError::Http {
                status,
                body: "provider error body".to_string(),
            }),
        }
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<GatewayOrder, GatewayError> {
        self.record("create_order").await?;
        Ok(GatewayOrder {
            id: "order_fake_1".to_string(),
            amount_minor: request.amount_minor,
            currency: request.currency,
        })
    }

    async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrderDetails, GatewayError> {
        self.record("fetch_order").await?;
        Ok(GatewayOrderDetails {
            id: order_id.to_string(),
            amount_minor: 49_900,
            currency: "INR".to_string(),
            notes: serde_json::json!({
                "userId": "user_42",
                "planName": "Mindhaven Pro (Monthly)",
            }),
        })
    }

    async fn create_subscription(
        &self,
        _request: CreateSubscriptionRequest,
    ) -> Result<GatewaySubscription, GatewayError> {
        self.record("create_subscription").await?;
        Ok(GatewaySubscription {
            id: "sub_fake_1".to_string(),
        })
    }

    async fn cancel_subscription(&self, _subscription_id: &str) -> Result<(), GatewayError> {
        self.record("cancel_subscription").await
    }

    async fn pause_subscription(&self, _subscription_id: &str) -> Result<(), GatewayError> {
        self.record("pause_subscription").await
    }

    async fn resume_subscription(&self, _subscription_id: &str) -> Result<(), GatewayError> {
        self.record("resume_subscription").await
    }

    async fn update_subscription(
        &self,
        _subscription_id: &str,
        _new_plan_id: &str,
    ) -> Result<(), GatewayError> {
        self.record("update_subscription").await
    }

    async fn list_subscription_invoices(
        &self,
        _subscription_id: &str,
    ) -> Result<Vec<GatewayInvoice>, GatewayError> {
        self.record("list_subscription_invoices").await?;
        Ok(vec![GatewayInvoice {
            id: "inv_fake_1".to_string(),
            status: "paid".to_string(),
            amount_minor: 49_900,
            currency: "INR".to_string(),
        }])
    }
}
