//! CreateSubscriptionHandler - starts a recurring Pro subscription.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::subscription::BillingError;
use crate::ports::{CreateSubscriptionRequest, PaymentGateway};

/// Billing cycles before a recurring subscription ends (12 months).
const TOTAL_BILLING_CYCLES: u32 = 12;

/// Command to create a recurring subscription.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionCommand {
    pub user_id: UserId,
}

/// Result of subscription creation.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionResult {
    pub subscription_id: String,
}

/// Handler for creating recurring subscriptions against the fixed
/// provider plan id from configuration.
pub struct CreateSubscriptionHandler {
    gateway: Arc<dyn PaymentGateway>,
    plan_id: String,
}

impl CreateSubscriptionHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>, plan_id: impl Into<String>) -> Self {
        Self {
            gateway,
            plan_id: plan_id.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateSubscriptionCommand,
    ) -> Result<CreateSubscriptionResult, BillingError> {
        if self.plan_id.is_empty() {
            return Err(BillingError::configuration("recurring plan id missing"));
        }

        let subscription = self
            .gateway
            .create_subscription(CreateSubscriptionRequest {
                plan_id: self.plan_id.clone(),
                total_cycles: TOTAL_BILLING_CYCLES,
                quantity: 1,
                notify_customer: true,
                notes: serde_json::json!({ "userId": cmd.user_id.to_string() }),
            })
            .await?;

        tracing::info!(
            user_id = %cmd.user_id,
            subscription_id = %subscription.id,
            "recurring subscription created"
        );

        Ok(CreateSubscriptionResult {
            subscription_id: subscription.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::payment::test_support::{FakeGateway, GatewayBehavior};

    fn user() -> UserId {
        UserId::new("user_42").unwrap()
    }

    #[tokio::test]
    async fn creates_subscription_against_configured_plan() {
        let gateway = Arc::new(FakeGateway::default());
        let handler = CreateSubscriptionHandler::new(gateway.clone(), "plan_pro_monthly");

        let result = handler
            .handle(CreateSubscriptionCommand { user_id: user() })
            .await
            .unwrap();

        assert_eq!(result.subscription_id, "sub_fake_1");
        assert_eq!(gateway.calls().await, vec!["create_subscription"]);
    }

    #[tokio::test]
    async fn empty_plan_id_is_a_configuration_error() {
        let gateway = Arc::new(FakeGateway::default());
        let handler = CreateSubscriptionHandler::new(gateway.clone(), "");

        let err = handler
            .handle(CreateSubscriptionCommand { user_id: user() })
            .await
            .unwrap_err();

        assert!(matches!(err, BillingError::Configuration(_)));
        assert!(gateway.calls().await.is_empty());
    }

    #[tokio::test]
    async fn gateway_failure_surfaces_with_status() {
        let gateway = Arc::new(FakeGateway::with_behavior(GatewayBehavior::HttpError(502)));
        let handler = CreateSubscriptionHandler::new(gateway, "plan_pro_monthly");

        let err = handler
            .handle(CreateSubscriptionCommand { user_id: user() })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BillingError::Gateway {
                status: Some(502),
                ..
            }
        ));
    }
}
