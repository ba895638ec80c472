//! CreateOrderHandler - creates a one-time gateway order for a catalog plan.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::subscription::{find_offering, BillingError};
use crate::ports::{CreateOrderRequest, PaymentGateway};

/// Command to create a payment order.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub user_id: UserId,
    /// Catalog key of the offering being bought.
    pub plan_name: String,
}

/// Result of order creation.
#[derive(Debug, Clone)]
pub struct CreateOrderResult {
    pub order_id: String,
    pub amount_minor: i64,
    pub currency: String,
}

/// Handler for creating gateway orders.
pub struct CreateOrderHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl CreateOrderHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<CreateOrderResult, BillingError> {
        let offering = find_offering(&cmd.plan_name)
            .ok_or_else(|| BillingError::unknown_plan(&cmd.plan_name))?;

        let receipt = format!("rcpt_{}", uuid::Uuid::new_v4().simple());
        let order = self
            .gateway
            .create_order(CreateOrderRequest {
                amount_minor: offering.amount_minor,
                currency: offering.currency.to_string(),
                receipt,
                notes: serde_json::json!({
                    "userId": cmd.user_id.to_string(),
                    "planName": offering.label,
                }),
            })
            .await?;

        tracing::info!(
            user_id = %cmd.user_id,
            order_id = %order.id,
            plan = cmd.plan_name,
            "payment order created"
        );

        Ok(CreateOrderResult {
            order_id: order.id,
            amount_minor: order.amount_minor,
            currency: order.currency,
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
    async fn known_plan_creates_an_order() {
        let gateway = Arc::new(FakeGateway::default());
        let handler = CreateOrderHandler::new(gateway.clone());

        let result = handler
            .handle(CreateOrderCommand {
                user_id: user(),
                plan_name: "pro_monthly".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.amount_minor, 49_900);
        assert_eq!(result.currency, "INR");
        assert_eq!(gateway.calls().await, vec!["create_order"]);
    }

    #[tokio::test]
    async fn unknown_plan_is_rejected_without_a_gateway_call() {
        let gateway = Arc::new(FakeGateway::default());
        let handler = CreateOrderHandler::new(gateway.clone());

        let err = handler
            .handle(CreateOrderCommand {
                user_id: user(),
                plan_name: "enterprise".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, BillingError::unknown_plan("enterprise"));
        assert!(gateway.calls().await.is_empty());
    }

    #[tokio::test]
    async fn missing_credentials_surface_as_configuration_error() {
        let gateway = Arc::new(FakeGateway::with_behavior(GatewayBehavior::NotConfigured));
        let handler = CreateOrderHandler::new(gateway);

        let err = handler
            .handle(CreateOrderCommand {
                user_id: user(),
                plan_name: "pro_monthly".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, BillingError::Configuration(_)));
    }
}
