//! HTTP handlers for the payment endpoints.
//!
//! Thin translation from request bodies into payment commands; every
//! error is mapped at this boundary into the uniform envelope.

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::application::handlers::payment::{
    CreateOrderCommand, CreateOrderHandler, CreateSubscriptionCommand, CreateSubscriptionHandler,
    ManageAction, ManageOutcome, ManageSubscriptionCommand, ManageSubscriptionHandler,
    VerifyOrderCommand, VerifyPaymentHandler, VerifySubscriptionCommand,
};
use crate::domain::foundation::UserId;

use super::super::{ApiError, AppState, AuthenticatedUser};
use super::dto::{
    CreateOrderBody, CreateOrderResponse, CreateSubscriptionResponse, InvoiceView,
    ManageSubscriptionBody, ManageSubscriptionResponse, VerifyOrderBody, VerifyResponse,
    VerifySubscriptionBody,
};

impl AppState {
    fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(self.gateway.clone())
    }

    fn create_subscription_handler(&self) -> CreateSubscriptionHandler {
        CreateSubscriptionHandler::new(self.gateway.clone(), self.recurring_plan_id.clone())
    }

    fn manage_subscription_handler(&self) -> ManageSubscriptionHandler {
        ManageSubscriptionHandler::new(self.gateway.clone())
    }

    fn verify_payment_handler(&self) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(
            self.verifier.clone(),
            self.gateway.clone(),
            self.subscriptions.clone(),
            self.transactions.clone(),
        )
    }
}

fn required(value: Option<String>, message: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request(message))
}

fn body_user_id(value: Option<String>) -> Result<UserId, ApiError> {
    let raw = required(value, "Missing userId")?;
    UserId::new(raw).map_err(|_| ApiError::bad_request("Missing userId"))
}

/// POST /payment/order - create a one-time order for a catalog plan.
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateOrderBody>,
) -> Result<impl IntoResponse, ApiError> {
    let plan_name = required(body.plan_name, "Missing planName")?;

    let result = state
        .create_order_handler()
        .handle(CreateOrderCommand {
            user_id: user.user_id,
            plan_name,
        })
        .await?;

    Ok(Json(CreateOrderResponse {
        success: true,
        order_id: result.order_id,
        amount: result.amount_minor,
        currency: result.currency,
        key_id: state.gateway_key_id.clone(),
    }))
}

/// POST /payment/subscription - start a recurring Pro subscription.
pub async fn create_subscription(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .create_subscription_handler()
        .handle(CreateSubscriptionCommand {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(CreateSubscriptionResponse {
        success: true,
        subscription_id: result.subscription_id,
        key_id: state.gateway_key_id.clone(),
    }))
}

/// POST /payment/subscription/manage - subscription lifecycle actions.
pub async fn manage_subscription(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(body): Json<ManageSubscriptionBody>,
) -> Result<impl IntoResponse, ApiError> {
    let subscription_id = required(body.subscription_id, "Missing subscriptionId")?;
    let action = required(body.action, "Missing action")?;
    let action = ManageAction::parse(&action).ok_or_else(|| ApiError::bad_request("Invalid action"))?;

    let outcome = state
        .manage_subscription_handler()
        .handle(ManageSubscriptionCommand {
            subscription_id,
            action,
            new_plan_id: body.new_plan_id,
        })
        .await?;

    let invoices = match outcome {
        ManageOutcome::Done => None,
        ManageOutcome::Invoices(invoices) => {
            Some(invoices.into_iter().map(InvoiceView::from).collect())
        }
    };

    Ok(Json(ManageSubscriptionResponse {
        success: true,
        invoices,
    }))
}

/// POST /payment/verify-order - verify an order capture callback.
pub async fn verify_order(
    State(state): State<AppState>,
    Json(body): Json<VerifyOrderBody>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = VerifyOrderCommand {
        user_id: body_user_id(body.user_id)?,
        order_id: required(body.order_id, "Missing orderId")?,
        payment_id: required(body.payment_id, "Missing paymentId")?,
        signature: required(body.signature, "Missing signature")?,
    };

    state.verify_payment_handler().handle_order(cmd).await?;

    Ok(Json(VerifyResponse { success: true }))
}

/// POST /payment/verify-subscription - verify a subscription capture
/// callback.
pub async fn verify_subscription(
    State(state): State<AppState>,
    Json(body): Json<VerifySubscriptionBody>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = VerifySubscriptionCommand {
        user_id: body_user_id(body.user_id)?,
        subscription_id: required(body.subscription_id, "Missing subscriptionId")?,
        payment_id: required(body.payment_id, "Missing paymentId")?,
        signature: required(body.signature, "Missing signature")?,
    };

    state
        .verify_payment_handler()
        .handle_subscription(cmd)
        .await?;

    Ok(Json(VerifyResponse { success: true }))
}
