//! Axum router for the payment endpoints.

use axum::{routing::post, Router};

use super::super::AppState;
use super::handlers::{
    create_order, create_subscription, manage_subscription, verify_order, verify_subscription,
};

/// Payment routes, mounted at `/payment`.
///
/// - `POST /order` - create a one-time order
/// - `POST /subscription` - start a recurring subscription
/// - `POST /subscription/manage` - cancel/pause/resume/update/invoices
/// - `POST /verify-order` - verify an order capture callback
/// - `POST /verify-subscription` - verify a subscription capture callback
///
/// The verify endpoints carry the user id in the body (they are called
/// from the checkout callback, not an authenticated session).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/order", post(create_order))
        .route("/subscription", post(create_subscription))
        .route("/subscription/manage", post(manage_subscription))
        .route("/verify-order", post(verify_order))
        .route("/verify-subscription", post(verify_subscription))
}
