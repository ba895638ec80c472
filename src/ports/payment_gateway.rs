//! Payment gateway port.
//!
//! One authenticated HTTPS request per operation, provider failures
//! translated into a uniform [`GatewayError`]. No retries here; retry
//! policy, if any, belongs to the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::subscription::BillingError;

/// Port for the external payment provider's order/subscription API.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a one-time order to be paid by the client checkout.
    async fn create_order(&self, request: CreateOrderRequest) -> Result<GatewayOrder, GatewayError>;

    /// Fetches an order previously created with [`Self::create_order`].
    ///
    /// Used during verification to read the authoritative amount and
    /// the notes attached at creation time; the client callback itself
    /// carries only ids and a signature.
    async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrderDetails, GatewayError>;

    /// Creates a recurring subscription against a provider plan id.
    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<GatewaySubscription, GatewayError>;

    /// Cancels a subscription.
    async fn cancel_subscription(&self, subscription_id: &str) -> Result<(), GatewayError>;

    /// Pauses a subscription.
    async fn pause_subscription(&self, subscription_id: &str) -> Result<(), GatewayError>;

    /// Resumes a paused subscription.
    async fn resume_subscription(&self, subscription_id: &str) -> Result<(), GatewayError>;

    /// Moves a subscription to a different provider plan.
    async fn update_subscription(
        &self,
        subscription_id: &str,
        new_plan_id: &str,
    ) -> Result<(), GatewayError>;

    /// Lists the invoices issued for a subscription.
    async fn list_subscription_invoices(
        &self,
        subscription_id: &str,
    ) -> Result<Vec<GatewayInvoice>, GatewayError>;
}

/// Request to create a one-time order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Amount in minor currency units.
    pub amount_minor: i64,
    /// ISO currency code.
    pub currency: String,
    /// Caller-supplied receipt reference.
    pub receipt: String,
    /// Free-form note fields attached to the order.
    pub notes: Value,
}

/// Request to create a recurring subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubscriptionRequest {
    /// Provider plan id.
    pub plan_id: String,
    /// Number of billing cycles before the subscription ends.
    pub total_cycles: u32,
    /// Plan quantity per cycle.
    pub quantity: u32,
    /// Whether the provider notifies the customer directly.
    pub notify_customer: bool,
    /// Free-form note fields attached to the subscription.
    pub notes: Value,
}

/// A created order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount_minor: i64,
    pub currency: String,
}

/// An order as stored by the provider, including creation-time notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrderDetails {
    pub id: String,
    pub amount_minor: i64,
    pub currency: String,
    pub notes: Value,
}

/// A created subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySubscription {
    pub id: String,
}

/// One invoice of a subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayInvoice {
    pub id: String,
    pub status: String,
    pub amount_minor: i64,
    pub currency: String,
}

/// Uniform failure for gateway operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Credentials absent; checked before any network I/O.
    NotConfigured,

    /// Provider responded non-2xx. Body is kept for server-side logs.
    Http { status: u16, body: String },

    /// Transport-level failure.
    Network(String),

    /// Provider responded 2xx with a body we could not interpret.
    InvalidResponse(String),
}

impl GatewayError {
    /// HTTP status from the provider, when there was a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::NotConfigured => write!(f, "gateway credentials not configured"),
            GatewayError::Http { status, body } => {
                write!(f, "gateway returned {}: {}", status, body)
            }
            GatewayError::Network(message) => write!(f, "gateway unreachable: {}", message),
            GatewayError::InvalidResponse(message) => {
                write!(f, "unexpected gateway response: {}", message)
            }
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<GatewayError> for BillingError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotConfigured => {
                BillingError::configuration("payment gateway credentials missing")
            }
            GatewayError::Http { status, body } => BillingError::gateway(Some(status), body),
            GatewayError::Network(message) => BillingError::gateway(None, message),
            GatewayError::InvalidResponse(message) => BillingError::gateway(None, message),
        }
    }
}
