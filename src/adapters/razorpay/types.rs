//! Razorpay wire types.
//!
//! Only the fields this service reads are modeled; the provider sends
//! more and serde ignores them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Order creation request body.
#[derive(Debug, Serialize)]
pub struct OrderBody {
    /// Amount in paise.
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub notes: Value,
}

/// Order as returned by the provider.
#[derive(Debug, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub amount: i64,
    pub currency: String,
}

/// Fetched order, including creation-time notes.
#[derive(Debug, Deserialize)]
pub struct OrderDetailsResponse {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub notes: Value,
}

/// Subscription creation request body.
#[derive(Debug, Serialize)]
pub struct SubscriptionBody {
    pub plan_id: String,
    pub total_count: u32,
    pub quantity: u32,
    /// 1 = provider emails the customer, 0 = silent.
    pub customer_notify: u8,
    pub notes: Value,
}

/// Subscription as returned by the provider.
#[derive(Debug, Deserialize)]
pub struct SubscriptionResponse {
    pub id: String,
}

/// Plan change request body.
#[derive(Debug, Serialize)]
pub struct PlanChangeBody {
    pub plan_id: String,
}

/// Pause request body.
#[derive(Debug, Serialize)]
pub struct PauseBody {
    pub pause_at: &'static str,
}

/// Resume request body.
#[derive(Debug, Serialize)]
pub struct ResumeBody {
    pub resume_at: &'static str,
}

/// Invoice list envelope.
#[derive(Debug, Deserialize)]
pub struct InvoiceListResponse {
    pub items: Vec<InvoiceResponse>,
}

/// One invoice of a subscription.
#[derive(Debug, Deserialize)]
pub struct InvoiceResponse {
    pub id: String,
    pub status: String,
    pub amount: i64,
    pub currency: String,
}
