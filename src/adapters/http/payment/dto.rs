//! Request/response DTOs for the payment endpoints.
//!
//! Required fields are `Option` so their absence maps to a 400 with a
//! descriptive message instead of a framework-level rejection.

use serde::{Deserialize, Serialize};

use crate::ports::GatewayInvoice;

/// POST /payment/order request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderBody {
    pub plan_name: Option<String>,
}

/// POST /payment/order response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
}

/// POST /payment/subscription response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionResponse {
    pub success: bool,
    pub subscription_id: String,
    pub key_id: String,
}

/// POST /payment/subscription/manage request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageSubscriptionBody {
    pub subscription_id: Option<String>,
    pub action: Option<String>,
    pub new_plan_id: Option<String>,
}

/// POST /payment/subscription/manage response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageSubscriptionResponse {
    pub success: bool,
    /// Present only for the `invoices` action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoices: Option<Vec<InvoiceView>>,
}

/// Invoice shape returned to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceView {
    pub id: String,
    pub status: String,
    pub amount: i64,
    pub currency: String,
}

impl From<GatewayInvoice> for InvoiceView {
    fn from(invoice: GatewayInvoice) -> Self {
        Self {
            id: invoice.id,
            status: invoice.status,
            amount: invoice.amount_minor,
            currency: invoice.currency,
        }
    }
}

/// POST /payment/verify-order request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOrderBody {
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub signature: Option<String>,
    pub user_id: Option<String>,
}

/// POST /payment/verify-subscription request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifySubscriptionBody {
    pub subscription_id: Option<String>,
    pub payment_id: Option<String>,
    pub signature: Option<String>,
    pub user_id: Option<String>,
}

/// Verification response.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_deserialize_as_none() {
        let body: VerifyOrderBody = serde_json::from_str("{}").unwrap();
        assert!(body.order_id.is_none());
        assert!(body.user_id.is_none());
    }

    #[test]
    fn camel_case_fields_map() {
        let body: VerifyOrderBody = serde_json::from_str(
            r#"{"orderId": "order_1", "paymentId": "pay_1", "signature": "s", "userId": "u"}"#,
        )
        .unwrap();
        assert_eq!(body.order_id.as_deref(), Some("order_1"));
        assert_eq!(body.user_id.as_deref(), Some("u"));
    }

    #[test]
    fn manage_response_omits_absent_invoices() {
        let response = ManageSubscriptionResponse {
            success: true,
            invoices: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"success":true}"#);
    }
}
