//! Razorpay payment gateway adapter.
//!
//! Implements the `PaymentGateway` port. Every operation is one Basic-auth
//! HTTPS request; non-2xx responses become `GatewayError::Http` with the
//! provider body preserved for server-side logging. No retries.
//!
//! Credentials are checked before any network I/O: an unconfigured
//! gateway short-circuits with `GatewayError::NotConfigured`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::ports::{
    CreateOrderRequest, CreateSubscriptionRequest, GatewayError, GatewayInvoice, GatewayOrder,
    GatewayOrderDetails, GatewaySubscription, PaymentGateway,
};

use super::types::{
    InvoiceListResponse, OrderBody, OrderDetailsResponse, OrderResponse, PauseBody,
    PlanChangeBody, ResumeBody, SubscriptionBody, SubscriptionResponse,
};

/// Razorpay API configuration.
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Public key id (rzp_test_... or rzp_live_...).
    key_id: String,

    /// Key secret for Basic auth.
    key_secret: SecretString,

    /// Base URL for the API (default: https://api.razorpay.com).
    api_base_url: String,
}

impl RazorpayConfig {
    /// Creates a new configuration.
    pub fn new(key_id: impl Into<String>, key_secret: SecretString) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret,
            api_base_url: "https://api.razorpay.com".to_string(),
        }
    }

    /// Sets a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// True when both credential halves are present.
    pub fn has_credentials(&self) -> bool {
        !self.key_id.is_empty() && !self.key_secret.expose_secret().is_empty()
    }
}

/// Razorpay gateway adapter.
pub struct RazorpayGateway {
    config: RazorpayConfig,
    http_client: reqwest::Client,
}

impl RazorpayGateway {
    /// Creates a new gateway with the given configuration.
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn ensure_credentials(&self) -> Result<(), GatewayError> {
        if self.config.has_credentials() {
            Ok(())
        } else {
            Err(GatewayError::NotConfigured)
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url, path)
    }

    /// Sends one authenticated request and maps the response uniformly.
    async fn send<B: Serialize, R: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<R, GatewayError> {
        self.ensure_credentials()?;

        let mut request = self
            .http_client
            .request(method, self.url(path))
            .basic_auth(
                &self.config.key_id,
                Some(self.config.key_secret.expose_secret()),
            );

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                %body,
                path,
                "Razorpay request failed"
            );
            return Err(GatewayError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }
}

/// Body type for requests that send none.
#[derive(Serialize)]
struct Empty {}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(&self, request: CreateOrderRequest) -> Result<GatewayOrder, GatewayError> {
        let body = OrderBody {
            amount: request.amount_minor,
            currency: request.currency,
            receipt: request.receipt,
            notes: request.notes,
        };

        let order: OrderResponse = self
            .send(reqwest::Method::POST, "/v1/orders", Some(&body))
            .await?;

        Ok(GatewayOrder {
            id: order.id,
            amount_minor: order.amount,
            currency: order.currency,
        })
    }

    async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrderDetails, GatewayError> {
        let order: OrderDetailsResponse = self
            .send::<Empty, _>(
                reqwest::Method::GET,
                &format!("/v1/orders/{}", order_id),
                None,
            )
            .await?;

        Ok(GatewayOrderDetails {
            id: order.id,
            amount_minor: order.amount,
            currency: order.currency,
            notes: order.notes,
        })
    }

    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<GatewaySubscription, GatewayError> {
        let body = SubscriptionBody {
            plan_id: request.plan_id,
            total_count: request.total_cycles,
            quantity: request.quantity,
            customer_notify: if request.notify_customer { 1 } else { 0 },
            notes: request.notes,
        };

        let subscription: SubscriptionResponse = self
            .send(reqwest::Method::POST, "/v1/subscriptions", Some(&body))
            .await?;

        Ok(GatewaySubscription {
            id: subscription.id,
        })
    }

    async fn cancel_subscription(&self, subscription_id: &str) -> Result<(), GatewayError> {
        let _: serde_json::Value = self
            .send(
                reqwest::Method::POST,
                &format!("/v1/subscriptions/{}/cancel", subscription_id),
                Some(&Empty {}),
            )
            .await?;
        Ok(())
    }

    async fn pause_subscription(&self, subscription_id: &str) -> Result<(), GatewayError> {
        let _: serde_json::Value = self
            .send(
                reqwest::Method::POST,
                &format!("/v1/subscriptions/{}/pause", subscription_id),
                Some(&PauseBody { pause_at: "now" }),
            )
            .await?;
        Ok(())
    }

    async fn resume_subscription(&self, subscription_id: &str) -> Result<(), GatewayError> {
        let _: serde_json::Value = self
            .send(
                reqwest::Method::POST,
                &format!("/v1/subscriptions/{}/resume", subscription_id),
                Some(&ResumeBody { resume_at: "now" }),
            )
            .await?;
        Ok(())
    }

    async fn update_subscription(
        &self,
        subscription_id: &str,
        new_plan_id: &str,
    ) -> Result<(), GatewayError> {
        let body = PlanChangeBody {
            plan_id: new_plan_id.to_string(),
        };
        let _: serde_json::Value = self
            .send(
                reqwest::Method::PATCH,
                &format!("/v1/subscriptions/{}", subscription_id),
                Some(&body),
            )
            .await?;
        Ok(())
    }

    async fn list_subscription_invoices(
        &self,
        subscription_id: &str,
    ) -> Result<Vec<GatewayInvoice>, GatewayError> {
        let list: InvoiceListResponse = self
            .send::<Empty, _>(
                reqwest::Method::GET,
                &format!("/v1/invoices?subscription_id={}", subscription_id),
                None,
            )
            .await?;

        Ok(list
            .items
            .into_iter()
            .map(|invoice| GatewayInvoice {
                id: invoice.id,
                status: invoice.status,
                amount_minor: invoice.amount,
                currency: invoice.currency,
            })
            .collect())
    }
}
