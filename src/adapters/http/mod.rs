//! HTTP adapters - REST API implementation.
//!
//! Each feature module has its own `dto`/`handlers`/`routes` files.
//! Every response uses the uniform envelope: `{"success": true, ...}`
//! on success, `{"error": "..."}` with a 4xx/5xx status on failure.
//! Provider responses and secret material never reach the caller.

pub mod chat;
pub mod journal;
pub mod meditation;
pub mod payment;
pub mod sessions;

use std::sync::Arc;

use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::subscription::{BillingError, PaymentSignatureVerifier};
use crate::ports::{
    ChatProvider, JournalStore, PaymentGateway, SpeechSynthesizer, SubscriptionStore,
    TransactionLog, VideoAvatarService, VoiceAgent,
};

/// Shared application state: Arc-wrapped ports plus the read-only
/// billing identifiers handlers need to build responses.
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<PaymentSignatureVerifier>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub subscriptions: Arc<dyn SubscriptionStore>,
    pub transactions: Arc<dyn TransactionLog>,
    pub journal: Arc<dyn JournalStore>,
    pub chat: Arc<dyn ChatProvider>,
    pub voice: Arc<dyn VoiceAgent>,
    pub video: Arc<dyn VideoAvatarService>,
    pub speech: Arc<dyn SpeechSynthesizer>,
    /// Public gateway key id, returned to clients for checkout.
    pub gateway_key_id: String,
    /// Provider plan id for recurring subscriptions.
    pub recurring_plan_id: String,
}

/// Builds the complete API router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .nest("/payment", payment::routes())
        .nest("/chat", chat::routes())
        .nest("/sessions", sessions::routes())
        .nest("/meditation", meditation::routes())
        .nest("/journal", journal::routes())
        .with_state(state)
}

// ════════════════════════════════════════════════════════════════════
// Error envelope
// ════════════════════════════════════════════════════════════════════

/// Error body of the uniform envelope.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// API error carrying the response status and the public message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// A 400 with a caller-visible message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    #[cfg(test)]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        let status = match &err {
            BillingError::Validation { .. }
            | BillingError::UnknownPlan(_)
            | BillingError::SignatureInvalid => StatusCode::BAD_REQUEST,
            BillingError::Configuration(_)
            | BillingError::Gateway { .. }
            | BillingError::PersistenceInconsistency { .. }
            | BillingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %err, "billing request failed");
        }

        Self {
            status,
            message: err.public_message(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let (status, public_message) = match err.code() {
            ErrorCode::ValidationFailed => (StatusCode::BAD_REQUEST, err.message().to_string()),
            ErrorCode::UserNotFound | ErrorCode::EntryNotFound => {
                (StatusCode::NOT_FOUND, err.message().to_string())
            }
            ErrorCode::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Authentication required".to_string())
            }
            ErrorCode::QuotaExceeded => {
                (StatusCode::PAYMENT_REQUIRED, err.message().to_string())
            }
            // Provider and infrastructure detail stays in the logs.
            ErrorCode::ProviderTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "Service temporarily unavailable".to_string(),
            ),
            ErrorCode::ProviderError => (
                StatusCode::BAD_GATEWAY,
                "Service temporarily unavailable".to_string(),
            ),
            ErrorCode::DatabaseError | ErrorCode::InternalError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong".to_string(),
            ),
        };

        if status.is_server_error() {
            tracing::error!(error = %err, "request failed");
        }

        Self {
            status,
            message: public_message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

// ════════════════════════════════════════════════════════════════════
// Authenticated user extraction
// ════════════════════════════════════════════════════════════════════

/// Authenticated user context extracted from the request.
///
/// Session issuance lives in the external auth layer; this extractor
/// trusts the `X-User-Id` header set by the gateway in front of us.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

impl<S> axum::extract::FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user_id = parts
                .headers
                .get("X-User-Id")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| UserId::new(s).ok())
                .ok_or_else(|| ApiError {
                    status: StatusCode::UNAUTHORIZED,
                    message: "Authentication required".to_string(),
                })?;

            Ok(AuthenticatedUser { user_id })
        })
    }
}
