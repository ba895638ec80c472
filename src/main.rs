//! Mindhaven server entry point.
//!
//! Loads and validates configuration (fatal on missing secrets), wires
//! the production adapters and serves the API router.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use mindhaven::adapters::anthropic::{AnthropicClient, AnthropicConfig};
use mindhaven::adapters::elevenlabs::{ElevenLabsConfig, ElevenLabsSynthesizer};
use mindhaven::adapters::http::{app_router, AppState};
use mindhaven::adapters::postgres::{
    PostgresJournalStore, PostgresSubscriptionStore, PostgresTransactionLog,
};
use mindhaven::adapters::razorpay::{RazorpayConfig, RazorpayGateway};
use mindhaven::adapters::tavus::{TavusConfig, TavusVideoService};
use mindhaven::adapters::vapi::{VapiConfig, VapiVoiceAgent};
use mindhaven::config::AppConfig;
use mindhaven::domain::subscription::PaymentSignatureVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .with_target(true)
        .init();

    config.validate()?;

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    let billing = &config.billing;
    let providers = &config.providers;

    let state = AppState {
        verifier: Arc::new(PaymentSignatureVerifier::new(billing.key_secret.clone())),
        gateway: Arc::new(RazorpayGateway::new(RazorpayConfig::new(
            billing.key_id.clone(),
            billing.key_secret.clone(),
        ))),
        subscriptions: Arc::new(PostgresSubscriptionStore::new(pool.clone())),
        transactions: Arc::new(PostgresTransactionLog::new(pool.clone())),
        journal: Arc::new(PostgresJournalStore::new(pool)),
        chat: Arc::new(AnthropicClient::new(
            AnthropicConfig::new(providers.anthropic_api_key.clone())
                .with_model(providers.anthropic_model.clone()),
        )),
        voice: Arc::new(VapiVoiceAgent::new(VapiConfig::new(
            providers.vapi_api_key.clone(),
            providers.vapi_assistant_id.clone(),
        ))),
        video: Arc::new(TavusVideoService::new(TavusConfig::new(
            providers.tavus_api_key.clone(),
            providers.tavus_replica_id.clone(),
        ))),
        speech: Arc::new(ElevenLabsSynthesizer::new(ElevenLabsConfig::new(
            providers.elevenlabs_api_key.clone(),
            providers.elevenlabs_voice_id.clone(),
        ))),
        gateway_key_id: billing.key_id.clone(),
        recurring_plan_id: billing.plan_id.clone().unwrap_or_default(),
    };

    let mut cors = CorsLayer::permissive();
    if config.server.is_production() {
        let origins: Vec<http::HeaderValue> = config
            .server
            .cors_origins_list()
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any);
    }

    let app = app_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    tracing::info!(
        %addr,
        test_mode = config.billing.is_test_mode(),
        "mindhaven listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
