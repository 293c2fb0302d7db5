//! HTTP API gateway for CareBridge.
//!
//! Exposes the chat SSE endpoint, the FHIR login proxy, and a health check.
//! Built on Axum.

pub mod auth;
pub mod chat;
pub mod sink;

use axum::{
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::info;

use carebridge_agent::AgentLoop;
use carebridge_config::AppConfig;
use carebridge_fhir::{tool_definitions, FhirExecutor};
use carebridge_provider::OpenAiProvider;

pub use sink::SseSink;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub agent: Arc<AgentLoop>,
    /// Client used for the login proxy.
    pub http: reqwest::Client,
    pub login_url: String,
    pub run_timeout: Duration,
}

pub type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState, allowed_origin: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            allowed_origin
                .parse::<axum::http::HeaderValue>()
                .unwrap_or_else(|_| axum::http::HeaderValue::from_static("http://localhost:5173")),
        )
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat::chat_handler))
        .route("/api/auth/login", post(auth::login_handler))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Wire up state from config and serve until the listener fails.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let provider = Arc::new(OpenAiProvider::from_config(&config)?);
    let executor = Arc::new(FhirExecutor::from_config(&config));

    let agent = Arc::new(
        AgentLoop::new(
            provider,
            executor,
            tool_definitions(),
            config.openai.model.clone(),
        )
        .with_max_turns(config.agent.max_turns)
        .with_max_parallel_tools(config.agent.max_parallel_tools),
    );

    let http = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(config.http.connect_timeout_secs))
        .timeout(Duration::from_secs(config.http.read_timeout_secs))
        .build()?;

    let state = Arc::new(GatewayState {
        agent,
        http,
        login_url: config.fhir_login_url(),
        run_timeout: Duration::from_secs(config.gateway.run_timeout_secs),
    });

    let app = build_router(state, &config.gateway.allowed_origin);
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    info!(%addr, model = %config.openai.model, "CareBridge gateway listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({"status": "ok", "service": "carebridge"})),
    )
}
