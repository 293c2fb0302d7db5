//! `POST /api/auth/login`: proxy credentials to the FHIR auth server.
//!
//! The frontend never talks to the FHIR server directly; the gateway relays
//! the credential JSON and returns the token response as-is. Auth failures
//! get a friendlier message than the FHIR server's own error bodies.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde_json::json;
use tracing::warn;

use crate::SharedState;

pub async fn login_handler(
    State(state): State<SharedState>,
    Json(credentials): Json<serde_json::Value>,
) -> impl IntoResponse {
    let response = match state
        .http
        .post(&state.login_url)
        .header("Content-Type", "application/json")
        .json(&credentials)
        .send()
        .await
    {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "FHIR login proxy request failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": format!("Login error: {e}")})),
            );
        }
    };

    let status = response.status();
    if !status.is_success() {
        let code = status.as_u16();
        let message = if code == 401 || code == 400 {
            "Invalid credentials. Please try again.".to_string()
        } else {
            format!("Login failed ({code}). Please try again.")
        };
        warn!(status = code, "FHIR login rejected");
        return (status, Json(json!({"error": message})));
    }

    match response.json::<serde_json::Value>().await {
        Ok(body) => (StatusCode::OK, Json(body)),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Login error: {e}")})),
        ),
    }
}
