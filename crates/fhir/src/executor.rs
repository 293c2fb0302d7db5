//! The FHIR-backed [`ToolExecutor`].
//!
//! Tool execution never fails at the call boundary: every failure mode maps
//! to a JSON string the model can read and react to. The response body is
//! returned to the model whether or not the FHIR server answered 2xx; only
//! successful responses are cached.

use async_trait::async_trait;
use carebridge_config::AppConfig;
use carebridge_core::ToolExecutor;
use std::time::Duration;
use tracing::{debug, warn};

use crate::cache::ResponseCache;
use crate::url::build_url;

/// Executes FHIR search tools over HTTP with a shared response cache.
pub struct FhirExecutor {
    base_url: String,
    client: reqwest::Client,
    cache: ResponseCache,
}

impl FhirExecutor {
    pub fn new(
        base_url: impl Into<String>,
        cache_ttl: Duration,
        sweep_interval: Duration,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(read_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into(),
            client,
            cache: ResponseCache::new(cache_ttl, sweep_interval),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.fhir.base_url.clone(),
            Duration::from_secs(config.cache.ttl_secs),
            Duration::from_secs(config.cache.sweep_interval_secs),
            Duration::from_secs(config.http.connect_timeout_secs),
            Duration::from_secs(config.http.read_timeout_secs),
        )
    }

    fn error_json(message: &str) -> String {
        // Single quotes keep the payload a valid JSON string
        format!(r#"{{"error":"{}"}}"#, message.replace('"', "'"))
    }
}

#[async_trait]
impl ToolExecutor for FhirExecutor {
    async fn execute(&self, name: &str, arguments: serde_json::Value, token: &str) -> String {
        if name == "end_chat" {
            return r#"{"status":"conversation_ended"}"#.into();
        }

        let Some(url) = build_url(&self.base_url, name, &arguments) else {
            warn!(tool = name, "Model requested unknown tool");
            return format!(r#"{{"error":"Unknown tool: {name}"}}"#);
        };

        let cache_key = format!("{name}::{url}");
        if let Some(cached) = self.cache.get(&cache_key) {
            debug!(tool = name, "FHIR cache hit");
            return cached;
        }

        debug!(tool = name, url = %url, "Executing FHIR search");

        let response = match self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(tool = name, error = %e, "FHIR request failed");
                return Self::error_json(&e.to_string());
            }
        };

        let success = response.status().is_success();
        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(b) if b.is_empty() => "{}".to_string(),
            Ok(b) => b,
            Err(e) => {
                warn!(tool = name, error = %e, "Failed reading FHIR response body");
                return Self::error_json(&e.to_string());
            }
        };

        if success {
            self.cache.put(cache_key, body.clone());
        } else {
            warn!(tool = name, status, "FHIR server returned error status");
        }

        // The model sees the body either way and can explain the failure
        body
    }
}
