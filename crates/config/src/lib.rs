//! Configuration loading, validation, and management for CareBridge.
//!
//! Loads configuration from `~/.carebridge/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.carebridge/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// OpenAI endpoint configuration
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// FHIR resource server configuration
    #[serde(default)]
    pub fhir: FhirConfig,

    /// HTTP gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// FHIR response cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Agent loop configuration
    #[serde(default)]
    pub agent: AgentConfig,

    /// Outbound HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key (falls back to CAREBRIDGE_OPENAI_API_KEY / OPENAI_API_KEY)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the chat-completions API
    #[serde(default = "default_openai_url")]
    pub api_url: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FhirConfig {
    /// Base URL of the FHIR R4 server
    #[serde(default = "default_fhir_base")]
    pub base_url: String,

    /// Login endpoint for the credential to bearer token exchange.
    /// Defaults to `<base_url>/auth/login` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Frontend origin allowed by CORS
    #[serde(default = "default_origin")]
    pub allowed_origin: String,

    /// Overall per-run timeout in seconds
    #[serde(default = "default_run_timeout")]
    pub run_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live for cached FHIR responses, in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,

    /// Period of the background eviction sweep, in seconds
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Optional bound on model turns per run. Unset means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_turns: Option<u32>,

    /// Fan-out bound for concurrent tool execution
    #[serde(default = "default_max_parallel_tools")]
    pub max_parallel_tools: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Connect/write timeout for outbound calls, in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Read timeout for outbound calls, in seconds (the model's SSE stream
    /// needs a generous window)
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
}

fn default_openai_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_fhir_base() -> String {
    "https://fhirassist.rsystems.com:481".into()
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8080
}
fn default_origin() -> String {
    "http://localhost:5173".into()
}
fn default_run_timeout() -> u64 {
    180
}
fn default_cache_ttl() -> u64 {
    300
}
fn default_sweep_interval() -> u64 {
    60
}
fn default_max_parallel_tools() -> usize {
    8
}
fn default_connect_timeout() -> u64 {
    30
}
fn default_read_timeout() -> u64 {
    120
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("openai", &self.openai)
            .field("fhir", &self.fhir)
            .field("gateway", &self.gateway)
            .field("cache", &self.cache)
            .field("agent", &self.agent)
            .field("http", &self.http)
            .finish()
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.carebridge/config.toml).
    ///
    /// Also checks environment variables:
    /// - `CAREBRIDGE_OPENAI_API_KEY` (highest priority)
    /// - `OPENAI_API_KEY`
    /// - `CAREBRIDGE_MODEL`
    /// - `CAREBRIDGE_FHIR_BASE_URL`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        // Environment variable overrides (highest priority)
        if config.openai.api_key.is_none() {
            config.openai.api_key = std::env::var("CAREBRIDGE_OPENAI_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }

        if let Ok(model) = std::env::var("CAREBRIDGE_MODEL") {
            config.openai.model = model;
        }

        if let Ok(base) = std::env::var("CAREBRIDGE_FHIR_BASE_URL") {
            config.fhir.base_url = base;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".carebridge")
    }

    /// The resolved FHIR login URL.
    pub fn fhir_login_url(&self) -> String {
        self.fhir
            .login_url
            .clone()
            .unwrap_or_else(|| format!("{}/auth/login", self.fhir.base_url.trim_end_matches('/')))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::ValidationError(
                "cache.ttl_secs must be greater than 0".into(),
            ));
        }
        if self.cache.sweep_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "cache.sweep_interval_secs must be greater than 0".into(),
            ));
        }
        if self.agent.max_parallel_tools == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_parallel_tools must be greater than 0".into(),
            ));
        }
        if self.gateway.run_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "gateway.run_timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.openai.api_key.is_some()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai: OpenAiConfig::default(),
            fhir: FhirConfig::default(),
            gateway: GatewayConfig::default(),
            cache: CacheConfig::default(),
            agent: AgentConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_openai_url(),
            model: default_model(),
        }
    }
}

impl Default for FhirConfig {
    fn default() -> Self {
        Self {
            base_url: default_fhir_base(),
            login_url: None,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origin: default_origin(),
            run_timeout_secs: default_run_timeout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_turns: None,
            max_parallel_tools: default_max_parallel_tools(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout(),
            read_timeout_secs: default_read_timeout(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.openai.model, "gpt-4o-mini");
        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.agent.max_parallel_tools, 8);
        assert!(config.agent.max_turns.is_none());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.openai.model, config.openai.model);
        assert_eq!(parsed.gateway.port, config.gateway.port);
    }

    #[test]
    fn zero_ttl_rejected() {
        let mut config = AppConfig::default();
        config.cache.ttl_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.fhir.base_url, default_fhir_base());
    }

    #[test]
    fn login_url_derived_from_base() {
        let config = AppConfig::default();
        assert_eq!(
            config.fhir_login_url(),
            "https://fhirassist.rsystems.com:481/auth/login"
        );
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[openai]\nmodel = \"gpt-4o\"\n\n[agent]\nmax_turns = 12").unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.openai.model, "gpt-4o");
        assert_eq!(config.agent.max_turns, Some(12));
        assert_eq!(config.cache.sweep_interval_secs, 60);
    }

    #[test]
    fn debug_redacts_api_key() {
        let mut config = AppConfig::default();
        config.openai.api_key = Some("sk-secret".into());
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
