//! Error types for the CareBridge domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all CareBridge operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    // Transparent: the provider's message is what the client sees in its
    // `error` event, so no prefix is added here
    #[error(transparent)]
    Provider(#[from] ProviderError),

    // --- Client sink errors ---
    #[error("Sink error: {0}")]
    Sink(#[from] crate::sink::SinkError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures on the upstream model call. Fatal to the current run; the
/// message is what the client sees in its single `error` event, so the
/// upstream-provided text is carried through verbatim where available.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("{message}")]
    ApiError { status_code: u16, message: String },

    #[error("Stream interrupted: {0}")]
    StreamInterrupted(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_surfaces_upstream_message_verbatim() {
        let err = ProviderError::ApiError {
            status_code: 429,
            message: "Rate limit reached for gpt-4o-mini".into(),
        };
        // The display string is exactly what flows into the `error` event.
        assert_eq!(err.to_string(), "Rate limit reached for gpt-4o-mini");
    }

    #[test]
    fn top_level_error_does_not_decorate_provider_message() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Rate limit reached for gpt-4o-mini".into(),
        });
        assert_eq!(err.to_string(), "Rate limit reached for gpt-4o-mini");
    }
}
