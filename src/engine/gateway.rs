//! Core gateway trait to the translation engine.
//!
//! [`TranslationEngineGateway`] exposes the engine's two independently
//! failable operations, `ensure_model_ready` and `translate`, plus the
//! supported-language enumeration used to build the catalog. It is
//! object-safe and `Send + Sync` so it can be held behind an
//! `Arc<dyn TranslationEngineGateway>`.
//!
//! The gateway does not enforce that `translate` follows a successful
//! `ensure_model_ready`; the orchestrator owns that ordering.
//!
//! [`MockGateway`] (available under `#[cfg(test)]`) returns pre-configured
//! responses and counts calls.

use async_trait::async_trait;
use thiserror::Error;

// ---------------------------------------------------------------------------
// EngineError
// ---------------------------------------------------------------------------

/// Errors reported by a translation engine gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A failure reported by the engine itself; the message is shown as-is.
    #[error("{0}")]
    Engine(String),

    /// A model download was needed but the device conditions forbid it.
    #[error("download conditions not met: {0}")]
    ConditionsNotMet(String),

    /// HTTP transport or connection error.
    #[error("engine request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("engine request timed out")]
    Timeout,

    /// The engine response could not be parsed as expected JSON.
    #[error("failed to parse engine response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for EngineError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            EngineError::Timeout
        } else if e.is_decode() {
            EngineError::Parse(e.to_string())
        } else {
            EngineError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// TranslationEngineGateway trait
// ---------------------------------------------------------------------------

/// Async interface to an on-device translation engine.
#[async_trait]
pub trait TranslationEngineGateway: Send + Sync {
    /// Language codes the engine can translate between, in engine order.
    async fn supported_languages(&self) -> Result<Vec<String>, EngineError>;

    /// Make sure the model for `source → destination` is present,
    /// downloading it if needed.
    async fn ensure_model_ready(&self, source: &str, destination: &str)
        -> Result<(), EngineError>;

    /// Translate `text` from `source` to `destination`.
    async fn translate(
        &self,
        source: &str,
        destination: &str,
        text: &str,
    ) -> Result<String, EngineError>;
}

// Compile-time assertion: Box<dyn TranslationEngineGateway> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn TranslationEngineGateway>) {}
};

// ---------------------------------------------------------------------------
// MockGateway  (test-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
pub use mock::MockGateway;


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
