//! Translation engine gateway module.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │            TranslationEngineGateway (trait)           │
//! │                                                       │
//! │   ┌────────────────────┐     ┌──────────────────┐     │
//! │   │ DownloadConditions │────▶│   HttpGateway    │     │
//! │   │ + DeviceConditions │     │ - /languages     │     │
//! │   └────────────────────┘     │ - /models        │     │
//! │                              │ - /translate     │     │
//! │                              └──────────────────┘     │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use lingo_session::config::EngineConfig;
//! use lingo_session::engine::{HttpGateway, TranslationEngineGateway};
//!
//! # async fn example() {
//! let gateway = HttpGateway::from_config(&EngineConfig::default());
//! gateway.ensure_model_ready("en", "ta").await.unwrap();
//! let text = gateway.translate("en", "ta", "hello").await.unwrap();
//! println!("{text}");
//! # }
//! ```

pub mod conditions;
pub mod gateway;
pub mod http;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use conditions::{DeviceConditions, DownloadConditions, SysfsConditions};
pub use gateway::{EngineError, TranslationEngineGateway};
pub use http::HttpGateway;

#[cfg(test)]
pub use gateway::MockGateway;
