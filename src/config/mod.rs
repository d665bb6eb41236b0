//! Configuration module for the translation session.
//!
//! Provides `AppConfig` (top-level settings), the session and engine
//! sub-configs, `AppPaths` for the platform config directory, and TOML
//! persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, EngineConfig, SessionConfig};
