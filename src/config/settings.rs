//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across tasks.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Initial language pair of a translation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Language code selected as the source when a session starts.
    pub source_language: String,
    /// Language code selected as the destination when a session starts.
    pub destination_language: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            source_language: "en".into(),
            destination_language: "ta".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Connection and download settings for the local translation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base URL of the engine server (e.g. `http://localhost:5000`).
    pub base_url: String,
    /// API key sent with every request — `None` for unauthenticated servers.
    pub api_key: Option<String>,
    /// Maximum seconds to wait for a translation response.
    pub timeout_secs: u64,
    /// Maximum seconds to wait for a model download to finish.
    pub download_timeout_secs: u64,
    /// Only start a model download while the device is charging or on an
    /// unmetered network.
    pub require_unmetered_or_charging: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".into(),
            api_key: None,
            timeout_secs: 30,
            download_timeout_secs: 600,
            require_unmetered_or_charging: true,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use lingo_session::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// assert!(!config.engine.base_url.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Initial language selection.
    pub session: SessionConfig,
    /// Translation engine settings.
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns `true` when no `settings.toml` file exists yet.
    pub fn is_first_run() -> bool {
        !AppPaths::new().settings_file.exists()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");
        assert_eq!(original, loaded);
    }

    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.session.source_language, "en");
        assert_eq!(cfg.session.destination_language, "ta");
        assert_eq!(cfg.engine.base_url, "http://localhost:5000");
        assert!(cfg.engine.api_key.is_none());
        assert_eq!(cfg.engine.timeout_secs, 30);
        assert!(cfg.engine.require_unmetered_or_charging);
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.session.source_language = "fr".into();
        cfg.session.destination_language = "ja".into();
        cfg.engine.base_url = "http://127.0.0.1:8080".into();
        cfg.engine.api_key = Some("secret".into());
        cfg.engine.require_unmetered_or_charging = false;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.session.source_language, "fr");
        assert_eq!(loaded.session.destination_language, "ja");
        assert_eq!(loaded.engine.base_url, "http://127.0.0.1:8080");
        assert_eq!(loaded.engine.api_key.as_deref(), Some("secret"));
        assert!(!loaded.engine.require_unmetered_or_charging);
    }

    /// Sections and keys left out of the file keep their defaults.
    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[engine]\nrequire_unmetered_or_charging = false\n").unwrap();

        let loaded = AppConfig::load_from(&path).expect("load");
        assert!(!loaded.engine.require_unmetered_or_charging);
        assert_eq!(loaded.engine.base_url, "http://localhost:5000");
        assert_eq!(loaded.session, SessionConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[engine\nbase_url = ").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }
}
