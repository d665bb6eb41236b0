//! `HttpGateway` — talks to a translation engine server running on the
//! device.
//!
//! Wire format:
//!
//! | Call                 | Request                                   | Success body                     |
//! |----------------------|-------------------------------------------|----------------------------------|
//! | supported languages  | `GET  {base}/languages`                   | `[{code, name, targets}]`        |
//! | ensure model ready   | `POST {base}/models` `{source, target}`   | any 2xx                          |
//! | translate            | `POST {base}/translate` `{q, source, target, format}` | `{translatedText}`   |
//!
//! Failures carry `{"error": "<message>"}`; the message is passed through
//! unchanged as [`EngineError::Engine`]. All connection details come from
//! [`EngineConfig`].

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::engine::conditions::{DeviceConditions, DownloadConditions, SysfsConditions};
use crate::engine::gateway::{EngineError, TranslationEngineGateway};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// One entry of the `/languages` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageEntry {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Destination codes whose models are already installed for `code`.
    #[serde(default)]
    pub targets: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ModelRequest<'a> {
    source: &'a str,
    target: &'a str,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Returns `true` if the model for `source → destination` is listed as
/// installed.
pub fn pair_installed(languages: &[LanguageEntry], source: &str, destination: &str) -> bool {
    languages
        .iter()
        .find(|l| l.code == source)
        .is_some_and(|l| l.targets.iter().any(|t| t == destination))
}

/// Turn a non-2xx response body into an [`EngineError`].
///
/// `{"error": msg}` bodies yield `Engine(msg)`; anything else keeps the raw
/// body text next to the status code.
pub fn error_from_body(status: u16, body: &str) -> EngineError {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return EngineError::Engine(parsed.error);
    }
    let body = body.trim();
    if body.is_empty() {
        EngineError::Engine(format!("HTTP {status}"))
    } else {
        EngineError::Engine(format!("HTTP {status}: {body}"))
    }
}

// ---------------------------------------------------------------------------
// HttpGateway
// ---------------------------------------------------------------------------

/// Gateway to a local engine server.
///
/// Pairs whose model was confirmed once are remembered for the lifetime of
/// the gateway, so later requests skip the readiness round trip. A
/// same-language pair needs no model and is translated as the identity.
pub struct HttpGateway {
    client: reqwest::Client,
    config: EngineConfig,
    device: Arc<dyn DeviceConditions>,
    ready_pairs: Mutex<HashSet<(String, String)>>,
}

impl HttpGateway {
    /// Build a gateway from config, reading power state from sysfs.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_device_conditions(config, Arc::new(SysfsConditions::new()))
    }

    /// Build a gateway with an explicit device-conditions source.
    pub fn with_device_conditions(
        config: &EngineConfig,
        device: Arc<dyn DeviceConditions>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
            device,
            ready_pairs: Mutex::new(HashSet::new()),
        }
    }

    fn download_conditions(&self) -> DownloadConditions {
        DownloadConditions {
            require_unmetered_or_charging: self.config.require_unmetered_or_charging,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => req.bearer_auth(key),
            _ => req,
        }
    }

    fn is_ready(&self, source: &str, destination: &str) -> bool {
        self.ready_pairs
            .lock()
            .map(|set| set.contains(&(source.to_string(), destination.to_string())))
            .unwrap_or(false)
    }

    fn mark_ready(&self, source: &str, destination: &str) {
        if let Ok(mut set) = self.ready_pairs.lock() {
            set.insert((source.to_string(), destination.to_string()));
        }
    }

    async fn fetch_languages(&self) -> Result<Vec<LanguageEntry>, EngineError> {
        let response = self
            .authorize(self.client.get(self.url("languages")))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_body(status, &body));
        }

        response
            .json::<Vec<LanguageEntry>>()
            .await
            .map_err(|e| EngineError::Parse(e.to_string()))
    }

    async fn download_model(&self, source: &str, destination: &str) -> Result<(), EngineError> {
        self.download_conditions().check(self.device.as_ref())?;

        log::info!("engine: downloading model {source} → {destination}");

        let body = ModelRequest {
            source,
            target: destination,
        };
        let response = self
            .authorize(self.client.post(self.url("models")).json(&body))
            .timeout(Duration::from_secs(self.config.download_timeout_secs))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_body(status, &body));
        }

        Ok(())
    }
}

#[async_trait]
impl TranslationEngineGateway for HttpGateway {
    async fn supported_languages(&self) -> Result<Vec<String>, EngineError> {
        let languages = self.fetch_languages().await?;
        Ok(languages.into_iter().map(|l| l.code).collect())
    }

    async fn ensure_model_ready(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<(), EngineError> {
        if source == destination || self.is_ready(source, destination) {
            return Ok(());
        }

        let languages = self.fetch_languages().await?;
        if pair_installed(&languages, source, destination) {
            log::debug!("engine: model {source} → {destination} already installed");
        } else {
            self.download_model(source, destination).await?;
        }

        self.mark_ready(source, destination);
        Ok(())
    }

    async fn translate(
        &self,
        source: &str,
        destination: &str,
        text: &str,
    ) -> Result<String, EngineError> {
        if source == destination {
            return Ok(text.to_string());
        }

        let body = TranslateRequest {
            q: text,
            source,
            target: destination,
            format: "text",
        };
        let response = self
            .authorize(self.client.post(self.url("translate")).json(&body))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_body(status, &body));
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| EngineError::Parse(e.to_string()))?;

        Ok(parsed.translated_text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    struct Device {
        charging: bool,
    }

    impl DeviceConditions for Device {
        fn is_charging(&self) -> bool {
            self.charging
        }
        fn is_unmetered(&self) -> bool {
            false
        }
    }

    fn server_gateway(server: &MockServer, charging: bool) -> HttpGateway {
        let config = EngineConfig {
            base_url: server.uri(),
            api_key: Some("test-key".into()),
            timeout_secs: 5,
            ..EngineConfig::default()
        };
        HttpGateway::with_device_conditions(&config, Arc::new(Device { charging }))
    }

    async fn mount_languages(server: &MockServer, body: serde_json::Value, calls: u64) {
        Mock::given(method("GET"))
            .and(path("/languages"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(calls)
            .mount(server)
            .await;
    }

    fn offline_config() -> EngineConfig {
        EngineConfig {
            // Reserved TEST-NET address; nothing answers here.
            base_url: "http://192.0.2.1:9/".into(),
            timeout_secs: 1,
            ..EngineConfig::default()
        }
    }

    fn languages() -> Vec<LanguageEntry> {
        serde_json::from_str(
            r#"[
                {"code": "en", "name": "English", "targets": ["ta", "fr"]},
                {"code": "ta", "name": "Tamil"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn languages_response_parses_without_targets() {
        let langs = languages();
        assert_eq!(langs.len(), 2);
        assert!(langs[1].targets.is_empty());
        assert_eq!(langs[0].name.as_deref(), Some("English"));
    }

    #[test]
    fn pair_installed_checks_targets() {
        let langs = languages();
        assert!(pair_installed(&langs, "en", "ta"));
        assert!(!pair_installed(&langs, "ta", "en"));
        assert!(!pair_installed(&langs, "de", "en"));
    }

    #[test]
    fn error_body_message_is_verbatim() {
        let e = error_from_body(500, r#"{"error": "network unavailable"}"#);
        assert_eq!(e, EngineError::Engine("network unavailable".into()));
        assert_eq!(e.to_string(), "network unavailable");
    }

    #[test]
    fn non_json_error_keeps_status_and_body() {
        let e = error_from_body(502, "Bad Gateway\n");
        assert_eq!(e.to_string(), "HTTP 502: Bad Gateway");
        assert_eq!(error_from_body(404, "").to_string(), "HTTP 404");
    }

    #[test]
    fn translate_request_serialises_engine_fields() {
        let body = TranslateRequest {
            q: "hello",
            source: "en",
            target: "ta",
            format: "text",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["q"], "hello");
        assert_eq!(json["target"], "ta");
        assert_eq!(json["format"], "text");
    }

    #[test]
    fn url_joins_without_double_slash() {
        let gw = HttpGateway::from_config(&offline_config());
        assert_eq!(gw.url("translate"), "http://192.0.2.1:9/translate");
    }

    #[tokio::test]
    async fn same_language_pair_needs_no_engine() {
        let gw = HttpGateway::from_config(&offline_config());
        gw.ensure_model_ready("en", "en").await.unwrap();
        assert_eq!(gw.translate("en", "en", "hello").await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn cached_pair_skips_readiness_check() {
        let gw = HttpGateway::from_config(&offline_config());
        gw.mark_ready("en", "ta");
        assert!(gw.ensure_model_ready("en", "ta").await.is_ok());
    }

    #[test]
    fn gateway_is_object_safe() {
        let gw: Box<dyn TranslationEngineGateway> =
            Box::new(HttpGateway::from_config(&EngineConfig::default()));
        drop(gw);
    }

    // -----------------------------------------------------------------------
    // Against a local engine server
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn supported_languages_lists_engine_codes() {
        let server = MockServer::start().await;
        mount_languages(
            &server,
            serde_json::json!([{"code": "en", "targets": ["ta"]}, {"code": "ta"}]),
            1,
        )
        .await;

        let gw = server_gateway(&server, true);
        assert_eq!(gw.supported_languages().await.unwrap(), vec!["en", "ta"]);
    }

    #[tokio::test]
    async fn installed_pair_skips_download() {
        let server = MockServer::start().await;
        mount_languages(&server, serde_json::json!([{"code": "en", "targets": ["ta"]}]), 1).await;
        Mock::given(method("POST"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let gw = server_gateway(&server, true);
        gw.ensure_model_ready("en", "ta").await.unwrap();
    }

    #[tokio::test]
    async fn missing_pair_is_downloaded() {
        let server = MockServer::start().await;
        mount_languages(&server, serde_json::json!([{"code": "en", "targets": ["fr"]}]), 1).await;
        Mock::given(method("POST"))
            .and(path("/models"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_json(serde_json::json!({"source": "en", "target": "ta"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let gw = server_gateway(&server, true);
        gw.ensure_model_ready("en", "ta").await.unwrap();
    }

    #[tokio::test]
    async fn download_refused_when_conditions_not_met() {
        let server = MockServer::start().await;
        mount_languages(&server, serde_json::json!([{"code": "en"}]), 1).await;
        Mock::given(method("POST"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let gw = server_gateway(&server, false);
        let err = gw.ensure_model_ready("en", "ta").await.unwrap_err();
        assert!(matches!(err, EngineError::ConditionsNotMet(_)), "got {err:?}");
        assert!(!gw.is_ready("en", "ta"));
    }

    #[tokio::test]
    async fn failed_download_reports_engine_message() {
        let server = MockServer::start().await;
        mount_languages(&server, serde_json::json!([]), 1).await;
        Mock::given(method("POST"))
            .and(path("/models"))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_json(serde_json::json!({"error": "network unavailable"})),
            )
            .mount(&server)
            .await;

        let gw = server_gateway(&server, true);
        let err = gw.ensure_model_ready("en", "ta").await.unwrap_err();
        assert_eq!(err.to_string(), "network unavailable");
        assert!(!gw.is_ready("en", "ta"));
    }

    #[tokio::test]
    async fn ready_pair_is_cached_after_success() {
        let server = MockServer::start().await;
        mount_languages(&server, serde_json::json!([{"code": "en", "targets": ["ta"]}]), 1).await;

        let gw = server_gateway(&server, true);
        gw.ensure_model_ready("en", "ta").await.unwrap();
        gw.ensure_model_ready("en", "ta").await.unwrap();
        assert!(gw.is_ready("en", "ta"));
    }

    #[tokio::test]
    async fn translate_posts_request_and_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_json(serde_json::json!({
                "q": "hello",
                "source": "en",
                "target": "ta",
                "format": "text"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"translatedText": "வணக்கம்"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let gw = server_gateway(&server, true);
        assert_eq!(gw.translate("en", "ta", "hello").await.unwrap(), "வணக்கம்");
    }

    #[tokio::test]
    async fn translate_error_body_passes_through_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"error": "unsupported pair"})),
            )
            .mount(&server)
            .await;

        let gw = server_gateway(&server, true);
        let err = gw.translate("en", "ta", "hello").await.unwrap_err();
        assert_eq!(err, EngineError::Engine("unsupported pair".into()));
    }

    #[tokio::test]
    async fn translate_without_translated_text_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": "x"})),
            )
            .mount(&server)
            .await;

        let gw = server_gateway(&server, true);
        let err = gw.translate("en", "ta", "hello").await.unwrap_err();
        assert!(matches!(err, EngineError::Parse(_)), "got {err:?}");
    }
}
