// Classification client module: contains a small blocking HTTP client that
// talks to the appeal classification service. It is intentionally small and
// synchronous: the CLI sends one request at a time and waits for the reply.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fallback base URL when `CLASSIFICATION_SERVICE_URL` is unset.
const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";

/// Bound on the full round trip of a single classification call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Request payload for the `/classify` endpoint.
#[derive(Serialize, Deserialize, Debug)]
pub struct ClassificationRequest {
    pub text: String,
}

/// Classification result as returned by the service. The schema is owned by
/// the service; every field is optional on the wire, so each one carries a
/// default and decoding never fails on absent fields. A structurally invalid
/// body (say, a non-numeric confidence) still fails the decode.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    #[serde(default = "unknown_service")]
    pub service: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub needs_moderation: bool,
    #[serde(default)]
    pub top_alternatives: Vec<Alternative>,
}

/// A lower-ranked candidate returned alongside the primary prediction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Alternative {
    #[serde(default = "unknown_alternative")]
    pub service: String,
    #[serde(default)]
    pub confidence: f64,
}

fn unknown_service() -> String {
    "Не визначено".into()
}

fn unknown_alternative() -> String {
    "Невідомо".into()
}

/// Everything that can go wrong during one classification call. The loop
/// matches on the kind to pick the diagnostic it prints, so no case can be
/// silently forgotten.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// Non-200 response; `detail` is the `detail` field of the error body
    /// when it parses as JSON, the raw body text otherwise.
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },
    /// A connection to the service could not be established.
    #[error("не вдалося підключитися до {url}")]
    Unreachable { url: String },
    /// The request exceeded the round-trip bound.
    #[error("час очікування вичерпано")]
    Timeout,
    /// HTTP 200 with a body that is not the expected JSON shape.
    #[error("некоректна відповідь сервісу: {0}")]
    BadPayload(#[source] serde_json::Error),
    /// Any other transport-level fault.
    #[error("{0}")]
    Unexpected(#[source] reqwest::Error),
}

/// Blocking client holding the service base URL and a reqwest client with
/// the request timeout baked in.
#[derive(Clone)]
pub struct ClassifierClient {
    client: Client,
    base_url: String,
}

impl ClassifierClient {
    /// Create a client for an explicit base URL. The URL is injected rather
    /// than read from the environment here, so tests can point the client at
    /// a fake endpoint.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ClassifierClient {
            client,
            base_url: base_url.into(),
        })
    }

    /// Create a client configured from the environment variable
    /// `CLASSIFICATION_SERVICE_URL`, or fallback to `http://localhost:8000`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("CLASSIFICATION_SERVICE_URL")
            .unwrap_or_else(|_| DEFAULT_SERVICE_URL.into());
        Self::new(base_url)
    }

    /// The configured base URL, for display in the startup banner.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one text for classification: a single POST to
    /// `{base_url}/classify` with body `{"text": text}`.
    pub fn classify(&self, text: &str) -> Result<ClassificationResult, ClassifyError> {
        let url = format!("{}/classify", &self.base_url);
        let req = ClassificationRequest {
            text: text.to_string(),
        };
        let res = self
            .client
            .post(&url)
            .json(&req)
            .send()
            .map_err(|e| transport_error(e, &url))?;

        let status = res.status();
        let body = res.text().map_err(|e| transport_error(e, &url))?;
        if status == reqwest::StatusCode::OK {
            serde_json::from_str(&body).map_err(ClassifyError::BadPayload)
        } else {
            Err(ClassifyError::Status {
                status: status.as_u16(),
                detail: extract_detail(&body),
            })
        }
    }
}

/// Map a reqwest fault onto the closed error taxonomy. Timeouts are checked
/// first since a connect timeout reports as both.
fn transport_error(err: reqwest::Error, url: &str) -> ClassifyError {
    if err.is_timeout() {
        ClassifyError::Timeout
    } else if err.is_connect() {
        ClassifyError::Unreachable {
            url: url.to_string(),
        }
    } else {
        ClassifyError::Unexpected(err)
    }
}

/// Pull a human-readable message out of an error body: the `detail` field
/// when the body is JSON, the raw text otherwise.
fn extract_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("detail")
            .and_then(|d| d.as_str())
            .unwrap_or("Невідома помилка")
            .to_string(),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_as_text_object() {
        let req = ClassificationRequest {
            text: "немає опалення".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, serde_json::json!({"text": "немає опалення"}));
    }

    #[test]
    fn result_decodes_with_all_fields() {
        let body = r#"{
            "service": "Теплопостачання",
            "confidence": 0.87,
            "needs_moderation": true,
            "top_alternatives": [{"service": "ЖЕК", "confidence": 0.1}]
        }"#;
        let result: ClassificationResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.service, "Теплопостачання");
        assert_eq!(result.confidence, 0.87);
        assert!(result.needs_moderation);
        assert_eq!(result.top_alternatives.len(), 1);
        assert_eq!(result.top_alternatives[0].service, "ЖЕК");
    }

    #[test]
    fn result_decodes_empty_object_to_defaults() {
        let result: ClassificationResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result.service, "Не визначено");
        assert_eq!(result.confidence, 0.0);
        assert!(!result.needs_moderation);
        assert!(result.top_alternatives.is_empty());
    }

    #[test]
    fn result_rejects_non_numeric_confidence() {
        let body = r#"{"service": "A", "confidence": "high"}"#;
        assert!(serde_json::from_str::<ClassificationResult>(body).is_err());
    }

    #[test]
    fn alternative_without_service_gets_placeholder() {
        let body = r#"{"top_alternatives": [{"confidence": 0.2}]}"#;
        let result: ClassificationResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.top_alternatives[0].service, "Невідомо");
    }

    #[test]
    fn detail_extracted_from_json_error_body() {
        assert_eq!(extract_detail(r#"{"detail": "not found"}"#), "not found");
    }

    #[test]
    fn detail_falls_back_when_field_absent() {
        assert_eq!(extract_detail(r#"{"error": "x"}"#), "Невідома помилка");
    }

    #[test]
    fn detail_passes_raw_body_through_when_not_json() {
        assert_eq!(extract_detail("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn error_kinds_render_distinct_messages() {
        let unreachable = ClassifyError::Unreachable {
            url: "http://localhost:8000/classify".into(),
        };
        let timeout = ClassifyError::Timeout;
        assert_ne!(unreachable.to_string(), timeout.to_string());
        assert!(unreachable.to_string().contains("localhost:8000"));
    }
}
