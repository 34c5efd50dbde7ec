//! Backend API client
//!
//! A thin JSON client for the GAPS backend. Every mutating request carries
//! the backend's CSRF token in an `X-CSRFToken` header, errors are
//! normalized to the backend's `error`/`message` field, and HTTP 429 (AI
//! quota) is split out so the UI can show its dedicated message.

pub mod assist;
pub mod boards;
pub mod thoughts;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use thiserror::Error;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    /// Request accepted by HTTP but rejected in the `success: false` envelope
    #[error("{0}")]
    Rejected(String),
    /// HTTP 429 from the AI endpoints
    #[error("AI quota exhausted. Please try again later.")]
    QuotaExhausted,
}

impl ApiError {
    /// The backend answers a duplicate thought add with HTTP 409; callers
    /// treat that as benign.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, ApiError::Server { status: 409, .. })
    }
}

/// Mutation acknowledgement envelope (`{success, error?}`)
#[derive(Debug, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl Ack {
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Rejected(
                self.error
                    .unwrap_or_else(|| "Unknown server error".to_string()),
            ))
        }
    }
}

static CSRF_META: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<meta\s+name=["']csrf-token["']\s+content=["']([^"']*)["']"#)
        .expect("csrf meta pattern")
});

/// Pull the CSRF token out of a served page's meta tag.
pub(crate) fn scrape_csrf_token(html: &str) -> Option<String> {
    CSRF_META
        .captures(html)
        .map(|caps| caps[1].to_string())
        .filter(|token| !token.is_empty())
}

/// Pull the backend's error text out of a non-2xx JSON body.
pub(crate) fn extract_error_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .or_else(|| value.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Unknown server error".to_string())
}

/// Client for the GAPS backend
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    csrf_token: RwLock<String>,
}

impl ApiClient {
    /// Build a client for a backend base URL. The cookie store carries the
    /// backend's session cookie; the client never performs login itself.
    pub fn new(server_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("HTTP client builder failed ({e}), using default client");
                reqwest::Client::new()
            });
        Self {
            http,
            base_url: server_url.into().trim_end_matches('/').to_string(),
            csrf_token: RwLock::new(String::new()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn current_csrf_token(&self) -> String {
        self.csrf_token
            .read()
            .map(|token| token.clone())
            .unwrap_or_default()
    }

    /// Re-scrape the CSRF token from the board page's meta tag, the same tag
    /// the browser layer read from the DOM. A page without the tag leaves
    /// the token empty; the backend will reject mutations with a normal
    /// HTTP error in that case.
    pub async fn refresh_csrf_token(&self) -> Result<(), ApiError> {
        let html = self
            .http
            .get(self.url("/facilitator"))
            .send()
            .await?
            .text()
            .await?;

        match scrape_csrf_token(&html) {
            Some(token) => {
                tracing::debug!("Refreshed CSRF token");
                if let Ok(mut slot) = self.csrf_token.write() {
                    *slot = token;
                }
            }
            None => {
                tracing::warn!("No csrf-token meta tag on board page");
            }
        }
        Ok(())
    }

    /// POST a JSON body and decode a JSON response
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .http
            .post(self.url(path))
            .header("X-CSRFToken", self.current_csrf_token())
            .json(body)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// GET a JSON response
    pub async fn get_json<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let resp = self
            .http
            .get(self.url(path))
            .header("Accept", "application/json")
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn decode<T>(resp: reqwest::Response) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(ApiError::QuotaExhausted);
        }

        let body = resp.bytes().await?;
        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_csrf_token() {
        let html = r#"<head><meta name="csrf-token" content="abc123"></head>"#;
        assert_eq!(scrape_csrf_token(html).as_deref(), Some("abc123"));

        let single_quoted = r#"<meta name='csrf-token' content='tok'>"#;
        assert_eq!(scrape_csrf_token(single_quoted).as_deref(), Some("tok"));

        assert_eq!(scrape_csrf_token("<meta name=\"other\" content=\"x\">"), None);
        assert_eq!(
            scrape_csrf_token(r#"<meta name="csrf-token" content="">"#),
            None
        );
    }

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(br#"{"error": "Board not found"}"#),
            "Board not found"
        );
        assert_eq!(
            extract_error_message(br#"{"message": "bad request"}"#),
            "bad request"
        );
        assert_eq!(extract_error_message(b"<html>oops</html>"), "Unknown server error");
        assert_eq!(extract_error_message(br#"{"error": 5}"#), "Unknown server error");
    }

    #[test]
    fn test_ack_envelope() {
        let ok: Ack = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(ok.into_result().is_ok());

        let rejected: Ack =
            serde_json::from_str(r#"{"success": false, "error": "Thought 9 not found"}"#).unwrap();
        match rejected.into_result() {
            Err(ApiError::Rejected(msg)) => assert_eq!(msg, "Thought 9 not found"),
            other => panic!("expected Rejected, got {other:?}"),
        }

        let bare: Ack = serde_json::from_str("{}").unwrap();
        assert!(bare.into_result().is_err());
    }

    #[test]
    fn test_duplicate_detection() {
        let err = ApiError::Server {
            status: 409,
            message: "Duplicate thought".to_string(),
        };
        assert!(err.is_duplicate());
        assert!(!ApiError::QuotaExhausted.is_duplicate());
    }
}
