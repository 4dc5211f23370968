//! HTTP client for the monitoring backend.
//!
//! One immutable instance is constructed at startup and handed to pages
//! via context. Every request carries a JSON content type and the header
//! that skips the tunnel-proxy interstitial page. There is no retry, no
//! backoff and no auth: transport and HTTP-status failures come back to
//! the caller as `Err(String)` unchanged in meaning.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Fallback when `SERVER_MONITOR_API_BASE` is not set at build time.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL from the build environment, loopback default when unset.
    pub fn from_env() -> Self {
        Self::new(option_env!("SERVER_MONITOR_API_BASE").unwrap_or(DEFAULT_BASE_URL))
    }

    /// Full URL for an API path. Also used to derive the CSV export URL,
    /// which is navigated to rather than fetched.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        let response = Request::get(&self.url(path))
            .header("Content-Type", "application/json")
            .header("ngrok-skip-browser-warning", "true")
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        if !response.ok() {
            return Err(format!("HTTP error: {}", response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    }

    /// GET a collection endpoint. A `null` or missing body counts as an
    /// empty list, not an error.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, String> {
        self.get_json::<Option<Vec<T>>>(path)
            .await
            .map(Option::unwrap_or_default)
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<T, String> {
        let body = serde_json::to_string(payload).map_err(|e| format!("Serialize error: {}", e))?;

        let response = Request::post(&self.url(path))
            .header("Content-Type", "application/json")
            .header("ngrok-skip-browser-warning", "true")
            .body(body)
            .map_err(|e| format!("Request failed: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        if !response.ok() {
            return Err(format!("HTTP error: {}", response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    }

    pub async fn patch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        let response = Request::patch(&self.url(path))
            .header("Content-Type", "application/json")
            .header("ngrok-skip-browser-warning", "true")
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        if !response.ok() {
            return Err(format!("HTTP error: {}", response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let client = ApiClient::new("http://127.0.0.1:5000");
        assert_eq!(client.url("/api/alerts"), "http://127.0.0.1:5000/api/alerts");
    }

    #[test]
    fn trailing_slash_on_base_is_trimmed() {
        let client = ApiClient::new("https://monitor.example.com/");
        assert_eq!(
            client.url("/api/logs/export"),
            "https://monitor.example.com/api/logs/export"
        );
    }
}
