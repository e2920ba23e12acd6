//! Platform API client
//!
//! One HTTP client shared by every access module. Handles base URL joining,
//! bearer-token injection from the injected [`TokenStore`], and the API's
//! response envelope. Exactly one network attempt per call, no retries.
//!
//! Success envelope (when present): `{ "data": <resource>, "message"?, "status"? }`;
//! a bare object or array is accepted as a fallback shape. Error envelope:
//! `{ "message": string | string[] }`, surfaced as the first array element
//! or the string itself.

use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::session::TokenStore;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared HTTP client for the platform REST API.
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a new client against the given API base URL.
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Self {
        Self::with_timeout(base_url, tokens, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, tokens: Arc<dyn TokenStore>, timeout: Duration) -> Self {
        // Build HTTP client with timeout, falling back to default client if builder fails
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Full URL for an API path.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = self.endpoint(path);
        debug!("{} {}", method, url);

        let mut req = self.client.request(method, url);
        if let Some(token) = self.tokens.load() {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        req
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let resp = self.request(Method::GET, path).send().await?;
        decode_envelope(resp).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let resp = self.request(Method::POST, path).json(body).send().await?;
        decode_envelope(resp).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let resp = self.request(Method::PATCH, path).json(body).send().await?;
        decode_envelope(resp).await
    }

    /// DELETE with no expected response body.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let resp = self.request(Method::DELETE, path).send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(error_from_response(resp).await)
        }
    }
}

/// Unwrap the `{ data: ... }` envelope, accepting a bare body as fallback.
async fn decode_envelope<T: DeserializeOwned>(resp: Response) -> ApiResult<T> {
    let status = resp.status();
    if !status.is_success() {
        return Err(error_from_response(resp).await);
    }

    // Read the body first: a 2xx response that is not valid JSON is a
    // decode failure, not a transport one
    let text = resp.text().await?;
    parse_envelope(&text)
}

fn parse_envelope<T: DeserializeOwned>(text: &str) -> ApiResult<T> {
    let body: Value = serde_json::from_str(text)?;
    let payload = match body.get("data") {
        Some(data) if !data.is_null() => data.clone(),
        _ => body,
    };
    Ok(serde_json::from_value(payload)?)
}

async fn error_from_response(resp: Response) -> ApiError {
    let status = resp.status().as_u16();
    let message = match resp.json::<Value>().await {
        Ok(body) => extract_message(&body),
        Err(_) => None,
    };
    ApiError::server(
        status,
        message.unwrap_or_else(|| format!("Request failed with status {}", status)),
    )
}

/// Pull the human-readable message out of an error envelope.
/// The API sends either a string or an array of strings.
fn extract_message(body: &Value) -> Option<String> {
    match body.get("message") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Array(items)) => items
            .iter()
            .find_map(|v| v.as_str())
            .map(|s| s.to_string()),
        _ => None,
    }
}

/// Build a query string from optional filter values, percent-encoding each.
/// Returns an empty string when no filter is set.
pub fn query_string(pairs: &[(&str, Option<String>)]) -> String {
    let parts: Vec<String> = pairs
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(|v| format!("{}={}", key, urlencoding::encode(v)))
        })
        .collect();

    if parts.is_empty() {
        String::new()
    } else {
        format!("?{}", parts.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;
    use serde_json::json;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Arc::new(MemoryTokenStore::new()))
    }

    #[test]
    fn strips_trailing_slash() {
        let api = client("https://api.example.com/");
        assert_eq!(api.base_url(), "https://api.example.com");
    }

    #[test]
    fn endpoint_joins_path() {
        let api = client("https://api.example.com");
        assert_eq!(
            api.endpoint("/programs/42/status"),
            "https://api.example.com/programs/42/status"
        );
        assert_eq!(api.endpoint("programs"), "https://api.example.com/programs");
    }

    #[test]
    fn query_string_skips_unset_filters() {
        assert_eq!(query_string(&[("status", None)]), "");
        assert_eq!(
            query_string(&[("status", Some("ACTIVE".to_string())), ("programId", None)]),
            "?status=ACTIVE"
        );
        assert_eq!(
            query_string(&[
                ("status", Some("PENDING".to_string())),
                ("severity", Some("HIGH".to_string())),
            ]),
            "?status=PENDING&severity=HIGH"
        );
    }

    #[test]
    fn query_string_percent_encodes() {
        assert_eq!(
            query_string(&[("q", Some("sql injection".to_string()))]),
            "?q=sql%20injection"
        );
    }

    #[test]
    fn extract_message_string() {
        let body = json!({ "message": "Program not found" });
        assert_eq!(extract_message(&body).as_deref(), Some("Program not found"));
    }

    #[test]
    fn extract_message_first_array_element() {
        let body = json!({ "message": ["title should not be empty", "amount must be positive"] });
        assert_eq!(
            extract_message(&body).as_deref(),
            Some("title should not be empty")
        );
    }

    #[test]
    fn extract_message_missing() {
        assert_eq!(extract_message(&json!({ "error": "nope" })), None);
        assert_eq!(extract_message(&json!({ "message": "" })), None);
    }

    #[test]
    fn envelope_unwraps_data_field() {
        let names: Vec<String> =
            parse_envelope(r#"{ "data": ["xss", "sqli"], "message": "ok" }"#).unwrap();
        assert_eq!(names, vec!["xss", "sqli"]);
    }

    #[test]
    fn envelope_accepts_bare_payloads() {
        let names: Vec<String> = parse_envelope(r#"["xss", "sqli"]"#).unwrap();
        assert_eq!(names, vec!["xss", "sqli"]);
    }

    #[test]
    fn non_json_success_body_is_a_decode_error() {
        let err = parse_envelope::<Vec<String>>("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, crate::error::ApiError::Decode(_)), "{}", err);
    }
}
