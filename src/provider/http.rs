//! Shared HTTP client and response helpers.

use std::sync::OnceLock;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::{ProviderError, ProviderFailure};

use super::ProviderId;

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
///
/// Per-call deadlines are enforced by the generator; this timeout only guards
/// against connections that never complete.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .pool_max_idle_per_host(10)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    })
}

/// Build default headers for a Bearer-token API.
pub fn bearer_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(&format!("Bearer {api_key}")) {
        headers.insert(AUTHORIZATION, val);
    }
    headers
}

/// Send a JSON POST and decode a 200 body, tagging every failure with `provider`.
pub async fn post_json<T: serde::de::DeserializeOwned>(
    provider: ProviderId,
    request: reqwest::RequestBuilder,
    body: &serde_json::Value,
) -> Result<T, ProviderError> {
    let resp = request
        .json(body)
        .send()
        .await
        .map_err(|e| ProviderFailure::from(e).tag(provider))?;

    let status = resp.status().as_u16();
    if status != 200 {
        let body_text = resp.text().await.unwrap_or_default();
        return Err(status_to_failure(status, &body_text).tag(provider));
    }

    let text = resp
        .text()
        .await
        .map_err(|e| ProviderFailure::from(e).tag(provider))?;
    serde_json::from_str(&text).map_err(|e| ProviderFailure::from(e).tag(provider))
}

/// Map a non-200 HTTP status to a failure.
pub fn status_to_failure(status: u16, body: &str) -> ProviderFailure {
    match status {
        401 | 403 => ProviderFailure::Authentication(body.to_string()),
        429 => ProviderFailure::RateLimited {
            retry_after_ms: extract_retry_after(body),
        },
        _ => ProviderFailure::Api {
            status,
            message: body.to_string(),
        },
    }
}

fn extract_retry_after(body: &str) -> Option<u64> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("retry_after"))
                .and_then(|r| r.as_f64())
                .map(|s| (s * 1000.0) as u64)
        })
}
