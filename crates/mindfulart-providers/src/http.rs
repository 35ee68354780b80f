//! Shared HTTP plumbing for the collection adapters.
//!
//! Each adapter issues exactly one GET per search. This module turns the
//! reqwest request into a JSON object or a classified [`ProviderError`].

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};

/// Longest response excerpt written to debug logs.
const MAX_LOGGED_BODY: usize = 512;

/// Largest success body accepted from a collection API.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Builds the HTTP client used by one adapter.
pub(crate) fn build_client(timeout: Duration, user_agent: &str) -> ProviderResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| {
            ProviderError::internal(format!("failed to create HTTP client: {}", e)).with_source(e)
        })
}

fn classify_transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::timeout("request timeout").with_source(e)
    } else if e.is_connect() {
        ProviderError::network(format!("connection failed: {}", e)).with_source(e)
    } else {
        ProviderError::network(format!("request failed: {}", e)).with_source(e)
    }
}

/// Sends `request` and returns the body, which is guaranteed to be a JSON object.
pub(crate) async fn get_json_object(request: reqwest::RequestBuilder) -> ProviderResult<Value> {
    get_json_object_within(request, MAX_BODY_BYTES).await
}

async fn get_json_object_within(
    request: reqwest::RequestBuilder,
    max_body: usize,
) -> ProviderResult<Value> {
    let mut response = request.send().await.map_err(classify_transport_error)?;
    let status = response.status();

    if !status.is_success() {
        // Only the first chunk, and only for the log; the status is the error.
        let excerpt = match response.chunk().await {
            Ok(Some(chunk)) => String::from_utf8_lossy(&chunk).into_owned(),
            _ => String::new(),
        };
        debug!(
            status = status.as_u16(),
            body = %truncate(&excerpt, MAX_LOGGED_BODY),
            "collection API returned an error status"
        );
        return Err(ProviderError::http_status(
            status.as_u16(),
            format!("API error ({})", status),
        ));
    }

    let too_large = || {
        ProviderError::invalid_response(format!("response body exceeds {} bytes", max_body))
    };
    if response
        .content_length()
        .is_some_and(|len| len > max_body as u64)
    {
        return Err(too_large());
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(classify_transport_error)? {
        if body.len() + chunk.len() > max_body {
            return Err(too_large());
        }
        body.extend_from_slice(&chunk);
    }

    let value: Value = serde_json::from_slice(&body).map_err(|e| {
        ProviderError::invalid_response(format!("body is not JSON: {}", e)).with_source(e)
    })?;

    if !value.is_object() {
        return Err(ProviderError::invalid_response(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }

    Ok(value)
}

/// Validates a JSON object against a response schema.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> ProviderResult<T> {
    serde_json::from_value(value).map_err(|e| {
        ProviderError::schema(format!("response did not match schema: {}", e)).with_source(e)
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn fetch(server: &MockServer, timeout: Duration) -> ProviderResult<Value> {
        let client = build_client(timeout, "mindfulart-test").unwrap();
        get_json_object(client.get(format!("{}/data", server.uri()))).await
    }

    #[tokio::test]
    async fn returns_object_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"a": 1})))
            .mount(&server)
            .await;

        let value = fetch(&server, Duration::from_secs(5)).await.unwrap();
        assert_eq!(value["a"], 1);
    }

    #[tokio::test]
    async fn classifies_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = fetch(&server, Duration::from_secs(5)).await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::HttpStatus);
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn error_status_wins_over_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(404).set_body_string("x".repeat(4096)))
            .mount(&server)
            .await;

        let client = build_client(Duration::from_secs(5), "mindfulart-test").unwrap();
        let err = get_json_object_within(client.get(format!("{}/data", server.uri())), 64)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::HttpStatus);
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let server = MockServer::start().await;
        let big = serde_json::json!({ "records": vec!["padding"; 64] });
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&big))
            .mount(&server)
            .await;

        let client = build_client(Duration::from_secs(5), "mindfulart-test").unwrap();
        let request = || client.get(format!("{}/data", server.uri()));

        let err = get_json_object_within(request(), 64).await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::InvalidResponse);
        assert!(err.message().contains("exceeds 64 bytes"));

        let value = get_json_object_within(request(), 4096).await.unwrap();
        assert_eq!(value["records"].as_array().unwrap().len(), 64);
    }

    #[tokio::test]
    async fn rejects_arrays_and_garbage() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([1, 2])))
            .mount(&server)
            .await;

        let err = fetch(&server, Duration::from_secs(5)).await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::InvalidResponse);
        assert!(err.message().contains("an array"));

        server.reset().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = fetch(&server, Duration::from_secs(5)).await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::InvalidResponse);
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let err = fetch(&server, Duration::from_millis(50)).await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::Timeout);
    }

    #[test]
    fn decode_reports_schema_errors() {
        #[derive(Debug, serde::Deserialize)]
        struct Shape {
            #[allow(dead_code)]
            records: Vec<u32>,
        }

        let err = decode::<Shape>(serde_json::json!({"records": "nope"})).unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::SchemaValidation);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("short", 100), "short");
    }
}
