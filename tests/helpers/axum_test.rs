// ABOUTME: Axum HTTP testing utilities for integration tests
// ABOUTME: Drives routers with oneshot requests and exposes status, headers, and JSON bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde::Serialize;
use tower::ServiceExt;

/// Helper to build and execute HTTP requests against Axum routers
pub struct AxumTestRequest {
    method: Method,
    uri: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl AxumTestRequest {
    /// Create a new GET request
    pub fn get(uri: &str) -> Self {
        Self {
            method: Method::GET,
            uri: uri.to_owned(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Create a new POST request
    pub fn post(uri: &str) -> Self {
        Self {
            method: Method::POST,
            uri: uri.to_owned(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Create a new OPTIONS request
    #[allow(dead_code)]
    pub fn options(uri: &str) -> Self {
        Self {
            method: Method::OPTIONS,
            uri: uri.to_owned(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Send a raw, possibly malformed, JSON body
    #[allow(dead_code)]
    pub fn raw_json(mut self, body: &str) -> Self {
        self.body = Some(body.to_owned());
        self.headers.push((
            header::CONTENT_TYPE.as_str().to_owned(),
            "application/json".to_owned(),
        ));
        self
    }

    /// Add a header to the request
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_owned(), value.to_owned()));
        self
    }

    /// Add JSON body to the request
    pub fn json<T: Serialize>(mut self, data: &T) -> Self {
        self.body = Some(serde_json::to_string(data).expect("Failed to serialize JSON"));
        self.headers.push((
            header::CONTENT_TYPE.as_str().to_owned(),
            "application/json".to_owned(),
        ));
        self
    }

    /// Execute the request against an Axum router
    pub async fn send(self, app: Router) -> AxumTestResponse {
        let mut builder = Request::builder().method(self.method).uri(self.uri);

        for (key, value) in self.headers {
            builder = builder.header(key, value);
        }

        let body = self.body.unwrap_or_default();
        let request = builder
            .body(Body::from(body))
            .expect("Failed to build request");

        let response = app
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        AxumTestResponse::from_response(response).await
    }
}

/// Wrapper around Axum HTTP response for testing
pub struct AxumTestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl AxumTestResponse {
    /// Create from response by eagerly reading the body
    async fn from_response(response: axum::http::Response<Body>) -> Self {
        use axum::body::to_bytes;
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body")
            .to_vec();
        Self {
            status,
            headers,
            body,
        }
    }

    /// Get a response header as a string
    #[allow(dead_code)]
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    }

    /// Get the response status code as u16 for easy assertion
    pub const fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get the response status code as `StatusCode`
    pub const fn status_code(&self) -> StatusCode {
        self.status
    }

    /// Get the response body as bytes
    pub fn bytes(self) -> Vec<u8> {
        self.body
    }

    /// Get the response body as a JSON value
    pub fn json<T: serde::de::DeserializeOwned>(self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to deserialize JSON response")
    }

    /// Get the response body as a string
    pub fn text(self) -> String {
        String::from_utf8(self.body).expect("Failed to decode response as UTF-8")
    }

    /// Assert that the status code matches
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status, expected,
            "Expected status {}, got {}",
            expected, self.status
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderValue, routing::post, Json};

    #[tokio::test]
    async fn test_round_trip_with_headers() {
        let app = Router::new().route(
            "/echo",
            post(|Json(body): Json<serde_json::Value>| async move {
                (
                    [("x-echo", HeaderValue::from_static("yes"))],
                    Json(serde_json::json!({"received": body})),
                )
            }),
        );

        let response = AxumTestRequest::post("/echo")
            .json(&serde_json::json!({"intensity": 5}))
            .send(app)
            .await
            .assert_status(StatusCode::OK);

        assert_eq!(response.header("x-echo").as_deref(), Some("yes"));
        let json: serde_json::Value = response.json();
        assert_eq!(json["received"]["intensity"], 5);
    }
}
