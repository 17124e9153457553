// ABOUTME: Axum HTTP testing utilities for integration tests
// ABOUTME: Drives routers in-process through tower oneshot without binding a socket
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::{
    body::{to_bytes, Body},
    http::{header, request::Builder, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde::{de::DeserializeOwned, Serialize};
use tower::ServiceExt;

/// One in-process request against a router
pub struct AxumTestRequest {
    builder: Builder,
    body: Body,
}

impl AxumTestRequest {
    fn with_method(method: Method, uri: &str) -> Self {
        Self {
            builder: Request::builder().method(method).uri(uri),
            body: Body::empty(),
        }
    }

    pub fn get(uri: &str) -> Self {
        Self::with_method(Method::GET, uri)
    }

    pub fn post(uri: &str) -> Self {
        Self::with_method(Method::POST, uri)
    }

    /// CORS preflight
    pub fn options(uri: &str) -> Self {
        Self::with_method(Method::OPTIONS, uri)
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Serialize `payload` as the JSON body
    pub fn json<T: Serialize>(self, payload: &T) -> Self {
        let text = serde_json::to_string(payload).expect("request payload serializes");
        self.raw_json(&text)
    }

    /// Send `text` verbatim, labelled as JSON, so malformed bodies can be tested
    pub fn raw_json(mut self, text: &str) -> Self {
        self.builder = self
            .builder
            .header(header::CONTENT_TYPE, "application/json");
        self.body = Body::from(text.to_owned());
        self
    }

    pub async fn send(self, app: Router) -> AxumTestResponse {
        let request = self.builder.body(self.body).expect("valid test request");
        let response = app.oneshot(request).await.expect("router is infallible");

        let (parts, body) = response.into_parts();
        let bytes = to_bytes(body, usize::MAX).await.expect("readable body");

        AxumTestResponse {
            status: parts.status,
            headers: parts.headers,
            body: bytes.to_vec(),
        }
    }
}

/// Fully buffered response
pub struct AxumTestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl AxumTestResponse {
    pub const fn status(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    pub fn json<T: DeserializeOwned>(self) -> T {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "response is not JSON ({e}): {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    #[allow(dead_code)]
    pub fn text(self) -> String {
        String::from_utf8(self.body).expect("UTF-8 response body")
    }
}
