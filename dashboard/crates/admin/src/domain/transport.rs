//! Backend Transport Port
//!
//! The access layer talks to the backend only through [`BackendTransport`].
//! The production implementation lives in `infra::http`; tests substitute an
//! in-memory fake.

use std::fmt;

use http::{HeaderMap, Method, StatusCode};
use kernel::error::app_error::AppResult;
use serde_json::Value;
use zeroize::Zeroizing;

use crate::domain::query::QueryPairs;

/// One outgoing request, relative to the configured base URL
#[derive(Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path beginning with `/`
    pub path: String,
    pub query: QueryPairs,
    /// JSON body
    pub body: Option<Value>,
    /// Bearer credential attached as `Authorization: Bearer <token>`
    pub bearer: Option<Zeroizing<String>>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryPairs::new(),
            body: None,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn with_query(mut self, query: QueryPairs) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Key identifying the endpoint for 401 retry bookkeeping
    pub fn route_key(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("body", &self.body)
            .field("bearer", &self.bearer.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Raw backend response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Transport trait
///
/// Errors are failures to get any response at all (connection, timeout).
/// Every HTTP status, including 4xx/5xx, comes back as `Ok`.
#[trait_variant::make(BackendTransport: Send)]
pub trait LocalBackendTransport {
    async fn send(&self, request: &ApiRequest) -> AppResult<ApiResponse>;
}
