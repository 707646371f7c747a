//! Reqwest Transport
//!
//! [`BackendTransport`] over HTTPS/HTTP with `reqwest`.

use http::header;
use kernel::error::app_error::{AppError, AppResult};
use platform::header::bearer_value;

use crate::domain::transport::{ApiRequest, ApiResponse, BackendTransport};

/// HTTP transport bound to one backend base URL
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Create a transport for `base_url` (trailing `/` ignored)
    pub fn new(base_url: &str) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("admin-console/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl BackendTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> AppResult<ApiResponse> {
        let mut builder = self
            .client
            .request(request.method.clone(), self.url(&request.path))
            .header(header::ACCEPT, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = &request.bearer {
            let value = bearer_value(token)
                .map_err(|e| AppError::validation(e.to_string()).with_source(e))?;
            builder = builder.header(header::AUTHORIZATION, value);
        }

        tracing::debug!(method = %request.method, path = %request.path, "Sending request");

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            bytes = body.len(),
            "Response received"
        );

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
