//! The host side of the host-does-IO split: executes the core's plain-data
//! requests over reqwest and logs every round-trip.

use std::time::Duration;

use item_core::{HttpMethod, HttpRequest, HttpResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Build(reqwest::Error),
    #[error("request failed: {0}")]
    Send(reqwest::Error),
}

/// Thin reqwest wrapper that turns `HttpRequest` into `HttpResponse`.
///
/// Every request logs method, URL and payload; every response logs status
/// and payload. Diagnostics only — status interpretation stays in the core.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
}

impl Transport {
    pub fn new() -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(TransportError::Build)?;
        Ok(Self { http })
    }

    pub async fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        tracing::info!(
            method = req.method.as_str(),
            url = %req.url,
            payload = req.body.as_deref().unwrap_or(""),
            "sending request"
        );

        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.http.request(method, &req.url);
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(error = %e, "request failed");
            TransportError::Send(e)
        })?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            tracing::error!(error = %e, "failed to read response body");
            TransportError::Send(e)
        })?;

        tracing::info!(status, payload = %body, "received response");

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}
