//! Reqwest-backed client for the upstream employee service.
//!
//! # Responsibilities
//! - Build the pooled HTTP client (connect timeout, request timeout, idle pool)
//! - Issue GET / POST / DELETE against the configured base URL
//! - Return raw bodies; interpreting them is the envelope parser's job

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::envelope::CreateEmployeeRequest;
use crate::upstream::error::{UpstreamError, UpstreamResult};

/// Raw access to the upstream employee resource.
#[async_trait]
pub trait EmployeeUpstream: Send + Sync {
    /// GET `{base}` or `{base}/{id}` and return the body.
    async fn get(&self, id: Option<&str>) -> UpstreamResult<String>;

    /// POST `{base}` and return the body.
    async fn post(&self, request: &CreateEmployeeRequest<'_>) -> UpstreamResult<String>;

    /// DELETE `{base}/{id}`.
    async fn delete(&self, id: &str) -> UpstreamResult<()>;
}

/// HTTP client bound to one upstream base URL.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: Url,
}

impl UpstreamClient {
    /// Build a client from configuration.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| UpstreamError::InvalidUrl(format!("'{}': {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidUrl(format!(
                "'{}' cannot carry path segments",
                config.base_url
            )));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()?;

        tracing::info!(
            base_url = %base_url,
            connect_timeout_ms = config.connect_timeout_ms,
            request_timeout_secs = config.request_timeout_secs,
            "Upstream client initialized"
        );

        Ok(Self { client, base_url })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL, optionally suffixed with one percent-encoded `/{id}` segment.
    fn endpoint(&self, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Some(id) = id {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty().push(id);
            }
        }
        url
    }

    async fn read_body(method: &'static str, response: Response) -> UpstreamResult<String> {
        let status = response.status();
        metrics::record_upstream_call(method, status.as_u16());
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl EmployeeUpstream for UpstreamClient {
    async fn get(&self, id: Option<&str>) -> UpstreamResult<String> {
        let url = self.endpoint(id);
        tracing::debug!(url = %url, "GET upstream");
        let response = self.client.get(url).send().await.inspect_err(|_| {
            metrics::record_upstream_call("GET", 0);
        })?;
        Self::read_body("GET", response).await
    }

    async fn post(&self, request: &CreateEmployeeRequest<'_>) -> UpstreamResult<String> {
        let url = self.endpoint(None);
        tracing::debug!(url = %url, "POST upstream");
        let response = self.client.post(url).json(request).send().await.inspect_err(|_| {
            metrics::record_upstream_call("POST", 0);
        })?;
        Self::read_body("POST", response).await
    }

    async fn delete(&self, id: &str) -> UpstreamResult<()> {
        let url = self.endpoint(Some(id));
        tracing::debug!(url = %url, "DELETE upstream");
        let response = self.client.delete(url).send().await.inspect_err(|_| {
            metrics::record_upstream_call("DELETE", 0);
        })?;
        Self::read_body("DELETE", response).await.map(|_| ())
    }
}
