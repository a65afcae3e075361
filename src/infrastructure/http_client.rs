use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::config::ApiConfig;
use crate::domain::{DomainError, HttpResponse, RequestIssuer, TransportError};

/// reqwest-backed request issuer bound to one base locator
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: &ApiConfig) -> Result<Self, DomainError> {
        let mut headers = HeaderMap::new();

        for (key, value) in &config.headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                DomainError::configuration(format!("Invalid header name '{}': {}", key, e))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                DomainError::configuration(format!("Invalid value for header '{}': {}", key, e))
            })?;
            headers.insert(header_name, header_value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);

        if config.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.timeout_ms));
        }

        let client = builder.build().map_err(|e| {
            DomainError::configuration(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute locators pass through; relative ones hang off the base
    fn url_for(&self, locator: &str) -> String {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            locator.to_string()
        } else {
            format!("{}/{}", self.base_url, locator.trim_start_matches('/'))
        }
    }
}

#[async_trait]
impl RequestIssuer for HttpClient {
    async fn get(&self, locator: &str) -> Result<HttpResponse, TransportError> {
        let url = self.url_for(locator);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TransportError::new(format!("Request to '{}' failed: {}", url, e)))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            TransportError::new(format!("Failed to read response from '{}': {}", url, e))
        })?;

        debug!(status, url = %url, "Received response");

        Ok(HttpResponse { status, body })
    }
}
