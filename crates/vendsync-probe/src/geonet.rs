// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Geonettech order-tracking API.
//!
//! Geonettech reports order status as `data.status` in the response body,
//! one level shallower than the Telcel-style shape.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::debug;
use vendsync_core::{OrderStatus, Provider, StatusProbe, VendsyncError};

/// HTTP client for Geonettech status lookups.
///
/// Authenticates with a bearer token. The per-request timeout is set at
/// client construction so a hanging endpoint cannot extend a batch beyond
/// the configured bound.
#[derive(Debug, Clone)]
pub struct GeonetClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

/// Geonettech status response: `{ "data": { "status": "..." } }`.
#[derive(Debug, Deserialize)]
struct GeonetStatusResponse {
    data: GeonetOrderData,
}

#[derive(Debug, Deserialize)]
struct GeonetOrderData {
    status: String,
}

impl GeonetClient {
    /// Creates a new Geonettech client.
    ///
    /// # Arguments
    /// * `base_url` - API base URL without trailing slash
    /// * `api_key` - bearer token for the `Authorization` header
    /// * `timeout` - per-request timeout
    pub fn new(
        base_url: String,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, VendsyncError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                VendsyncError::Config(format!("invalid geonet.api_key header value: {e}"))
            })?,
        );
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| VendsyncError::Probe {
                provider: Provider::Geonet,
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }
}

#[async_trait]
impl StatusProbe for GeonetClient {
    fn provider(&self) -> Provider {
        Provider::Geonet
    }

    async fn check_status(&self, reference: &str) -> Result<OrderStatus, VendsyncError> {
        let url = format!("{}/order/{reference}/status", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                VendsyncError::Timeout {
                    duration: self.timeout,
                }
            } else {
                VendsyncError::Probe {
                    provider: Provider::Geonet,
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                }
            }
        })?;

        let status = response.status();
        debug!(status = %status, reference, "geonet status response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VendsyncError::Probe {
                provider: Provider::Geonet,
                message: format!("API returned {status}: {body}"),
                source: None,
            });
        }

        let parsed: GeonetStatusResponse =
            response.json().await.map_err(|e| VendsyncError::Probe {
                provider: Provider::Geonet,
                message: format!("failed to parse status response: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(OrderStatus::from_remote(&parsed.data.status))
    }
}
