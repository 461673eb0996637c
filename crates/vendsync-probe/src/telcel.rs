// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Telcel-style transaction-tracking API.
//!
//! This provider nests the status one level deeper than Geonettech:
//! `data.order.status`. Authentication is an `x-api-key` header rather
//! than a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::debug;
use vendsync_core::{OrderStatus, Provider, StatusProbe, VendsyncError};

/// HTTP client for Telcel-style status lookups.
#[derive(Debug, Clone)]
pub struct TelcelClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

/// Telcel status response: `{ "data": { "order": { "status": "..." } } }`.
#[derive(Debug, Deserialize)]
struct TelcelStatusResponse {
    data: TelcelData,
}

#[derive(Debug, Deserialize)]
struct TelcelData {
    order: TelcelOrder,
}

#[derive(Debug, Deserialize)]
struct TelcelOrder {
    status: String,
}

impl TelcelClient {
    /// Creates a new Telcel client with the `x-api-key` header preset.
    pub fn new(
        base_url: String,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, VendsyncError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).map_err(|e| {
                VendsyncError::Config(format!("invalid telcel.api_key header value: {e}"))
            })?,
        );
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| VendsyncError::Probe {
                provider: Provider::Telcel,
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
impl StatusProbe for TelcelClient {
    fn provider(&self) -> Provider {
        Provider::Telcel
    }

    async fn check_status(&self, reference: &str) -> Result<OrderStatus, VendsyncError> {
        let url = format!("{}/orders/{reference}", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                VendsyncError::Timeout {
                    duration: self.timeout,
                }
            } else {
                VendsyncError::Probe {
                    provider: Provider::Telcel,
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                }
            }
        })?;

        let status = response.status();
        debug!(status = %status, reference, "telcel status response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VendsyncError::Probe {
                provider: Provider::Telcel,
                message: format!("API returned {status}: {body}"),
                source: None,
            });
        }

        let parsed: TelcelStatusResponse =
            response.json().await.map_err(|e| VendsyncError::Probe {
                provider: Provider::Telcel,
                message: format!("failed to parse status response: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(OrderStatus::from_remote(&parsed.data.order.status))
    }
}
