// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Paginated purchase list client for the reselling-platform API.
//!
//! `GET {base}/purchases?page=&limit=` returns
//! `{ "status": "success", "data": { "purchases": [...], "pagination": {...} } }`.
//! Wire records are mapped into [`PurchaseRecord`] here; the rest of the
//! engine never sees the platform's JSON vocabulary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};
use vendsync_core::{
    OrderStatus, Provider, PurchasePage, PurchaseRecord, PurchaseSource, VendsyncError,
};

/// HTTP client for the platform's purchase list endpoint.
#[derive(Debug, Clone)]
pub struct PurchaseListClient {
    client: reqwest::Client,
    base_url: String,
}

/// Envelope of the list endpoint.
#[derive(Debug, Deserialize)]
struct ListResponse {
    status: String,
    data: ListData,
}

#[derive(Debug, Deserialize)]
struct ListData {
    purchases: Vec<WirePurchase>,
    pagination: WirePagination,
}

#[derive(Debug, Deserialize)]
struct WirePagination {
    #[serde(rename = "currentPage")]
    current_page: u32,
    #[serde(rename = "totalPages")]
    total_pages: u32,
}

/// One purchase as the platform serializes it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePurchase {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    phone_number: String,
    #[serde(default)]
    network: String,
    // The platform emits capacity as both a number and a string.
    #[serde(default, deserialize_with = "capacity_from_any")]
    capacity: String,
    #[serde(default)]
    price: f64,
    #[serde(default)]
    status: String,
    #[serde(default)]
    geonet_reference: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

fn capacity_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl From<WirePurchase> for PurchaseRecord {
    fn from(wire: WirePurchase) -> Self {
        let reference = wire
            .geonet_reference
            .filter(|r| !r.trim().is_empty());
        PurchaseRecord {
            id: wire.id,
            external_reference: reference,
            provider: Provider::from_network(&wire.network),
            status: OrderStatus::from_remote(&wire.status),
            phone_number: wire.phone_number,
            capacity: wire.capacity,
            price: wire.price,
            created_at: wire.created_at,
            last_checked: None,
        }
    }
}

impl PurchaseListClient {
    /// Creates a new list client.
    ///
    /// `auth_token`, when present, is sent as a bearer token. Credentials are
    /// injected here; no component reads ambient storage.
    pub fn new(base_url: String, auth_token: Option<&str>) -> Result<Self, VendsyncError> {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("application/json"));
        if let Some(token) = auth_token {
            headers.insert(
                "authorization",
                HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                    VendsyncError::Config(format!("invalid platform.auth_token header value: {e}"))
                })?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| VendsyncError::List {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PurchaseSource for PurchaseListClient {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<PurchasePage, VendsyncError> {
        let url = format!("{}/purchases", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await
            .map_err(|e| VendsyncError::List {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let http_status = response.status();
        debug!(status = %http_status, page, "purchase list response received");

        if !http_status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VendsyncError::List {
                message: format!("API returned {http_status}: {body}"),
                source: None,
            });
        }

        let parsed: ListResponse = response.json().await.map_err(|e| VendsyncError::List {
            message: format!("failed to parse list response: {e}"),
            source: Some(Box::new(e)),
        })?;

        if parsed.status != "success" {
            return Err(VendsyncError::List {
                message: format!("API reported status `{}`", parsed.status),
                source: None,
            });
        }

        Ok(PurchasePage {
            purchases: parsed.data.purchases.into_iter().map(Into::into).collect(),
            page: parsed.data.pagination.current_page,
            total_pages: parsed.data.pagination.total_pages,
        })
    }
}

/// Fetch every page from a purchase source.
///
/// Pages are fetched sequentially until the reported total is reached. Any
/// page failure aborts the whole load: the caller gets an error and no
/// partial store is created.
pub async fn load_all(
    source: &dyn PurchaseSource,
    page_size: u32,
) -> Result<Vec<PurchaseRecord>, VendsyncError> {
    let mut records = Vec::new();
    let mut page = 1;

    loop {
        let fetched = source.fetch_page(page, page_size).await?;
        let total_pages = fetched.total_pages;
        let count = fetched.purchases.len();
        records.extend(fetched.purchases);

        if page >= total_pages || count == 0 {
            break;
        }
        page += 1;
    }

    info!(records = records.len(), pages = page, "purchase list loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn wire_purchase(id: &str, status: &str, capacity: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "_id": id,
            "phoneNumber": "0551234567",
            "network": "mtn",
            "capacity": capacity,
            "price": 23.5,
            "status": status,
            "geonetReference": format!("REF-{id}"),
            "createdAt": "2026-08-01T10:00:00Z"
        })
    }

    fn page_body(purchases: Vec<serde_json::Value>, page: u32, total: u32) -> serde_json::Value {
        serde_json::json!({
            "status": "success",
            "data": {
                "purchases": purchases,
                "pagination": {"currentPage": page, "totalPages": total}
            }
        })
    }

    #[tokio::test]
    async fn fetch_page_maps_wire_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/purchases"))
            .and(query_param("page", "1"))
            .and(query_param("limit", "50"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
                vec![wire_purchase("p1", "pending", serde_json::json!("5GB"))],
                1,
                1,
            )))
            .mount(&server)
            .await;

        let client = PurchaseListClient::new(server.uri(), Some("tok-1")).unwrap();
        let page = client.fetch_page(1, 50).await.unwrap();

        assert_eq!(page.total_pages, 1);
        assert_eq!(page.purchases.len(), 1);
        let rec = &page.purchases[0];
        assert_eq!(rec.id, "p1");
        assert_eq!(rec.provider, Provider::Geonet);
        assert_eq!(rec.status, OrderStatus::Pending);
        assert_eq!(rec.external_reference.as_deref(), Some("REF-p1"));
        assert_eq!(rec.capacity, "5GB");
        assert!(rec.created_at.is_some());
    }

    #[tokio::test]
    async fn numeric_capacity_is_accepted() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/purchases"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
                vec![wire_purchase("p1", "pending", serde_json::json!(10))],
                1,
                1,
            )))
            .mount(&server)
            .await;

        let client = PurchaseListClient::new(server.uri(), None).unwrap();
        let page = client.fetch_page(1, 50).await.unwrap();
        assert_eq!(page.purchases[0].capacity, "10");
    }

    #[tokio::test]
    async fn load_all_walks_every_page() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/purchases"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
                vec![wire_purchase("p1", "pending", serde_json::json!("5"))],
                1,
                2,
            )))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/purchases"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
                vec![wire_purchase("p2", "completed", serde_json::json!("10"))],
                2,
                2,
            )))
            .mount(&server)
            .await;

        let client = PurchaseListClient::new(server.uri(), None).unwrap();
        let records = load_all(&client, 50).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "p1");
        assert_eq!(records[1].id, "p2");
    }

    #[tokio::test]
    async fn non_success_envelope_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/purchases"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "error",
                "data": {"purchases": [], "pagination": {"currentPage": 1, "totalPages": 1}}
            })))
            .mount(&server)
            .await;

        let client = PurchaseListClient::new(server.uri(), None).unwrap();
        let err = client.fetch_page(1, 50).await.unwrap_err();
        assert!(err.to_string().contains("error"), "got: {err}");
    }

    #[tokio::test]
    async fn http_failure_aborts_load_with_no_partial_result() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/purchases"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
                vec![wire_purchase("p1", "pending", serde_json::json!("5"))],
                1,
                2,
            )))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/purchases"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = PurchaseListClient::new(server.uri(), None).unwrap();
        assert!(load_all(&client, 50).await.is_err());
    }
}
