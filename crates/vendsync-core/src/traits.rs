// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the reconciliation engine and remote HTTP surfaces.
//!
//! Both traits use `#[async_trait]` for dynamic dispatch: the reconciler
//! holds `Arc<dyn StatusProbe>` per provider, and tests substitute
//! in-memory doubles for the HTTP clients.

use async_trait::async_trait;

use crate::error::VendsyncError;
use crate::types::{OrderStatus, Provider, PurchaseRecord};

/// One page of purchase records from the platform list endpoint.
#[derive(Debug, Clone)]
pub struct PurchasePage {
    /// Records on this page, in platform order.
    pub purchases: Vec<PurchaseRecord>,
    /// 1-based page number of this page.
    pub page: u32,
    /// Total number of pages available.
    pub total_pages: u32,
}

/// Source of purchase records (the platform's paginated list endpoint).
#[async_trait]
pub trait PurchaseSource: Send + Sync {
    /// Fetch one page of purchases. `page` is 1-based.
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<PurchasePage, VendsyncError>;
}

/// A status-check client for one provider's order-tracking API.
///
/// Probers are stateless lookups: they never mutate the purchase store and
/// never retry. Retries happen only via the next scheduled or manual
/// reconciliation pass.
#[async_trait]
pub trait StatusProbe: Send + Sync {
    /// Which provider this probe serves.
    fn provider(&self) -> Provider;

    /// Look up the freshest status for one external reference.
    async fn check_status(&self, reference: &str) -> Result<OrderStatus, VendsyncError>;
}
