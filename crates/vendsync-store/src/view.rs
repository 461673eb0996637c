// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! View projection: the derived, filtered list shown to users.
//!
//! A pure function of (records, query). It never mutates the store and
//! preserves the store's relative order (stable filter, not a re-sort).

use vendsync_core::{OrderStatus, Provider, PurchaseRecord};

/// Status filter: everything, or exactly one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

/// Provider/network filter: everything, or exactly one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderFilter {
    #[default]
    All,
    Only(Provider),
}

/// Filter criteria for the projected view.
#[derive(Debug, Clone, Default)]
pub struct ViewQuery {
    /// Free-text search term. Empty matches everything.
    pub search: String,
    pub status: StatusFilter,
    pub provider: ProviderFilter,
}

impl ViewQuery {
    fn matches(&self, record: &PurchaseRecord) -> bool {
        if let StatusFilter::Only(status) = self.status
            && record.status != status
        {
            return false;
        }

        if let ProviderFilter::Only(provider) = self.provider
            && record.provider != provider
        {
            return false;
        }

        let term = self.search.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        record.phone_number.to_lowercase().contains(&term)
            || record
                .external_reference
                .as_deref()
                .is_some_and(|r| r.to_lowercase().contains(&term))
            || record
                .provider
                .display_name()
                .to_lowercase()
                .contains(&term)
    }
}

/// Project the displayed subset out of the store's records.
///
/// Returns borrowed records in their original relative order.
pub fn project<'a>(records: &'a [PurchaseRecord], query: &ViewQuery) -> Vec<&'a PurchaseRecord> {
    records.iter().filter(|r| query.matches(r)).collect()
}
