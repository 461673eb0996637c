// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `list` subcommand: fetch purchases and print the filtered view.

use vendsync_config::VendsyncConfig;
use vendsync_core::{OrderStatus, Provider, VendsyncError};
use vendsync_store::{ProviderFilter, StatusFilter, ViewQuery};

use crate::engine;

pub async fn run(
    config: &VendsyncConfig,
    search: &str,
    status: &str,
    network: &str,
) -> Result<(), VendsyncError> {
    let query = ViewQuery {
        search: search.to_string(),
        status: parse_status_filter(status)?,
        provider: parse_provider_filter(network)?,
    };

    let records = engine::fetch_purchases(config).await?;
    let view = vendsync_store::project(&records, &query);

    println!(
        "{:<26} {:<10} {:<12} {:<8} {:>8}  {}",
        "ID", "NETWORK", "PHONE", "SIZE", "PRICE", "STATUS"
    );
    for record in &view {
        println!(
            "{:<26} {:<10} {:<12} {:<8} {:>8.2}  {}",
            record.id,
            record.provider.display_name(),
            record.phone_number,
            record.capacity,
            record.price,
            record.status,
        );
    }
    println!("{} of {} purchase(s)", view.len(), records.len());

    Ok(())
}

fn parse_status_filter(raw: &str) -> Result<StatusFilter, VendsyncError> {
    if raw.eq_ignore_ascii_case("all") {
        return Ok(StatusFilter::All);
    }
    raw.to_ascii_lowercase()
        .parse::<OrderStatus>()
        .map(StatusFilter::Only)
        .map_err(|_| VendsyncError::Config(format!("unknown status filter `{raw}`")))
}

fn parse_provider_filter(raw: &str) -> Result<ProviderFilter, VendsyncError> {
    if raw.eq_ignore_ascii_case("all") {
        return Ok(ProviderFilter::All);
    }
    raw.to_ascii_uppercase()
        .parse::<Provider>()
        .map(ProviderFilter::Only)
        .map_err(|_| VendsyncError::Config(format!("unknown network filter `{raw}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_parses_case_insensitively() {
        assert_eq!(parse_status_filter("all").unwrap(), StatusFilter::All);
        assert_eq!(
            parse_status_filter("Completed").unwrap(),
            StatusFilter::Only(OrderStatus::Completed)
        );
        assert!(parse_status_filter("shipped").is_err());
    }

    #[test]
    fn provider_filter_parses_case_insensitively() {
        assert_eq!(parse_provider_filter("ALL").unwrap(), ProviderFilter::All);
        assert_eq!(
            parse_provider_filter("geonet").unwrap(),
            ProviderFilter::Only(Provider::Geonet)
        );
        assert!(parse_provider_filter("vodafone").is_err());
    }
}
