// SPDX-FileCopyrightText: 2026 Vendsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vendsync - order-status reconciliation for mobile data bundle vendors.
//!
//! This is the binary entry point for the Vendsync CLI.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod engine;
mod list;
mod oneshot;
mod watch;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vendsync_config::VendsyncConfig;

/// Vendsync - order-status reconciliation for mobile data bundle vendors.
#[derive(Parser, Debug)]
#[command(name = "vendsync", version, about, long_about = None)]
struct Cli {
    /// Path to a specific config file (overrides the XDG hierarchy).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the auto-refresh scheduler until interrupted.
    Watch,
    /// Run one reconciliation pass (or probe a single purchase) and exit.
    Sync {
        /// Probe only this purchase id instead of the whole outstanding set.
        #[arg(long)]
        id: Option<String>,
    },
    /// Fetch purchases and print the filtered view.
    List {
        /// Free-text search over phone number, reference, and network name.
        #[arg(long, default_value = "")]
        search: String,
        /// Status filter (pending, processing, waiting, completed, failed,
        /// refunded, unknown) or "all".
        #[arg(long, default_value = "all")]
        status: String,
        /// Network filter (GEONET, TELCEL) or "all".
        #[arg(long, default_value = "all")]
        network: String,
    },
    /// Print the resolved configuration with secrets redacted.
    Config,
}

fn load_config(cli: &Cli) -> VendsyncConfig {
    let loaded = match &cli.config {
        Some(path) => vendsync_config::load_and_validate_path(path),
        None => vendsync_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            vendsync_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(&cli);
    init_tracing(&config.service.log_level);

    let result = match cli.command {
        Commands::Watch => watch::run(&config).await,
        Commands::Sync { id } => oneshot::run(&config, id.as_deref()).await,
        Commands::List {
            search,
            status,
            network,
        } => list::run(&config, &search, &status, &network).await,
        Commands::Config => {
            print_config(&config);
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        std::process::exit(1);
    }
}

/// Print the resolved configuration as TOML with credentials redacted.
fn print_config(config: &VendsyncConfig) {
    let mut redacted = config.clone();
    redacted.platform.auth_token = redacted.platform.auth_token.map(|_| "<redacted>".into());
    redacted.geonet.api_key = redacted.geonet.api_key.map(|_| "<redacted>".into());
    redacted.telcel.api_key = redacted.telcel.api_key.map(|_| "<redacted>".into());

    match toml::to_string_pretty(&redacted) {
        Ok(rendered) => print!("{rendered}"),
        Err(e) => eprintln!("failed to render config: {e}"),
    }
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn default_config_is_valid() {
        let config = vendsync_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.service.name, "vendsync");
        assert_eq!(config.sync.refresh_interval_secs, 300);
    }

    #[test]
    fn redaction_hides_credentials() {
        let mut config = vendsync_config::VendsyncConfig::default();
        config.platform.auth_token = Some("secret-token".into());
        // print_config itself writes to stdout; assert on the redacted copy.
        let mut redacted = config.clone();
        redacted.platform.auth_token = redacted.platform.auth_token.map(|_| "<redacted>".into());
        let rendered = toml::to_string_pretty(&redacted).unwrap();
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
