//! Depot Tag Sync - CLI
//!
//! Mirrors EV charging depot telemetry into the tag database, either once
//! (suitable for a cron job or gateway timer) or as a long-running poller.
//!
//! ```sh
//! # One run with default config (~/.config/depot-sync/config.toml)
//! depot-sync run
//!
//! # Poll until Ctrl+C
//! depot-sync --config /etc/depot-sync/config.toml watch
//!
//! # Inspect stored tags
//! depot-sync tags --prefix "[default]ChargePilot/Status"
//!
//! # Validate config without running
//! depot-sync --check
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use depot_sync::config::AppConfig;
use depot_sync::telemetry::{init_tracing, install_metrics};
use depot_sync::{runtime, ShutdownSignal};

/// Depot tag sync - charging depot telemetry to tag database.
#[derive(Parser, Debug)]
#[command(name = "depot-sync", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "DEPOT_SYNC_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the charging information API URL.
    #[arg(long, global = true)]
    url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Validate the configuration file and exit.
    #[arg(long)]
    check: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch once, write all tags and exit (status 1 on failure).
    Run,
    /// Poll at the configured interval until SIGINT/SIGTERM.
    Watch,
    /// List stored tags and their last values.
    Tags {
        /// Only tags whose path starts with this prefix.
        #[arg(short, long, default_value = "")]
        prefix: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(depot_sync::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config.logging);

    if let Some(e) = load_error {
        error!("Failed to load config from {}: {}", config_path.display(), e);
        if cli.check {
            return ExitCode::FAILURE;
        }
        error!("Using default configuration.");
    } else {
        info!("Configuration loaded from {}", config_path.display());
    }

    if let Some(url) = cli.url {
        info!("CLI override: api.url = {}", url);
        config.api.url = url;
    }

    if cli.check {
        return check(&config, &config_path);
    }

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => run_once(&config).await,
        Command::Watch => watch(&config).await,
        Command::Tags { prefix } => list_tags(&config, &prefix).await,
    }
}

fn check(config: &AppConfig, path: &std::path::Path) -> ExitCode {
    if let Err(e) = config.validate() {
        eprintln!("Configuration is invalid: {}", e);
        return ExitCode::FAILURE;
    }
    println!("Configuration is valid");
    println!("   Config file : {}", path.display());
    println!("   API URL     : {}", config.api.url);
    println!("   Tag root    : {}", config.tags.base_path);
    println!("   Batch size  : {}", config.tags.batch_size);
    println!("   Threshold   : {}%", config.tags.success_threshold_percent);
    println!("   Store       : {:?} ({})", config.store.backend, config.store.database_url);
    println!("   Interval    : {}s", config.poll.interval_secs);
    println!("   Log level   : {}", config.logging.level);
    ExitCode::SUCCESS
}

async fn run_once(config: &AppConfig) -> ExitCode {
    let store = match runtime::build_store(config).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open tag store: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let service = match runtime::build_service(config, store) {
        Ok(service) => service,
        Err(e) => {
            error!("Failed to build sync service: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if service.run().await {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn watch(config: &AppConfig) -> ExitCode {
    if let Err(e) = install_metrics(config) {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    let store = match runtime::build_store(config).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open tag store: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let shutdown = ShutdownSignal::new();
    shutdown.install_os_handlers();
    info!("Press Ctrl+C to stop.");

    match runtime::watch(config, store, shutdown).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to start poller: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn list_tags(config: &AppConfig, prefix: &str) -> ExitCode {
    let store = match runtime::build_store(config).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open tag store: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match store.browse(prefix).await {
        Ok(records) => {
            for record in &records {
                let value = record
                    .value
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "<no value>".to_string());
                println!("{} [{}] = {}", record.path, record.data_type, value);
            }
            println!("{} tags", records.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to browse tags: {}", e);
            ExitCode::FAILURE
        }
    }
}
