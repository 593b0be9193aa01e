//! Vesu Rebalance Trigger CLI
//!
//! Command-line interface for checking and rebalancing a Vesu strategy.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vesu_rebalance::audit::{AuditEntry, AuditLog};
use vesu_rebalance::config::gateway_api_key;
use vesu_rebalance::gateway::{GatewayAccount, GatewayClient, GatewayPricer, GatewayStrategy};
use vesu_rebalance::rpc::StarknetRpc;
use vesu_rebalance::{Config, RebalanceTrigger, Result, RpcConfig, RunOptions};

#[derive(Parser)]
#[command(name = "vesu-rebalance")]
#[command(about = "Rebalance a Vesu lending strategy when it improves net APY")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the strategy and rebalance if the projected APY is better
    Rebalance {
        /// Minimum APY improvement (overrides rebalance.min_apy_improvement)
        #[arg(long)]
        min_improvement: Option<f64>,

        /// Dry run - decide but don't submit the rebalance
        #[arg(long)]
        dry_run: bool,
    },

    /// Deposit into the strategy from the configured account
    Deposit {
        /// Amount in asset units (e.g. 1.5)
        #[arg(long)]
        amount: String,
    },

    /// Show strategy TVL and the account's share
    Tvl,

    /// Show the strategy's per-pool allocation
    Positions,

    /// Show current configuration
    Config,
}

fn init_logging(verbose: bool, json: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let layer = if json {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().boxed()
    };

    tracing_subscriber::registry().with(filter).with(layer).init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn build_trigger(config: &Config) -> Result<RebalanceTrigger> {
    let descriptor = config.strategy_descriptor()?;
    let client = Arc::new(GatewayClient::new(&config.gateway, gateway_api_key())?);

    let pricer = GatewayPricer::new(client.clone(), config.pricer.poll_interval())
        .with_ready_timeout(config.pricer.ready_timeout());
    let strategy = GatewayStrategy::new(client.clone(), descriptor);
    let account = GatewayAccount::new(client, config.account.clone(), config.account_address()?);
    let rpc = StarknetRpc::new(&RpcConfig::from_env(), &config.confirmation);

    tracing::info!(
        strategy = descriptor.id,
        name = descriptor.name,
        account = %config.account,
        gateway = %config.gateway.url,
        "Strategy loaded"
    );

    Ok(RebalanceTrigger::new(
        Arc::new(pricer),
        Arc::new(strategy),
        Arc::new(account),
        Arc::new(rpc),
    ))
}

/// Record the outcome in the audit log, if one is configured
fn audit<T: Serialize>(config: &Config, command: &'static str, outcome: &Result<T>) {
    let Some(path) = &config.audit_log_path else {
        return;
    };
    let entry = AuditEntry::from_outcome(command, &config.strategy, outcome);
    if let Err(e) = AuditLog::new(path).write(&entry) {
        tracing::warn!(error = %e, path = %path, "Failed to write audit log");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json_logs);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Rebalance {
            min_improvement,
            dry_run,
        } => {
            let mut settings = config.rebalance.clone();
            if min_improvement.is_some() {
                settings.min_apy_improvement = min_improvement;
            }
            let options = RunOptions {
                min_apy_improvement: settings.margin()?,
                dry_run,
            };

            let trigger = build_trigger(&config)?;
            let outcome = trigger.run(options).await;
            audit(&config, "rebalance", &outcome);
            print_json(&outcome?)?;
        }
        Commands::Deposit { amount } => {
            let trigger = build_trigger(&config)?;
            let outcome = trigger.deposit(&amount).await;
            audit(&config, "deposit", &outcome);
            print_json(&outcome?)?;
        }
        Commands::Tvl => {
            let report = build_trigger(&config)?.tvl().await?;
            print_json(&report)?;
        }
        Commands::Positions => {
            let pools = build_trigger(&config)?.positions().await?;
            print_json(&pools)?;
        }
        Commands::Config => {
            print_json(&config)?;
        }
    }

    Ok(())
}
