mod stdio;

use std::sync::Arc;

use clap::Parser;
use rolaid_core::impls::StaticContractStore;
use rolaid_core::{AddressKey, PerformerBuilder, PerformerConfig, WorkerGroup};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::stdio::StdioTaskSource;

#[derive(Debug, Parser)]
#[command(name = "rolaid-performer")]
#[command(about = "Validates auction settlement / insurance payout tasks and returns their commitments")]
struct Args {
    /// Concurrent workers pulling from stdin.
    #[arg(long, default_value_t = 1)]
    workers: usize,

    #[arg(long, default_value = "info")]
    log: String,

    /// Refuse to start unless AUCTION_SERVICE_ADDRESS and SETTLEMENT_VAULT_ADDRESS are set.
    #[arg(long)]
    require_defaults: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env が無いのは正常
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    // stdout は結果の出力に使うのでログは stderr へ
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log))
        .with_writer(std::io::stderr)
        .init();

    let config = PerformerConfig::from_env();
    info!(
        l1_rpc_url = ?config.l1_rpc_url,
        l2_rpc_url = ?config.l2_rpc_url,
        auction_service = ?config.default_address(AddressKey::AuctionService),
        settlement_vault = ?config.default_address(AddressKey::SettlementVault),
        "loaded configuration"
    );

    let mut builder = PerformerBuilder::new(config);
    match StaticContractStore::from_env() {
        Ok(Some(store)) => builder = builder.chain_lookup(Arc::new(store)),
        Ok(None) => {}
        Err(e) => warn!("failed to load contract store: {e}"),
    }
    if args.require_defaults {
        builder = builder.require_defaults(&AddressKey::ALL);
    }
    let router = Arc::new(builder.build()?);

    let workers = args.workers.max(1);
    info!(workers, "starting performer on stdin");
    let group = WorkerGroup::spawn(workers, Arc::new(StdioTaskSource::new()), router);

    group
        .join_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("ctrl-c handler unavailable: {e}");
                std::future::pending::<()>().await;
            }
            info!("shutdown requested");
        })
        .await;

    info!("performer stopped");
    Ok(())
}
