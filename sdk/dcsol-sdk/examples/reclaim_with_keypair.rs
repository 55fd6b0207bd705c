//! Scan a keypair wallet and reclaim whatever rent it has locked up.
//!
//! ```text
//! DCSOL_KEYPAIR=~/.config/solana/id.json \
//! DCSOL_RPC_URL=https://api.mainnet-beta.solana.com \
//! RUST_LOG=dcsol_sdk=debug \
//! cargo run --example reclaim_with_keypair -- --yes
//! ```
//!
//! Without `--yes` only the scan runs.

use anyhow::{Context, Result};
use dcsol_sdk::view::{render, Body};
use dcsol_sdk::wallet::WalletAdapter;
use dcsol_sdk::{
    ApiClient, KeypairProvider, ReclaimConfig, Reclaimer, RpcConnection, WalletProvider,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ReclaimConfig::from_env()?;
    info!(api = %config.api_url, "using reclaim service");

    let keypair_path = std::env::var("DCSOL_KEYPAIR").context("DCSOL_KEYPAIR is not set")?;
    let rpc_url = std::env::var("DCSOL_RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.into());
    let confirm = std::env::args().any(|arg| arg == "--yes");

    let connection = Arc::new(RpcConnection::new(rpc_url));
    let provider = KeypairProvider::from_file(&keypair_path, connection)?;
    let wallet = WalletAdapter::new(vec![Arc::new(provider) as Arc<dyn WalletProvider>]);
    let reclaimer = Reclaimer::new(ApiClient::from_config(&config), wallet);

    let session = reclaimer.connect().await?;
    println!("Wallet: {}", session.short_address());

    for notice in reclaimer.take_notices() {
        warn!("{}", notice);
    }

    let screen = render(&reclaimer.state());
    match &screen.body {
        Body::Items { total, rows, .. } => {
            for row in rows {
                println!("  {}  {}", row.address, row.amount);
            }
            println!("Total reclaimable: {total}");
        },
        Body::Empty { message, .. } => {
            println!("{message}");
            return Ok(());
        },
        _ => return Ok(()),
    }

    if !confirm {
        println!("Re-run with --yes to reclaim.");
        return Ok(());
    }

    let receipt = reclaimer.reclaim().await?;
    println!(
        "Success! Reclaimed {} SOL.\nSignature: {}",
        receipt.reclaimed, receipt.signature
    );

    reclaimer.teardown();
    Ok(())
}
