use plume_bot::calls::PlumeAddresses;
use plume_bot::{EthersSubmitter, FaucetClient, PlumeConfig, Services, TaskKind, TaskLoop};

use anyhow::{Context, Result};
use core_logic::traits::Worker;
use core_logic::{setup_logger, RetryConfig, TracingSink, WalletManager, WorkerRunner};
use dotenv::dotenv;
use ethers::prelude::*;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

const DEFAULT_CONFIG_PATH: &str = "chains/plume/config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = setup_logger();
    // Keep guard alive for file logging
    std::mem::forget(_log_guard);
    dotenv().ok();

    let config_path = env::var("PLUME_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    info!("Loading config from: {}", config_path);

    let config = match PlumeConfig::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {}", e);
            return Ok(());
        }
    };

    let chain = config.chain();
    info!(
        "Configuration loaded for {} (chain ID: {})",
        chain.name, chain.chain_id
    );

    let manager = match WalletManager::load(&config.wallet_source()) {
        Ok(m) => m,
        Err(e) => {
            error!("Failed to load private keys: {}", e);
            return Ok(());
        }
    };

    let wallets = manager
        .keys()
        .iter()
        .enumerate()
        .map(|(i, key)| {
            key.expose()
                .parse::<LocalWallet>()
                .map(|w| w.with_chain_id(chain.chain_id))
                .with_context(|| format!("Private key #{} is not a valid secp256k1 key", i + 1))
        })
        .collect::<Result<Vec<_>>>()?;
    let wallets: Arc<[LocalWallet]> = Arc::from(wallets);

    info!("Loaded {} wallets.", wallets.len());
    for wallet in wallets.iter() {
        info!("Wallet address: {:?}", wallet.address());
    }

    let provider = Provider::<Http>::try_from(chain.rpc_endpoint.as_str())
        .with_context(|| format!("Invalid RPC URL: {}", chain.rpc_endpoint))?
        .interval(Duration::from_millis(2000));

    let services = Services {
        faucet: Arc::new(FaucetClient::new(config.faucet_url.clone())?),
        submitter: Arc::new(EthersSubmitter::new(
            provider,
            chain.chain_id,
            config.confirmations,
        )),
        addresses: PlumeAddresses::resolve(&config)?,
        chain,
        retry: RetryConfig::default(),
    };

    let workers: Vec<Box<dyn Worker>> = TaskKind::ALL
        .iter()
        .map(|kind| {
            let sink = Arc::new(TracingSink::new(kind.label()));
            Box::new(TaskLoop::new(*kind, wallets.clone(), services.clone(), sink)) as Box<dyn Worker>
        })
        .collect();

    WorkerRunner::run_workers(workers).await?;

    Ok(())
}
