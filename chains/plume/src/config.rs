use crate::constants;
use anyhow::Result;
use config::{Config, Environment, File};
use core_logic::{ChainConfig, ConfigError, WalletSource};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct PlumeConfig {
    pub rpc_url: String,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Faucet contract that redeems claim signatures.
    pub faucet_contract: String,
    #[serde(default = "default_faucet_url")]
    pub faucet_url: String,
    #[serde(default = "default_confirmations")]
    pub confirmations: usize,
    /// Plain text key file; falls back to `pv.txt`.
    #[serde(default)]
    pub private_key_file: Option<String>,
    /// Read keys from this environment variable instead of a file.
    #[serde(default)]
    pub private_keys_env: Option<String>,
}

fn default_chain_id() -> u64 {
    constants::CHAIN_ID
}

fn default_faucet_url() -> String {
    constants::FAUCET_API_URL.to_string()
}

fn default_confirmations() -> usize {
    1
}

impl PlumeConfig {
    /// Loads `path` (optional) overlaid with `PLUME_*` environment variables.
    pub fn load(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("PLUME"))
            .build()?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!(e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rpc_url.starts_with("http://") || self.rpc_url.starts_with("https://")) {
            return Err(ConfigError::InvalidRpcUrl {
                url: self.rpc_url.clone(),
            });
        }
        if self.faucet_contract.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "faucet_contract".to_string(),
            });
        }
        if self.confirmations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "confirmations".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn wallet_source(&self) -> WalletSource {
        match (&self.private_keys_env, &self.private_key_file) {
            (Some(key), _) => WalletSource::Env { key: key.clone() },
            (None, Some(path)) => WalletSource::File { path: path.clone() },
            (None, None) => WalletSource::default(),
        }
    }

    pub fn chain(&self) -> ChainConfig {
        ChainConfig {
            name: constants::CHAIN_NAME.to_string(),
            rpc_endpoint: self.rpc_url.clone(),
            chain_id: self.chain_id,
            explorer_tx_url: constants::EXPLORER_TX_URL.to_string(),
        }
    }
}
