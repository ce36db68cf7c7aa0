use serde::{Deserialize, Serialize};

/// Where a chain crate reads its private keys from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletSource {
    /// Plain text file, one hex key per line, `#` starts a comment.
    File { path: String },
    /// Environment variable holding comma separated hex keys.
    Env { key: String },
}

impl Default for WalletSource {
    fn default() -> Self {
        WalletSource::File {
            path: "pv.txt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    pub name: String,
    pub rpc_endpoint: String,
    pub chain_id: u64,
    pub explorer_tx_url: String,
}

impl ChainConfig {
    /// Explorer link for a transaction hash (`0x..`).
    pub fn tx_link(&self, tx_hash: &str) -> String {
        format!("{}{}", self.explorer_tx_url, tx_hash)
    }
}
