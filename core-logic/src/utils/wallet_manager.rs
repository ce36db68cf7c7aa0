use crate::config::WalletSource;
use crate::error::{ConfigError, CoreError, WalletError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Hex encoded private key. Wiped from memory on drop, never printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(String);

impl PrivateKey {
    /// Validates and normalises a key to 64 hex chars without `0x`.
    pub fn parse(raw: &str, entry: usize) -> Result<Self, WalletError> {
        let trimmed = raw.trim();
        let hex_part = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if hex_part.len() != 64 {
            return Err(WalletError::InvalidKeyLength {
                entry,
                length: hex_part.len(),
            });
        }
        if hex::decode(hex_part).is_err() {
            return Err(WalletError::InvalidKeyFormat { entry });
        }

        Ok(Self(hex_part.to_lowercase()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(***REDACTED***)")
    }
}

pub struct WalletManager {
    keys: Vec<PrivateKey>,
}

impl WalletManager {
    /// Loads keys from the configured source.
    ///
    /// A relative file path is tried in the current directory first, then at
    /// the workspace root (`../../`), so the binary works from either place.
    pub fn load(source: &WalletSource) -> Result<Self, CoreError> {
        let keys = match source {
            WalletSource::File { path } => {
                let resolved = Self::resolve_path(path).ok_or_else(|| {
                    ConfigError::FileNotFound { path: path.clone() }
                })?;
                info!("[WalletManager] Loading raw keys from {:?}", resolved);
                let content = fs::read_to_string(&resolved).map_err(|e| ConfigError::IoError {
                    path: resolved.display().to_string(),
                    msg: e.to_string(),
                })?;
                Self::parse_lines(&content)?
            }
            WalletSource::Env { key } => {
                let value = std::env::var(key).map_err(|_| ConfigError::MissingField {
                    field: key.clone(),
                })?;
                Self::parse_list(&value)?
            }
        };

        if keys.is_empty() {
            return Err(WalletError::NoKeys {
                source_name: format!("{:?}", source),
            }
            .into());
        }

        debug!("[WalletManager] Loaded {} keys", keys.len());
        Ok(Self { keys })
    }

    /// One key per line; blank lines and `#` comments are skipped.
    pub fn parse_lines(content: &str) -> Result<Vec<PrivateKey>, WalletError> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .enumerate()
            .map(|(i, line)| PrivateKey::parse(line, i + 1))
            .collect()
    }

    /// Comma separated keys, as found in a `PRIVATE_KEYS` style variable.
    pub fn parse_list(value: &str) -> Result<Vec<PrivateKey>, WalletError> {
        value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .enumerate()
            .map(|(i, part)| PrivateKey::parse(part, i + 1))
            .collect()
    }

    fn resolve_path(path: &str) -> Option<PathBuf> {
        let direct = PathBuf::from(path);
        if direct.is_file() {
            return Some(direct);
        }
        if direct.is_relative() {
            let from_root = Path::new("../..").join(path);
            if from_root.is_file() {
                return Some(from_root);
            }
        }
        None
    }

    /// Returns the number of available wallets
    pub fn count(&self) -> usize {
        self.keys.len()
    }

    pub fn keys(&self) -> &[PrivateKey] {
        &self.keys
    }
}
