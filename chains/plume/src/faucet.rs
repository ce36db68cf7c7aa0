//! Faucet signature client.
//!
//! The faucet service hands out a single-use `{salt, signature}` pair that the
//! on-chain faucet contract checks before releasing tokens.

use crate::error::AuthError;
use async_trait::async_trait;
use ethers::types::{Address, Bytes, H256};
use ethers::utils::to_checksum;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Tokens the faucet dispenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaucetToken {
    Eth,
    Goon,
}

impl FaucetToken {
    pub fn symbol(&self) -> &'static str {
        match self {
            FaucetToken::Eth => "ETH",
            FaucetToken::Goon => "GOON",
        }
    }
}

impl fmt::Display for FaucetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Single-use claim authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimSignature {
    pub salt: H256,
    pub signature: Bytes,
}

impl ClaimSignature {
    pub const SIGNATURE_LEN: usize = 65;

    pub fn from_hex(salt: &str, signature: &str) -> Result<Self, AuthError> {
        let salt_bytes = decode_hex("salt", salt)?;
        if salt_bytes.len() != 32 {
            return Err(AuthError::InvalidResponse {
                reason: format!("salt must be 32 bytes, got {}", salt_bytes.len()),
            });
        }

        let signature_bytes = decode_hex("signature", signature)?;
        if signature_bytes.len() != Self::SIGNATURE_LEN {
            return Err(AuthError::InvalidResponse {
                reason: format!(
                    "signature must be {} bytes, got {}",
                    Self::SIGNATURE_LEN,
                    signature_bytes.len()
                ),
            });
        }

        Ok(Self {
            salt: H256::from_slice(&salt_bytes),
            signature: Bytes::from(signature_bytes),
        })
    }
}

fn decode_hex(field: &str, value: &str) -> Result<Vec<u8>, AuthError> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(stripped).map_err(|e| AuthError::InvalidResponse {
        reason: format!("{} is not valid hex: {}", field, e),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FaucetRequest<'a> {
    wallet_address: String,
    token: &'a str,
}

#[derive(Debug, Deserialize)]
struct FaucetResponse {
    salt: String,
    signature: String,
}

#[async_trait]
pub trait FaucetApi: Send + Sync {
    /// Requests a fresh claim signature for `address` and `token`.
    async fn request_signature(
        &self,
        address: Address,
        token: FaucetToken,
    ) -> Result<ClaimSignature, AuthError>;
}

pub struct FaucetClient {
    http: Client,
    endpoint: String,
}

impl FaucetClient {
    pub fn new(endpoint: impl Into<String>) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build faucet HTTP client: {}", e))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

/// Maps the faucet's HTTP status to an error, leaving 2xx responses alone.
fn check_status(status: StatusCode, body: &str) -> Result<(), AuthError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(AuthError::RateLimited);
    }
    if !status.is_success() {
        return Err(AuthError::Http {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }
    Ok(())
}

fn parse_response(body: &str) -> Result<ClaimSignature, AuthError> {
    let raw: FaucetResponse =
        serde_json::from_str(body).map_err(|e| AuthError::InvalidResponse {
            reason: e.to_string(),
        })?;
    ClaimSignature::from_hex(&raw.salt, &raw.signature)
}

#[async_trait]
impl FaucetApi for FaucetClient {
    async fn request_signature(
        &self,
        address: Address,
        token: FaucetToken,
    ) -> Result<ClaimSignature, AuthError> {
        let body = FaucetRequest {
            wallet_address: to_checksum(&address, None),
            token: token.symbol(),
        };

        let response = self.http.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        check_status(status, &text)?;
        debug!("Faucet answered {} for {}", status, body.wallet_address);
        parse_response(&text)
    }
}
