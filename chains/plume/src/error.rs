//! Error kinds produced by the faucet client and the transaction submitter.
//!
//! Raw provider messages are turned into [`TxError`] variants in exactly one
//! place, [`TxError::from_provider_message`]. Everything downstream (task code,
//! retry classification) matches on variants, never on strings.

use core_logic::{is_transient_message, RetryDecision};
use ethers::types::H256;
use thiserror::Error;

/// Faucet HTTP failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Faucet request failed: {0}")]
    Transport(String),

    #[error("Faucet rate limited the request (HTTP 429)")]
    RateLimited,

    #[error("Faucet returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid faucet response: {reason}")]
    InvalidResponse { reason: String },
}

impl AuthError {
    pub fn retry_decision(&self) -> RetryDecision {
        match self {
            AuthError::Transport(_) | AuthError::RateLimited => RetryDecision::Backoff,
            AuthError::Http { status, .. } if *status >= 500 => RetryDecision::Backoff,
            AuthError::Http { .. } | AuthError::InvalidResponse { .. } => {
                RetryDecision::Unclassified
            }
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AuthError::InvalidResponse {
                reason: e.to_string(),
            }
        } else if e.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS) {
            AuthError::RateLimited
        } else {
            AuthError::Transport(e.to_string())
        }
    }
}

/// Transaction submission failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TxError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Claim signature rejected ({message})")]
    StaleSignature { message: String },

    #[error("Rate limited by RPC: {message}")]
    RateLimited { message: String },

    #[error("Transient RPC failure: {message}")]
    Transient { message: String },

    #[error("Insufficient {token} balance for {action}.")]
    InsufficientBalance { token: String, action: String },

    #[error("Token transfer failed (TF): {message}")]
    TransferFailed { message: String },

    #[error("Insufficient ETH balance for gas: {message}")]
    InsufficientGas { message: String },

    #[error("Approve Failed! {reason}")]
    ApprovalFailed { reason: String },

    #[error("Transaction reverted: {reason}")]
    Reverted { reason: String },

    #[error("Transaction {tx_hash:?} was dropped before confirmation")]
    Unconfirmed { tx_hash: H256 },

    #[error("Transaction error: {message}")]
    Other { message: String },
}

impl TxError {
    /// Maps a provider/RPC error message to a structured kind.
    pub fn from_provider_message(message: &str) -> Self {
        let lower = message.to_lowercase();

        if lower.contains("signature is already used") || lower.contains("invalid admin signature")
        {
            TxError::StaleSignature {
                message: message.to_string(),
            }
        } else if message.contains("execution reverted: \"TF\"")
            || message.contains("execution reverted: TF")
        {
            TxError::TransferFailed {
                message: message.to_string(),
            }
        } else if lower.contains("insufficient funds") {
            TxError::InsufficientGas {
                message: message.to_string(),
            }
        // Revert reasons and data can contain anything, so they win over the
        // rate limit and transient patterns below
        } else if lower.contains("revert") {
            TxError::Reverted {
                reason: message.to_string(),
            }
        } else if is_rate_limit_message(&lower) {
            TxError::RateLimited {
                message: message.to_string(),
            }
        } else if is_transient_message(message) {
            TxError::Transient {
                message: message.to_string(),
            }
        } else {
            TxError::Other {
                message: message.to_string(),
            }
        }
    }

    /// Faucet claims: stale signatures are refreshed, anything unknown is
    /// retried with backoff, including reverts with unrecognised reasons.
    pub fn classify_claim(&self) -> RetryDecision {
        match self {
            TxError::StaleSignature { .. } => RetryDecision::Refresh,
            TxError::Auth(e) => e.retry_decision(),
            TxError::RateLimited { .. } | TxError::Transient { .. } => RetryDecision::Backoff,
            TxError::InsufficientBalance { .. }
            | TxError::InsufficientGas { .. }
            | TxError::TransferFailed { .. }
            | TxError::ApprovalFailed { .. } => RetryDecision::Abort,
            TxError::Reverted { .. } | TxError::Unconfirmed { .. } | TxError::Other { .. } => {
                RetryDecision::Unclassified
            }
        }
    }

    /// Check-in, swap and stake: a revert will revert again, so it is terminal.
    pub fn classify_transaction(&self) -> RetryDecision {
        match self {
            TxError::Auth(e) => e.retry_decision(),
            TxError::RateLimited { .. } | TxError::Transient { .. } => RetryDecision::Backoff,
            TxError::InsufficientBalance { .. }
            | TxError::InsufficientGas { .. }
            | TxError::TransferFailed { .. }
            | TxError::ApprovalFailed { .. }
            | TxError::Reverted { .. } => RetryDecision::Abort,
            TxError::StaleSignature { .. } | TxError::Unconfirmed { .. } | TxError::Other { .. } => {
                RetryDecision::Unclassified
            }
        }
    }
}

/// HTTP status phrasing only; a bare "429" also shows up in hashes and hex data.
fn is_rate_limit_message(lower: &str) -> bool {
    lower.contains("too many requests")
        || lower.contains("rate limit")
        || lower.contains("status code 429")
        || lower.contains("http 429")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_signature_messages() {
        let eth = TxError::from_provider_message(
            "execution reverted: \"Signature is already used\"",
        );
        let goon = TxError::from_provider_message("execution reverted: Invalid admin signature");
        assert!(matches!(eth, TxError::StaleSignature { .. }));
        assert!(matches!(goon, TxError::StaleSignature { .. }));
        assert_eq!(eth.classify_claim(), RetryDecision::Refresh);
    }

    #[test]
    fn tf_revert_is_transfer_failure() {
        let err = TxError::from_provider_message(
            "(code: 3, message: execution reverted: \"TF\", data: Some(String(\"0x08c379a0\")))",
        );
        assert!(matches!(err, TxError::TransferFailed { ref message } if message.contains("code: 3")));
        assert_eq!(err.classify_transaction(), RetryDecision::Abort);
    }

    #[test]
    fn rate_limit_and_transient() {
        assert!(matches!(
            TxError::from_provider_message("HTTP 429 Too Many Requests"),
            TxError::RateLimited { .. }
        ));
        assert!(matches!(
            TxError::from_provider_message("error sending request: operation timed out"),
            TxError::Transient { .. }
        ));
    }

    #[test]
    fn unknown_revert_is_unclassified_for_claims_but_terminal_otherwise() {
        let err = TxError::from_provider_message("execution reverted: already checked in");
        assert!(matches!(err, TxError::Reverted { .. }));
        assert_eq!(err.classify_claim(), RetryDecision::Unclassified);
        assert_eq!(err.classify_transaction(), RetryDecision::Abort);
    }

    #[test]
    fn unmatched_message_falls_through() {
        let err = TxError::from_provider_message("something nobody expected");
        assert!(matches!(err, TxError::Other { .. }));
        assert_eq!(err.classify_claim(), RetryDecision::Unclassified);
    }

    #[test]
    fn auth_errors() {
        assert_eq!(
            TxError::Auth(AuthError::RateLimited).classify_claim(),
            RetryDecision::Backoff
        );
        let bad_request = AuthError::Http {
            status: 400,
            body: "bad".to_string(),
        };
        assert_eq!(bad_request.retry_decision(), RetryDecision::Unclassified);
        let unavailable = AuthError::Http {
            status: 503,
            body: String::new(),
        };
        assert_eq!(unavailable.retry_decision(), RetryDecision::Backoff);
    }

    #[test]
    fn insufficient_balance_message() {
        let err = TxError::InsufficientBalance {
            token: "GOON".to_string(),
            action: "swap".to_string(),
        };
        assert_eq!(err.to_string(), "Insufficient GOON balance for swap.");
    }

    #[test]
    fn revert_data_containing_429_stays_a_revert() {
        let err = TxError::from_provider_message(
            "(code: 3, message: execution reverted: already checked in, data: Some(String(\"0x08c379a0000000000000000000000000000000000000000000000000000000000000429a\")))",
        );
        assert!(matches!(err, TxError::Reverted { .. }));
        assert_eq!(err.classify_transaction(), RetryDecision::Abort);
    }

    #[test]
    fn revert_reason_mentioning_timeout_stays_a_revert() {
        let err = TxError::from_provider_message("execution reverted: Timeout not elapsed");
        assert!(matches!(err, TxError::Reverted { .. }));
    }

    #[test]
    fn bare_429_in_a_hash_is_not_rate_limiting() {
        let err = TxError::from_provider_message("unknown transaction 0xab429cd");
        assert!(matches!(err, TxError::Other { .. }));
        assert!(matches!(
            TxError::from_provider_message("server returned status code 429"),
            TxError::RateLimited { .. }
        ));
    }

    #[test]
    fn insufficient_funds_keeps_provider_message() {
        let err = TxError::from_provider_message(
            "insufficient funds for gas * price + value: have 0 want 21000",
        );
        assert!(matches!(err, TxError::InsufficientGas { .. }));
        assert!(err.to_string().contains("have 0 want 21000"));
        assert_eq!(err.classify_claim(), RetryDecision::Abort);
    }
}
