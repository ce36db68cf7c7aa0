//! # Core Logic - Shared Utilities for Testnet Bots
//!
//! This crate provides the chain-agnostic pieces used by every chain crate in
//! the workspace: typed errors, configuration types, the task/worker traits,
//! logging, the retry engine and private key loading.
//!
//! ## Modules
//!
//! - [`config`] - Configuration structures shared by chain crates
//! - [`error`] - Typed error handling with thiserror
//! - [`traits`] - Core trait definitions
//! - [`utils`] - Utility modules (logging, retry, wallets, runner)

// Module declarations - internal modules marked pub(crate)
pub mod config;
pub mod error;
pub mod traits;
pub(crate) mod utils;

// Selective exports - only public API types
pub use config::{ChainConfig, WalletSource};
pub use error::{ConfigError, CoreError, WalletError};
pub use traits::{PassStats, Task, TaskResult, Worker};

// Utils are pub(crate) - only export specific public utilities
pub use utils::logger::{LogLevel, LogSink, MemorySink, TracingSink};
pub use utils::{setup_logger, PrivateKey, WalletManager, WorkerRunner};

// Export retry utilities for chain crates and tests
pub use utils::retry::{attempt_with_retry, is_transient_message, RetryConfig, RetryDecision};
