//! Plume testnet bot: check-in, faucet claims, a CrocSwap swap and a Nest
//! stake, each looped over every wallet forever.

pub mod calls;
pub mod config;
pub mod constants;
pub mod dex;
pub mod error;
pub mod faucet;
pub mod scheduler;
pub mod submitter;
pub mod task;

pub use config::PlumeConfig;
pub use error::{AuthError, TxError};
pub use faucet::{ClaimSignature, FaucetApi, FaucetClient, FaucetToken};
pub use scheduler::TaskLoop;
pub use submitter::{EthersSubmitter, TxReceipt, TxSubmitter};
pub use task::{Schedule, Services, TaskContext, TaskKind};
