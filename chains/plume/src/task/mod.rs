//! The five Plume tasks.
//!
//! Each task handles one wallet per call of [`Task::run`]. Retries happen
//! inside the task through [`core_logic::attempt_with_retry`]; failures end up
//! as log lines and a non-successful [`TaskResult`], never as a panic or an
//! error escaping to the scheduler.

use crate::calls::PlumeAddresses;
use crate::constants;
use crate::faucet::{FaucetApi, FaucetToken};
use crate::submitter::{TxReceipt, TxSubmitter};
use core_logic::{ChainConfig, LogLevel, LogSink, RetryConfig};
use ethers::signers::LocalWallet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub mod check_in;
pub mod claim_faucet;
pub mod stake;
pub mod swap;

pub use self::check_in::CheckInTask;
pub use self::claim_faucet::ClaimFaucetTask;
pub use self::stake::StakeTask;
pub use self::swap::SwapTask;

pub use core_logic::traits::{Task, TaskResult};

/// Collaborators shared read-only by every task loop.
#[derive(Clone)]
pub struct Services {
    pub faucet: Arc<dyn FaucetApi>,
    pub submitter: Arc<dyn TxSubmitter>,
    pub addresses: PlumeAddresses,
    pub chain: ChainConfig,
    pub retry: RetryConfig,
}

#[derive(Clone)]
pub struct TaskContext {
    pub wallet: LocalWallet,
    pub services: Services,
    pub sink: Arc<dyn LogSink>,
}

impl TaskContext {
    pub fn log(&self, level: LogLevel, message: &str) {
        self.sink.log(level, message);
    }

    /// Turns the outcome of a retried submission into the task result,
    /// logging the explorer link on success.
    pub fn finish(&self, receipt: Option<TxReceipt>, success_label: &str) -> TaskResult {
        match receipt {
            Some(receipt) => {
                let tx_hash = format!("{:?}", receipt.tx_hash);
                let link = self.services.chain.tx_link(&tx_hash);
                let message = match receipt.block_number {
                    Some(block) => format!("{} in block {}: {}", success_label, block, link),
                    None => format!("{}: {}", success_label, link),
                };
                self.log(LogLevel::Success, &message);
                TaskResult::confirmed(link, tx_hash)
            }
            None => TaskResult::skipped("Gave up on this wallet for the current cycle"),
        }
    }
}

// Trait alias
pub type PlumeTask = dyn Task<TaskContext> + Send + Sync;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    CheckIn,
    FaucetEth,
    FaucetGoon,
    Swap,
    Stake,
}

/// Fixed delays of a task loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub between_wallets: Option<Duration>,
    pub between_passes: Option<Duration>,
}

impl TaskKind {
    pub const ALL: [TaskKind; 5] = [
        TaskKind::CheckIn,
        TaskKind::FaucetEth,
        TaskKind::FaucetGoon,
        TaskKind::Swap,
        TaskKind::Stake,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::CheckIn => "checkin",
            TaskKind::FaucetEth => "faucet-eth",
            TaskKind::FaucetGoon => "faucet-goon",
            TaskKind::Swap => "swap",
            TaskKind::Stake => "stake",
        }
    }

    pub fn schedule(&self) -> Schedule {
        match self {
            TaskKind::CheckIn => Schedule {
                between_wallets: None,
                between_passes: Some(constants::CHECK_IN_PASS_DELAY),
            },
            TaskKind::FaucetEth => Schedule {
                between_wallets: Some(constants::FAUCET_ETH_WALLET_DELAY),
                between_passes: None,
            },
            TaskKind::FaucetGoon => Schedule {
                between_wallets: Some(constants::FAUCET_GOON_WALLET_DELAY),
                between_passes: Some(constants::FAUCET_GOON_PASS_DELAY),
            },
            TaskKind::Swap => Schedule {
                between_wallets: Some(constants::SWAP_WALLET_DELAY),
                between_passes: None,
            },
            TaskKind::Stake => Schedule {
                between_wallets: None,
                between_passes: Some(constants::STAKE_PASS_DELAY),
            },
        }
    }

    pub fn build(&self) -> Box<PlumeTask> {
        match self {
            TaskKind::CheckIn => Box::new(CheckInTask),
            TaskKind::FaucetEth => Box::new(ClaimFaucetTask::new(FaucetToken::Eth)),
            TaskKind::FaucetGoon => Box::new(ClaimFaucetTask::new(FaucetToken::Goon)),
            TaskKind::Swap => Box::new(SwapTask),
            TaskKind::Stake => Box::new(StakeTask),
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
