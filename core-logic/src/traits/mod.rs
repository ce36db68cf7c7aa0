use anyhow::Result;
use async_trait::async_trait;

/// Counters for one pass over the wallet list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassStats {
    pub success: u64,
    pub failed: u64,
}

impl PassStats {
    pub fn visited(&self) -> u64 {
        self.success + self.failed
    }
}

#[async_trait]
pub trait Worker: Send + Sync {
    /// Name used for the worker span
    fn name(&self) -> &str;

    /// Runs the worker loop. Only returns if the loop has nothing to work on.
    async fn run_forever(&self);
}

#[derive(Debug, Clone)]
pub struct TaskResult {
    pub success: bool,
    pub message: String,
    pub tx_hash: Option<String>,
}

impl TaskResult {
    pub fn confirmed(message: impl Into<String>, tx_hash: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            tx_hash: Some(tx_hash.into()),
        }
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            tx_hash: None,
        }
    }
}

#[async_trait]
pub trait Task<Ctx>: Send + Sync {
    /// Returns the name of the task
    fn name(&self) -> &str;

    /// Executes the task for one wallet
    async fn run(&self, ctx: Ctx) -> Result<TaskResult>;
}
