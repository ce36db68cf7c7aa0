//! Perpetual per-task loops.
//!
//! A [`TaskLoop`] walks the wallet list one wallet at a time, sleeps after
//! each wallet and after each pass according to its [`Schedule`], and never
//! ends on its own. One wallet failing, however badly, does not stop the pass.

use crate::task::{PlumeTask, Schedule, Services, TaskContext, TaskKind};
use async_trait::async_trait;
use core_logic::{LogLevel, LogSink, PassStats, Worker};
use ethers::signers::LocalWallet;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct TaskLoop {
    kind: TaskKind,
    task: Box<PlumeTask>,
    wallets: Arc<[LocalWallet]>,
    services: Services,
    sink: Arc<dyn LogSink>,
    schedule: Schedule,
}

impl TaskLoop {
    pub fn new(
        kind: TaskKind,
        wallets: Arc<[LocalWallet]>,
        services: Services,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            kind,
            task: kind.build(),
            wallets,
            services,
            sink,
            schedule: kind.schedule(),
        }
    }

    /// Replaces the default delays of this task kind.
    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Runs the task once for every wallet, in order.
    pub async fn run_pass(&self) -> PassStats {
        let mut stats = PassStats::default();

        for (i, wallet) in self.wallets.iter().enumerate() {
            let ctx = TaskContext {
                wallet: wallet.clone(),
                services: self.services.clone(),
                sink: self.sink.clone(),
            };

            match self.task.run(ctx).await {
                Ok(result) if result.success => stats.success += 1,
                Ok(result) => {
                    debug!("{} skipped wallet {}: {}", self.task.name(), i, result.message);
                    stats.failed += 1;
                }
                Err(e) => {
                    self.sink.log(LogLevel::Error, &format!("{:#}", e));
                    stats.failed += 1;
                }
            }

            if let Some(delay) = self.schedule.between_wallets {
                tokio::time::sleep(delay).await;
            }
        }

        stats
    }
}

#[async_trait]
impl Worker for TaskLoop {
    fn name(&self) -> &str {
        self.kind.label()
    }

    async fn run_forever(&self) {
        if self.wallets.is_empty() {
            self.sink.log(LogLevel::Error, "No wallets loaded, task loop not started");
            return;
        }

        loop {
            let stats = self.run_pass().await;
            self.sink.log(
                LogLevel::Info,
                &format!(
                    "Pass finished: {} succeeded, {} failed out of {} wallets",
                    stats.success,
                    stats.failed,
                    stats.visited()
                ),
            );

            if let Some(delay) = self.schedule.between_passes {
                self.sink.log(
                    LogLevel::Info,
                    &format!("Waiting {} before the next pass...", format_delay(delay)),
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

fn format_delay(delay: Duration) -> String {
    let secs = delay.as_secs();
    if secs >= 3600 && secs % 3600 == 0 {
        format!("{}h", secs / 3600)
    } else if secs >= 60 && secs % 60 == 0 {
        format!("{}min", secs / 60)
    } else {
        format!("{}s", secs)
    }
}
