use crate::calls;
use crate::error::TxError;
use crate::submitter::send_and_confirm;
use crate::task::{Task, TaskContext, TaskResult};
use anyhow::Result;
use async_trait::async_trait;
use core_logic::{attempt_with_retry, LogLevel};
use ethers::signers::Signer;

/// Daily `checkIn()` on the rewards contract.
pub struct CheckInTask;

#[async_trait]
impl Task<TaskContext> for CheckInTask {
    fn name(&self) -> &str {
        "01_check_in"
    }

    async fn run(&self, ctx: TaskContext) -> Result<TaskResult> {
        ctx.log(
            LogLevel::Info,
            &format!("Wallet address: {:?}", ctx.wallet.address()),
        );

        let call = calls::check_in(ctx.services.addresses.check_in);
        let submitter = ctx.services.submitter.as_ref();
        let sink = ctx.sink.as_ref();

        let receipt = attempt_with_retry(
            &ctx.services.retry,
            sink,
            |_| send_and_confirm(submitter, sink, &ctx.wallet, &call),
            TxError::classify_transaction,
        )
        .await;

        Ok(ctx.finish(receipt, "Check-in successful"))
    }
}
