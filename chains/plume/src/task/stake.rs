use crate::calls;
use crate::constants;
use crate::error::TxError;
use crate::submitter::{send_and_confirm, TxReceipt};
use crate::task::{Task, TaskContext, TaskResult};
use anyhow::Result;
use async_trait::async_trait;
use core_logic::{attempt_with_retry, LogLevel};
use ethers::signers::Signer;
use ethers::types::U256;

/// Approves and stakes 1 goonUSD in Nest Staking.
pub struct StakeTask;

impl StakeTask {
    async fn stake_once(ctx: &TaskContext) -> Result<TxReceipt, TxError> {
        let addresses = &ctx.services.addresses;
        let submitter = ctx.services.submitter.as_ref();
        let sink = ctx.sink.as_ref();
        let amount = U256::from(constants::STAKE_AMOUNT_WEI);

        let approve = calls::approve(addresses.goon_usd, addresses.nest_staking, amount);
        send_and_confirm(submitter, sink, &ctx.wallet, &approve)
            .await
            .map_err(|e| match e {
                TxError::Reverted { reason } => TxError::ApprovalFailed { reason },
                other => other,
            })?;

        sink.log(LogLevel::Info, "Staking goonUSD in Nest Staking");
        let stake = calls::stake(addresses.nest_staking, amount);
        send_and_confirm(submitter, sink, &ctx.wallet, &stake).await
    }
}

#[async_trait]
impl Task<TaskContext> for StakeTask {
    fn name(&self) -> &str {
        "05_stake_goon_usd"
    }

    async fn run(&self, ctx: TaskContext) -> Result<TaskResult> {
        ctx.log(
            LogLevel::Info,
            &format!("Wallet address: {:?}", ctx.wallet.address()),
        );

        let receipt = attempt_with_retry(
            &ctx.services.retry,
            ctx.sink.as_ref(),
            |_| Self::stake_once(&ctx),
            TxError::classify_transaction,
        )
        .await;

        Ok(ctx.finish(receipt, "Stake successful"))
    }
}
