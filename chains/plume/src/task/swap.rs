use crate::calls;
use crate::dex::{SwapAmount, SwapPlan};
use crate::error::TxError;
use crate::submitter::{send_and_confirm, TxReceipt};
use crate::task::{Task, TaskContext, TaskResult};
use anyhow::Result;
use async_trait::async_trait;
use core_logic::{attempt_with_retry, LogLevel};
use ethers::signers::Signer;
use ethers::types::U256;

/// Buys a small random amount of goonUSD with GOON on CrocSwap.
pub struct SwapTask;

impl SwapTask {
    async fn swap_once(ctx: &TaskContext, amount: SwapAmount) -> Result<TxReceipt, TxError> {
        let addresses = &ctx.services.addresses;
        let submitter = ctx.services.submitter.as_ref();
        let sink = ctx.sink.as_ref();
        let wei = amount.wei();

        let approve = calls::approve(addresses.goon, addresses.croc_dex, U256::from(wei));
        send_and_confirm(submitter, sink, &ctx.wallet, &approve).await?;

        // Fixed-output buy: receive `wei` goonUSD, pay at most the approved GOON
        let swap = SwapPlan::buy(addresses.goon_usd, addresses.goon, wei, wei)
            .to_call(addresses.croc_dex);
        send_and_confirm(submitter, sink, &ctx.wallet, &swap)
            .await
            .map_err(|e| match e {
                TxError::TransferFailed { .. } => TxError::InsufficientBalance {
                    token: "GOON".to_string(),
                    action: "swap".to_string(),
                },
                other => other,
            })
    }
}

#[async_trait]
impl Task<TaskContext> for SwapTask {
    fn name(&self) -> &str {
        "04_swap_goon"
    }

    async fn run(&self, ctx: TaskContext) -> Result<TaskResult> {
        ctx.log(
            LogLevel::Info,
            &format!("Wallet address: {:?}", ctx.wallet.address()),
        );

        // ThreadRng is not Send, keep it out of the await points
        let amount = {
            let mut rng = rand::thread_rng();
            SwapAmount::random(&mut rng)
        };
        ctx.log(
            LogLevel::Info,
            &format!("Swapping {} GOON for goonUSD", amount),
        );

        let receipt = attempt_with_retry(
            &ctx.services.retry,
            ctx.sink.as_ref(),
            |_| Self::swap_once(&ctx, amount),
            TxError::classify_transaction,
        )
        .await;

        Ok(ctx.finish(receipt, "Swap successful"))
    }
}
