use crate::calls;
use crate::error::TxError;
use crate::faucet::FaucetToken;
use crate::submitter::{send_and_confirm, TxReceipt};
use crate::task::{Task, TaskContext, TaskResult};
use anyhow::Result;
use async_trait::async_trait;
use core_logic::{attempt_with_retry, LogLevel};
use ethers::signers::Signer;

/// Claims `token` from the faucet contract.
///
/// Every attempt starts with a new signature request, so a signature the
/// contract already consumed is never submitted twice.
pub struct ClaimFaucetTask {
    token: FaucetToken,
}

impl ClaimFaucetTask {
    pub fn new(token: FaucetToken) -> Self {
        Self { token }
    }

    async fn claim_once(&self, ctx: &TaskContext) -> Result<TxReceipt, TxError> {
        ctx.log(LogLevel::Info, "Requesting tokens from the faucet...");

        let claim = ctx
            .services
            .faucet
            .request_signature(ctx.wallet.address(), self.token)
            .await?;

        let call = calls::faucet_claim(ctx.services.addresses.faucet, self.token, &claim);
        send_and_confirm(
            ctx.services.submitter.as_ref(),
            ctx.sink.as_ref(),
            &ctx.wallet,
            &call,
        )
        .await
    }
}

#[async_trait]
impl Task<TaskContext> for ClaimFaucetTask {
    fn name(&self) -> &str {
        match self.token {
            FaucetToken::Eth => "02_claim_faucet_eth",
            FaucetToken::Goon => "03_claim_faucet_goon",
        }
    }

    async fn run(&self, ctx: TaskContext) -> Result<TaskResult> {
        ctx.log(
            LogLevel::Info,
            &format!("Wallet address: {:?}", ctx.wallet.address()),
        );

        let receipt = attempt_with_retry(
            &ctx.services.retry,
            ctx.sink.as_ref(),
            |_| self.claim_once(&ctx),
            TxError::classify_claim,
        )
        .await;

        Ok(ctx.finish(receipt, &format!("{} claim successful", self.token)))
    }
}
