use crate::calls::ContractCall;
use crate::error::TxError;
use async_trait::async_trait;
use core_logic::{LogLevel, LogSink};
use ethers::prelude::*;
use tracing::debug;

/// Confirmed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: H256,
    pub block_number: Option<u64>,
}

#[async_trait]
pub trait TxSubmitter: Send + Sync {
    /// Signs and broadcasts `call` from `wallet`, returning the transaction hash.
    async fn send(&self, wallet: &LocalWallet, call: &ContractCall) -> Result<H256, TxError>;

    /// Waits until `tx_hash` is mined with the configured confirmations.
    /// A mined transaction with a failed status is a [`TxError::Reverted`].
    async fn confirm(&self, tx_hash: H256) -> Result<TxReceipt, TxError>;
}

/// Sends `call`, logs the hash, then waits for the receipt.
pub async fn send_and_confirm(
    submitter: &dyn TxSubmitter,
    sink: &dyn LogSink,
    wallet: &LocalWallet,
    call: &ContractCall,
) -> Result<TxReceipt, TxError> {
    let tx_hash = submitter.send(wallet, call).await?;
    sink.log(LogLevel::Info, &format!("Transaction sent: {:?}", tx_hash));
    submitter.confirm(tx_hash).await
}

pub struct EthersSubmitter {
    provider: Provider<Http>,
    chain_id: u64,
    confirmations: usize,
}

impl EthersSubmitter {
    pub fn new(provider: Provider<Http>, chain_id: u64, confirmations: usize) -> Self {
        Self {
            provider,
            chain_id,
            confirmations,
        }
    }
}

#[async_trait]
impl TxSubmitter for EthersSubmitter {
    async fn send(&self, wallet: &LocalWallet, call: &ContractCall) -> Result<H256, TxError> {
        let signer = wallet.clone().with_chain_id(self.chain_id);
        let address = signer.address();
        let client = SignerMiddleware::new(self.provider.clone(), signer);

        let tx = Eip1559TransactionRequest::new()
            .to(call.to)
            .data(call.data.clone())
            .value(call.value)
            .from(address);

        // Gas estimation runs here, so reverts surface before broadcast
        let pending = client
            .send_transaction(tx, None)
            .await
            .map_err(|e| TxError::from_provider_message(&e.to_string()))?;

        let tx_hash = pending.tx_hash();
        debug!("Broadcast {:?} from {:?} to {:?}", tx_hash, address, call.to);
        Ok(tx_hash)
    }

    async fn confirm(&self, tx_hash: H256) -> Result<TxReceipt, TxError> {
        let receipt = PendingTransaction::new(tx_hash, &self.provider)
            .confirmations(self.confirmations)
            .await
            .map_err(|e| TxError::from_provider_message(&e.to_string()))?
            .ok_or(TxError::Unconfirmed { tx_hash })?;

        if receipt.status != Some(U64::from(1)) {
            return Err(TxError::Reverted {
                reason: format!("transaction {:?} failed on-chain", tx_hash),
            });
        }

        Ok(TxReceipt {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number.map(|n| n.as_u64()),
        })
    }
}
