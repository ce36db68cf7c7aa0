use async_trait::async_trait;
use core_logic::{LogLevel, LogSink, MemorySink, RetryConfig, Worker};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, H256};
use plume_bot::calls::{ContractCall, PlumeAddresses};
use plume_bot::{
    AuthError, ClaimSignature, FaucetApi, FaucetToken, PlumeConfig, Schedule, Services,
    TaskContext, TaskKind, TaskLoop, TxError, TxReceipt, TxSubmitter,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// --- Mocks ---

/// Replays scripted faucet failures, then hands out fresh signatures.
#[derive(Default)]
struct MockFaucet {
    failures: Mutex<VecDeque<AuthError>>,
    requests: Mutex<Vec<(Address, FaucetToken)>>,
}

impl MockFaucet {
    fn failing(failures: Vec<AuthError>) -> Self {
        Self {
            failures: Mutex::new(failures.into()),
            ..Default::default()
        }
    }

    fn requests(&self) -> Vec<(Address, FaucetToken)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl FaucetApi for MockFaucet {
    async fn request_signature(
        &self,
        address: Address,
        token: FaucetToken,
    ) -> Result<ClaimSignature, AuthError> {
        let mut requests = self.requests.lock().unwrap();
        requests.push((address, token));
        if let Some(err) = self.failures.lock().unwrap().pop_front() {
            return Err(err);
        }
        // Distinct salt per request
        let salt = H256::from_low_u64_be(requests.len() as u64);
        Ok(ClaimSignature {
            salt,
            signature: vec![0xab; 65].into(),
        })
    }
}

/// Replays scripted send results, then succeeds with sequential hashes.
#[derive(Default)]
struct MockSubmitter {
    script: Mutex<VecDeque<Result<(), TxError>>>,
    fail_for: Option<Address>,
    sent: Mutex<Vec<(Address, ContractCall)>>,
    counter: AtomicU64,
}

impl MockSubmitter {
    fn scripted(results: Vec<Result<(), TxError>>) -> Self {
        Self {
            script: Mutex::new(results.into()),
            ..Default::default()
        }
    }

    fn failing_for(address: Address) -> Self {
        Self {
            fail_for: Some(address),
            ..Default::default()
        }
    }

    fn sent(&self) -> Vec<(Address, ContractCall)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl TxSubmitter for MockSubmitter {
    async fn send(&self, wallet: &LocalWallet, call: &ContractCall) -> Result<H256, TxError> {
        self.sent
            .lock()
            .unwrap()
            .push((wallet.address(), call.clone()));
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;

        if self.fail_for == Some(wallet.address()) {
            return Err(TxError::from_provider_message(
                "execution reverted: already checked in today",
            ));
        }
        if let Some(result) = self.script.lock().unwrap().pop_front() {
            result?;
        }
        Ok(H256::from_low_u64_be(n))
    }

    async fn confirm(&self, tx_hash: H256) -> Result<TxReceipt, TxError> {
        Ok(TxReceipt {
            tx_hash,
            block_number: Some(1),
        })
    }
}

// --- Helpers ---

fn wallet(n: u64) -> LocalWallet {
    format!("{:064x}", n).parse().unwrap()
}

fn services(faucet: Arc<MockFaucet>, submitter: Arc<MockSubmitter>) -> Services {
    let config = PlumeConfig {
        rpc_url: "http://localhost:8545".to_string(),
        chain_id: plume_bot::constants::CHAIN_ID,
        faucet_contract: "0x075e2D02EBcea5dbcE6b7C9F3D203613c0D5B2B1".to_string(),
        faucet_url: plume_bot::constants::FAUCET_API_URL.to_string(),
        confirmations: 1,
        private_key_file: None,
        private_keys_env: None,
    };

    Services {
        faucet,
        submitter,
        addresses: PlumeAddresses::resolve(&config).unwrap(),
        chain: config.chain(),
        retry: RetryConfig::default(),
    }
}

fn context(wallet: LocalWallet, services: Services, sink: Arc<MemorySink>) -> TaskContext {
    TaskContext {
        wallet,
        services,
        sink: sink as Arc<dyn LogSink>,
    }
}

// --- Tests ---

#[tokio::test(start_paused = true)]
async fn test_stale_signature_is_refreshed_then_succeeds() {
    let faucet = Arc::new(MockFaucet::default());
    let submitter = Arc::new(MockSubmitter::scripted(vec![Err(
        TxError::from_provider_message("execution reverted: \"Signature is already used\""),
    )]));
    let sink = Arc::new(MemorySink::new());

    let start = tokio::time::Instant::now();
    let result = TaskKind::FaucetEth
        .build()
        .run(context(
            wallet(1),
            services(faucet.clone(), submitter.clone()),
            sink.clone(),
        ))
        .await
        .unwrap();

    assert!(result.success);
    // A new signature was fetched for the second attempt, without waiting
    assert_eq!(faucet.requests().len(), 2);
    assert!(start.elapsed() < Duration::from_millis(1));

    let sent = submitter.sent();
    assert_eq!(sent.len(), 2);
    assert_ne!(sent[0].1.data, sent[1].1.data);

    assert_eq!(sink.count(LogLevel::Success), 1);
    let errors = sink.messages(LogLevel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Generating a new signature"));
    assert_eq!(
        sink.messages(LogLevel::Info)
            .iter()
            .filter(|m| m.as_str() == "Requesting tokens from the faucet...")
            .count(),
        2
    );
}

#[tokio::test(start_paused = true)]
async fn test_unclassified_failures_exhaust_retries() {
    let faucet = Arc::new(MockFaucet::default());
    let failures = (0..4)
        .map(|_| Err(TxError::from_provider_message("nonsense from the node")))
        .collect();
    let submitter = Arc::new(MockSubmitter::scripted(failures));
    let sink = Arc::new(MemorySink::new());

    let start = tokio::time::Instant::now();
    let result = TaskKind::FaucetEth
        .build()
        .run(context(
            wallet(1),
            services(faucet.clone(), submitter.clone()),
            sink.clone(),
        ))
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(submitter.sent().len(), 4);
    assert_eq!(faucet.requests().len(), 4);

    // 1s + 2s + 4s of backoff
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(7));
    assert!(elapsed < Duration::from_millis(7_050));

    let errors = sink.messages(LogLevel::Error);
    assert_eq!(errors.len(), 4);
    assert!(errors[..3].iter().all(|e| e.contains("unclassified")));
    let (level, last) = sink.last().unwrap();
    assert_eq!(level, LogLevel::Error);
    assert!(last.starts_with("Maximum attempts reached. Error:"));
    assert_eq!(sink.count(LogLevel::Success), 0);
}

#[tokio::test(start_paused = true)]
async fn test_swap_transfer_failure_is_not_retried() {
    let faucet = Arc::new(MockFaucet::default());
    let submitter = Arc::new(MockSubmitter::scripted(vec![
        Ok(()),
        Err(TxError::from_provider_message(
            "(code: 3, message: execution reverted: \"TF\", data: None)",
        )),
    ]));
    let sink = Arc::new(MemorySink::new());

    let result = TaskKind::Swap
        .build()
        .run(context(
            wallet(1),
            services(faucet, submitter.clone()),
            sink.clone(),
        ))
        .await
        .unwrap();

    assert!(!result.success);
    // approve + swap, no second attempt
    assert_eq!(submitter.sent().len(), 2);
    assert_eq!(
        sink.messages(LogLevel::Error),
        vec!["Insufficient GOON balance for swap.".to_string()]
    );
    assert!(sink
        .messages(LogLevel::Info)
        .iter()
        .any(|m| m.starts_with("Swapping 0.000") && m.ends_with("GOON for goonUSD")));
}

#[tokio::test(start_paused = true)]
async fn test_pass_visits_every_wallet_when_one_fails() {
    let wallets: Vec<LocalWallet> = (1..=3).map(wallet).collect();
    let faucet = Arc::new(MockFaucet::default());
    let submitter = Arc::new(MockSubmitter::failing_for(wallets[1].address()));
    let sink = Arc::new(MemorySink::new());

    let task_loop = TaskLoop::new(
        TaskKind::CheckIn,
        Arc::from(wallets.clone()),
        services(faucet, submitter.clone()),
        sink.clone(),
    )
    .with_schedule(Schedule {
        between_wallets: Some(Duration::from_secs(5)),
        between_passes: None,
    });

    let start = tokio::time::Instant::now();
    let stats = task_loop.run_pass().await;

    assert_eq!(stats.success, 2);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.visited(), 3);

    let senders: Vec<Address> = submitter.sent().iter().map(|(a, _)| *a).collect();
    let expected: Vec<Address> = wallets.iter().map(|w| w.address()).collect();
    assert_eq!(senders, expected);

    // Reverted check-in is terminal, so only the per-wallet delays count
    assert!(start.elapsed() >= Duration::from_secs(15));
    assert!(start.elapsed() < Duration::from_millis(15_050));
    assert_eq!(sink.count(LogLevel::Error), 1);
}

#[tokio::test(start_paused = true)]
async fn test_success_logs_one_explorer_link() {
    let faucet = Arc::new(MockFaucet::default());
    let submitter = Arc::new(MockSubmitter::default());
    let sink = Arc::new(MemorySink::new());

    let result = TaskKind::Stake
        .build()
        .run(context(
            wallet(7),
            services(faucet, submitter.clone()),
            sink.clone(),
        ))
        .await
        .unwrap();

    assert!(result.success);
    let stake_hash = format!("{:?}", H256::from_low_u64_be(2));
    assert_eq!(result.tx_hash.as_deref(), Some(stake_hash.as_str()));

    let successes = sink.messages(LogLevel::Success);
    assert_eq!(successes.len(), 1);
    assert!(successes[0].contains(&stake_hash));
    assert!(successes[0].contains("https://testnet-explorer.plumenetwork.xyz/tx/"));
    assert!(successes[0].starts_with("Stake successful in block 1:"));
    assert!(sink
        .messages(LogLevel::Info)
        .contains(&"Staking goonUSD in Nest Staking".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_failed_approve_skips_stake() {
    let faucet = Arc::new(MockFaucet::default());
    let submitter = Arc::new(MockSubmitter::scripted(vec![Err(TxError::Reverted {
        reason: "allowance".to_string(),
    })]));
    let sink = Arc::new(MemorySink::new());

    let result = TaskKind::Stake
        .build()
        .run(context(
            wallet(7),
            services(faucet, submitter.clone()),
            sink.clone(),
        ))
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(submitter.sent().len(), 1);
    let errors = sink.messages(LogLevel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Approve Failed!"));
}

#[tokio::test(start_paused = true)]
async fn test_goon_claim_requests_goon_signature() {
    let faucet = Arc::new(MockFaucet::default());
    let submitter = Arc::new(MockSubmitter::default());
    let sink = Arc::new(MemorySink::new());
    let w = wallet(3);
    let address = w.address();

    let task_loop = TaskLoop::new(
        TaskKind::FaucetGoon,
        Arc::from(vec![w]),
        services(faucet.clone(), submitter.clone()),
        sink.clone(),
    );

    let start = tokio::time::Instant::now();
    let stats = task_loop.run_pass().await;

    assert_eq!(stats.success, 1);
    assert_eq!(faucet.requests(), vec![(address, FaucetToken::Goon)]);
    // 5s wallet delay; the 2h pass delay belongs to run_forever
    assert!(start.elapsed() >= Duration::from_secs(5));
    assert!(start.elapsed() < Duration::from_secs(6));

    let data = hex::encode(&submitter.sent()[0].1.data);
    assert!(data.starts_with("103fc452"));
    assert!(data.contains(&format!("{:0<64}", "474f4f4e")));
}

#[tokio::test(start_paused = true)]
async fn test_loop_without_wallets_returns() {
    let faucet = Arc::new(MockFaucet::default());
    let submitter = Arc::new(MockSubmitter::default());
    let sink = Arc::new(MemorySink::new());

    let task_loop = TaskLoop::new(
        TaskKind::Swap,
        Arc::from(Vec::<LocalWallet>::new()),
        services(faucet, submitter.clone()),
        sink.clone(),
    );

    task_loop.run_forever().await;

    assert!(submitter.sent().is_empty());
    assert_eq!(sink.count(LogLevel::Error), 1);
    assert_eq!(task_loop.name(), "swap");
}

#[tokio::test(start_paused = true)]
async fn test_faucet_outage_backs_off_then_claims() {
    let faucet = Arc::new(MockFaucet::failing(vec![AuthError::Http {
        status: 503,
        body: "maintenance".to_string(),
    }]));
    let submitter = Arc::new(MockSubmitter::default());
    let sink = Arc::new(MemorySink::new());

    let start = tokio::time::Instant::now();
    let result = TaskKind::FaucetGoon
        .build()
        .run(context(
            wallet(2),
            services(faucet.clone(), submitter.clone()),
            sink.clone(),
        ))
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(faucet.requests().len(), 2);
    // Nothing reaches the chain until a signature is issued
    assert_eq!(submitter.sent().len(), 1);

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(1));
    assert!(elapsed < Duration::from_millis(1_050));

    let errors = sink.messages(LogLevel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Faucet returned HTTP 503"));
    assert!(errors[0].contains("Retrying in 1 seconds"));
    assert_eq!(sink.count(LogLevel::Success), 1);
}

#[tokio::test(start_paused = true)]
async fn test_rejected_faucet_requests_exhaust_retries() {
    let rejected = (0..4)
        .map(|_| AuthError::Http {
            status: 400,
            body: "bad request".to_string(),
        })
        .collect();
    let faucet = Arc::new(MockFaucet::failing(rejected));
    let submitter = Arc::new(MockSubmitter::default());
    let sink = Arc::new(MemorySink::new());

    let result = TaskKind::FaucetEth
        .build()
        .run(context(
            wallet(2),
            services(faucet.clone(), submitter.clone()),
            sink.clone(),
        ))
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(faucet.requests().len(), 4);
    assert!(submitter.sent().is_empty());

    let (level, last) = sink.last().unwrap();
    assert_eq!(level, LogLevel::Error);
    assert!(last.starts_with("Maximum attempts reached. Error: Faucet returned HTTP 400"));
    assert_eq!(sink.count(LogLevel::Success), 0);
}
