use crate::utils::logger::{LogLevel, LogSink};
use rand::Rng;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Retries allowed after the first attempt.
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub exponential_base: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
            max_delay_ms: 60_000,
            exponential_base: 2.0,
            jitter: false,
        }
    }
}

impl RetryConfig {
    pub fn new(max_attempts: u32, base_delay_ms: u64) -> Self {
        Self {
            max_attempts,
            base_delay_ms,
            max_delay_ms: base_delay_ms * 60,
            ..Default::default()
        }
    }

    pub fn with_max_delay(mut self, max_delay_ms: u64) -> Self {
        self.max_delay_ms = max_delay_ms;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Delay before retry `attempt + 1`: `base * exponential_base^attempt`.
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        let delay_ms = self.base_delay_ms as f64 * self.exponential_base.powi(attempt as i32);
        let delay_ms = delay_ms.min(self.max_delay_ms as f64);

        let delay_ms = if self.jitter {
            let rng_factor = rand::thread_rng().gen_range(0.5..=1.5);
            delay_ms * rng_factor
        } else {
            delay_ms
        };

        Duration::from_millis(delay_ms as u64)
    }
}

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Credentials went stale: retry right away, the next attempt fetches new ones.
    Refresh,
    /// Known transient failure: wait out the backoff window, then retry.
    Backoff,
    /// Nothing recognised the failure. Retried like `Backoff`, reported separately.
    Unclassified,
    /// Terminal failure, retrying cannot help.
    Abort,
}

/// Runs `action` until it succeeds, the classifier aborts, or the retry budget
/// is spent.
///
/// `action` receives the zero-based attempt number. Every failure is written to
/// `sink` at ERROR level; nothing is returned to the caller except `None`.
/// After a failure on attempt `config.max_attempts` no further call is made and
/// a final "Maximum attempts reached" line is logged.
pub async fn attempt_with_retry<T, E, F, Fut, C>(
    config: &RetryConfig,
    sink: &dyn LogSink,
    mut action: F,
    classify: C,
) -> Option<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: Fn(&E) -> RetryDecision,
    E: Display,
{
    let mut attempt = 0u32;

    loop {
        let error = match action(attempt).await {
            Ok(value) => {
                if attempt > 0 {
                    debug!("Operation succeeded on attempt {}", attempt + 1);
                }
                return Some(value);
            }
            Err(e) => e,
        };

        let decision = classify(&error);
        if decision == RetryDecision::Abort {
            sink.log(LogLevel::Error, &error.to_string());
            return None;
        }

        if attempt >= config.max_attempts {
            sink.log(
                LogLevel::Error,
                &format!("Maximum attempts reached. Error: {}", error),
            );
            return None;
        }

        match decision {
            RetryDecision::Refresh => {
                sink.log(
                    LogLevel::Error,
                    &format!("{}. Generating a new signature...", error),
                );
            }
            RetryDecision::Backoff | RetryDecision::Unclassified => {
                let delay = config.calculate_delay(attempt);
                let kind = if decision == RetryDecision::Unclassified {
                    "with an unclassified error"
                } else {
                    "with a retryable error"
                };
                sink.log(
                    LogLevel::Error,
                    &format!(
                        "Attempt {} failed {}: {}. Retrying in {} seconds...",
                        attempt + 1,
                        kind,
                        error,
                        delay.as_secs_f64()
                    ),
                );
                tokio::time::sleep(delay).await;
            }
            RetryDecision::Abort => unreachable!("abort returns before the retry branch"),
        }

        attempt += 1;
    }
}

/// Best-effort check for network level failures that tend to clear on their own.
pub fn is_transient_message(message: &str) -> bool {
    let error_msg = message.to_lowercase();

    let transient_patterns = [
        "timeout",
        "timed out",
        "connection refused",
        "connection reset",
        "network error",
        "temporary failure",
        "service unavailable",
        "bad gateway",
        "nonce too low",
        "already known",
        "replacement transaction underpriced",
    ];

    transient_patterns
        .iter()
        .any(|pattern| error_msg.contains(pattern))
}
