//! Retry layer for the dialogue service.
//!
//! Gives transient failures a few more chances before the session falls
//! back to the canned evasive reply. Failures that look like 4xx responses
//! are final on the first attempt; retrying a bad API key helps nobody.

use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::ports::{DialogueError, DialoguePort, DialogueReply, DialogueRequest};

/// Retry behavior for a wrapped dialogue client.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the initial attempt (0 = one attempt total)
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds
    pub base_delay_ms: u64,
    /// Ceiling on the doubled delay, in milliseconds
    pub max_delay_ms: u64,
    /// Fraction of the delay (0.0-1.0) used to spread retries apart
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 500,
            max_delay_ms: 5000,
            jitter_factor: 0.2,
        }
    }
}

/// Decorates any dialogue client with backoff-and-retry.
pub struct ResilientDialogue {
    inner: Arc<dyn DialoguePort>,
    config: RetryConfig,
}

impl ResilientDialogue {
    pub fn new(inner: Arc<dyn DialoguePort>, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    /// Delay before the given retry: doubles each time up to the ceiling,
    /// then shifted by up to `jitter_factor` in either direction.
    fn backoff_delay(&self, retry: u32) -> u64 {
        let mut delay = self.config.base_delay_ms;
        for _ in 1..retry {
            delay = delay.saturating_mul(2).min(self.config.max_delay_ms);
        }
        delay = delay.min(self.config.max_delay_ms);

        let spread = (delay as f64 * self.config.jitter_factor) as u64;
        if spread == 0 {
            return delay;
        }
        let nudge = rand::thread_rng().gen_range(0..=spread * 2);
        delay.saturating_add(nudge).saturating_sub(spread)
    }

    /// Whether another attempt could plausibly succeed. Auth and
    /// bad-request failures won't heal with time; everything else might.
    fn is_transient(error: &DialogueError) -> bool {
        match error {
            DialogueError::RequestFailed(msg) => !["400", "401", "403", "Invalid"]
                .iter()
                .any(|marker| msg.contains(marker)),
            DialogueError::InvalidResponse(_) => true,
        }
    }
}

#[async_trait]
impl DialoguePort for ResilientDialogue {
    async fn reply(&self, request: DialogueRequest) -> Result<DialogueReply, DialogueError> {
        let mut retries = 0;
        loop {
            match self.inner.reply(request.clone()).await {
                Ok(reply) => {
                    if retries > 0 {
                        tracing::info!(
                            retries,
                            suspect = %request.suspect_id,
                            "Dialogue recovered on retry"
                        );
                    }
                    return Ok(reply);
                }
                Err(e) if !Self::is_transient(&e) => {
                    tracing::error!(error = %e, "Dialogue error is final, not retrying");
                    return Err(e);
                }
                Err(e) if retries >= self.config.max_retries => {
                    tracing::error!(
                        attempts = retries + 1,
                        error = %e,
                        "Dialogue exhausted its retries"
                    );
                    return Err(e);
                }
                Err(e) => {
                    retries += 1;
                    let delay = self.backoff_delay(retries);
                    tracing::warn!(
                        retry = retries,
                        max_retries = self.config.max_retries,
                        delay_ms = delay,
                        error = %e,
                        "Transient dialogue error, backing off"
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
            }
        }
    }
}
