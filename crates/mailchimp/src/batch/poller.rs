//! Batch completion polling
//!
//! Batches run asynchronously on Mailchimp's side. Attempt `n` (0-indexed)
//! waits `n²` poll units before fetching the status, so the delays run
//! 0, 1, 4, 9, ... for at most [`MAX_POLL_ATTEMPTS`] fetches.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use crate::api::MailchimpApi;
use crate::error::BatchTimeoutError;
use crate::logging::SyncLogger;
use crate::models::{BatchJob, BatchSummary};

/// Status fetches before giving up on a batch
pub const MAX_POLL_ATTEMPTS: u32 = 12;

/// Blocking wait between polls
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Sleeps the current thread
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Polls a batch job until it is finished or the attempt budget runs out
pub struct BatchCompletionPoller {
    api: Arc<dyn MailchimpApi>,
    sleeper: Arc<dyn Sleeper>,
    logger: Arc<dyn SyncLogger>,
    poll_interval: Duration,
}

impl BatchCompletionPoller {
    pub fn new(
        api: Arc<dyn MailchimpApi>,
        sleeper: Arc<dyn Sleeper>,
        logger: Arc<dyn SyncLogger>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            api,
            sleeper,
            logger,
            poll_interval,
        }
    }

    /// Fetch the current state of a batch job
    pub fn fetch_status(&self, batch_id: &str) -> Result<BatchJob> {
        let body = self.api.get(&format!("batches/{}", batch_id), &[])?;
        serde_json::from_value(body)
            .with_context(|| format!("Failed to parse status of batch {}", batch_id))
    }

    /// Wait for the batch to finish and return its summary
    ///
    /// Errored operations inside a finished batch are reported in the summary.
    /// Fails with [`BatchTimeoutError`] if the batch is still unfinished after
    /// the last attempt; transport errors propagate immediately.
    pub fn wait_for_finish(&self, batch_id: &str) -> Result<BatchSummary> {
        let mut attempt: u32 = 0;

        loop {
            self.sleeper
                .sleep(self.poll_interval.saturating_mul(attempt * attempt));

            let job = self.fetch_status(batch_id)?;
            self.logger
                .info(&format!("batch {}, status: {}", batch_id, job.status));

            if job.status.is_finished() {
                let summary = job.summary();
                self.logger.info(&summary.to_string());
                self.logger
                    .info(&format!("batch {}, {}", batch_id, job.completion_details()));
                return Ok(summary);
            }

            if attempt + 1 >= MAX_POLL_ATTEMPTS {
                return Err(BatchTimeoutError {
                    batch_id: batch_id.to_string(),
                    status: job.status,
                }
                .into());
            }

            attempt += 1;
        }
    }
}
