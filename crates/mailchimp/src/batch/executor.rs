//! Batch submission

use anyhow::{Context, Result};
use std::fmt::Debug;
use std::sync::Arc;

use super::BatchCompletionPoller;
use crate::api::MailchimpApi;
use crate::api::types::CreateBatchRequest;
use crate::logging::SyncLogger;
use crate::models::{BatchJob, BatchOperation, BatchSummary};

/// Submits operations as one remote batch and waits for it to finish
pub struct BatchExecutor {
    api: Arc<dyn MailchimpApi>,
    list_id: String,
    logger: Arc<dyn SyncLogger>,
    poller: BatchCompletionPoller,
}

impl BatchExecutor {
    pub fn new(
        api: Arc<dyn MailchimpApi>,
        list_id: impl Into<String>,
        logger: Arc<dyn SyncLogger>,
        poller: BatchCompletionPoller,
    ) -> Self {
        Self {
            api,
            list_id: list_id.into(),
            logger,
            poller,
        }
    }

    /// Build one operation per item, submit them together and await the batch
    ///
    /// Returns `None` without any remote call when there is nothing to submit.
    pub fn execute<T, I, F>(&self, items: I, mut build_operation: F) -> Result<Option<BatchSummary>>
    where
        I: IntoIterator<Item = T>,
        T: Debug,
        F: FnMut(&T) -> BatchOperation,
    {
        let operations: Vec<BatchOperation> = items
            .into_iter()
            .map(|item| {
                let operation = build_operation(&item);
                self.logger.info(&format!(
                    "mailchimp: {}, op: {}, item: {:?}",
                    self.list_id, operation.method, item
                ));
                self.logger.info(&operation.to_string());
                operation
            })
            .collect();

        if operations.is_empty() {
            return Ok(None);
        }

        let job = self.submit(&operations)?;
        self.poller.wait_for_finish(&job.id).map(Some)
    }

    /// Create the remote batch job
    fn submit(&self, operations: &[BatchOperation]) -> Result<BatchJob> {
        let request = serde_json::to_value(CreateBatchRequest { operations })
            .context("Failed to serialize batch request")?;

        let body = self
            .api
            .post("batches", &request)
            .with_context(|| format!("Failed to submit batch of {} operations", operations.len()))?;

        let job: BatchJob =
            serde_json::from_value(body).context("Failed to parse batch creation response")?;

        self.logger.info(&format!(
            "batch {} submitted with {} operations",
            job.id,
            operations.len()
        ));
        Ok(job)
    }
}
