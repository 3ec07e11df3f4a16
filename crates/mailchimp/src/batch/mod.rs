//! Batch operations
//!
//! Intents are turned into [`BatchOperation`](crate::models::BatchOperation)s by
//! the [`OperationBuilder`], submitted as one remote batch by the
//! [`BatchExecutor`], and awaited by the [`BatchCompletionPoller`].

mod executor;
mod operations;
mod poller;

pub use executor::BatchExecutor;
pub use operations::OperationBuilder;
pub use poller::{BatchCompletionPoller, MAX_POLL_ATTEMPTS, Sleeper, ThreadSleeper};
