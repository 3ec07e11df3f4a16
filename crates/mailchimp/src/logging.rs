//! Sync audit logging
//!
//! Every batch operation and every poll status goes through a [`SyncLogger`].
//! The default forwards to the `log` facade; [`MemorySyncLogger`] keeps the
//! messages so tests and callers can inspect them.

use std::sync::Mutex;

/// Receiver for sync audit messages
pub trait SyncLogger: Send + Sync {
    fn info(&self, message: &str);
}

/// Forwards audit messages to `log::info!` under the `mailchimp` target
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSyncLogger;

impl SyncLogger for LogSyncLogger {
    fn info(&self, message: &str) {
        log::info!(target: "mailchimp", "{}", message);
    }
}

/// Collects audit messages in memory
#[derive(Debug, Default)]
pub struct MemorySyncLogger {
    messages: Mutex<Vec<String>>,
}

impl MemorySyncLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages logged so far
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl SyncLogger for MemorySyncLogger {
    fn info(&self, message: &str) {
        if let Ok(mut guard) = self.messages.lock() {
            guard.push(message.to_string());
        }
    }
}
