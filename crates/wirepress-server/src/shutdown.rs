//! Shutdown signalling for ephemeral servers

use std::sync::Arc;
use tokio::sync::broadcast;

/// Shutdown signal broadcaster
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    sender: Arc<broadcast::Sender<()>>,
}

impl ShutdownSignal {
    /// Create a new shutdown signal
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Subscribe to shutdown notifications
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.sender.subscribe()
    }

    /// Trigger shutdown
    pub fn trigger(&self) {
        let _ = self.sender.send(());
        tracing::debug!("Shutdown signal triggered");
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
