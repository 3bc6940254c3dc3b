// src/notifications/mod.rs
use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::mpsc::{UnboundedSender, UnboundedReceiver, unbounded_channel};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, warn};

use crate::models::balance::BalanceState;
use crate::traits::event_handler::BalanceEventHandler;

/// Notification types
#[derive(Debug, Clone)]
pub enum Notification {
    BalanceUpdate {
        address: Option<String>,
        state: BalanceState,
    },
    Error {
        address: String,
        message: String,
    },
    Shutdown,
}

/// Delivers notifications to a slow handler on a dedicated task
///
/// The poller never waits on the wrapped handler; notifications are
/// processed in the order they were queued.
pub struct NotificationQueue {
    sender: UnboundedSender<Notification>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl NotificationQueue {
    /// Create a new notification queue. Must be called inside a tokio runtime.
    pub fn new(handler: Arc<dyn BalanceEventHandler>) -> Self {
        let (sender, receiver) = unbounded_channel();
        let worker = tokio::spawn(Self::process_notifications(receiver, handler));
        Self { sender, worker: Mutex::new(Some(worker)) }
    }

    async fn process_notifications(
        mut receiver: UnboundedReceiver<Notification>,
        handler: Arc<dyn BalanceEventHandler>,
    ) {
        while let Some(notification) = receiver.recv().await {
            match notification {
                Notification::BalanceUpdate { address, state } => {
                    handler.handle_balance_update(address.as_deref(), &state).await;
                }
                Notification::Error { address, message } => {
                    handler.handle_error(&address, &message).await;
                }
                Notification::Shutdown => {
                    warn!("Notification processor shutting down");
                    break;
                }
            }
        }
    }

    fn enqueue(&self, notification: Notification) {
        if let Err(e) = self.sender.send(notification) {
            error!("Failed to queue balance notification: {}", e);
        }
    }

    /// Stop the worker after everything queued so far has been delivered
    pub async fn shutdown(&self) {
        let Some(worker) = self.worker.lock().await.take() else {
            return;
        };
        self.enqueue(Notification::Shutdown);
        if let Err(e) = worker.await {
            error!("Notification processor failed: {}", e);
        }
    }
}

#[async_trait]
impl BalanceEventHandler for NotificationQueue {
    async fn handle_balance_update(&self, address: Option<&str>, state: &BalanceState) {
        self.enqueue(Notification::BalanceUpdate {
            address: address.map(str::to_string),
            state: state.clone(),
        });
    }

    async fn handle_error(&self, address: &str, error: &str) {
        self.enqueue(Notification::Error {
            address: address.to_string(),
            message: error.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingHandler;

    #[tokio::test]
    async fn delivers_in_order_before_shutdown() {
        let recorder = Arc::new(RecordingHandler::default());
        let queue = NotificationQueue::new(recorder.clone());

        let mut loading = BalanceState::default();
        loading.begin_loading();
        queue.handle_balance_update(Some("EQAbc"), &loading).await;
        queue.handle_error("EQAbc", "API error: 500").await;
        queue.handle_balance_update(None, &BalanceState::default()).await;
        queue.shutdown().await;

        let updates = recorder.updates();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].0.as_deref(), Some("EQAbc"));
        assert!(updates[0].1.is_loading());
        assert_eq!(updates[1].0, None);
        assert_eq!(recorder.errors().len(), 1);
    }
}
