use std::sync::Arc;
use async_trait::async_trait;

use crate::models::balance::BalanceState;
use crate::traits::event_handler::BalanceEventHandler;

/// Composite event handler that can combine multiple handlers
pub struct CompositeEventHandler {
    handlers: Vec<Arc<dyn BalanceEventHandler>>,
}

impl CompositeEventHandler {
    /// Create a new composite event handler
    pub fn new() -> Self {
        Self { handlers: Vec::new() }
    }

    /// Add a handler to the composite
    pub fn add_handler(&mut self, handler: Arc<dyn BalanceEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for CompositeEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BalanceEventHandler for CompositeEventHandler {
    async fn handle_balance_update(&self, address: Option<&str>, state: &BalanceState) {
        for handler in &self.handlers {
            handler.handle_balance_update(address, state).await;
        }
    }

    async fn handle_error(&self, address: &str, error: &str) {
        for handler in &self.handlers {
            handler.handle_error(address, error).await;
        }
    }
}
