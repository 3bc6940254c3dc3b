use async_trait::async_trait;

use crate::models::balance::BalanceState;

/// Handler for balance state transitions
#[async_trait]
pub trait BalanceEventHandler: Send + Sync {
    /// Called after every state change with the new state
    async fn handle_balance_update(&self, address: Option<&str>, state: &BalanceState);

    /// Called when a fetch fails, after the state already carries the error
    async fn handle_error(&self, address: &str, error: &str);
}
