use async_trait::async_trait;
use tracing::{info, warn};

use crate::models::balance::BalanceState;
use crate::traits::event_handler::BalanceEventHandler;
use crate::utils::helper::truncate_address;

/// Summary line for a settled balance, `None` while a fetch is running
pub fn balance_line(address: &str, state: &BalanceState) -> Option<String> {
    if state.is_loading() {
        return None;
    }

    let line = match state.last_error() {
        Some(error) => format!(
            "{}: {:.4} TON (stale, last error: {})",
            truncate_address(address),
            state.balance_major_units(),
            error
        ),
        None => {
            let updated = state
                .last_updated_epoch_millis()
                .and_then(chrono::DateTime::<chrono::Utc>::from_timestamp_millis)
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| "never".to_string());
            format!(
                "{}: {:.4} TON ({} nanoTON) updated {}",
                truncate_address(address),
                state.balance_major_units(),
                state.balance_minor_units_raw(),
                updated
            )
        }
    };
    Some(line)
}

/// Console logging event handler
pub struct ConsoleEventHandler;

impl ConsoleEventHandler {
    /// Create a new console event handler
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BalanceEventHandler for ConsoleEventHandler {
    async fn handle_balance_update(&self, address: Option<&str>, state: &BalanceState) {
        let Some(address) = address else {
            info!("No wallet connected, balance reset");
            return;
        };

        if let Some(line) = balance_line(address, state) {
            info!("{}", line);
        }
    }

    async fn handle_error(&self, address: &str, error: &str) {
        warn!("Balance fetch failed for {}: {}", truncate_address(address), error);
    }
}
