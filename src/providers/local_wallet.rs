use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::error::WalletError;
use crate::models::transaction::{SentTransaction, TransactionRequest};
use crate::traits::wallet_connector::WalletConnector;

#[derive(Debug, Default)]
struct LocalWalletState {
    connected: bool,
    sent: Vec<TransactionRequest>,
}

/// In-process wallet bound to a fixed address
///
/// Stands in for an external wallet app: `connect` succeeds whenever an
/// address is configured and sent requests are recorded instead of being
/// broadcast.
pub struct LocalWalletConnector {
    address: String,
    name: String,
    state: Mutex<LocalWalletState>,
}

impl LocalWalletConnector {
    /// Create a disconnected wallet for `address`
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
            state: Mutex::new(LocalWalletState::default()),
        }
    }

    /// Requests handed to this wallet so far
    pub fn sent_transactions(&self) -> Vec<TransactionRequest> {
        self.lock().sent.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LocalWalletState> {
        // state is plain data; a poisoned lock still holds a usable value
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl WalletConnector for LocalWalletConnector {
    fn is_connected(&self) -> bool {
        self.lock().connected
    }

    fn address(&self) -> Option<String> {
        self.is_connected().then(|| self.address.clone())
    }

    fn friendly_address(&self) -> Option<String> {
        self.address()
    }

    fn wallet_name(&self) -> Option<String> {
        self.is_connected().then(|| self.name.clone())
    }

    async fn connect(&self) -> Result<(), WalletError> {
        if self.address.trim().is_empty() {
            return Err(WalletError::Connection("no wallet address configured".to_string()));
        }
        self.lock().connected = true;
        info!("Wallet {} connected: {}", self.name, self.address);
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        self.lock().connected = false;
        info!("Wallet {} disconnected", self.name);
        Ok(())
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<SentTransaction, WalletError> {
        let mut state = self.lock();
        if !state.connected {
            return Err(WalletError::NotConnected);
        }
        if request.messages.is_empty() {
            return Err(WalletError::Rejected("request has no messages".to_string()));
        }
        if request.valid_until <= chrono::Utc::now().timestamp() {
            return Err(WalletError::Rejected("request expired".to_string()));
        }

        for message in &request.messages {
            info!("Sending {} nanoTON to {}", message.amount, message.address);
        }
        state.sent.push(request);
        Ok(SentTransaction {
            boc: format!("local-{}", state.sent.len()),
        })
    }
}
