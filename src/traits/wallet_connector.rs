use async_trait::async_trait;

use crate::error::WalletError;
use crate::models::transaction::{SentTransaction, TransactionRequest};

/// What the tracker needs from a wallet connection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletConnector: Send + Sync {
    fn is_connected(&self) -> bool;

    /// Raw account address, `None` while disconnected
    fn address(&self) -> Option<String>;

    /// User-friendly encoded address, `None` while disconnected
    fn friendly_address(&self) -> Option<String>;

    /// Name of the wallet app, if it reports one
    fn wallet_name(&self) -> Option<String>;

    async fn connect(&self) -> Result<(), WalletError>;

    async fn disconnect(&self) -> Result<(), WalletError>;

    /// Ask the wallet to sign and broadcast a request
    async fn send_transaction(&self, request: TransactionRequest) -> Result<SentTransaction, WalletError>;
}
