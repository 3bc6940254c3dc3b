//! TON Wallet Tracker Library
//!
//! Keeps the on-chain balance of a TON wallet fresh by polling a
//! toncenter-compatible API, and drives a simulated wallet dashboard
//! (deposits, withdrawals, cashback) through a wallet connection trait.

// Public modules - these are the API surface
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod notifications;
pub mod providers;
pub mod traits;
pub mod tracker;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used items for easier access
pub use config::{ApiConfig, TrackerConfig};
pub use error::{BalanceError, LedgerError, WalletError};
pub use models::{
    address::AddressInfo,
    balance::{BalanceSnapshot, BalanceState, FetchState},
    ledger::DemoLedger,
    transaction::{SentTransaction, TransactionRequest},
};
pub use traits::{
    balance_source::BalanceSource,
    event_handler::BalanceEventHandler,
    wallet_connector::WalletConnector,
};
pub use providers::{
    http_provider::HttpBalanceProvider,
    local_wallet::LocalWalletConnector,
};
pub use handlers::{
    composite::CompositeEventHandler,
    console::ConsoleEventHandler,
};
pub use notifications::NotificationQueue;
pub use tracker::{
    balance_poller::BalancePoller,
    wallet_session::{DepositReceipt, WalletSession},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type alias for library functions
pub type Result<T> = std::result::Result<T, anyhow::Error>;
