//! Balance polling and the dashboard session built on top of it

pub mod balance_poller;
pub mod wallet_session;

// Re-export for convenience
pub use balance_poller::BalancePoller;
pub use wallet_session::{DepositReceipt, WalletSession};
