//! Data models for the wallet tracker

pub mod address;
pub mod balance;
pub mod ledger;
pub mod transaction;

// Re-export for convenience
pub use address::{AddressInfo, TransactionId};
pub use balance::{BalanceSnapshot, BalanceState, FetchState};
pub use ledger::DemoLedger;
pub use transaction::{SentTransaction, TransactionMessage, TransactionRequest};
