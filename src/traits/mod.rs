//! Core traits for the wallet tracker

pub mod balance_source;
pub mod event_handler;
pub mod wallet_connector;

// Re-export for convenience
pub use balance_source::BalanceSource;
pub use event_handler::BalanceEventHandler;
pub use wallet_connector::WalletConnector;
