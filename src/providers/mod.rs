//! Providers for balance data and wallet connections

pub mod http_provider;
pub mod local_wallet;

// Re-export for convenience
pub use http_provider::HttpBalanceProvider;
pub use local_wallet::LocalWalletConnector;
