//! Error types for the tracker
//!
//! `Display` output of [`BalanceError`] is what ends up in
//! `BalanceState::last_error`, so the messages are written for users.

use thiserror::Error;

/// Failure while querying a balance endpoint
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BalanceError {
    /// Request could not complete (DNS, connection refused, timeout)
    #[error("{0}")]
    Transport(String),

    /// HTTP status outside the success range
    #[error("API error: {0}")]
    Http(u16),

    /// API reported failure, or the envelope had no usable result
    #[error("{0}")]
    Api(String),

    /// Body was not the expected JSON
    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Invalid balance value: {0}")]
    InvalidBalance(String),
}

impl From<reqwest::Error> for BalanceError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::Http(status.as_u16());
        }
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for BalanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Failure reported by a wallet connection
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WalletError {
    #[error("Wallet not connected")]
    NotConnected,

    #[error("Transaction rejected: {0}")]
    Rejected(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

/// Failure of a dashboard ledger operation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("No cashback to claim")]
    NoCashback,

    #[error("Connect wallet to claim cashback")]
    NotConnected,

    #[error("Transaction failed: {0}")]
    Wallet(#[from] WalletError),
}
