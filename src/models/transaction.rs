use serde::{Deserialize, Serialize};

/// How long a wallet may take to sign a request before it expires
pub const TRANSACTION_TTL_SECS: i64 = 600;

/// One outgoing message of a transaction request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionMessage {
    pub address: String,
    /// Amount in nanoTON
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

/// Request handed to the wallet for signing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Unix seconds after which the wallet must refuse to sign
    pub valid_until: i64,
    pub messages: Vec<TransactionMessage>,
}

impl TransactionRequest {
    /// Single transfer valid for [`TRANSACTION_TTL_SECS`]
    pub fn single(to: impl Into<String>, amount_nano: impl Into<String>, payload: Option<String>) -> Self {
        Self {
            valid_until: chrono::Utc::now().timestamp() + TRANSACTION_TTL_SECS,
            messages: vec![TransactionMessage {
                address: to.into(),
                amount: amount_nano.into(),
                payload,
            }],
        }
    }
}

/// Wallet's answer to a signed request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentTransaction {
    /// Serialized external message
    pub boc: String,
}
