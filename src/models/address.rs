use serde::{Deserialize, Serialize};

/// Logical time and hash of the last transaction touching an address
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TransactionId {
    pub lt: String,
    pub hash: String,
}

/// Account information as reported by `getAddressInformation`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AddressInfo {
    /// Balance in nanoTON
    pub balance: String,
    /// Account state, e.g. `active` or `uninitialized`
    pub state: String,
    #[serde(default)]
    pub last_transaction_id: Option<TransactionId>,
}

impl AddressInfo {
    pub fn is_active(&self) -> bool {
        self.state == "active"
    }
}
