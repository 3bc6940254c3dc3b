use async_trait::async_trait;

use crate::error::BalanceError;
use crate::models::address::AddressInfo;

/// Core trait for reading account data from the network
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Fetch the balance of an address as a nanoTON integer string
    async fn fetch_balance(&self, address: &str) -> Result<String, BalanceError>;

    /// Fetch account state and last transaction for an address
    async fn fetch_address_info(&self, address: &str) -> Result<AddressInfo, BalanceError>;
}
