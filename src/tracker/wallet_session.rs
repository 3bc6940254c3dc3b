use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::{LedgerError, WalletError};
use crate::models::ledger::DemoLedger;
use crate::models::transaction::{SentTransaction, TransactionRequest};
use crate::traits::wallet_connector::WalletConnector;
use crate::tracker::balance_poller::BalancePoller;
use crate::utils::helper::ton_to_nano;

/// Outcome of a deposit
#[derive(Debug, Clone, PartialEq)]
pub struct DepositReceipt {
    pub amount: f64,
    pub cashback: f64,
    /// `None` for demo deposits made without a connected wallet
    pub transaction: Option<SentTransaction>,
}

impl DepositReceipt {
    pub fn is_demo(&self) -> bool {
        self.transaction.is_none()
    }
}

/// Dashboard session: a wallet connection, its balance poller and the demo ledger
pub struct WalletSession {
    connector: Arc<dyn WalletConnector>,
    poller: Arc<BalancePoller>,
    ledger: Mutex<DemoLedger>,
    contract_address: String,
}

impl WalletSession {
    pub fn new(
        connector: Arc<dyn WalletConnector>,
        poller: Arc<BalancePoller>,
        ledger: DemoLedger,
        contract_address: impl Into<String>,
    ) -> Self {
        Self {
            connector,
            poller,
            ledger: Mutex::new(ledger),
            contract_address: contract_address.into(),
        }
    }

    pub fn poller(&self) -> &Arc<BalancePoller> {
        &self.poller
    }

    pub fn is_connected(&self) -> bool {
        self.connector.is_connected()
    }

    pub async fn ledger(&self) -> DemoLedger {
        self.ledger.lock().await.clone()
    }

    pub async fn connect(&self) -> Result<(), WalletError> {
        self.connector.connect().await?;
        self.sync_address().await;
        Ok(())
    }

    pub async fn disconnect(&self) -> Result<(), WalletError> {
        self.connector.disconnect().await?;
        self.sync_address().await;
        Ok(())
    }

    /// Point the poller at whatever address the wallet currently reports
    pub async fn sync_address(&self) {
        let address = if self.connector.is_connected() {
            self.connector.friendly_address()
        } else {
            None
        };
        self.poller.set_address(address).await;
    }

    /// Deposit `amount` TON into the contract
    ///
    /// With a wallet connected the transfer is sent for signing first and the
    /// on-chain balance is refreshed afterwards. Without one the deposit is
    /// only simulated.
    pub async fn deposit(&self, amount: f64) -> Result<DepositReceipt, LedgerError> {
        self.ledger.lock().await.check_deposit(amount)?;

        let transaction = if self.connector.is_connected() {
            let request = TransactionRequest::single(
                self.contract_address.clone(),
                ton_to_nano(amount).to_string(),
                None,
            );
            let sent = self.connector.send_transaction(request).await.map_err(|e| {
                warn!("Deposit of {} TON failed: {}", amount, e);
                e
            })?;
            Some(sent)
        } else {
            None
        };

        let cashback = self.ledger.lock().await.deposit(amount)?;

        if transaction.is_some() {
            info!("Deposited {} TON, sent to wallet for confirmation", amount);
            self.poller.refetch().await;
        } else {
            info!("Deposited {} TON (demo), +{:.4} TON cashback", amount, cashback);
        }

        Ok(DepositReceipt {
            amount,
            cashback,
            transaction,
        })
    }

    pub async fn withdraw(&self, amount: f64) -> Result<(), LedgerError> {
        let mut ledger = self.ledger.lock().await;
        ledger.withdraw(amount)?;

        if self.connector.is_connected() {
            info!("Withdrawal request for {} TON sent, waiting for wallet confirmation", amount);
        } else {
            info!("Withdrawn {} TON (demo)", amount);
        }
        Ok(())
    }

    /// Move accumulated cashback into the balance; needs a connected wallet
    pub async fn claim_cashback(&self) -> Result<f64, LedgerError> {
        let mut ledger = self.ledger.lock().await;
        if ledger.cashback_balance <= 0.0 {
            return Err(LedgerError::NoCashback);
        }
        if !self.connector.is_connected() {
            return Err(LedgerError::NotConnected);
        }

        let claimed = ledger.claim_cashback()?;
        info!("Claimed {:.4} TON cashback", claimed);
        Ok(claimed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::providers::local_wallet::LocalWalletConnector;
    use crate::test_support::{FakeBalanceSource, RecordingHandler};
    use crate::traits::wallet_connector::MockWalletConnector;

    const CONTRACT: &str = "EQContract";

    fn session_with(
        connector: Arc<dyn WalletConnector>,
        source: Arc<FakeBalanceSource>,
    ) -> WalletSession {
        let poller = Arc::new(BalancePoller::new(source, Arc::new(RecordingHandler::default())));
        WalletSession::new(connector, poller, DemoLedger::default(), CONTRACT)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[tokio::test(start_paused = true)]
    async fn connect_starts_polling_and_disconnect_resets() {
        let source = Arc::new(FakeBalanceSource::ok("2500000000"));
        let wallet = Arc::new(LocalWalletConnector::new("EQAbc", "Local"));
        let session = session_with(wallet, source.clone());

        session.connect().await.unwrap();
        assert!(session.poller().is_polling().await);
        assert_eq!(session.poller().state().await.balance_major_units(), 2.5);
        assert_eq!(source.addresses(), vec!["EQAbc".to_string()]);

        session.disconnect().await.unwrap();
        assert!(!session.poller().is_polling().await);
        assert_eq!(session.poller().state().await.balance_major_units(), 0.0);

        tokio::time::sleep(Duration::from_secs(90)).await;
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn connected_deposit_sends_transaction_and_refetches() {
        let source = Arc::new(FakeBalanceSource::ok("1000000000"));
        let mut mock = MockWalletConnector::new();
        mock.expect_is_connected().return_const(true);
        mock.expect_friendly_address().return_const(Some("EQAbc".to_string()));
        mock.expect_connect().times(1).returning(|| Ok(()));
        mock.expect_send_transaction()
            .withf(|request| {
                request.messages.len() == 1
                    && request.messages[0].address == CONTRACT
                    && request.messages[0].amount == "1500000000"
            })
            .times(1)
            .returning(|_| Ok(SentTransaction { boc: "te6cc".to_string() }));

        let session = session_with(Arc::new(mock), source.clone());
        session.connect().await.unwrap();

        let receipt = session.deposit(1.5).await.unwrap();
        assert!(!receipt.is_demo());
        assert!(approx(receipt.cashback, 0.03));
        assert!(approx(session.ledger().await.balance, 14.0));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn rejected_deposit_leaves_ledger_alone() {
        let source = Arc::new(FakeBalanceSource::ok("0"));
        let mut mock = MockWalletConnector::new();
        mock.expect_is_connected().return_const(true);
        mock.expect_send_transaction()
            .returning(|_| Err(WalletError::Rejected("user declined".to_string())));

        let session = session_with(Arc::new(mock), source.clone());
        let before = session.ledger().await;

        let err = session.deposit(1.0).await.unwrap_err();
        assert_eq!(err, LedgerError::Wallet(WalletError::Rejected("user declined".to_string())));
        assert_eq!(session.ledger().await, before);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn demo_deposit_without_wallet() {
        let source = Arc::new(FakeBalanceSource::ok("0"));
        let mut mock = MockWalletConnector::new();
        mock.expect_is_connected().return_const(false);
        mock.expect_send_transaction().times(0);

        let session = session_with(Arc::new(mock), source.clone());
        let receipt = session.deposit(10.0).await.unwrap();

        assert!(receipt.is_demo());
        assert!(approx(receipt.cashback, 0.2));
        let ledger = session.ledger().await;
        assert!(approx(ledger.balance, 22.5));
        assert!(approx(ledger.cashback_balance, 0.45));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn invalid_deposit_never_reaches_wallet() {
        let mut mock = MockWalletConnector::new();
        mock.expect_is_connected().return_const(true);
        mock.expect_send_transaction().times(0);

        let session = session_with(Arc::new(mock), Arc::new(FakeBalanceSource::ok("0")));
        assert_eq!(session.deposit(0.0).await, Err(LedgerError::InvalidAmount));
    }

    #[tokio::test]
    async fn withdraw_checks_balance() {
        let mut mock = MockWalletConnector::new();
        mock.expect_is_connected().return_const(false);

        let session = session_with(Arc::new(mock), Arc::new(FakeBalanceSource::ok("0")));
        assert_eq!(session.withdraw(20.0).await, Err(LedgerError::InsufficientBalance));

        session.withdraw(2.5).await.unwrap();
        let ledger = session.ledger().await;
        assert!(approx(ledger.balance, 10.0));
        assert!(approx(ledger.total_withdrawals, 40.0));
    }

    #[tokio::test]
    async fn claim_needs_connection() {
        let mut mock = MockWalletConnector::new();
        mock.expect_is_connected().return_const(false);

        let session = session_with(Arc::new(mock), Arc::new(FakeBalanceSource::ok("0")));
        assert_eq!(session.claim_cashback().await, Err(LedgerError::NotConnected));
        assert!(approx(session.ledger().await.cashback_balance, 0.25));
    }

    #[tokio::test]
    async fn claim_when_connected() {
        let mut mock = MockWalletConnector::new();
        mock.expect_is_connected().return_const(true);

        let session = session_with(Arc::new(mock), Arc::new(FakeBalanceSource::ok("0")));
        let claimed = session.claim_cashback().await.unwrap();

        assert!(approx(claimed, 0.25));
        assert!(approx(session.ledger().await.balance, 12.75));
        assert_eq!(session.claim_cashback().await, Err(LedgerError::NoCashback));
    }
}
