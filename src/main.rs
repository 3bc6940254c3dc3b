use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use ton_wallet_tracker::utils::helper::truncate_address;
use ton_wallet_tracker::{
    BalancePoller, ConsoleEventHandler, DemoLedger, HttpBalanceProvider, LocalWalletConnector,
    NotificationQueue, TrackerConfig, WalletConnector, WalletSession,
};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = TrackerConfig::from_env();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_level(true)
        .with_target(false)
        .with_max_level(config.log_level)
        .with_file(true)
        .with_line_number(true)
        .init();

    tokio::runtime::Runtime::new()?.block_on(run(config))
}

async fn run(config: TrackerConfig) -> anyhow::Result<()> {
    info!("Initializing wallet tracker v{}...", ton_wallet_tracker::VERSION);
    info!("API endpoint: {}", config.api.endpoint);
    info!("Poll interval: {:?}", config.poll_interval);

    let provider = Arc::new(
        HttpBalanceProvider::new(&config.api).context("failed to build HTTP client")?,
    );
    let notifications = Arc::new(NotificationQueue::new(Arc::new(ConsoleEventHandler::new())));
    let poller = Arc::new(
        BalancePoller::new(provider, notifications.clone()).with_interval(config.poll_interval),
    );

    let wallet_address = config.wallet_address.clone().unwrap_or_default();
    if wallet_address.is_empty() {
        warn!("WALLET_ADDRESS not set, running in demo mode without a wallet");
    }
    let connector: Arc<dyn WalletConnector> = Arc::new(LocalWalletConnector::new(
        wallet_address.clone(),
        config.wallet_name.clone(),
    ));

    let session = WalletSession::new(
        connector,
        poller.clone(),
        DemoLedger::new(config.cashback_rate_bps),
        config.contract_address.clone(),
    );

    if !wallet_address.is_empty() {
        info!("Connecting wallet {}", truncate_address(&wallet_address));
        session.connect().await?;

        match poller.address_info().await {
            Ok(Some(account)) => info!(
                "Account state: {}, last transaction lt: {}",
                account.state,
                account
                    .last_transaction_id
                    .as_ref()
                    .map(|id| id.lt.as_str())
                    .unwrap_or("none")
            ),
            Ok(None) => {}
            Err(e) => warn!("Could not load account information: {}", e),
        }
    }

    let ledger = session.ledger().await;
    info!("{}", "=".repeat(80));
    info!("Demo balance: {:.4} TON", ledger.balance);
    info!("Cashback: {:.4} TON at {}", ledger.cashback_balance, ledger.cashback_rate_display());
    info!("Total deposits: {:.2} TON", ledger.total_deposits);
    info!("Total withdrawals: {:.2} TON", ledger.total_withdrawals);
    info!("{}", "=".repeat(80));

    info!("Wallet tracker is running. Press Ctrl+C to stop.");

    // Keep the program running
    tokio::signal::ctrl_c().await?;

    info!("Shutting down...");
    if session.is_connected() {
        session.disconnect().await?;
    }
    poller.shutdown().await;
    notifications.shutdown().await;

    Ok(())
}
