// src/tracker/balance_poller.rs
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::error::BalanceError;
use crate::models::address::AddressInfo;
use crate::models::balance::{BalanceSnapshot, BalanceState};
use crate::traits::{balance_source::BalanceSource, event_handler::BalanceEventHandler};
use crate::utils::helper::parse_nano;

/// How often a connected address is re-fetched
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

struct Tracked {
    state: BalanceState,
    /// Ticket of the newest fetch whose outcome is in `state`
    applied: u64,
}

/// State and fetch logic shared between the poller and its timer task
struct PollerCore {
    source: Arc<dyn BalanceSource>,
    handler: Arc<dyn BalanceEventHandler>,
    tracked: Mutex<Tracked>,
    issued: AtomicU64,
}

impl PollerCore {
    fn next_ticket(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// A newer fetch has been started since `ticket`
    fn superseded(&self, ticket: u64) -> bool {
        self.issued.load(Ordering::SeqCst) > ticket
    }

    async fn fetch(&self, address: Option<&str>) {
        let ticket = self.next_ticket();
        self.fetch_ticketed(ticket, address).await;
    }

    /// Run a fetch whose ticket was taken earlier, so its ordering is fixed by the caller
    async fn fetch_ticketed(&self, ticket: u64, address: Option<&str>) {
        let Some(address) = address else {
            let state = {
                let mut tracked = self.tracked.lock().await;
                tracked.applied = ticket;
                tracked.state.reset();
                tracked.state.clone()
            };
            self.handler.handle_balance_update(None, &state).await;
            return;
        };

        let state = {
            let mut tracked = self.tracked.lock().await;
            tracked.state.begin_loading();
            tracked.state.clone()
        };
        self.handler.handle_balance_update(Some(address), &state).await;

        debug!("Fetching balance for {} (request #{})", address, ticket);
        let result = self.load_snapshot(address).await;

        let (state, error) = {
            let mut tracked = self.tracked.lock().await;
            if ticket < tracked.applied {
                debug!("Discarding stale response #{} (applied #{})", ticket, tracked.applied);
                return;
            }
            tracked.applied = ticket;
            let still_loading = self.superseded(ticket);

            match result {
                Ok(snapshot) => {
                    tracked.state.apply_success(snapshot, still_loading);
                    (tracked.state.clone(), None)
                }
                Err(e) => {
                    let message = e.to_string();
                    tracked.state.apply_failure(message.clone(), still_loading);
                    (tracked.state.clone(), Some(message))
                }
            }
        };

        match &error {
            Some(message) => warn!("Failed to fetch balance for {}: {}", address, message),
            None => debug!("Balance for {}: {:.9} TON", address, state.balance_major_units()),
        }

        self.handler.handle_balance_update(Some(address), &state).await;
        if let Some(message) = error {
            self.handler.handle_error(address, &message).await;
        }
    }

    async fn load_snapshot(&self, address: &str) -> Result<BalanceSnapshot, BalanceError> {
        let raw = self.source.fetch_balance(address).await?;
        let nano = parse_nano(&raw)?;
        Ok(BalanceSnapshot::from_nano(raw, nano, chrono::Utc::now().timestamp_millis()))
    }
}

/// Recurring re-fetch for one address; dropping it stops the schedule
struct PollTimer {
    handle: JoinHandle<()>,
}

impl PollTimer {
    fn start(core: Arc<PollerCore>, address: String, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                // detached so that stopping the schedule leaves a running request alone
                let core = core.clone();
                let address = address.clone();
                tokio::spawn(async move {
                    core.fetch(Some(&address)).await;
                });
            }
        });

        Self { handle }
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Keeps the balance of the current address fresh
///
/// Fetches immediately whenever the address changes and then every poll
/// interval while an address is set. Failures never escape: they end up in
/// [`BalanceState::last_error`] and the last good balance is kept.
///
/// Overlapping fetches are not queued. Each fetch takes a ticket and a
/// response older than the one already applied is dropped, so a slow reply
/// can never overwrite a newer balance or revive one after disconnect.
pub struct BalancePoller {
    core: Arc<PollerCore>,
    address: Mutex<Option<String>>,
    timer: Mutex<Option<PollTimer>>,
    poll_interval: Duration,
}

impl BalancePoller {
    /// Create a poller with no address and the default interval
    pub fn new(source: Arc<dyn BalanceSource>, handler: Arc<dyn BalanceEventHandler>) -> Self {
        Self {
            core: Arc::new(PollerCore {
                source,
                handler,
                tracked: Mutex::new(Tracked {
                    state: BalanceState::default(),
                    applied: 0,
                }),
                issued: AtomicU64::new(0),
            }),
            address: Mutex::new(None),
            timer: Mutex::new(None),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the poll interval; a zero interval is ignored
    pub fn with_interval(mut self, poll_interval: Duration) -> Self {
        if !poll_interval.is_zero() {
            self.poll_interval = poll_interval;
        }
        self
    }

    /// Switch to a new address (or none), fetching right away
    ///
    /// Setting the address that is already current does nothing. The new
    /// schedule is armed before the first request goes out, and that request
    /// runs on its own task, so dropping this future never leaves an address
    /// without polling.
    pub async fn set_address(&self, address: Option<String>) {
        let ticket = {
            let mut current = self.address.lock().await;
            if *current == address {
                return;
            }
            *current = address.clone();

            // replacing the handle aborts the old schedule
            *self.timer.lock().await = address
                .clone()
                .map(|addr| PollTimer::start(self.core.clone(), addr, self.poll_interval));
            self.core.next_ticket()
        };

        let Some(addr) = address else {
            info!("Address cleared, polling stopped");
            self.core.fetch_ticketed(ticket, None).await;
            return;
        };

        info!("Tracking balance of {} every {:?}", addr, self.poll_interval);
        let core = self.core.clone();
        let initial = tokio::spawn(async move {
            core.fetch_ticketed(ticket, Some(&addr)).await;
        });
        if let Err(e) = initial.await {
            warn!("Initial balance fetch failed: {}", e);
        }
    }

    pub async fn address(&self) -> Option<String> {
        self.address.lock().await.clone()
    }

    /// Fetch the balance of `address` into this poller's state
    pub async fn fetch(&self, address: Option<&str>) {
        self.core.fetch(address).await;
    }

    /// Fetch again for the current address
    pub async fn refetch(&self) {
        let address = self.address().await;
        self.core.fetch(address.as_deref()).await;
    }

    /// Copy of the current state
    pub async fn state(&self) -> BalanceState {
        self.core.tracked.lock().await.state.clone()
    }

    pub async fn is_polling(&self) -> bool {
        self.timer.lock().await.is_some()
    }

    /// Account details for the current address, `None` without an address
    pub async fn address_info(&self) -> Result<Option<AddressInfo>, BalanceError> {
        match self.address().await {
            Some(address) => Ok(Some(self.core.source.fetch_address_info(&address).await?)),
            None => Ok(None),
        }
    }

    /// Stop the schedule; requests already sent are left to finish
    pub async fn shutdown(&self) {
        if self.timer.lock().await.take().is_some() {
            info!("Balance poller stopped");
        }
    }
}
