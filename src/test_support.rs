//! Fakes shared by unit tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::BalanceError;
use crate::models::address::AddressInfo;
use crate::models::balance::BalanceState;
use crate::traits::balance_source::BalanceSource;
use crate::traits::event_handler::BalanceEventHandler;

/// Scripted balance source: each call pops the next response, after its delay.
/// Once the script runs out, the fallback response is returned.
pub struct FakeBalanceSource {
    script: Mutex<VecDeque<(Duration, Result<String, BalanceError>)>>,
    fallback: Result<String, BalanceError>,
    calls: AtomicUsize,
    addresses: Mutex<Vec<String>>,
}

impl FakeBalanceSource {
    pub fn returning(fallback: Result<String, BalanceError>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            calls: AtomicUsize::new(0),
            addresses: Mutex::new(Vec::new()),
        }
    }

    pub fn ok(nano: &str) -> Self {
        Self::returning(Ok(nano.to_string()))
    }

    pub fn push(&self, delay: Duration, response: Result<String, BalanceError>) {
        self.script.lock().unwrap().push_back((delay, response));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn addresses(&self) -> Vec<String> {
        self.addresses.lock().unwrap().clone()
    }
}

#[async_trait]
impl BalanceSource for FakeBalanceSource {
    async fn fetch_balance(&self, address: &str) -> Result<String, BalanceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.addresses.lock().unwrap().push(address.to_string());

        let next = self.script.lock().unwrap().pop_front();
        let (delay, response) = next.unwrap_or((Duration::ZERO, self.fallback.clone()));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        response
    }

    async fn fetch_address_info(&self, _address: &str) -> Result<AddressInfo, BalanceError> {
        Err(BalanceError::Api("not scripted".to_string()))
    }
}

/// Handler that records everything it is told
#[derive(Default)]
pub struct RecordingHandler {
    updates: Mutex<Vec<(Option<String>, BalanceState)>>,
    errors: Mutex<Vec<(String, String)>>,
}

impl RecordingHandler {
    pub fn updates(&self) -> Vec<(Option<String>, BalanceState)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<(String, String)> {
        self.errors.lock().unwrap().clone()
    }
}

#[async_trait]
impl BalanceEventHandler for RecordingHandler {
    async fn handle_balance_update(&self, address: Option<&str>, state: &BalanceState) {
        self.updates
            .lock()
            .unwrap()
            .push((address.map(str::to_string), state.clone()));
    }

    async fn handle_error(&self, address: &str, error: &str) {
        self.errors
            .lock()
            .unwrap()
            .push((address.to_string(), error.to_string()));
    }
}
