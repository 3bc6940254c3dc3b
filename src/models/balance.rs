use serde::Serialize;

use crate::utils::helper::nano_to_ton;

/// Last successfully retrieved balance for one address
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSnapshot {
    /// Balance in TON
    pub balance: f64,
    /// Balance in nanoTON, as returned by the API
    pub balance_nano: String,
    /// Unix millis of the fetch, `None` if never fetched
    pub fetched_at: Option<i64>,
}

impl BalanceSnapshot {
    /// Build a snapshot from a raw nanoTON amount
    pub fn from_nano(balance_nano: String, nano: u128, fetched_at: i64) -> Self {
        Self {
            balance: nano_to_ton(nano),
            balance_nano,
            fetched_at: Some(fetched_at),
        }
    }
}

impl Default for BalanceSnapshot {
    fn default() -> Self {
        Self {
            balance: 0.0,
            balance_nano: "0".to_string(),
            fetched_at: None,
        }
    }
}

/// Transient request lifecycle
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FetchState {
    pub is_loading: bool,
    pub last_error: Option<String>,
}

/// Everything a subscriber sees about one address
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BalanceState {
    pub snapshot: BalanceSnapshot,
    pub fetch: FetchState,
}

impl BalanceState {
    pub fn balance_major_units(&self) -> f64 {
        self.snapshot.balance
    }

    pub fn balance_minor_units_raw(&self) -> &str {
        &self.snapshot.balance_nano
    }

    pub fn is_loading(&self) -> bool {
        self.fetch.is_loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.fetch.last_error.as_deref()
    }

    pub fn last_updated_epoch_millis(&self) -> Option<i64> {
        self.snapshot.fetched_at
    }

    /// Drop back to the "no wallet" state
    pub(crate) fn reset(&mut self) {
        self.snapshot = BalanceSnapshot::default();
        self.fetch = FetchState::default();
    }

    pub(crate) fn begin_loading(&mut self) {
        self.fetch.is_loading = true;
        self.fetch.last_error = None;
    }

    /// Replace the snapshot and clear the error in one step
    pub(crate) fn apply_success(&mut self, snapshot: BalanceSnapshot, still_loading: bool) {
        self.snapshot = snapshot;
        self.fetch = FetchState {
            is_loading: still_loading,
            last_error: None,
        };
    }

    /// Record a failure, leaving the last good snapshot untouched
    pub(crate) fn apply_failure(&mut self, message: String, still_loading: bool) {
        self.fetch = FetchState {
            is_loading: still_loading,
            last_error: Some(message),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_empty() {
        let state = BalanceState::default();
        assert_eq!(state.balance_major_units(), 0.0);
        assert_eq!(state.balance_minor_units_raw(), "0");
        assert!(!state.is_loading());
        assert!(state.last_error().is_none());
        assert!(state.last_updated_epoch_millis().is_none());
    }

    #[test]
    fn failure_keeps_previous_snapshot() {
        let mut state = BalanceState::default();
        state.apply_success(BalanceSnapshot::from_nano("1500000000".into(), 1_500_000_000, 42), false);
        state.begin_loading();
        state.apply_failure("API error: 502".into(), false);

        assert_eq!(state.balance_major_units(), 1.5);
        assert_eq!(state.last_updated_epoch_millis(), Some(42));
        assert_eq!(state.last_error(), Some("API error: 502"));
        assert!(!state.is_loading());
    }

    #[test]
    fn reset_clears_error_and_balance() {
        let mut state = BalanceState::default();
        state.apply_success(BalanceSnapshot::from_nano("7".into(), 7, 1), false);
        state.apply_failure("boom".into(), true);
        state.reset();
        assert_eq!(state, BalanceState::default());
    }
}
