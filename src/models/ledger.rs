use serde::Serialize;

use crate::error::LedgerError;

/// Default cashback, in basis points (2%)
pub const DEFAULT_CASHBACK_RATE_BPS: u32 = 200;

/// Simulated dashboard accounting, in TON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoLedger {
    pub balance: f64,
    pub cashback_balance: f64,
    pub total_deposits: f64,
    pub total_withdrawals: f64,
    /// Unix seconds
    pub last_tx_timestamp: i64,
    pub cashback_rate_bps: u32,
}

impl DemoLedger {
    /// Ledger with the dashboard's demo starting figures
    pub fn new(cashback_rate_bps: u32) -> Self {
        Self {
            balance: 12.5,
            cashback_balance: 0.25,
            total_deposits: 50.0,
            total_withdrawals: 37.5,
            last_tx_timestamp: chrono::Utc::now().timestamp() - 3600,
            cashback_rate_bps,
        }
    }

    /// Cashback earned on a deposit of `amount`
    pub fn cashback_for(&self, amount: f64) -> f64 {
        amount * self.cashback_rate_bps as f64 / 10_000.0
    }

    /// Rate as shown to users, e.g. `2.0%`
    pub fn cashback_rate_display(&self) -> String {
        format!("{:.1}%", self.cashback_rate_bps as f64 / 100.0)
    }

    /// Validate a deposit without applying it
    pub fn check_deposit(&self, amount: f64) -> Result<(), LedgerError> {
        validate_amount(amount)
    }

    /// Credit a deposit; returns the cashback earned
    pub fn deposit(&mut self, amount: f64) -> Result<f64, LedgerError> {
        self.check_deposit(amount)?;
        let cashback = self.cashback_for(amount);
        self.balance += amount;
        self.total_deposits += amount;
        self.cashback_balance += cashback;
        self.touch();
        Ok(cashback)
    }

    pub fn withdraw(&mut self, amount: f64) -> Result<(), LedgerError> {
        self.check_withdraw(amount)?;
        self.balance -= amount;
        self.total_withdrawals += amount;
        self.touch();
        Ok(())
    }

    /// Validate a withdrawal without applying it
    pub fn check_withdraw(&self, amount: f64) -> Result<(), LedgerError> {
        validate_amount(amount)?;
        if amount > self.balance {
            return Err(LedgerError::InsufficientBalance);
        }
        Ok(())
    }

    /// Move all cashback into the main balance; returns the amount claimed
    pub fn claim_cashback(&mut self) -> Result<f64, LedgerError> {
        if self.cashback_balance <= 0.0 {
            return Err(LedgerError::NoCashback);
        }
        let claimed = self.cashback_balance;
        self.balance += claimed;
        self.cashback_balance = 0.0;
        self.touch();
        Ok(claimed)
    }

    fn touch(&mut self) {
        self.last_tx_timestamp = chrono::Utc::now().timestamp();
    }
}

impl Default for DemoLedger {
    fn default() -> Self {
        Self::new(DEFAULT_CASHBACK_RATE_BPS)
    }
}

fn validate_amount(amount: f64) -> Result<(), LedgerError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn deposit_earns_cashback() {
        let mut ledger = DemoLedger::default();
        let cashback = ledger.deposit(10.0).unwrap();

        assert!(approx(cashback, 0.2));
        assert!(approx(ledger.balance, 22.5));
        assert!(approx(ledger.total_deposits, 60.0));
        assert!(approx(ledger.cashback_balance, 0.45));
    }

    #[test]
    fn withdraw_more_than_balance_is_rejected() {
        let mut ledger = DemoLedger::default();
        let before = ledger.clone();

        assert_eq!(ledger.withdraw(100.0), Err(LedgerError::InsufficientBalance));
        assert_eq!(ledger, before);
    }

    #[test]
    fn withdraw_whole_balance() {
        let mut ledger = DemoLedger::default();
        ledger.withdraw(12.5).unwrap();
        assert!(approx(ledger.balance, 0.0));
        assert!(approx(ledger.total_withdrawals, 50.0));
    }

    #[test]
    fn non_positive_amounts_are_invalid() {
        let mut ledger = DemoLedger::default();
        assert_eq!(ledger.deposit(0.0), Err(LedgerError::InvalidAmount));
        assert_eq!(ledger.deposit(-1.0), Err(LedgerError::InvalidAmount));
        assert_eq!(ledger.withdraw(f64::NAN), Err(LedgerError::InvalidAmount));
    }

    #[test]
    fn claim_moves_cashback_into_balance() {
        let mut ledger = DemoLedger::default();
        let claimed = ledger.claim_cashback().unwrap();

        assert!(approx(claimed, 0.25));
        assert!(approx(ledger.balance, 12.75));
        assert_eq!(ledger.cashback_balance, 0.0);
        assert_eq!(ledger.claim_cashback(), Err(LedgerError::NoCashback));
    }

    #[test]
    fn rate_display() {
        assert_eq!(DemoLedger::new(200).cashback_rate_display(), "2.0%");
        assert_eq!(DemoLedger::new(150).cashback_rate_display(), "1.5%");
    }
}
