use crate::error::BalanceError;

/// nanoTON per TON
pub const NANO_PER_TON: u128 = 1_000_000_000;

/// Parse a nanoTON integer string, with better error messages
pub fn parse_nano(s: &str) -> Result<u128, BalanceError> {
    s.trim()
        .parse::<u128>()
        .map_err(|_| BalanceError::InvalidBalance(s.to_string()))
}

/// Format nanoTON as TON
pub fn nano_to_ton(nano: u128) -> f64 {
    nano as f64 / 1e9
}

/// Format TON as nanoTON, rounded to the nearest unit
pub fn ton_to_nano(ton: f64) -> u128 {
    if !ton.is_finite() || ton <= 0.0 {
        return 0;
    }
    (ton * 1e9).round() as u128
}

/// Shorten an address for display: first six and last four characters
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_nano_to_ton() {
        assert_eq!(nano_to_ton(1_500_000_000), 1.5);
        assert_eq!(nano_to_ton(2_500_000_000), 2.5);
        assert_eq!(nano_to_ton(0), 0.0);
    }

    #[test]
    fn converts_ton_to_nano() {
        assert_eq!(ton_to_nano(1.5), 1_500_000_000);
        assert_eq!(ton_to_nano(0.1), 100_000_000);
        assert_eq!(ton_to_nano(-3.0), 0);
    }

    #[test]
    fn rejects_non_integer_balances() {
        assert_eq!(parse_nano("1500000000"), Ok(1_500_000_000));
        assert!(matches!(parse_nano("1.5"), Err(BalanceError::InvalidBalance(_))));
        assert!(matches!(parse_nano("-1"), Err(BalanceError::InvalidBalance(_))));
        assert!(matches!(parse_nano(""), Err(BalanceError::InvalidBalance(_))));
    }

    #[test]
    fn truncates_long_addresses() {
        assert_eq!(
            truncate_address("EQAbcdefghijklmnopqrstuvwxyz0123"),
            "EQAbcd...0123"
        );
        assert_eq!(truncate_address("EQshort"), "EQshort");
    }
}
