use anchor_lang::prelude::*;

use crate::{
    constants::{BPS_DENOMINATOR, SECONDS_PER_YEAR},
    errors::VaultError,
};

/// `floor(a * b / c)` with a u128 intermediate
///
/// Fails with `ArithmeticOverflow` when `c == 0` or the quotient does not
/// fit back into a u64. Never clamps.
pub fn mul_div_floor(a: u64, b: u64, c: u64) -> Result<u64> {
    let product = (a as u128)
        .checked_mul(b as u128)
        .ok_or(error!(VaultError::ArithmeticOverflow))?;

    let quotient = product
        .checked_div(c as u128)
        .ok_or(error!(VaultError::ArithmeticOverflow))?;

    u64::try_from(quotient).map_err(|_| error!(VaultError::ArithmeticOverflow))
}

/// Shares minted for a deposit of `amount`
///
/// ERC-4626 formula:
/// - No shares outstanding: shares = amount (1:1 genesis price)
/// - Otherwise: shares = amount * totalShares / totalDeposited
///
/// Truncation favors the vault.
pub fn shares_for_deposit(
    amount: u64,
    total_deposited: u64,
    total_shares_issued: u64,
) -> Result<u64> {
    if total_shares_issued == 0 {
        return Ok(amount);
    }

    mul_div_floor(amount, total_shares_issued, total_deposited)
}

/// Assets paid out when redeeming `shares`
///
/// ERC-4626 formula: assets = shares * totalDeposited / totalShares
pub fn assets_for_shares(
    shares: u64,
    total_deposited: u64,
    total_shares_issued: u64,
) -> Result<u64> {
    if total_shares_issued == 0 {
        return Ok(0);
    }

    mul_div_floor(shares, total_deposited, total_shares_issued)
}

/// Fee charged at `fee_bps` on `amount`
pub fn management_fee(amount: u64, fee_bps: u16) -> Result<u64> {
    mul_div_floor(amount, fee_bps as u64, BPS_DENOMINATOR)
}

/// Fee charged at `fee_bps` on a gain realised since the last compound
pub fn performance_fee(gain: u64, fee_bps: u16) -> Result<u64> {
    if gain == 0 {
        return Ok(0);
    }

    mul_div_floor(gain, fee_bps as u64, BPS_DENOMINATOR)
}

/// Portion of a yearly `amount` earned over `elapsed_seconds`
pub fn annualized(amount: u64, elapsed_seconds: u64) -> Result<u64> {
    mul_div_floor(amount, elapsed_seconds, SECONDS_PER_YEAR)
}

/// `part` as basis points of `whole`, zero for an empty whole
pub fn allocation_bps(part: u64, whole: u64) -> Result<u16> {
    if whole == 0 {
        return Ok(0);
    }

    let bps = mul_div_floor(part, BPS_DENOMINATOR, whole)?;
    u16::try_from(bps).map_err(|_| error!(VaultError::ArithmeticOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_vault_mints_at_par() {
        assert_eq!(shares_for_deposit(7_500_000, 0, 0).unwrap(), 7_500_000);
    }

    #[test]
    fn test_share_price_follows_compounded_yield() {
        // 1.25 underlying per share after compounding
        assert_eq!(shares_for_deposit(2_500_000, 12_500_000, 10_000_000).unwrap(), 2_000_000);
        assert_eq!(assets_for_shares(2_000_000, 12_500_000, 10_000_000).unwrap(), 2_500_000);
        assert_eq!(assets_for_shares(2_000_000, 0, 0).unwrap(), 0);
    }

    #[test]
    fn test_remainders_stay_in_vault() {
        // 10 * 3 / 7 and 10 * 7 / 3 both truncate
        assert_eq!(shares_for_deposit(10, 7, 3).unwrap(), 4);
        assert_eq!(assets_for_shares(10, 7, 3).unwrap(), 23);
    }

    #[test]
    fn test_zero_deposited_with_shares_is_an_error() {
        assert!(shares_for_deposit(100, 0, 1000).is_err());
    }

    #[test]
    fn test_fees() {
        assert_eq!(management_fee(1_000_000, 50).unwrap(), 5_000);
        assert_eq!(performance_fee(1_000_000, 1000).unwrap(), 100_000);
        assert_eq!(performance_fee(0, 1000).unwrap(), 0);
        // 199 * 50 / 10_000 = 0.995
        assert_eq!(management_fee(199, 50).unwrap(), 0);
    }

    #[test]
    fn test_annualized() {
        assert_eq!(annualized(365_000, SECONDS_PER_YEAR).unwrap(), 365_000);
        assert_eq!(annualized(365_000, 86_400).unwrap(), 1_000);
        assert_eq!(annualized(365_000, 0).unwrap(), 0);
    }

    #[test]
    fn test_allocation_bps() {
        assert_eq!(allocation_bps(250, 1000).unwrap(), 2_500);
        assert_eq!(allocation_bps(1000, 1000).unwrap(), 10_000);
        assert_eq!(allocation_bps(5, 0).unwrap(), 0);
    }

    #[test]
    fn test_mul_div_overflow_is_reported() {
        assert!(mul_div_floor(u64::MAX, u64::MAX, 1).is_err());
        assert!(mul_div_floor(1, 1, 0).is_err());
        // Wide intermediate, narrow result
        assert_eq!(mul_div_floor(u64::MAX, u64::MAX, u64::MAX).unwrap(), u64::MAX);
    }
}
