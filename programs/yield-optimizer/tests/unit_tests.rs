/// Accounting engine tests
///
/// Sweeps the share and fee math over boundary values and checks the
/// properties every vault transition relies on: rounding never favors the
/// caller, widened intermediates never overflow silently, and a result that
/// cannot fit a u64 is reported instead of clamped.
use defi_yield_optimizer::{
    constants::{BPS_DENOMINATOR, MAX_PERFORMANCE_FEE_BPS},
    math::*,
};

const SAMPLES: [u64; 12] = [
    1,
    2,
    3,
    7,
    999,
    1_000_000,
    5_000_000_000,
    u32::MAX as u64,
    1 << 40,
    u64::MAX / 3,
    u64::MAX - 1,
    u64::MAX,
];

const FEE_SAMPLES: [u16; 6] = [0, 1, 50, 1_000, 5_000, 10_000];

// =============================================================================
// SHARE MATH - Rounding direction
// =============================================================================

#[test]
fn test_genesis_deposit_is_one_to_one() {
    for amount in SAMPLES {
        assert_eq!(shares_for_deposit(amount, 0, 0).unwrap(), amount);
    }
}

#[test]
fn test_deposit_shares_round_down() {
    for amount in SAMPLES {
        for total_deposited in SAMPLES {
            for total_shares in SAMPLES {
                let exact = amount as u128 * total_shares as u128 / total_deposited as u128;

                match shares_for_deposit(amount, total_deposited, total_shares) {
                    Ok(shares) => {
                        assert_eq!(shares as u128, exact);
                        // Never more value in shares than was paid in
                        assert!(
                            shares as u128 * total_deposited as u128
                                <= amount as u128 * total_shares as u128
                        );
                    }
                    Err(_) => assert!(
                        exact > u64::MAX as u128,
                        "only unrepresentable results may fail: {} {} {}",
                        amount,
                        total_deposited,
                        total_shares
                    ),
                }
            }
        }
    }
}

#[test]
fn test_redeemed_assets_round_down() {
    for shares in SAMPLES {
        for total_deposited in SAMPLES {
            for total_shares in SAMPLES.iter().copied().filter(|s| *s >= shares) {
                let assets = assets_for_shares(shares, total_deposited, total_shares).unwrap();
                // shares <= total_shares keeps the result within total_deposited
                assert!(assets <= total_deposited);
                assert!(
                    assets as u128 * total_shares as u128
                        <= shares as u128 * total_deposited as u128
                );
            }
        }
    }
}

#[test]
fn test_deposit_then_redeem_never_gains() {
    for amount in SAMPLES {
        for total_deposited in SAMPLES {
            for total_shares in SAMPLES {
                let Ok(shares) = shares_for_deposit(amount, total_deposited, total_shares) else {
                    continue;
                };
                let (Some(new_deposited), Some(new_shares)) = (
                    total_deposited.checked_add(amount),
                    total_shares.checked_add(shares),
                ) else {
                    continue;
                };

                let redeemed = assets_for_shares(shares, new_deposited, new_shares).unwrap();
                assert!(
                    redeemed <= amount,
                    "round trip returned {} for {} ({} / {})",
                    redeemed,
                    amount,
                    total_deposited,
                    total_shares
                );
            }
        }
    }
}

#[test]
fn test_redeem_without_shares_pays_nothing() {
    assert_eq!(assets_for_shares(1_000, 0, 0).unwrap(), 0);
    assert_eq!(assets_for_shares(1_000, 5_000, 0).unwrap(), 0);
}

#[test]
fn test_zero_deposited_with_outstanding_shares_is_rejected() {
    assert!(shares_for_deposit(100, 0, 1_000).is_err());
}

// =============================================================================
// FEE MATH
// =============================================================================

#[test]
fn test_fees_never_exceed_base() {
    for amount in SAMPLES {
        for fee_bps in FEE_SAMPLES {
            let management = management_fee(amount, fee_bps).unwrap();
            let performance = performance_fee(amount, fee_bps).unwrap();

            assert!(management <= amount);
            assert_eq!(management, performance);
            assert!(management as u128 * BPS_DENOMINATOR as u128 <= amount as u128 * fee_bps as u128);
        }
    }
}

#[test]
fn test_full_fee_takes_everything() {
    assert_eq!(management_fee(u64::MAX, 10_000).unwrap(), u64::MAX);
}

#[test]
fn test_performance_fee_on_no_gain() {
    assert_eq!(performance_fee(0, MAX_PERFORMANCE_FEE_BPS).unwrap(), 0);
}

#[test]
fn test_fee_scenario_values() {
    // 0.5% management, 10% performance
    assert_eq!(management_fee(5_000_000_000, 50).unwrap(), 25_000_000);
    assert_eq!(performance_fee(5_000_000_000, 1_000).unwrap(), 500_000_000);
}

// =============================================================================
// TIME AND ALLOCATION HELPERS
// =============================================================================

#[test]
fn test_annualized_never_exceeds_yearly_amount_within_a_year() {
    let year = defi_yield_optimizer::constants::SECONDS_PER_YEAR;
    for amount in SAMPLES {
        for elapsed in [0, 1, 3_600, 86_400, year / 2, year] {
            assert!(annualized(amount, elapsed).unwrap() <= amount);
        }
    }
}

#[test]
fn test_allocation_bps_bounds() {
    for whole in SAMPLES {
        assert_eq!(allocation_bps(whole, whole).unwrap(), 10_000);
        assert_eq!(allocation_bps(0, whole).unwrap(), 0);
    }
    // 1_000% of the whole does not fit a u16 of basis points
    assert!(allocation_bps(10, 1).is_err());
}
