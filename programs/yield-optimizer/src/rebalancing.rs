use anchor_lang::prelude::*;

use crate::{
    constants::{BPS_DENOMINATOR, MAX_ALLOCATION_PERCENTAGE},
    math,
    state::ProtocolAdapter,
};

/// Read-only view of an adapter handed to an allocation strategy
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdapterSnapshot {
    pub key: Pubkey,
    pub current_apy_bps: u32,
    pub available_liquidity: u64,
    pub max_allocation_percentage: u8,
    pub is_active: bool,
}

impl AdapterSnapshot {
    pub fn new(key: Pubkey, adapter: &ProtocolAdapter) -> Self {
        Self {
            key,
            current_apy_bps: adapter.current_apy_bps,
            available_liquidity: adapter.available_liquidity,
            max_allocation_percentage: adapter.max_allocation_percentage,
            is_active: adapter.is_active,
        }
    }

    /// Most this adapter may receive out of `total_assets`
    pub fn cap(&self, total_assets: u64) -> Result<u64> {
        let cap = math::mul_div_floor(
            total_assets,
            self.max_allocation_percentage as u64,
            MAX_ALLOCATION_PERCENTAGE as u64,
        )?;
        Ok(cap.min(self.available_liquidity))
    }

    /// Yield on `base` at the current APY over `elapsed_seconds`
    ///
    /// Inactive adapters earn nothing.
    pub fn yield_on(&self, base: u64, elapsed_seconds: u64) -> Result<u64> {
        if !self.is_active || base == 0 {
            return Ok(0);
        }

        let yearly = math::mul_div_floor(base, self.current_apy_bps as u64, BPS_DENOMINATOR)?;
        math::annualized(yearly, elapsed_seconds)
    }
}

/// Amount of vault assets a rebalance routes to one adapter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetAllocation {
    pub adapter: Pubkey,
    pub amount: u64,
}

/// Policy deciding how vault assets are spread across adapters
///
/// Implementations must never assign more than `total_assets` in sum nor
/// more than an adapter's `cap`. Adapters left out receive nothing.
pub trait AllocationStrategy {
    fn allocate(
        &self,
        total_assets: u64,
        adapters: &[AdapterSnapshot],
    ) -> Result<Vec<TargetAllocation>>;
}

/// Fill the highest-APY active adapters first, each up to its cap
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyApyStrategy;

impl AllocationStrategy for GreedyApyStrategy {
    fn allocate(
        &self,
        total_assets: u64,
        adapters: &[AdapterSnapshot],
    ) -> Result<Vec<TargetAllocation>> {
        let mut candidates: Vec<&AdapterSnapshot> = adapters
            .iter()
            .filter(|a| a.is_active && a.available_liquidity > 0)
            .collect();

        // Ties go to the deeper pool, then to the lower key so the plan is
        // independent of account order
        candidates.sort_by(|a, b| {
            b.current_apy_bps
                .cmp(&a.current_apy_bps)
                .then(b.available_liquidity.cmp(&a.available_liquidity))
                .then(a.key.cmp(&b.key))
        });

        let mut remaining = total_assets;
        let mut plan = Vec::with_capacity(candidates.len());

        for adapter in candidates {
            if remaining == 0 {
                break;
            }

            let amount = remaining.min(adapter.cap(total_assets)?);
            if amount == 0 {
                continue;
            }

            plan.push(TargetAllocation {
                adapter: adapter.key,
                amount,
            });
            remaining -= amount;
        }

        Ok(plan)
    }
}

/// Target amount for `adapter` in `plan`, zero when it was left out
pub fn planned_amount(plan: &[TargetAllocation], adapter: &Pubkey) -> u64 {
    plan.iter()
        .find(|t| t.adapter == *adapter)
        .map(|t| t.amount)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(apy: u32, liquidity: u64, cap_pct: u8, active: bool) -> AdapterSnapshot {
        AdapterSnapshot {
            key: Pubkey::new_unique(),
            current_apy_bps: apy,
            available_liquidity: liquidity,
            max_allocation_percentage: cap_pct,
            is_active: active,
        }
    }

    #[test]
    fn test_highest_apy_filled_first() {
        let low = snapshot(300, u64::MAX, 60, true);
        let high = snapshot(800, u64::MAX, 60, true);

        let plan = GreedyApyStrategy.allocate(1_000, &[low, high]).unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0], TargetAllocation { adapter: high.key, amount: 600 });
        assert_eq!(plan[1], TargetAllocation { adapter: low.key, amount: 400 });
    }

    #[test]
    fn test_liquidity_limits_allocation() {
        let shallow = snapshot(900, 100, 100, true);
        let deep = snapshot(500, u64::MAX, 100, true);

        let plan = GreedyApyStrategy.allocate(1_000, &[shallow, deep]).unwrap();

        assert_eq!(planned_amount(&plan, &shallow.key), 100);
        assert_eq!(planned_amount(&plan, &deep.key), 900);
    }

    #[test]
    fn test_inactive_and_dry_adapters_skipped() {
        let inactive = snapshot(2_000, u64::MAX, 100, false);
        let dry = snapshot(1_500, 0, 100, true);
        let live = snapshot(100, u64::MAX, 50, true);

        let plan = GreedyApyStrategy
            .allocate(1_000, &[inactive, dry, live])
            .unwrap();

        assert_eq!(plan, vec![TargetAllocation { adapter: live.key, amount: 500 }]);
    }

    #[test]
    fn test_caps_leave_assets_idle() {
        let a = snapshot(500, u64::MAX, 30, true);
        let b = snapshot(400, u64::MAX, 20, true);

        let plan = GreedyApyStrategy.allocate(1_000, &[a, b]).unwrap();
        let assigned: u64 = plan.iter().map(|t| t.amount).sum();

        assert_eq!(assigned, 500);
    }

    #[test]
    fn test_zero_cap_and_empty_vault() {
        let zero_cap = snapshot(500, u64::MAX, 0, true);
        assert!(GreedyApyStrategy.allocate(1_000, &[zero_cap]).unwrap().is_empty());

        let normal = snapshot(500, u64::MAX, 100, true);
        assert!(GreedyApyStrategy.allocate(0, &[normal]).unwrap().is_empty());
    }

    #[test]
    fn test_order_independent() {
        let a = snapshot(500, 1_000, 50, true);
        let b = snapshot(500, 1_000, 50, true);

        let forward = GreedyApyStrategy.allocate(600, &[a, b]).unwrap();
        let backward = GreedyApyStrategy.allocate(600, &[b, a]).unwrap();

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_yield_on_base() {
        // 10% APY on 1_000_000 for a full year
        let live = snapshot(1_000, u64::MAX, 100, true);
        assert_eq!(live.yield_on(1_000_000, crate::constants::SECONDS_PER_YEAR).unwrap(), 100_000);
        assert_eq!(live.yield_on(0, crate::constants::SECONDS_PER_YEAR).unwrap(), 0);

        let idle = snapshot(1_000, u64::MAX, 100, false);
        assert_eq!(idle.yield_on(1_000_000, crate::constants::SECONDS_PER_YEAR).unwrap(), 0);
    }
}
