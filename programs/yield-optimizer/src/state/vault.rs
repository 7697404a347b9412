use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::VaultError,
    math,
    rebalancing::{AdapterSnapshot, AllocationStrategy, TargetAllocation},
    state::UserPosition,
};

/// Vault ledger: configuration, totals, pause and cooldown state
///
/// Security considerations:
/// - Authority stored in state (not instruction args)
/// - Totals tracked for ERC-4626 share math
/// - Every transition returns a new record; the handler writes it back only
///   after all checks have passed
/// - 63 bytes padding for future upgrades
#[account]
#[derive(Debug, PartialEq)]
pub struct Vault {
    /// Authority that configures, pauses, rebalances and compounds
    pub authority: Pubkey,                  // 32 bytes

    /// Mint of the underlying deposit token
    pub asset_mint: Pubkey,                 // 32 bytes

    pub management_fee_bps: u16,            // 2 bytes
    pub performance_fee_bps: u16,           // 2 bytes
    pub minimum_deposit: u64,               // 8 bytes
    pub maximum_total_deposit: u64,         // 8 bytes

    /// Underlying units owned by shareholders, including compounded yield
    pub total_deposited: u64,               // 8 bytes

    /// Shares outstanding across all positions
    pub total_shares_issued: u64,           // 8 bytes

    /// Fees taken at compounding, not yet collected
    pub accrued_fees: u64,                  // 8 bytes

    /// Lifetime net yield credited to shareholders
    pub total_yield_earned: u64,            // 8 bytes

    pub last_rebalance_timestamp: i64,      // 8 bytes
    pub last_compound_timestamp: i64,       // 8 bytes

    /// Blocks deposits, withdrawals, rebalances and compounding
    pub is_paused: bool,                    // 1 byte

    /// Target allocation chosen by the last rebalance
    pub allocations: [AllocationSlot; MAX_ALLOCATIONS], // 42 * MAX_ALLOCATIONS bytes
    pub allocation_count: u8,               // 1 byte

    /// Protocol adapters registered to this vault
    pub adapter_count: u8,                  // 1 byte

    pub created_at: i64,                    // 8 bytes
    pub updated_at: i64,                    // 8 bytes

    /// Bump seed for vault PDA
    pub bump: u8,                           // 1 byte

    /// Bump seed for vault authority PDA
    pub authority_bump: u8,                 // 1 byte

    // Padding for future upgrades
    pub _reserved: [u8; 63],                // 63 bytes
}

/// One adapter's share of the last rebalance
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocationSlot {
    pub adapter: Pubkey,        // 32 bytes
    pub amount: u64,            // 8 bytes
    pub allocation_bps: u16,    // 2 bytes
}

impl AllocationSlot {
    pub const LEN: usize = 32 + 8 + 2;
}

/// Fee and deposit-bound settings supplied at initialization
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct VaultParams {
    pub management_fee_bps: u16,
    pub performance_fee_bps: u16,
    pub minimum_deposit: u64,
    pub maximum_total_deposit: u64,
}

/// Partial configuration change; `None` leaves a field as it is
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VaultConfigUpdate {
    pub management_fee_bps: Option<u16>,
    pub performance_fee_bps: Option<u16>,
    pub minimum_deposit: Option<u64>,
    pub maximum_total_deposit: Option<u64>,
}

#[derive(Debug)]
pub struct DepositReceipt {
    pub vault: Vault,
    pub position: UserPosition,
    pub shares: u64,
}

#[derive(Debug)]
pub struct WithdrawReceipt {
    pub vault: Vault,
    pub position: UserPosition,
    pub assets: u64,
}

#[derive(Debug)]
pub struct RebalanceReceipt {
    pub vault: Vault,
    pub plan: Vec<TargetAllocation>,
}

#[derive(Debug)]
pub struct CompoundReceipt {
    pub vault: Vault,
    pub gross_yield: u64,
    pub performance_fee: u64,
    pub management_fee: u64,
    pub net_gain: u64,
}

fn validate_fees(management_fee_bps: u16, performance_fee_bps: u16) -> Result<()> {
    require!(
        management_fee_bps <= MAX_MANAGEMENT_FEE_BPS,
        VaultError::InvalidFeeConfiguration
    );
    require!(
        performance_fee_bps <= MAX_PERFORMANCE_FEE_BPS,
        VaultError::InvalidFeeConfiguration
    );
    Ok(())
}

impl Vault {
    /// 8 discriminator + 32 authority + 32 asset_mint + 2 * 2 fees
    /// + 8 * 8 amounts and timestamps + 1 paused + allocation slots
    /// + 1 allocation_count + 1 adapter_count + 2 * 8 created/updated
    /// + 2 bumps + 63 padding
    pub const LEN: usize = 8
        + 32
        + 32
        + (2 * 2)
        + (8 * 8)
        + 1
        + (AllocationSlot::LEN * MAX_ALLOCATIONS)
        + 1
        + 1
        + (2 * 8)
        + 2
        + 63;

    /// Deterministic vault address for an underlying asset
    pub fn address(asset_mint: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[VAULT_SEED, asset_mint.as_ref()], &crate::ID)
    }

    /// PDA owning the vault token account for an underlying asset
    pub fn authority_address(asset_mint: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[VAULT_AUTHORITY_SEED, asset_mint.as_ref()], &crate::ID)
    }

    /// Fresh vault with zero totals
    ///
    /// The first rebalance is allowed immediately; yield accrues from `now`.
    pub fn genesis(
        authority: Pubkey,
        asset_mint: Pubkey,
        params: VaultParams,
        bump: u8,
        authority_bump: u8,
        now: i64,
    ) -> Result<Self> {
        validate_fees(params.management_fee_bps, params.performance_fee_bps)?;

        Ok(Self {
            authority,
            asset_mint,
            management_fee_bps: params.management_fee_bps,
            performance_fee_bps: params.performance_fee_bps,
            minimum_deposit: params.minimum_deposit,
            maximum_total_deposit: params.maximum_total_deposit,
            total_deposited: 0,
            total_shares_issued: 0,
            accrued_fees: 0,
            total_yield_earned: 0,
            last_rebalance_timestamp: 0,
            last_compound_timestamp: now,
            is_paused: false,
            allocations: [AllocationSlot::default(); MAX_ALLOCATIONS],
            allocation_count: 0,
            adapter_count: 0,
            created_at: now,
            updated_at: now,
            bump,
            authority_bump,
            _reserved: [0; 63],
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.authority != Pubkey::default()
    }

    /// Initialize this account, rejecting a vault that already exists
    pub fn initialize(
        &self,
        authority: Pubkey,
        asset_mint: Pubkey,
        params: VaultParams,
        bump: u8,
        authority_bump: u8,
        now: i64,
    ) -> Result<Self> {
        require!(!self.is_initialized(), VaultError::AlreadyInitialized);
        Self::genesis(authority, asset_mint, params, bump, authority_bump, now)
    }

    /// Capability check run at the top of every gated transition
    pub fn check_authority(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.authority, VaultError::Unauthorized);
        Ok(())
    }

    fn check_not_paused(&self) -> Result<()> {
        require!(!self.is_paused, VaultError::VaultPaused);
        Ok(())
    }

    pub fn shares_for_deposit(&self, amount: u64) -> Result<u64> {
        math::shares_for_deposit(amount, self.total_deposited, self.total_shares_issued)
    }

    pub fn assets_for_shares(&self, shares: u64) -> Result<u64> {
        math::assets_for_shares(shares, self.total_deposited, self.total_shares_issued)
    }

    /// Slots filled by the last rebalance
    pub fn current_allocations(&self) -> &[AllocationSlot] {
        &self.allocations[..self.allocation_count as usize]
    }

    /// Mint shares for `amount` and credit them to `position`
    pub fn deposit(&self, position: &UserPosition, amount: u64, now: i64) -> Result<DepositReceipt> {
        self.check_not_paused()?;
        require!(amount > 0, VaultError::ZeroDepositAmount);
        require!(amount >= self.minimum_deposit, VaultError::DepositBelowMinimum);

        let new_total = self
            .total_deposited
            .checked_add(amount)
            .ok_or(VaultError::ArithmeticOverflow)?;
        require!(
            new_total <= self.maximum_total_deposit,
            VaultError::DepositExceedsCap
        );

        let shares = self.shares_for_deposit(amount)?;
        require!(shares > 0, VaultError::ZeroSharesMinted);

        let mut vault = self.clone();
        vault.total_deposited = new_total;
        vault.total_shares_issued = vault
            .total_shares_issued
            .checked_add(shares)
            .ok_or(VaultError::ArithmeticOverflow)?;
        vault.updated_at = now;

        let position = position.credit(shares, amount, now)?;

        Ok(DepositReceipt {
            vault,
            position,
            shares,
        })
    }

    /// Burn `shares` from `position` and compute the assets owed for them
    pub fn withdraw(&self, position: &UserPosition, shares: u64, now: i64) -> Result<WithdrawReceipt> {
        self.check_not_paused()?;
        require!(shares > 0, VaultError::InvalidWithdrawalAmount);
        require!(shares <= position.shares_owned, VaultError::InsufficientShares);

        let assets = self.assets_for_shares(shares)?;

        let mut vault = self.clone();
        vault.total_deposited = vault
            .total_deposited
            .checked_sub(assets)
            .ok_or(VaultError::ArithmeticOverflow)?;
        vault.total_shares_issued = vault
            .total_shares_issued
            .checked_sub(shares)
            .ok_or(VaultError::ArithmeticOverflow)?;
        vault.updated_at = now;

        let position = position.debit(shares, assets, now)?;

        Ok(WithdrawReceipt {
            vault,
            position,
            assets,
        })
    }

    pub fn update_config(
        &self,
        caller: &Pubkey,
        update: VaultConfigUpdate,
        now: i64,
    ) -> Result<Self> {
        self.check_authority(caller)?;

        let mut vault = self.clone();
        if let Some(fee) = update.management_fee_bps {
            vault.management_fee_bps = fee;
        }
        if let Some(fee) = update.performance_fee_bps {
            vault.performance_fee_bps = fee;
        }
        if let Some(min) = update.minimum_deposit {
            vault.minimum_deposit = min;
        }
        if let Some(max) = update.maximum_total_deposit {
            vault.maximum_total_deposit = max;
        }
        validate_fees(vault.management_fee_bps, vault.performance_fee_bps)?;

        vault.updated_at = now;
        Ok(vault)
    }

    pub fn set_paused(&self, caller: &Pubkey, paused: bool, now: i64) -> Result<Self> {
        self.check_authority(caller)?;

        let mut vault = self.clone();
        vault.is_paused = paused;
        vault.updated_at = now;
        Ok(vault)
    }

    /// Count a newly registered adapter against the slot limit
    pub fn register_adapter(&self, caller: &Pubkey, now: i64) -> Result<Self> {
        self.check_authority(caller)?;
        require!(
            (self.adapter_count as usize) < MAX_ALLOCATIONS,
            VaultError::TooManyAdapters
        );

        let mut vault = self.clone();
        vault.adapter_count += 1;
        vault.updated_at = now;
        Ok(vault)
    }

    /// `adapters` must be every adapter of this vault, each listed once
    fn check_adapter_set(&self, adapters: &[AdapterSnapshot]) -> Result<()> {
        require!(adapters.len() <= MAX_ALLOCATIONS, VaultError::TooManyAdapters);

        for (i, adapter) in adapters.iter().enumerate() {
            require!(
                adapters[..i].iter().all(|other| other.key != adapter.key),
                VaultError::DuplicateAdapter
            );
        }

        require!(
            adapters.len() == self.adapter_count as usize,
            VaultError::AdapterSetIncomplete
        );
        Ok(())
    }

    pub fn can_rebalance(&self, now: i64) -> bool {
        now.saturating_sub(self.last_rebalance_timestamp) >= REBALANCE_COOLDOWN_SECONDS
    }

    /// Choose a new target allocation across `adapters`
    pub fn rebalance<S: AllocationStrategy>(
        &self,
        caller: &Pubkey,
        adapters: &[AdapterSnapshot],
        strategy: &S,
        now: i64,
    ) -> Result<RebalanceReceipt> {
        self.check_authority(caller)?;
        self.check_not_paused()?;
        require!(self.can_rebalance(now), VaultError::RebalancingCooldownActive);
        self.check_adapter_set(adapters)?;

        let plan = strategy.allocate(self.total_deposited, adapters)?;

        let mut vault = self.clone();
        vault.allocations = [AllocationSlot::default(); MAX_ALLOCATIONS];
        for (slot, target) in vault.allocations.iter_mut().zip(plan.iter()) {
            *slot = AllocationSlot {
                adapter: target.adapter,
                amount: target.amount,
                allocation_bps: math::allocation_bps(target.amount, self.total_deposited)?,
            };
        }
        vault.allocation_count = plan.len().min(MAX_ALLOCATIONS) as u8;
        vault.last_rebalance_timestamp = now;
        vault.updated_at = now;

        Ok(RebalanceReceipt { vault, plan })
    }

    /// Seconds of yield not yet compounded
    pub fn elapsed_since_compound(&self, now: i64) -> u64 {
        now.saturating_sub(self.last_compound_timestamp).max(0) as u64
    }

    /// Yield earned since the last compound on the amounts placed by the
    /// last rebalance
    ///
    /// Each adapter earns its current APY on its slot amount; adapters
    /// without a slot earn nothing. When withdrawals have shrunk the vault
    /// below the allocated sum, slots are scaled down so the combined base
    /// never exceeds `total_deposited`.
    pub fn accrued_yield(&self, adapters: &[AdapterSnapshot], now: i64) -> Result<u64> {
        self.check_adapter_set(adapters)?;

        let slots = self.current_allocations();
        let allocated = slots
            .iter()
            .try_fold(0u64, |acc, slot| acc.checked_add(slot.amount))
            .ok_or(VaultError::ArithmeticOverflow)?;
        let elapsed = self.elapsed_since_compound(now);

        adapters.iter().try_fold(0u64, |acc, adapter| {
            let Some(slot) = slots.iter().find(|slot| slot.adapter == adapter.key) else {
                return Ok(acc);
            };
            let base = if allocated > self.total_deposited {
                math::mul_div_floor(slot.amount, self.total_deposited, allocated)?
            } else {
                slot.amount
            };

            acc.checked_add(adapter.yield_on(base, elapsed)?)
                .ok_or(error!(VaultError::ArithmeticOverflow))
        })
    }

    /// Credit `gross_yield` to shareholders net of fees
    ///
    /// The performance fee comes off the gross yield first, then the
    /// management fee for the elapsed period, capped at what yield remains.
    /// No shares are minted, so the net gain raises the share price. With no
    /// shares outstanding the whole yield is kept as fees.
    pub fn compound(&self, caller: &Pubkey, gross_yield: u64, now: i64) -> Result<CompoundReceipt> {
        self.check_authority(caller)?;
        self.check_not_paused()?;

        let (performance_fee, management_fee, net_gain) = if self.total_shares_issued == 0 {
            (gross_yield, 0, 0)
        } else {
            let performance_fee = math::performance_fee(gross_yield, self.performance_fee_bps)?;
            let after_performance = gross_yield
                .checked_sub(performance_fee)
                .ok_or(VaultError::ArithmeticOverflow)?;

            let yearly_management =
                math::management_fee(self.total_deposited, self.management_fee_bps)?;
            let management_fee = math::annualized(yearly_management, self.elapsed_since_compound(now))?
                .min(after_performance);

            (performance_fee, management_fee, after_performance - management_fee)
        };
        let fees = performance_fee
            .checked_add(management_fee)
            .ok_or(VaultError::ArithmeticOverflow)?;

        let mut vault = self.clone();
        vault.total_deposited = vault
            .total_deposited
            .checked_add(net_gain)
            .ok_or(VaultError::ArithmeticOverflow)?;
        vault.total_yield_earned = vault
            .total_yield_earned
            .checked_add(net_gain)
            .ok_or(VaultError::ArithmeticOverflow)?;
        vault.accrued_fees = vault
            .accrued_fees
            .checked_add(fees)
            .ok_or(VaultError::ArithmeticOverflow)?;
        vault.last_compound_timestamp = now.max(self.last_compound_timestamp);
        vault.updated_at = now;

        Ok(CompoundReceipt {
            vault,
            gross_yield,
            performance_fee,
            management_fee,
            net_gain,
        })
    }

    /// Zero the fee counter, returning the amount to pay out
    ///
    /// `vault_balance` is the vault token account's balance; fees are paid
    /// only from tokens beyond what shareholders are owed.
    pub fn collect_fees(&self, caller: &Pubkey, vault_balance: u64, now: i64) -> Result<(Self, u64)> {
        self.check_authority(caller)?;
        require!(self.accrued_fees > 0, VaultError::NoFeesToCollect);

        let required = self
            .total_deposited
            .checked_add(self.accrued_fees)
            .ok_or(VaultError::ArithmeticOverflow)?;
        require!(vault_balance >= required, VaultError::InsufficientVaultBalance);

        let mut vault = self.clone();
        let amount = vault.accrued_fees;
        vault.accrued_fees = 0;
        vault.updated_at = now;
        Ok((vault, amount))
    }
}
