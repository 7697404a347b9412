// DeFi Yield Optimizer - share-accounted vault with pluggable yield adapters
// Security: every handler runs a pure state transition first and writes
// accounts only after all checks have passed
// Architecture: one Vault per asset mint, PDAs for positions and adapters

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod rebalancing;
pub mod state;
pub mod utils;

use instructions::*;
use state::{ProtocolKind, VaultConfigUpdate, VaultParams};

declare_id!("DGqtQj1izTNEooEmZVwjMXtbuwfWex3HmZVkHHXeyYPF");

#[program]
pub mod defi_yield_optimizer {
    use super::*;

    /// Initialize a new vault for a given asset token
    ///
    /// Security considerations:
    /// - Validates authority is signer
    /// - Rejects fees above the configured ceilings
    /// - Fails with AlreadyInitialized for an existing vault
    pub fn initialize_vault(
        ctx: Context<InitializeVault>,
        management_fee_bps: u16,
        performance_fee_bps: u16,
        minimum_deposit: u64,
        maximum_total_deposit: u64,
    ) -> Result<()> {
        instructions::initialize_vault::handler(
            ctx,
            VaultParams {
                management_fee_bps,
                performance_fee_bps,
                minimum_deposit,
                maximum_total_deposit,
            },
        )
    }

    /// Deposit assets into the vault and receive shares
    ///
    /// Security considerations:
    /// - Validates depositor token accounts (mint, owner)
    /// - Enforces pause, minimum deposit and vault cap
    /// - Follows checks-effects-interactions pattern
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handler(ctx, amount)
    }

    /// Redeem shares for underlying assets
    pub fn withdraw(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
        instructions::withdraw::handler(ctx, shares)
    }

    /// Authority-only; absent arguments leave the field unchanged
    pub fn update_vault_config(
        ctx: Context<UpdateVaultConfig>,
        new_management_fee_bps: Option<u16>,
        new_performance_fee_bps: Option<u16>,
        new_minimum_deposit: Option<u64>,
        new_maximum_total_deposit: Option<u64>,
    ) -> Result<()> {
        instructions::update_vault_config::handler(
            ctx,
            VaultConfigUpdate {
                management_fee_bps: new_management_fee_bps,
                performance_fee_bps: new_performance_fee_bps,
                minimum_deposit: new_minimum_deposit,
                maximum_total_deposit: new_maximum_total_deposit,
            },
        )
    }

    pub fn set_paused(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
        instructions::set_paused::handler(ctx, paused)
    }

    /// Attach an external yield source to the vault
    ///
    /// Security considerations:
    /// - Authority-only function
    /// - One adapter per (vault, protocol program) enforced by PDA
    pub fn initialize_protocol_adapter(
        ctx: Context<InitializeProtocolAdapter>,
        protocol_kind: ProtocolKind,
        max_allocation_percentage: u8,
    ) -> Result<()> {
        instructions::initialize_protocol_adapter::handler(
            ctx,
            protocol_kind,
            max_allocation_percentage,
        )
    }

    pub fn update_yield_data(
        ctx: Context<UpdateYieldData>,
        current_apy_bps: u32,
        available_liquidity: u64,
    ) -> Result<()> {
        instructions::update_yield_data::handler(ctx, current_apy_bps, available_liquidity)
    }

    pub fn set_adapter_active(ctx: Context<SetAdapterActive>, active: bool) -> Result<()> {
        instructions::set_adapter_active::handler(ctx, active)
    }

    /// Recompute target allocations across adapters (24h cooldown)
    pub fn rebalance<'info>(ctx: Context<'_, '_, 'info, 'info, Rebalance<'info>>) -> Result<()> {
        instructions::rebalance::handler(ctx)
    }

    /// Credit accrued adapter yield to shareholders, net of fees
    pub fn compound_rewards<'info>(
        ctx: Context<'_, '_, 'info, 'info, CompoundRewards<'info>>,
    ) -> Result<()> {
        instructions::compound_rewards::handler(ctx)
    }

    pub fn collect_fees(ctx: Context<CollectFees>) -> Result<()> {
        instructions::collect_fees::handler(ctx)
    }
}
