use anchor_lang::prelude::*;

use crate::{
    constants::*, errors::*, events::*, rebalancing::AdapterSnapshot, state::*, utils,
};

/// Fold yield accrued by the vault's adapters into the share price
///
/// Remaining accounts: every `ProtocolAdapter` of this vault, read-only.
#[derive(Accounts)]
pub struct CompoundRewards<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.asset_mint.as_ref()],
        bump = vault.bump,
        has_one = authority @ VaultError::Unauthorized,
    )]
    pub vault: Account<'info, Vault>,
}

pub fn handler<'info>(ctx: Context<'_, '_, 'info, 'info, CompoundRewards<'info>>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault_key = ctx.accounts.vault.key();

    let adapters = utils::load_adapters(ctx.remaining_accounts, &vault_key)?;
    let snapshots: Vec<AdapterSnapshot> = adapters
        .iter()
        .map(|adapter| AdapterSnapshot::new(adapter.key(), adapter))
        .collect();

    // Yield base comes from the vault's own allocation slots
    let gross_yield = ctx.accounts.vault.accrued_yield(&snapshots, now)?;

    let receipt = ctx
        .accounts
        .vault
        .compound(&ctx.accounts.authority.key(), gross_yield, now)?;
    ctx.accounts.vault.set_inner(receipt.vault);

    emit!(RewardsCompounded {
        vault: vault_key,
        gross_yield,
        performance_fee: receipt.performance_fee,
        management_fee: receipt.management_fee,
        net_gain: receipt.net_gain,
        total_deposited: ctx.accounts.vault.total_deposited,
        timestamp: now,
    });

    msg!("Rewards compounded: {} net of fees", receipt.net_gain);

    Ok(())
}
