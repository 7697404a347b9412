use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::*,
    events::*,
    rebalancing::{planned_amount, AdapterSnapshot, GreedyApyStrategy},
    state::*,
    utils,
};

/// Recompute the target allocation across the vault's adapters
///
/// Remaining accounts: every `ProtocolAdapter` of this vault, writable.
/// Adapters the plan leaves out are reset to a zero target.
#[derive(Accounts)]
pub struct Rebalance<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.asset_mint.as_ref()],
        bump = vault.bump,
        has_one = authority @ VaultError::Unauthorized,
    )]
    pub vault: Account<'info, Vault>,
}

pub fn handler<'info>(ctx: Context<'_, '_, 'info, 'info, Rebalance<'info>>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault_key = ctx.accounts.vault.key();

    let mut adapters = utils::load_adapters(ctx.remaining_accounts, &vault_key)?;
    let snapshots: Vec<AdapterSnapshot> = adapters
        .iter()
        .map(|adapter| AdapterSnapshot::new(adapter.key(), adapter))
        .collect();

    // CHECKS: authority, pause and cooldown before anything is written
    let receipt = ctx.accounts.vault.rebalance(
        &ctx.accounts.authority.key(),
        &snapshots,
        &GreedyApyStrategy,
        now,
    )?;

    // EFFECTS: the asset movement itself belongs to each adapter's program
    for adapter in adapters.iter_mut() {
        let target = planned_amount(&receipt.plan, &adapter.key());
        let next = adapter.with_allocation(target, now);
        adapter.set_inner(next);
        adapter.exit(&crate::ID)?;
    }

    let total_allocated = receipt
        .plan
        .iter()
        .try_fold(0u64, |acc, t| acc.checked_add(t.amount))
        .ok_or(VaultError::ArithmeticOverflow)?;

    ctx.accounts.vault.set_inner(receipt.vault);

    emit!(Rebalanced {
        vault: vault_key,
        adapters_considered: snapshots.len() as u8,
        adapters_allocated: receipt.plan.len() as u8,
        total_allocated,
        total_deposited: ctx.accounts.vault.total_deposited,
        timestamp: now,
    });

    msg!(
        "Rebalancing executed: {} of {} allocated",
        total_allocated,
        ctx.accounts.vault.total_deposited
    );

    Ok(())
}
