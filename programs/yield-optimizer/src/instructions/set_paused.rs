use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Pause or resume deposits, withdrawals, rebalancing and compounding
#[derive(Accounts)]
pub struct SetPaused<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.asset_mint.as_ref()],
        bump = vault.bump,
        has_one = authority @ VaultError::Unauthorized,
    )]
    pub vault: Account<'info, Vault>,
}

pub fn handler(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let vault = ctx
        .accounts
        .vault
        .set_paused(&ctx.accounts.authority.key(), paused, now)?;
    ctx.accounts.vault.set_inner(vault);

    emit!(VaultPauseToggled {
        vault: ctx.accounts.vault.key(),
        paused,
        timestamp: now,
    });

    Ok(())
}
