use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Change fee rates and deposit bounds
#[derive(Accounts)]
pub struct UpdateVaultConfig<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.asset_mint.as_ref()],
        bump = vault.bump,
        has_one = authority @ VaultError::Unauthorized,
    )]
    pub vault: Account<'info, Vault>,
}

pub fn handler(ctx: Context<UpdateVaultConfig>, update: VaultConfigUpdate) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let vault = ctx
        .accounts
        .vault
        .update_config(&ctx.accounts.authority.key(), update, now)?;
    ctx.accounts.vault.set_inner(vault);

    let vault = &ctx.accounts.vault;
    emit!(VaultConfigUpdated {
        vault: vault.key(),
        management_fee_bps: vault.management_fee_bps,
        performance_fee_bps: vault.performance_fee_bps,
        minimum_deposit: vault.minimum_deposit,
        maximum_total_deposit: vault.maximum_total_deposit,
        timestamp: now,
    });

    msg!("Vault config updated");

    Ok(())
}
