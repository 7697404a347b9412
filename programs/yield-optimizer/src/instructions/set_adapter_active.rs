use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Toggle an adapter on/off for rebalancing and compounding
#[derive(Accounts)]
pub struct SetAdapterActive<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [VAULT_SEED, vault.asset_mint.as_ref()],
        bump = vault.bump,
        has_one = authority @ VaultError::Unauthorized,
    )]
    pub vault: Account<'info, Vault>,

    #[account(
        mut,
        seeds = [PROTOCOL_ADAPTER_SEED, vault.key().as_ref(), protocol_adapter.protocol_id.as_ref()],
        bump = protocol_adapter.bump,
        has_one = vault @ VaultError::AdapterVaultMismatch,
    )]
    pub protocol_adapter: Account<'info, ProtocolAdapter>,
}

pub fn handler(ctx: Context<SetAdapterActive>, active: bool) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault_key = ctx.accounts.vault.key();

    let adapter = ctx.accounts.protocol_adapter.with_active(
        &ctx.accounts.vault,
        &vault_key,
        &ctx.accounts.authority.key(),
        active,
        now,
    )?;
    ctx.accounts.protocol_adapter.set_inner(adapter);

    emit!(AdapterActivationToggled {
        vault: vault_key,
        adapter: ctx.accounts.protocol_adapter.key(),
        active,
        timestamp: now,
    });

    Ok(())
}
