use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Push the latest APY and liquidity reported for an adapter
#[derive(Accounts)]
pub struct UpdateYieldData<'info> {
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

pub fn handler(
    ctx: Context<UpdateYieldData>,
    current_apy_bps: u32,
    available_liquidity: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault_key = ctx.accounts.vault.key();

    let adapter = ctx.accounts.protocol_adapter.with_yield_data(
        &ctx.accounts.vault,
        &vault_key,
        &ctx.accounts.authority.key(),
        current_apy_bps,
        available_liquidity,
        now,
    )?;
    ctx.accounts.protocol_adapter.set_inner(adapter);

    emit!(YieldDataUpdated {
        vault: vault_key,
        adapter: ctx.accounts.protocol_adapter.key(),
        current_apy_bps,
        available_liquidity,
        timestamp: now,
    });

    msg!("Yield data updated: {} bps APY", current_apy_bps);

    Ok(())
}
