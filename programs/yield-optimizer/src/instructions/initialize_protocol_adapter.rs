use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Attach an external yield source to the vault
#[derive(Accounts)]
pub struct InitializeProtocolAdapter<'info> {
    /// Vault authority - only they can attach adapters
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.asset_mint.as_ref()],
        bump = vault.bump,
        has_one = authority @ VaultError::Unauthorized,
    )]
    pub vault: Account<'info, Vault>,

    /// One adapter per (vault, protocol); a second init for the same pair fails
    #[account(
        init,
        payer = authority,
        space = ProtocolAdapter::LEN,
        seeds = [PROTOCOL_ADAPTER_SEED, vault.key().as_ref(), protocol_program.key().as_ref()],
        bump
    )]
    pub protocol_adapter: Account<'info, ProtocolAdapter>,

    /// CHECK: External protocol program; only its address is recorded
    pub protocol_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializeProtocolAdapter>,
    protocol_kind: ProtocolKind,
    max_allocation_percentage: u8,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault_key = ctx.accounts.vault.key();
    let protocol_id = ctx.accounts.protocol_program.key();

    let (vault, adapter) = ProtocolAdapter::register(
        &ctx.accounts.vault,
        vault_key,
        &ctx.accounts.authority.key(),
        protocol_id,
        protocol_kind,
        max_allocation_percentage,
        ctx.bumps.protocol_adapter,
        now,
    )?;
    ctx.accounts.vault.set_inner(vault);
    ctx.accounts.protocol_adapter.set_inner(adapter);

    emit!(ProtocolAdapterInitialized {
        vault: vault_key,
        adapter: ctx.accounts.protocol_adapter.key(),
        protocol_id,
        protocol_kind,
        max_allocation_percentage,
        timestamp: now,
    });

    msg!("Protocol adapter initialized: {:?}", protocol_kind);

    Ok(())
}
