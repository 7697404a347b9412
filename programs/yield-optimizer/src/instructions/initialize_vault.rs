use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, events::*, state::*};

/// Initialize a new vault for a given asset token
#[derive(Accounts)]
pub struct InitializeVault<'info> {
    /// Vault authority - configures, rebalances and compounds
    /// Security: Must be signer, stored in state
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Vault state PDA
    /// Security: init_if_needed so a second call reaches the handler and
    /// fails with AlreadyInitialized instead of a system program error
    #[account(
        init_if_needed,
        payer = authority,
        space = Vault::LEN,
        seeds = [VAULT_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, Vault>,

    /// Underlying asset token mint
    pub asset_mint: Account<'info, Mint>,

    /// Vault authority PDA - owns the vault token account
    /// CHECK: PDA used as token authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Vault's token account for holding pooled assets
    /// Security: Owned by vault_authority PDA, correct mint
    #[account(
        init_if_needed,
        payer = authority,
        associated_token::mint = asset_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeVault>, params: VaultParams) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    // CHECKS + EFFECTS: reject re-initialization and invalid fees
    let vault = ctx.accounts.vault.initialize(
        ctx.accounts.authority.key(),
        ctx.accounts.asset_mint.key(),
        params,
        ctx.bumps.vault,
        ctx.bumps.vault_authority,
        now,
    )?;
    ctx.accounts.vault.set_inner(vault);

    emit!(VaultInitialized {
        vault: ctx.accounts.vault.key(),
        authority: ctx.accounts.authority.key(),
        asset_mint: ctx.accounts.asset_mint.key(),
        management_fee_bps: params.management_fee_bps,
        performance_fee_bps: params.performance_fee_bps,
        minimum_deposit: params.minimum_deposit,
        maximum_total_deposit: params.maximum_total_deposit,
        timestamp: now,
    });

    msg!(
        "Vault initialized: {} / {} bps fees",
        params.management_fee_bps,
        params.performance_fee_bps
    );

    Ok(())
}
