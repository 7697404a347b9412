use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{constants::*, errors::*, events::*, state::*, utils};

/// Pay accrued management and performance fees to the authority
#[derive(Accounts)]
pub struct CollectFees<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.asset_mint.as_ref()],
        bump = vault.bump,
        has_one = authority @ VaultError::Unauthorized,
    )]
    pub vault: Account<'info, Vault>,

    /// CHECK: PDA signing the outgoing transfer, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.asset_mint.as_ref()],
        bump = vault.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = vault_token_account.mint == vault.asset_mint @ VaultError::InvalidMint,
        constraint = vault_token_account.owner == vault_authority.key() @ VaultError::InvalidOwner,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = authority_token_account.mint == vault.asset_mint @ VaultError::InvalidMint,
        constraint = authority_token_account.owner == authority.key() @ VaultError::InvalidOwner,
    )]
    pub authority_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<CollectFees>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    // Fees never dip into what shareholders are owed
    let (vault, amount) = ctx.accounts.vault.collect_fees(
        &ctx.accounts.authority.key(),
        ctx.accounts.vault_token_account.amount,
        now,
    )?;
    ctx.accounts.vault.set_inner(vault);

    utils::transfer_from_vault(
        &ctx.accounts.vault,
        ctx.accounts.vault_token_account.to_account_info(),
        ctx.accounts.authority_token_account.to_account_info(),
        ctx.accounts.vault_authority.to_account_info(),
        &ctx.accounts.token_program,
        amount,
    )?;

    emit!(FeesCollected {
        vault: ctx.accounts.vault.key(),
        authority: ctx.accounts.authority.key(),
        amount,
        timestamp: now,
    });

    msg!("Fees collected: {}", amount);

    Ok(())
}
