use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{constants::*, errors::*, events::*, state::*, utils};

/// Redeem shares for underlying assets
#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub withdrawer: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.asset_mint.as_ref()],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    /// Security: seeds bind the position to the signer and this vault
    #[account(
        mut,
        seeds = [USER_POSITION_SEED, withdrawer.key().as_ref(), vault.key().as_ref()],
        bump = user_position.bump,
    )]
    pub user_position: Account<'info, UserPosition>,

    /// CHECK: PDA signing the outgoing transfer, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.asset_mint.as_ref()],
        bump = vault.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = withdrawer_token_account.mint == vault.asset_mint @ VaultError::InvalidMint,
        constraint = withdrawer_token_account.owner == withdrawer.key() @ VaultError::InvalidOwner,
    )]
    pub withdrawer_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = vault_token_account.mint == vault.asset_mint @ VaultError::InvalidMint,
        constraint = vault_token_account.owner == vault_authority.key() @ VaultError::InvalidOwner,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let receipt = ctx
        .accounts
        .vault
        .withdraw(&ctx.accounts.user_position, shares, now)?;

    ctx.accounts.vault.set_inner(receipt.vault);
    ctx.accounts.user_position.set_inner(receipt.position);

    if receipt.assets > 0 {
        utils::transfer_from_vault(
            &ctx.accounts.vault,
            ctx.accounts.vault_token_account.to_account_info(),
            ctx.accounts.withdrawer_token_account.to_account_info(),
            ctx.accounts.vault_authority.to_account_info(),
            &ctx.accounts.token_program,
            receipt.assets,
        )?;
    }

    emit!(Withdrawn {
        vault: ctx.accounts.vault.key(),
        user: ctx.accounts.withdrawer.key(),
        shares_burned: shares,
        asset_amount: receipt.assets,
        total_deposited: ctx.accounts.vault.total_deposited,
        total_shares: ctx.accounts.vault.total_shares_issued,
        timestamp: now,
    });

    msg!("Withdraw: {} shares, {} tokens", shares, receipt.assets);

    Ok(())
}
