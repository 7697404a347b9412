use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{constants::*, errors::*, events::*, state::*, utils};

/// Deposit assets into the vault and receive shares
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: Depositor must be signer
/// ✅ 2. ACCOUNT OWNERSHIP: Vault and position PDAs validated with seeds
/// ✅ 6. MATH SAFETY: Checked u128 share calculation
/// ✅ 7. TOKEN ACCOUNT VALIDATION: Validates mint and owner
/// ✅ 8. BUSINESS LOGIC: Checks-effects-interactions pattern
/// ✅ 10. EVENTS: Emits Deposited event
#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub depositor: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.asset_mint.as_ref()],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    /// Depositor's position, opened on first deposit
    #[account(
        init_if_needed,
        payer = depositor,
        space = UserPosition::LEN,
        seeds = [USER_POSITION_SEED, depositor.key().as_ref(), vault.key().as_ref()],
        bump
    )]
    pub user_position: Account<'info, UserPosition>,

    /// CHECK: PDA owning the vault token account, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.asset_mint.as_ref()],
        bump = vault.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = depositor_token_account.mint == vault.asset_mint @ VaultError::InvalidMint,
        constraint = depositor_token_account.owner == depositor.key() @ VaultError::InvalidOwner,
    )]
    pub depositor_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = vault_token_account.mint == vault.asset_mint @ VaultError::InvalidMint,
        constraint = vault_token_account.owner == vault_authority.key() @ VaultError::InvalidOwner,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let depositor = ctx.accounts.depositor.key();
    let vault_key = ctx.accounts.vault.key();

    // CHECKS: pause, bounds and share math, all before any write
    let position = ctx.accounts.user_position.resume_or_open(
        depositor,
        vault_key,
        ctx.bumps.user_position,
        now,
    );
    let receipt = ctx.accounts.vault.deposit(&position, amount, now)?;

    // EFFECTS: Update vault and position BEFORE external calls
    ctx.accounts.vault.set_inner(receipt.vault);
    ctx.accounts.user_position.set_inner(receipt.position);

    // INTERACTIONS: Transfer assets from depositor to vault
    utils::transfer_to_vault(
        ctx.accounts.depositor_token_account.to_account_info(),
        ctx.accounts.vault_token_account.to_account_info(),
        &ctx.accounts.depositor,
        &ctx.accounts.token_program,
        amount,
    )?;

    emit!(Deposited {
        vault: vault_key,
        user: depositor,
        asset_amount: amount,
        shares_minted: receipt.shares,
        total_deposited: ctx.accounts.vault.total_deposited,
        total_shares: ctx.accounts.vault.total_shares_issued,
        timestamp: now,
    });

    msg!("Deposit: {} tokens, {} shares", amount, receipt.shares);

    Ok(())
}
