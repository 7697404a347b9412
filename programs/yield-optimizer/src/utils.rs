use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, Transfer};

use crate::{
    constants::{MAX_ALLOCATIONS, VAULT_AUTHORITY_SEED},
    errors::VaultError,
    state::{ProtocolAdapter, Vault},
};

/// Move `amount` from a user-owned token account into the vault
pub fn transfer_to_vault<'info>(
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    authority: &Signer<'info>,
    token_program: &Program<'info, Token>,
    amount: u64,
) -> Result<()> {
    let cpi_ctx = CpiContext::new(
        token_program.to_account_info(),
        Transfer {
            from,
            to,
            authority: authority.to_account_info(),
        },
    );

    token::transfer(cpi_ctx, amount)
}

/// Move `amount` out of the vault token account, signed by the vault authority PDA
pub fn transfer_from_vault<'info>(
    vault: &Vault,
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    vault_authority: AccountInfo<'info>,
    token_program: &Program<'info, Token>,
    amount: u64,
) -> Result<()> {
    let asset_mint_key = vault.asset_mint;
    let authority_seeds: &[&[u8]] = &[
        VAULT_AUTHORITY_SEED,
        asset_mint_key.as_ref(),
        &[vault.authority_bump],
    ];
    let signer_seeds = &[authority_seeds];

    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        Transfer {
            from,
            to,
            authority: vault_authority,
        },
        signer_seeds,
    );

    token::transfer(cpi_ctx, amount)
}

/// Deserialize the adapters passed as remaining accounts
///
/// Each must be a program-owned `ProtocolAdapter` of `vault`, listed once.
pub fn load_adapters<'info>(
    remaining_accounts: &'info [AccountInfo<'info>],
    vault: &Pubkey,
) -> Result<Vec<Account<'info, ProtocolAdapter>>> {
    require!(
        remaining_accounts.len() <= MAX_ALLOCATIONS,
        VaultError::TooManyAdapters
    );

    let mut adapters: Vec<Account<'info, ProtocolAdapter>> =
        Vec::with_capacity(remaining_accounts.len());

    for info in remaining_accounts {
        require!(
            adapters.iter().all(|a| a.key() != info.key()),
            VaultError::DuplicateAdapter
        );

        let adapter = Account::<ProtocolAdapter>::try_from(info)?;
        require_keys_eq!(adapter.vault, *vault, VaultError::AdapterVaultMismatch);
        adapters.push(adapter);
    }

    Ok(adapters)
}
