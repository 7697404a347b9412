use anchor_lang::prelude::*;

use crate::{constants::USER_POSITION_SEED, errors::VaultError};

/// Per-depositor share balance in one vault
///
/// Created on first deposit and never closed, so lifetime counters survive
/// a full exit. Mutated only through `credit` and `debit`.
#[account]
#[derive(Debug, PartialEq)]
pub struct UserPosition {
    /// Depositor wallet
    pub owner: Pubkey,              // 32 bytes

    /// Vault this position holds shares in
    pub vault: Pubkey,              // 32 bytes

    pub shares_owned: u64,          // 8 bytes

    /// Lifetime underlying units deposited
    pub total_deposited: u64,       // 8 bytes

    /// Lifetime underlying units withdrawn
    pub total_withdrawn: u64,       // 8 bytes

    pub deposit_count: u32,         // 4 bytes
    pub withdrawal_count: u32,      // 4 bytes
    pub last_deposit_timestamp: i64,    // 8 bytes
    pub last_withdrawal_timestamp: i64, // 8 bytes
    pub created_at: i64,            // 8 bytes

    /// Bump seed for position PDA
    pub bump: u8,                   // 1 byte

    // Padding for future upgrades
    pub _reserved: [u8; 32],        // 32 bytes
}

impl UserPosition {
    /// 8 discriminator + 32 owner + 32 vault + 3 * 8 amounts + 2 * 4 counters
    /// + 3 * 8 timestamps + 1 bump + 32 padding
    pub const LEN: usize = 8 + 32 + 32 + (3 * 8) + (2 * 4) + (3 * 8) + 1 + 32;

    /// Deterministic address of `owner`'s position in `vault`
    pub fn address(owner: &Pubkey, vault: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[USER_POSITION_SEED, owner.as_ref(), vault.as_ref()],
            &crate::ID,
        )
    }

    /// Empty position for a first-time depositor
    pub fn open(owner: Pubkey, vault: Pubkey, bump: u8, now: i64) -> Self {
        Self {
            owner,
            vault,
            shares_owned: 0,
            total_deposited: 0,
            total_withdrawn: 0,
            deposit_count: 0,
            withdrawal_count: 0,
            last_deposit_timestamp: 0,
            last_withdrawal_timestamp: 0,
            created_at: now,
            bump,
            _reserved: [0; 32],
        }
    }

    /// A zeroed account freshly allocated by `init_if_needed`
    pub fn is_open(&self) -> bool {
        self.owner != Pubkey::default()
    }

    /// This position if it exists, otherwise a new one for `owner`
    pub fn resume_or_open(&self, owner: Pubkey, vault: Pubkey, bump: u8, now: i64) -> Self {
        if self.is_open() {
            self.clone()
        } else {
            Self::open(owner, vault, bump, now)
        }
    }

    /// Position after receiving `shares` for a deposit of `amount`
    pub fn credit(&self, shares: u64, amount: u64, now: i64) -> Result<Self> {
        let mut next = self.clone();
        next.shares_owned = next
            .shares_owned
            .checked_add(shares)
            .ok_or(VaultError::ArithmeticOverflow)?;
        next.total_deposited = next
            .total_deposited
            .checked_add(amount)
            .ok_or(VaultError::ArithmeticOverflow)?;
        next.deposit_count = next
            .deposit_count
            .checked_add(1)
            .ok_or(VaultError::ArithmeticOverflow)?;
        next.last_deposit_timestamp = now;
        Ok(next)
    }

    /// Position after redeeming `shares` for `amount`
    pub fn debit(&self, shares: u64, amount: u64, now: i64) -> Result<Self> {
        require!(shares <= self.shares_owned, VaultError::InsufficientShares);

        let mut next = self.clone();
        next.shares_owned -= shares;
        next.total_withdrawn = next
            .total_withdrawn
            .checked_add(amount)
            .ok_or(VaultError::ArithmeticOverflow)?;
        next.withdrawal_count = next
            .withdrawal_count
            .checked_add(1)
            .ok_or(VaultError::ArithmeticOverflow)?;
        next.last_withdrawal_timestamp = now;
        Ok(next)
    }
}
