use anchor_lang::prelude::*;

use crate::{
    constants::{MAX_ALLOCATION_PERCENTAGE, PROTOCOL_ADAPTER_SEED},
    errors::VaultError,
    state::Vault,
};

/// Integration family of an external yield source
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProtocolKind {
    Kamino,
    Drift,
    Meteora,
    Marinade,
    Jito,
    Sanctum,
    Other,
}

/// External yield source attached to a vault
///
/// Yield metrics are advisory: they are pushed by the vault authority from a
/// trusted off-chain feed and only steer rebalancing and compounding.
#[account]
#[derive(Debug, PartialEq)]
pub struct ProtocolAdapter {
    /// Vault this adapter routes assets for
    pub vault: Pubkey,                  // 32 bytes

    /// Program id of the external protocol
    pub protocol_id: Pubkey,            // 32 bytes

    pub protocol_kind: ProtocolKind,    // 1 byte

    /// Cap on the share of vault assets routed here, in whole percent
    pub max_allocation_percentage: u8,  // 1 byte

    /// Last reported APY in basis points
    pub current_apy_bps: u32,           // 4 bytes

    /// Last reported capacity the protocol can absorb
    pub available_liquidity: u64,       // 8 bytes

    /// Target amount assigned by the last rebalance
    pub allocated_amount: u64,          // 8 bytes

    pub is_active: bool,                // 1 byte
    pub last_update_timestamp: i64,     // 8 bytes
    pub created_at: i64,                // 8 bytes

    /// Bump seed for adapter PDA
    pub bump: u8,                       // 1 byte

    // Padding for future upgrades
    pub _reserved: [u8; 32],            // 32 bytes
}

impl ProtocolAdapter {
    /// 8 discriminator + 32 vault + 32 protocol_id + 1 kind + 1 cap + 4 apy
    /// + 8 liquidity + 8 allocated + 1 active + 8 updated + 8 created
    /// + 1 bump + 32 padding
    pub const LEN: usize = 8 + 32 + 32 + 1 + 1 + 4 + 8 + 8 + 1 + 8 + 8 + 1 + 32;

    /// Deterministic address of the adapter for `protocol_id` in `vault`
    pub fn address(vault: &Pubkey, protocol_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[PROTOCOL_ADAPTER_SEED, vault.as_ref(), protocol_id.as_ref()],
            &crate::ID,
        )
    }

    /// Register a new, active adapter with zeroed metrics
    ///
    /// Returns the vault with the adapter counted against its slot limit.
    #[allow(clippy::too_many_arguments)]
    pub fn register(
        vault: &Vault,
        vault_key: Pubkey,
        caller: &Pubkey,
        protocol_id: Pubkey,
        protocol_kind: ProtocolKind,
        max_allocation_percentage: u8,
        bump: u8,
        now: i64,
    ) -> Result<(Vault, Self)> {
        let vault = vault.register_adapter(caller, now)?;
        require!(
            max_allocation_percentage <= MAX_ALLOCATION_PERCENTAGE,
            VaultError::InvalidAllocationPercentage
        );

        let adapter = Self {
            vault: vault_key,
            protocol_id,
            protocol_kind,
            max_allocation_percentage,
            current_apy_bps: 0,
            available_liquidity: 0,
            allocated_amount: 0,
            is_active: true,
            last_update_timestamp: now,
            created_at: now,
            bump,
            _reserved: [0; 32],
        };
        Ok((vault, adapter))
    }

    /// Authority of `vault` acting on an adapter that belongs to it
    fn check_managed_by(&self, vault: &Vault, vault_key: &Pubkey, caller: &Pubkey) -> Result<()> {
        vault.check_authority(caller)?;
        require_keys_eq!(self.vault, *vault_key, VaultError::AdapterVaultMismatch);
        Ok(())
    }

    /// Overwrite reported APY and liquidity
    pub fn with_yield_data(
        &self,
        vault: &Vault,
        vault_key: &Pubkey,
        caller: &Pubkey,
        current_apy_bps: u32,
        available_liquidity: u64,
        now: i64,
    ) -> Result<Self> {
        self.check_managed_by(vault, vault_key, caller)?;

        let mut next = self.clone();
        next.current_apy_bps = current_apy_bps;
        next.available_liquidity = available_liquidity;
        next.last_update_timestamp = now;
        Ok(next)
    }

    /// Activate or deactivate the adapter for future rebalances
    pub fn with_active(
        &self,
        vault: &Vault,
        vault_key: &Pubkey,
        caller: &Pubkey,
        is_active: bool,
        now: i64,
    ) -> Result<Self> {
        self.check_managed_by(vault, vault_key, caller)?;

        let mut next = self.clone();
        next.is_active = is_active;
        next.last_update_timestamp = now;
        Ok(next)
    }

    /// Adapter carrying the target amount chosen by a rebalance
    pub fn with_allocation(&self, allocated_amount: u64, now: i64) -> Self {
        let mut next = self.clone();
        next.allocated_amount = allocated_amount;
        next.last_update_timestamp = now;
        next
    }
}
