use anchor_lang::prelude::*;

use crate::state::ProtocolKind;

/// Event emitted when a new vault is initialized
#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub authority: Pubkey,
    pub asset_mint: Pubkey,
    pub management_fee_bps: u16,
    pub performance_fee_bps: u16,
    pub minimum_deposit: u64,
    pub maximum_total_deposit: u64,
    pub timestamp: i64,
}

/// Event emitted when assets are deposited
#[event]
pub struct Deposited {
    pub vault: Pubkey,
    pub user: Pubkey,
    pub asset_amount: u64,
    pub shares_minted: u64,
    pub total_deposited: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}

/// Event emitted when shares are redeemed
#[event]
pub struct Withdrawn {
    pub vault: Pubkey,
    pub user: Pubkey,
    pub shares_burned: u64,
    pub asset_amount: u64,
    pub total_deposited: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}

#[event]
pub struct VaultConfigUpdated {
    pub vault: Pubkey,
    pub management_fee_bps: u16,
    pub performance_fee_bps: u16,
    pub minimum_deposit: u64,
    pub maximum_total_deposit: u64,
    pub timestamp: i64,
}

#[event]
pub struct VaultPauseToggled {
    pub vault: Pubkey,
    pub paused: bool,
    pub timestamp: i64,
}

/// Event emitted when a protocol adapter is attached to a vault
#[event]
pub struct ProtocolAdapterInitialized {
    pub vault: Pubkey,
    pub adapter: Pubkey,
    pub protocol_id: Pubkey,
    pub protocol_kind: ProtocolKind,
    pub max_allocation_percentage: u8,
    pub timestamp: i64,
}

#[event]
pub struct YieldDataUpdated {
    pub vault: Pubkey,
    pub adapter: Pubkey,
    pub current_apy_bps: u32,
    pub available_liquidity: u64,
    pub timestamp: i64,
}

#[event]
pub struct AdapterActivationToggled {
    pub vault: Pubkey,
    pub adapter: Pubkey,
    pub active: bool,
    pub timestamp: i64,
}

/// Event emitted when a rebalance records a new target allocation
#[event]
pub struct Rebalanced {
    pub vault: Pubkey,
    pub adapters_considered: u8,
    pub adapters_allocated: u8,
    pub total_allocated: u64,
    pub total_deposited: u64,
    pub timestamp: i64,
}

/// Event emitted when yield is compounded into the share price
#[event]
pub struct RewardsCompounded {
    pub vault: Pubkey,
    pub gross_yield: u64,
    pub performance_fee: u64,
    pub management_fee: u64,
    pub net_gain: u64,
    pub total_deposited: u64,
    pub timestamp: i64,
}

#[event]
pub struct FeesCollected {
    pub vault: Pubkey,
    pub authority: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
