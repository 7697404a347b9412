// Constants for the DeFi Yield Optimizer program

/// Seed for vault state PDA, paired with the underlying asset mint
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed for the PDA that owns the vault token account and signs withdrawals
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";

/// Seed for user position PDA, paired with owner and vault
pub const USER_POSITION_SEED: &[u8] = b"user_position";

/// Seed for protocol adapter PDA, paired with vault and protocol program id
pub const PROTOCOL_ADAPTER_SEED: &[u8] = b"protocol_adapter";

/// 100% expressed in basis points
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Highest management fee the authority may configure (10%)
pub const MAX_MANAGEMENT_FEE_BPS: u16 = 1_000;

/// Highest performance fee the authority may configure (50%)
pub const MAX_PERFORMANCE_FEE_BPS: u16 = 5_000;

/// Upper bound of an adapter's allocation cap, in whole percent
pub const MAX_ALLOCATION_PERCENTAGE: u8 = 100;

/// Minimum spacing between two rebalances (24h)
pub const REBALANCE_COOLDOWN_SECONDS: i64 = 86_400;

/// 365-day year used to pro-rate APY and management fees
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 60 * 60;

/// Number of adapter slots a vault records per rebalance
pub const MAX_ALLOCATIONS: usize = 8;
