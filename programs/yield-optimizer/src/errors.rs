use anchor_lang::prelude::*;

/// Custom error codes for the Yield Optimizer program
///
/// Every variant is raised before any account is written, so a failed
/// instruction leaves vault, position and adapter records untouched.
#[error_code]
pub enum VaultError {
    #[msg("Unauthorized - only vault authority can perform this action")]
    Unauthorized,

    #[msg("Vault is paused")]
    VaultPaused,

    #[msg("Vault is already initialized")]
    AlreadyInitialized,

    #[msg("Fee exceeds the configured ceiling")]
    InvalidFeeConfiguration,

    #[msg("Allocation percentage must be between 0 and 100")]
    InvalidAllocationPercentage,

    #[msg("Deposit amount is below the vault minimum")]
    DepositBelowMinimum,

    #[msg("Deposit would exceed the vault's maximum total deposit")]
    DepositExceedsCap,

    #[msg("Insufficient shares for withdrawal")]
    InsufficientShares,

    #[msg("Rebalancing cooldown period not met")]
    RebalancingCooldownActive,

    #[msg("Arithmetic overflow occurred during calculation")]
    ArithmeticOverflow,

    #[msg("Deposit amount must be greater than zero")]
    ZeroDepositAmount,

    #[msg("Deposit is too small to mint a single share")]
    ZeroSharesMinted,

    #[msg("Withdrawal must redeem at least one share")]
    InvalidWithdrawalAmount,

    #[msg("Protocol adapter does not belong to this vault")]
    AdapterVaultMismatch,

    #[msg("Protocol adapter passed more than once")]
    DuplicateAdapter,

    #[msg("Vault already has the maximum number of protocol adapters")]
    TooManyAdapters,

    #[msg("Every protocol adapter of the vault must be passed")]
    AdapterSetIncomplete,

    #[msg("Vault token balance does not cover deposits plus the requested fees")]
    InsufficientVaultBalance,

    #[msg("No accrued fees to collect")]
    NoFeesToCollect,

    #[msg("Invalid token mint - does not match vault asset")]
    InvalidMint,

    #[msg("Invalid token account owner")]
    InvalidOwner,
}
