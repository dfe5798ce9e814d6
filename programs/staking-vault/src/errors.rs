use anchor_lang::prelude::*;

/// Custom error codes for the Staking Vault program
#[error_code]
pub enum VaultError {
    #[msg("Unauthorized - caller lacks the admin or rewarder role")]
    Unauthorized,

    #[msg("Account already initialized for this namespace")]
    AlreadyInitialized,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Share supply would fall below the vault minimum")]
    BelowMinShares,

    #[msg("Insufficient shares for this request")]
    InsufficientShares,

    #[msg("Insufficient underlying held in custody")]
    InsufficientUnderlying,

    #[msg("Unstake cooldown has not elapsed")]
    CooldownNotElapsed,

    #[msg("No pending unstake request")]
    NoPendingRequest,

    #[msg("An unstake request is already pending")]
    RequestAlreadyPending,

    #[msg("Arithmetic overflow in vault accounting")]
    ArithmeticOverflow,

    #[msg("Duration exceeds the configured maximum")]
    DurationTooLong,

    #[msg("Rewarder list is full")]
    RewarderListFull,

    #[msg("User is blacklisted from this vault")]
    Blacklisted,

    #[msg("Admin must be a non-default key")]
    InvalidAdmin,

    #[msg("Invalid token mint - does not match vault configuration")]
    InvalidMint,

    #[msg("Invalid token account owner")]
    InvalidOwner,
}
