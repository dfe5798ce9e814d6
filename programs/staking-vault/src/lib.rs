// Staking Vault - pooled staking with rewarder-driven share price growth
// Each 8-byte salt selects an independent vault (namespace) under this program
// Exits are two-phase: start_unstake locks shares, unstake claims after cooldown
#![allow(ambiguous_glob_reexports)]

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("p8Dy6kpmHKPstjFWy83AiLEUPr6bjRwzUKL2kUrjTsK");

#[program]
pub mod staking_vault {
    use super::*;

    /// Create the vault state for a namespace salt
    ///
    /// Security considerations:
    /// - Fails with AlreadyInitialized if the namespace exists
    /// - Cooldown and vesting start at zero, rewarder set starts empty
    pub fn initialize_vault_state(
        ctx: Context<InitializeVaultState>,
        admin: Pubkey,
        salt: [u8; 8],
        min_shares: u64,
    ) -> Result<()> {
        instructions::initialize_vault_state::handler(ctx, admin, salt, min_shares)
    }

    /// Create the share mint, custody account and unstake silo for a namespace
    pub fn initialize_program_accounts(
        ctx: Context<InitializeProgramAccounts>,
        salt: [u8; 8],
    ) -> Result<()> {
        instructions::initialize_program_accounts::handler(ctx, salt)
    }

    /// Admin-only: set the unstake cooldown in seconds
    pub fn set_cooldown(ctx: Context<SetCooldown>, salt: [u8; 8], duration: u32) -> Result<()> {
        instructions::set_cooldown::handler(ctx, salt, duration)
    }

    /// Admin-only: set the period over which rewards are realized in seconds
    pub fn set_vesting_period(
        ctx: Context<SetVestingPeriod>,
        salt: [u8; 8],
        duration: u32,
    ) -> Result<()> {
        instructions::set_vesting_period::handler(ctx, salt, duration)
    }

    /// Admin-only: hand the admin role to another key, effective immediately
    pub fn transfer_admin(
        ctx: Context<TransferAdmin>,
        new_admin: Pubkey,
        salt: [u8; 8],
    ) -> Result<()> {
        instructions::transfer_admin::handler(ctx, new_admin, salt)
    }

    /// Admin-only: authorize a rewarder (no-op if already present)
    pub fn add_rewarder(ctx: Context<AddRewarder>, rewarder: Pubkey, salt: [u8; 8]) -> Result<()> {
        instructions::add_rewarder::handler(ctx, rewarder, salt)
    }

    /// Admin-only: revoke a rewarder (no-op if absent)
    pub fn remove_rewarder(
        ctx: Context<RemoveRewarder>,
        rewarder: Pubkey,
        salt: [u8; 8],
    ) -> Result<()> {
        instructions::remove_rewarder::handler(ctx, rewarder, salt)
    }

    /// Admin-only: bar or re-admit a user for stake and start_unstake
    pub fn set_blacklist(
        ctx: Context<SetBlacklist>,
        salt: [u8; 8],
        user: Pubkey,
        blacklisted: bool,
    ) -> Result<()> {
        instructions::set_blacklist::handler(ctx, salt, user, blacklisted)
    }

    /// Stake underlying and receive shares at the current price
    ///
    /// Security considerations:
    /// - u128 intermediate math, rounding down in favor of the pool
    /// - Rejects deposits that leave the supply below min_shares
    pub fn stake(ctx: Context<Stake>, salt: [u8; 8], amount: u64) -> Result<()> {
        instructions::stake::handler(ctx, salt, amount)
    }

    /// Lock shares and start the cooldown (one pending request per user)
    pub fn start_unstake(ctx: Context<StartUnstake>, salt: [u8; 8], amount: u64) -> Result<()> {
        instructions::start_unstake::handler(ctx, salt, amount)
    }

    /// Burn locked shares after the cooldown and release underlying
    ///
    /// Priced at claim time, so rewards during the cooldown accrue to the
    /// locked shares.
    pub fn unstake(ctx: Context<Unstake>, salt: [u8; 8], amount: u64) -> Result<()> {
        instructions::unstake::handler(ctx, salt, amount)
    }

    /// Abandon a pending request and get the locked shares back
    pub fn cancel_unstake(ctx: Context<CancelUnstake>, salt: [u8; 8]) -> Result<()> {
        instructions::cancel_unstake::handler(ctx, salt)
    }

    /// Rewarder-only: add underlying to the pool without minting shares
    pub fn reward(ctx: Context<Reward>, amount: u64, salt: [u8; 8]) -> Result<()> {
        instructions::reward::handler(ctx, amount, salt)
    }
}
