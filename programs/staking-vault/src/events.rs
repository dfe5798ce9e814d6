use anchor_lang::prelude::*;

/// Event emitted when a vault namespace is created
#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub admin: Pubkey,
    pub deposit_mint: Pubkey,
    pub min_shares: u64,
    pub timestamp: i64,
}

/// Event emitted once the share mint, custody and silo exist
#[event]
pub struct ProgramAccountsInitialized {
    pub vault: Pubkey,
    pub share_mint: Pubkey,
    pub custody: Pubkey,
    pub silo: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct CooldownUpdated {
    pub vault: Pubkey,
    pub cooldown_duration: u32,
    pub timestamp: i64,
}

#[event]
pub struct VestingPeriodUpdated {
    pub vault: Pubkey,
    pub vesting_period: u32,
    pub timestamp: i64,
}

#[event]
pub struct AdminTransferred {
    pub vault: Pubkey,
    pub previous_admin: Pubkey,
    pub new_admin: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when the rewarder set changes
#[event]
pub struct RewarderUpdated {
    pub vault: Pubkey,
    pub rewarder: Pubkey,
    pub added: bool,
    pub timestamp: i64,
}

#[event]
pub struct BlacklistUpdated {
    pub vault: Pubkey,
    pub user: Pubkey,
    pub blacklisted: bool,
    pub timestamp: i64,
}

/// Event emitted when underlying is staked
#[event]
pub struct Staked {
    pub vault: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub shares_minted: u64,
    pub custody_balance: u64,
    pub share_supply: u64,
    pub timestamp: i64,
}

/// Event emitted when a rewarder grows the pool
#[event]
pub struct Rewarded {
    pub vault: Pubkey,
    pub rewarder: Pubkey,
    pub amount: u64,
    pub vesting_amount: u64,
    pub custody_balance: u64,
    pub timestamp: i64,
}

#[event]
pub struct UnstakeRequested {
    pub vault: Pubkey,
    pub user: Pubkey,
    pub locked_shares: u64,
    pub ready_at: i64,
    pub timestamp: i64,
}

/// Event emitted when locked shares are redeemed for underlying
#[event]
pub struct Unstaked {
    pub vault: Pubkey,
    pub user: Pubkey,
    pub shares_burned: u64,
    pub amount: u64,
    pub remaining_locked: u64,
    pub custody_balance: u64,
    pub share_supply: u64,
    pub timestamp: i64,
}

#[event]
pub struct UnstakeCancelled {
    pub vault: Pubkey,
    pub user: Pubkey,
    pub shares_returned: u64,
    pub timestamp: i64,
}
