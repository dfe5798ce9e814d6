// Constants for the Staking Vault program

/// Seed for vault state PDA, followed by the 8-byte namespace salt
pub const VAULT_STATE_SEED: &[u8] = b"vault-state";

/// Seed for the vault authority PDA (mint authority and token account owner)
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault-authority";

/// Seed for share mint PDA
pub const SHARE_MINT_SEED: &[u8] = b"share-mint";

/// Seed for the custody token account holding the pooled underlying
pub const CUSTODY_SEED: &[u8] = b"custody";

/// Seed for the share token account holding shares locked by unstake requests
pub const SILO_SEED: &[u8] = b"silo";

/// Seed for per-user unstake request PDA
pub const UNSTAKE_REQUEST_SEED: &[u8] = b"unstake-request";

/// Seed for per-user blacklist entry PDA
pub const BLACKLIST_SEED: &[u8] = b"blacklist";

/// Length of the namespace salt
pub const SALT_LEN: usize = 8;

/// Maximum number of rewarders per vault
pub const MAX_REWARDERS: usize = 20;

/// Upper bound for the unstake cooldown (90 days)
pub const MAX_COOLDOWN_DURATION: u32 = 90 * 24 * 60 * 60;

/// Upper bound for the reward vesting period (90 days)
pub const MAX_VESTING_PERIOD: u32 = 90 * 24 * 60 * 60;

/// Space for VaultState account (8 discriminator + 8 salt + 32 admin +
/// 32 deposit_mint + 32 share_mint + 32 custody + 32 silo + 4 cooldown +
/// 4 vesting period + 8 min_shares + 8 vesting_amount + 8 last distribution +
/// 4 + 20 * 32 rewarders + 1 bump + 1 authority_bump + 64 padding)
pub const VAULT_STATE_SIZE: usize =
    8 + 8 + 32 + 32 + 32 + 32 + 32 + 4 + 4 + 8 + 8 + 8 + (4 + MAX_REWARDERS * 32) + 1 + 1 + 64;

/// Space for UnstakeRequest account (8 discriminator + 32 owner +
/// 32 vault_state + 8 locked_shares + 8 ready_at + 1 bump)
pub const UNSTAKE_REQUEST_SIZE: usize = 8 + 32 + 32 + 8 + 8 + 1;

/// Space for BlacklistEntry account (8 discriminator + 32 user +
/// 32 vault_state + 1 blacklisted + 1 bump)
pub const BLACKLIST_ENTRY_SIZE: usize = 8 + 32 + 32 + 1 + 1;
