use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::VaultError;

/// Per-namespace vault configuration and reward vesting bookkeeping
///
/// Custody balance and share supply are not cached here: they are read from
/// the custody token account and the share mint on every instruction.
#[account]
pub struct VaultState {
    /// Namespace salt this vault was derived from
    pub salt: [u8; SALT_LEN],

    /// Identity allowed to configure the vault and manage roles
    pub admin: Pubkey,

    /// Mint of the underlying token users stake
    pub deposit_mint: Pubkey,

    /// Mint of the vault share token
    pub share_mint: Pubkey,

    /// Token account holding the pooled underlying
    pub custody: Pubkey,

    /// Share token account holding shares locked by unstake requests
    pub silo: Pubkey,

    /// Seconds between an unstake request and its claim
    pub cooldown_duration: u32,

    /// Seconds over which an injected reward is realized into the share price
    pub vesting_period: u32,

    /// Smallest non-zero share supply the vault accepts
    pub min_shares: u64,

    /// Reward amount being vested since `last_distribution_time`
    pub vesting_amount: u64,

    pub last_distribution_time: i64,

    /// Identities allowed to call `reward`
    pub rewarders: Vec<Pubkey>,

    /// Bump seed for vault state PDA
    pub bump: u8,

    /// Bump seed for vault authority PDA
    pub authority_bump: u8,

    // Padding for future upgrades
    pub _reserved: [u8; 64],
}

impl VaultState {
    pub fn is_initialized(&self) -> bool {
        self.admin != Pubkey::default()
    }

    pub fn program_accounts_initialized(&self) -> bool {
        self.share_mint != Pubkey::default()
    }

    pub fn is_admin(&self, key: &Pubkey) -> bool {
        self.is_initialized() && self.admin == *key
    }

    /// Fill a freshly created vault state
    ///
    /// The admin comes from the instruction argument; the fee payer gets no role.
    pub fn initialize(
        &mut self,
        admin: Pubkey,
        salt: [u8; SALT_LEN],
        deposit_mint: Pubkey,
        min_shares: u64,
        bump: u8,
    ) -> Result<()> {
        require!(!self.is_initialized(), VaultError::AlreadyInitialized);
        require!(admin != Pubkey::default(), VaultError::InvalidAdmin);

        *self = VaultState {
            salt,
            admin,
            deposit_mint,
            share_mint: Pubkey::default(),
            custody: Pubkey::default(),
            silo: Pubkey::default(),
            cooldown_duration: 0,
            vesting_period: 0,
            min_shares,
            vesting_amount: 0,
            last_distribution_time: 0,
            rewarders: Vec::new(),
            bump,
            authority_bump: 0,
            _reserved: [0; 64],
        };
        Ok(())
    }

    /// Record the share mint, custody and silo; only once per vault
    pub fn attach_program_accounts(
        &mut self,
        share_mint: Pubkey,
        custody: Pubkey,
        silo: Pubkey,
        authority_bump: u8,
    ) -> Result<()> {
        require!(
            !self.program_accounts_initialized(),
            VaultError::AlreadyInitialized
        );
        self.share_mint = share_mint;
        self.custody = custody;
        self.silo = silo;
        self.authority_bump = authority_bump;
        Ok(())
    }

    /// Hand the admin role to `new_admin`; returns the previous admin
    pub fn transfer_admin(&mut self, new_admin: Pubkey) -> Result<Pubkey> {
        require!(new_admin != Pubkey::default(), VaultError::InvalidAdmin);
        Ok(std::mem::replace(&mut self.admin, new_admin))
    }

    pub fn is_rewarder(&self, key: &Pubkey) -> bool {
        self.rewarders.contains(key)
    }

    /// Insert a rewarder; returns false when it was already present
    pub fn add_rewarder(&mut self, rewarder: Pubkey) -> Result<bool> {
        if self.is_rewarder(&rewarder) {
            return Ok(false);
        }
        require!(
            self.rewarders.len() < MAX_REWARDERS,
            VaultError::RewarderListFull
        );
        self.rewarders.push(rewarder);
        Ok(true)
    }

    /// Remove a rewarder; returns false when it was absent
    pub fn remove_rewarder(&mut self, rewarder: &Pubkey) -> bool {
        match self.rewarders.iter().position(|r| r == rewarder) {
            Some(i) => {
                self.rewarders.swap_remove(i);
                true
            }
            None => false,
        }
    }

    /// Portion of the last reward that is not yet reflected in the share price
    ///
    /// Linear: `vesting_amount * (vesting_period - elapsed) / vesting_period`
    /// while the period is running, zero afterwards or when vesting is off.
    pub fn unvested_amount(&self, now: i64) -> Result<u64> {
        if self.vesting_period == 0 || self.vesting_amount == 0 {
            return Ok(0);
        }

        let period = self.vesting_period as i64;
        let elapsed = now.saturating_sub(self.last_distribution_time).max(0);
        if elapsed >= period {
            return Ok(0);
        }

        let remaining = (period - elapsed) as u128;
        let unvested = (self.vesting_amount as u128)
            .checked_mul(remaining)
            .ok_or(error!(VaultError::ArithmeticOverflow))?
            / period as u128;

        u64::try_from(unvested).map_err(|_| error!(VaultError::ArithmeticOverflow))
    }

    /// Snapshot of the pool used for pricing at `now`
    pub fn pool(&self, custody_balance: u64, share_supply: u64, now: i64) -> Result<Pool> {
        let unvested = self.unvested_amount(now)?;
        let assets = custody_balance
            .checked_sub(unvested)
            .ok_or(error!(VaultError::ArithmeticOverflow))?;

        Ok(Pool {
            assets,
            shares: share_supply,
        })
    }

    /// Fold a new reward into the vesting schedule
    ///
    /// The still-unvested remainder restarts together with the new amount, so
    /// the priced pool value is continuous at `now`.
    pub fn record_reward(&mut self, amount: u64, now: i64) -> Result<()> {
        let unvested = self.unvested_amount(now)?;
        self.vesting_amount = unvested
            .checked_add(amount)
            .ok_or(error!(VaultError::ArithmeticOverflow))?;
        self.last_distribution_time = now;
        Ok(())
    }

    /// Change the vesting period; the unvested remainder restarts at `now`
    /// over the new period (a zero period realizes it immediately)
    pub fn update_vesting_period(&mut self, vesting_period: u32, now: i64) -> Result<()> {
        require!(
            vesting_period <= MAX_VESTING_PERIOD,
            VaultError::DurationTooLong
        );
        self.vesting_amount = self.unvested_amount(now)?;
        self.last_distribution_time = now;
        self.vesting_period = vesting_period;
        Ok(())
    }

    pub fn update_cooldown(&mut self, cooldown_duration: u32) -> Result<()> {
        require!(
            cooldown_duration <= MAX_COOLDOWN_DURATION,
            VaultError::DurationTooLong
        );
        self.cooldown_duration = cooldown_duration;
        Ok(())
    }

    /// Shares minted for staking `amount`, with every stake check applied
    pub fn quote_stake(
        &self,
        custody_balance: u64,
        share_supply: u64,
        amount: u64,
        now: i64,
    ) -> Result<u64> {
        require!(amount > 0, VaultError::ZeroAmount);

        let shares = self
            .pool(custody_balance, share_supply, now)?
            .calculate_shares(amount)?;
        require!(shares > 0, VaultError::BelowMinShares);

        let share_supply_after = share_supply
            .checked_add(shares)
            .ok_or(error!(VaultError::ArithmeticOverflow))?;
        self.check_min_shares(share_supply_after)?;

        custody_balance
            .checked_add(amount)
            .ok_or(error!(VaultError::ArithmeticOverflow))?;

        Ok(shares)
    }

    /// Underlying released for burning `shares` at the claim-time price
    pub fn quote_unstake(
        &self,
        custody_balance: u64,
        share_supply: u64,
        shares: u64,
        now: i64,
    ) -> Result<u64> {
        let amount = self
            .pool(custody_balance, share_supply, now)?
            .calculate_assets(shares)?;
        require!(
            amount <= custody_balance,
            VaultError::InsufficientUnderlying
        );

        let share_supply_after = share_supply
            .checked_sub(shares)
            .ok_or(error!(VaultError::ArithmeticOverflow))?;
        self.check_min_shares(share_supply_after)?;

        Ok(amount)
    }

    /// Share supply after an operation must be zero or at least `min_shares`
    pub fn check_min_shares(&self, share_supply_after: u64) -> Result<()> {
        require!(
            share_supply_after == 0 || share_supply_after >= self.min_shares,
            VaultError::BelowMinShares
        );
        Ok(())
    }
}

/// Priced view of a vault: vested underlying against outstanding shares
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pool {
    pub assets: u64,
    pub shares: u64,
}

impl Pool {
    /// Shares minted for a deposit of `assets`
    ///
    /// - Empty pool: shares = assets
    /// - Otherwise: shares = assets * shares / assets_in_pool (rounded down)
    pub fn calculate_shares(&self, assets: u64) -> Result<u64> {
        if self.shares == 0 {
            return Ok(assets);
        }
        require!(self.assets > 0, VaultError::ArithmeticOverflow);

        let shares = (assets as u128)
            .checked_mul(self.shares as u128)
            .ok_or(error!(VaultError::ArithmeticOverflow))?
            / self.assets as u128;

        u64::try_from(shares).map_err(|_| error!(VaultError::ArithmeticOverflow))
    }

    /// Underlying released for `shares` at the current price (rounded down)
    pub fn calculate_assets(&self, shares: u64) -> Result<u64> {
        if self.shares == 0 {
            return Ok(0);
        }

        let assets = (shares as u128)
            .checked_mul(self.assets as u128)
            .ok_or(error!(VaultError::ArithmeticOverflow))?
            / self.shares as u128;

        u64::try_from(assets).map_err(|_| error!(VaultError::ArithmeticOverflow))
    }
}

/// Two-phase exit state for one (owner, vault) pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnstakeStatus {
    None,
    Pending { locked_shares: u64, ready_at: i64 },
}

impl UnstakeStatus {
    /// None -> Pending. Overlapping requests are rejected.
    pub fn start(self, amount: u64, spendable: u64, now: i64, cooldown: u32) -> Result<Self> {
        if let UnstakeStatus::Pending { .. } = self {
            return err!(VaultError::RequestAlreadyPending);
        }
        require!(
            amount > 0 && amount <= spendable,
            VaultError::InsufficientShares
        );

        let ready_at = now
            .checked_add(cooldown as i64)
            .ok_or(error!(VaultError::ArithmeticOverflow))?;

        Ok(UnstakeStatus::Pending {
            locked_shares: amount,
            ready_at,
        })
    }

    /// Release `amount` locked shares once the cooldown is over
    pub fn claim(self, amount: u64, now: i64) -> Result<Self> {
        let (locked_shares, ready_at) = match self {
            UnstakeStatus::None => return err!(VaultError::NoPendingRequest),
            UnstakeStatus::Pending {
                locked_shares,
                ready_at,
            } => (locked_shares, ready_at),
        };

        require!(amount > 0, VaultError::ZeroAmount);
        require!(amount <= locked_shares, VaultError::InsufficientShares);
        require!(now >= ready_at, VaultError::CooldownNotElapsed);

        Ok(match locked_shares - amount {
            0 => UnstakeStatus::None,
            remaining => UnstakeStatus::Pending {
                locked_shares: remaining,
                ready_at,
            },
        })
    }

    /// Abandon the request; returns the shares to unlock
    pub fn cancel(self) -> Result<u64> {
        match self {
            UnstakeStatus::None => err!(VaultError::NoPendingRequest),
            UnstakeStatus::Pending { locked_shares, .. } => Ok(locked_shares),
        }
    }
}

/// Live unstake request; the account is closed when it returns to `None`
#[account]
pub struct UnstakeRequest {
    pub owner: Pubkey,
    pub vault_state: Pubkey,
    pub locked_shares: u64,
    pub ready_at: i64,
    pub bump: u8,
}

impl UnstakeRequest {
    pub fn status(&self) -> UnstakeStatus {
        if self.locked_shares == 0 {
            UnstakeStatus::None
        } else {
            UnstakeStatus::Pending {
                locked_shares: self.locked_shares,
                ready_at: self.ready_at,
            }
        }
    }

    pub fn apply(&mut self, status: UnstakeStatus) {
        match status {
            UnstakeStatus::None => {
                self.locked_shares = 0;
                self.ready_at = 0;
            }
            UnstakeStatus::Pending {
                locked_shares,
                ready_at,
            } => {
                self.locked_shares = locked_shares;
                self.ready_at = ready_at;
            }
        }
    }
}

/// Marker for users barred from staking in a vault
#[account]
pub struct BlacklistEntry {
    pub user: Pubkey,
    pub vault_state: Pubkey,
    pub blacklisted: bool,
    pub bump: u8,
}

impl BlacklistEntry {
    /// Fill an entry created on the fly by a user instruction
    pub fn ensure_initialized(&mut self, user: Pubkey, vault_state: Pubkey, bump: u8) {
        if self.user == Pubkey::default() {
            self.user = user;
            self.vault_state = vault_state;
            self.blacklisted = false;
            self.bump = bump;
        }
    }

    /// Admin write; creates the entry when it does not exist yet
    pub fn set(&mut self, user: Pubkey, vault_state: Pubkey, blacklisted: bool, bump: u8) {
        self.user = user;
        self.vault_state = vault_state;
        self.blacklisted = blacklisted;
        self.bump = bump;
    }

    /// Gate for stake and start_unstake
    pub fn check_allowed(&self) -> Result<()> {
        require!(!self.blacklisted, VaultError::Blacklisted);
        Ok(())
    }
}
