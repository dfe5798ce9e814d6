use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Admin: bar or re-admit a user
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: Admin must be signer
/// ✅ 2. ACCOUNT OWNERSHIP: Vault state PDA validated with seeds
/// ✅ 3. AUTHORITY VALIDATION: Signer must be the vault admin
/// ✅ 5. RENT: Admin pays for a missing blacklist entry
/// ✅ 10. EVENTS: Emits an event on change
#[derive(Accounts)]
#[instruction(salt: [u8; 8], user: Pubkey)]
pub struct SetBlacklist<'info> {
    /// Current vault admin
    /// Security: Must be signer and match vault_state.admin
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Vault state PDA
    /// Security: Validated by seeds and the admin constraint
    #[account(
        seeds = [VAULT_STATE_SEED, salt.as_ref()],
        bump = vault_state.bump,
        constraint = vault_state.is_admin(&admin.key()) @ VaultError::Unauthorized,
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Per-user blacklist entry
    /// Security: Validated by seeds, scoped to this vault and user
    #[account(
        init_if_needed,
        payer = admin,
        space = BLACKLIST_ENTRY_SIZE,
        seeds = [BLACKLIST_SEED, vault_state.key().as_ref(), user.as_ref()],
        bump
    )]
    pub blacklist_entry: Account<'info, BlacklistEntry>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<SetBlacklist>,
    _salt: [u8; 8],
    user: Pubkey,
    blacklisted: bool,
) -> Result<()> {
    let vault = ctx.accounts.vault_state.key();
    let bump = ctx.bumps.blacklist_entry;
    ctx.accounts
        .blacklist_entry
        .set(user, vault, blacklisted, bump);

    msg!("Blacklist for {} set to {}", user, blacklisted);

    emit!(BlacklistUpdated {
        vault,
        user,
        blacklisted,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
