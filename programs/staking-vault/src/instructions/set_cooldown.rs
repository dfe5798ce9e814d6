use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Admin: update the unstake cooldown
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: Admin must be signer
/// ✅ 2. ACCOUNT OWNERSHIP: Vault state PDA validated with seeds
/// ✅ 3. AUTHORITY VALIDATION: Signer must be the vault admin
/// ✅ 10. EVENTS: Emits an event on change
#[derive(Accounts)]
#[instruction(salt: [u8; 8])]
pub struct SetCooldown<'info> {
    /// Current vault admin
    /// Security: Must be signer and match vault_state.admin
    pub admin: Signer<'info>,

    /// Vault state PDA
    /// Security: Validated by seeds and the admin constraint
    #[account(
        mut,
        seeds = [VAULT_STATE_SEED, salt.as_ref()],
        bump = vault_state.bump,
        constraint = vault_state.is_admin(&admin.key()) @ VaultError::Unauthorized,
    )]
    pub vault_state: Account<'info, VaultState>,
}

pub fn handler(ctx: Context<SetCooldown>, _salt: [u8; 8], duration: u32) -> Result<()> {
    let vault_state = &mut ctx.accounts.vault_state;
    vault_state.update_cooldown(duration)?;

    emit!(CooldownUpdated {
        vault: vault_state.key(),
        cooldown_duration: duration,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
