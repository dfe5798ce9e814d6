use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Admin: hand the role to another key
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: Admin must be signer
/// ✅ 2. ACCOUNT OWNERSHIP: Vault state PDA validated with seeds
/// ✅ 3. AUTHORITY VALIDATION: Signer must be the vault admin
/// ✅ 10. EVENTS: Emits an event on change
#[derive(Accounts)]
#[instruction(new_admin: Pubkey, salt: [u8; 8])]
pub struct TransferAdmin<'info> {
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

pub fn handler(ctx: Context<TransferAdmin>, new_admin: Pubkey, _salt: [u8; 8]) -> Result<()> {
    let vault_state = &mut ctx.accounts.vault_state;
    let previous_admin = vault_state.transfer_admin(new_admin)?;

    msg!("Admin transferred from {} to {}", previous_admin, new_admin);

    emit!(AdminTransferred {
        vault: vault_state.key(),
        previous_admin,
        new_admin,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
