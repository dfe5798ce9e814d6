use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::{constants::*, events::*, state::*};

/// Create the vault state for a namespace salt
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: Caller must be signer (rent payer only)
/// ✅ 2. ACCOUNT OWNERSHIP: Vault state PDA derived from the salt
/// ✅ 3. AUTHORITY VALIDATION: Admin must be a non-default key
/// ✅ 4. REINITIALIZATION: Rejected with AlreadyInitialized
/// ✅ 10. EVENTS: Emits VaultInitialized
#[derive(Accounts)]
#[instruction(admin: Pubkey, salt: [u8; 8])]
pub struct InitializeVaultState<'info> {
    /// Pays for the vault state account
    /// Security: Must be signer; gets no role in the vault
    #[account(mut)]
    pub caller: Signer<'info>,

    /// Vault state PDA for this namespace
    /// Security: created on first call, rejected with AlreadyInitialized afterwards
    #[account(
        init_if_needed,
        payer = caller,
        space = VAULT_STATE_SIZE,
        seeds = [VAULT_STATE_SEED, salt.as_ref()],
        bump
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Underlying token users stake into this vault
    /// Security: Must be a valid SPL mint
    pub deposit_mint: Account<'info, Mint>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializeVaultState>,
    admin: Pubkey,
    salt: [u8; 8],
    min_shares: u64,
) -> Result<()> {
    let deposit_mint = ctx.accounts.deposit_mint.key();
    let bump = ctx.bumps.vault_state;
    let vault_state = &mut ctx.accounts.vault_state;

    // Caller only pays rent; the admin role goes to the `admin` argument
    vault_state.initialize(admin, salt, deposit_mint, min_shares, bump)?;

    msg!("Vault state initialized, admin: {}", admin);

    emit!(VaultInitialized {
        vault: vault_state.key(),
        admin,
        deposit_mint,
        min_shares,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
