use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{constants::*, errors::*, events::*, state::*};

/// Provision the share mint, the custody account and the unstake silo
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: Caller must be signer (rent payer only)
/// ✅ 2. ACCOUNT OWNERSHIP: Every account is a PDA of this vault state
/// ✅ 4. REINITIALIZATION: Rejected with AlreadyInitialized
/// ✅ 7. TOKEN ACCOUNT VALIDATION: Mint and authority fixed at creation
/// ✅ 10. EVENTS: Emits ProgramAccountsInitialized
#[derive(Accounts)]
#[instruction(salt: [u8; 8])]
pub struct InitializeProgramAccounts<'info> {
    /// Pays for the new accounts
    /// Security: Must be signer
    #[account(mut)]
    pub caller: Signer<'info>,

    /// Vault state PDA
    /// Security: Validated by seeds, must reference deposit_mint
    #[account(
        mut,
        seeds = [VAULT_STATE_SEED, salt.as_ref()],
        bump = vault_state.bump,
        has_one = deposit_mint @ VaultError::InvalidMint,
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Underlying token mint
    /// Security: Must match vault_state.deposit_mint
    pub deposit_mint: Account<'info, Mint>,

    /// Vault authority PDA - mint authority for shares, owner of custody and silo
    /// Security: CHECK constraint, validated by seeds
    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.key().as_ref()],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Share token mint PDA
    /// Security: Authority is vault_authority, decimals follow deposit_mint
    #[account(
        init_if_needed,
        payer = caller,
        seeds = [SHARE_MINT_SEED, vault_state.key().as_ref()],
        bump,
        mint::decimals = deposit_mint.decimals,
        mint::authority = vault_authority,
    )]
    pub share_mint: Account<'info, Mint>,

    /// Custody of the pooled underlying
    /// Security: Deposit mint, owned by vault_authority
    #[account(
        init_if_needed,
        payer = caller,
        seeds = [CUSTODY_SEED, vault_state.key().as_ref()],
        bump,
        token::mint = deposit_mint,
        token::authority = vault_authority,
    )]
    pub custody: Account<'info, TokenAccount>,

    /// Holds shares locked by pending unstake requests
    /// Security: Share mint, owned by vault_authority
    #[account(
        init_if_needed,
        payer = caller,
        seeds = [SILO_SEED, vault_state.key().as_ref()],
        bump,
        token::mint = share_mint,
        token::authority = vault_authority,
    )]
    pub silo: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeProgramAccounts>, _salt: [u8; 8]) -> Result<()> {
    let share_mint = ctx.accounts.share_mint.key();
    let custody = ctx.accounts.custody.key();
    let silo = ctx.accounts.silo.key();
    let authority_bump = ctx.bumps.vault_authority;
    let vault_state = &mut ctx.accounts.vault_state;

    vault_state.attach_program_accounts(share_mint, custody, silo, authority_bump)?;

    emit!(ProgramAccountsInitialized {
        vault: vault_state.key(),
        share_mint,
        custody,
        silo,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
