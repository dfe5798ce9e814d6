use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Lock shares in the silo and start the cooldown
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: User must be signer
/// ✅ 2. ACCOUNT OWNERSHIP: Request and blacklist PDAs validated with seeds
/// ✅ 7. TOKEN ACCOUNT VALIDATION: Validates mint and owner
/// ✅ 8. BUSINESS LOGIC: One pending request per user, shares must be spendable
/// ✅ 10. EVENTS: Emits UnstakeRequested
#[derive(Accounts)]
#[instruction(salt: [u8; 8])]
pub struct StartUnstake<'info> {
    /// User signing the instruction
    /// Security: Must be signer
    #[account(mut)]
    pub user: Signer<'info>,

    /// Vault state PDA
    /// Security: Validated by seeds
    #[account(
        seeds = [VAULT_STATE_SEED, salt.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Silo holding locked shares
    /// Security: Must match vault_state.silo
    #[account(
        mut,
        address = vault_state.silo,
    )]
    pub silo: Account<'info, TokenAccount>,

    /// User's share token account (source of the locked shares)
    /// Security: Must be owned by user and correct mint
    #[account(
        mut,
        constraint = user_share_account.mint == vault_state.share_mint @ VaultError::InvalidMint,
        constraint = user_share_account.owner == user.key() @ VaultError::InvalidOwner,
    )]
    pub user_share_account: Account<'info, TokenAccount>,

    /// Unstake request PDA
    /// Security: Validated by seeds, scoped to this vault and user
    #[account(
        init_if_needed,
        payer = user,
        space = UNSTAKE_REQUEST_SIZE,
        seeds = [UNSTAKE_REQUEST_SEED, vault_state.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub unstake_request: Account<'info, UnstakeRequest>,

    /// Blacklist entry PDA
    /// Security: Validated by seeds; created unflagged on first use
    #[account(
        init_if_needed,
        payer = user,
        space = BLACKLIST_ENTRY_SIZE,
        seeds = [BLACKLIST_SEED, vault_state.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub blacklist_entry: Account<'info, BlacklistEntry>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<StartUnstake>, _salt: [u8; 8], amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault_key = ctx.accounts.vault_state.key();
    let user_key = ctx.accounts.user.key();

    // CHECKS
    let entry = &mut ctx.accounts.blacklist_entry;
    entry.ensure_initialized(user_key, vault_key, ctx.bumps.blacklist_entry);
    entry.check_allowed()?;

    let next = ctx.accounts.unstake_request.status().start(
        amount,
        ctx.accounts.user_share_account.amount,
        now,
        ctx.accounts.vault_state.cooldown_duration,
    )?;

    // EFFECTS
    let request = &mut ctx.accounts.unstake_request;
    request.owner = user_key;
    request.vault_state = vault_key;
    request.bump = ctx.bumps.unstake_request;
    request.apply(next);
    let ready_at = request.ready_at;

    // INTERACTIONS: shares leave the spendable balance until claim or cancel
    let transfer_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: ctx.accounts.user_share_account.to_account_info(),
            to: ctx.accounts.silo.to_account_info(),
            authority: ctx.accounts.user.to_account_info(),
        },
    );
    token::transfer(transfer_ctx, amount)?;

    emit!(UnstakeRequested {
        vault: vault_key,
        user: user_key,
        locked_shares: amount,
        ready_at,
        timestamp: now,
    });

    Ok(())
}
