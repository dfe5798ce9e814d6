use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Grow the pool without minting shares
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: Rewarder must be signer
/// ✅ 3. AUTHORITY VALIDATION: Rewarder must be in the vault's rewarder set
/// ✅ 6. MATH SAFETY: Checked vesting arithmetic
/// ✅ 7. TOKEN ACCOUNT VALIDATION: Validates mint and owner
/// ✅ 10. EVENTS: Emits Rewarded
#[derive(Accounts)]
#[instruction(amount: u64, salt: [u8; 8])]
pub struct Reward<'info> {
    /// Rewarder adding underlying
    /// Security: Must be signer and in vault_state.rewarders
    pub rewarder: Signer<'info>,

    /// Vault state PDA
    /// Security: Validated by seeds
    #[account(
        mut,
        seeds = [VAULT_STATE_SEED, salt.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Custody of the pooled underlying
    /// Security: Must match vault_state.custody
    #[account(
        mut,
        address = vault_state.custody,
    )]
    pub custody: Account<'info, TokenAccount>,

    /// Rewarder's underlying token account (source)
    /// Security: Must be owned by rewarder and correct mint
    #[account(
        mut,
        constraint = rewarder_deposit_account.mint == vault_state.deposit_mint @ VaultError::InvalidMint,
        constraint = rewarder_deposit_account.owner == rewarder.key() @ VaultError::InvalidOwner,
    )]
    pub rewarder_deposit_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Reward>, amount: u64, _salt: [u8; 8]) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let rewarder = ctx.accounts.rewarder.key();
    let vault_state = &mut ctx.accounts.vault_state;

    // CHECKS
    require!(vault_state.is_rewarder(&rewarder), VaultError::Unauthorized);
    require!(amount > 0, VaultError::ZeroAmount);
    let custody_balance = ctx
        .accounts
        .custody
        .amount
        .checked_add(amount)
        .ok_or(VaultError::ArithmeticOverflow)?;

    // EFFECTS
    vault_state.record_reward(amount, now)?;
    let vesting_amount = vault_state.vesting_amount;
    let vault = vault_state.key();

    // INTERACTIONS
    let transfer_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: ctx.accounts.rewarder_deposit_account.to_account_info(),
            to: ctx.accounts.custody.to_account_info(),
            authority: ctx.accounts.rewarder.to_account_info(),
        },
    );
    token::transfer(transfer_ctx, amount)?;

    emit!(Rewarded {
        vault,
        rewarder,
        amount,
        vesting_amount,
        custody_balance,
        timestamp: now,
    });

    Ok(())
}
