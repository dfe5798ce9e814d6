use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Return locked shares to their owner and drop the request
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: User must be signer
/// ✅ 2. ACCOUNT OWNERSHIP: Request PDA bound to the signer
/// ✅ 7. TOKEN ACCOUNT VALIDATION: Validates mint and owner
/// ✅ 10. EVENTS: Emits UnstakeCancelled
#[derive(Accounts)]
#[instruction(salt: [u8; 8])]
pub struct CancelUnstake<'info> {
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

    /// Vault authority PDA
    /// Security: CHECK constraint, validated by seeds
    /// CHECK: PDA owning the silo, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.key().as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Silo holding locked shares
    /// Security: Must match vault_state.silo
    #[account(
        mut,
        address = vault_state.silo,
    )]
    pub silo: Account<'info, TokenAccount>,

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

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CancelUnstake>, _salt: [u8; 8]) -> Result<()> {
    let shares = ctx.accounts.unstake_request.status().cancel()?;
    let vault_key = ctx.accounts.vault_state.key();

    let authority_bump = ctx.accounts.vault_state.authority_bump;
    let authority_seeds: &[&[u8]] = &[
        VAULT_AUTHORITY_SEED,
        vault_key.as_ref(),
        &[authority_bump],
    ];
    let signer_seeds = &[&authority_seeds[..]];

    let transfer_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: ctx.accounts.silo.to_account_info(),
            to: ctx.accounts.user_share_account.to_account_info(),
            authority: ctx.accounts.vault_authority.to_account_info(),
        },
        signer_seeds,
    );
    token::transfer(transfer_ctx, shares)?;

    let request = &mut ctx.accounts.unstake_request;
    request.apply(UnstakeStatus::None);

    emit!(UnstakeCancelled {
        vault: vault_key,
        user: ctx.accounts.user.key(),
        shares_returned: shares,
        timestamp: Clock::get()?.unix_timestamp,
    });

    request.close(ctx.accounts.user.to_account_info())?;

    Ok(())
}
