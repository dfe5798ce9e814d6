use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Claim locked shares after the cooldown, priced at claim time
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: User must be signer
/// ✅ 2. ACCOUNT OWNERSHIP: Request PDA bound to the signer
/// ✅ 6. MATH SAFETY: u128 pricing at claim time
/// ✅ 7. TOKEN ACCOUNT VALIDATION: Validates mint and owner
/// ✅ 8. BUSINESS LOGIC: Cooldown, locked amount and min-shares checked before burn
/// ✅ 10. EVENTS: Emits Unstaked
#[derive(Accounts)]
#[instruction(salt: [u8; 8])]
pub struct Unstake<'info> {
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
    /// CHECK: PDA owning custody and silo, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.key().as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Share mint
    /// Security: Must match vault_state.share_mint
    #[account(
        mut,
        address = vault_state.share_mint,
    )]
    pub share_mint: Account<'info, Mint>,

    /// Custody of the pooled underlying
    /// Security: Must match vault_state.custody
    #[account(
        mut,
        address = vault_state.custody,
    )]
    pub custody: Account<'info, TokenAccount>,

    /// Silo holding locked shares
    /// Security: Must match vault_state.silo
    #[account(
        mut,
        address = vault_state.silo,
    )]
    pub silo: Account<'info, TokenAccount>,

    /// User's underlying token account (destination)
    /// Security: Must be owned by user and correct mint
    #[account(
        mut,
        constraint = user_deposit_account.mint == vault_state.deposit_mint @ VaultError::InvalidMint,
        constraint = user_deposit_account.owner == user.key() @ VaultError::InvalidOwner,
    )]
    pub user_deposit_account: Account<'info, TokenAccount>,

    /// Missing requests surface as NoPendingRequest rather than an account error
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

pub fn handler(ctx: Context<Unstake>, _salt: [u8; 8], amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault_key = ctx.accounts.vault_state.key();
    let user_key = ctx.accounts.user.key();

    // CHECKS: all of them before any ledger movement
    let next = ctx.accounts.unstake_request.status().claim(amount, now)?;

    let vault_state = &ctx.accounts.vault_state;
    let custody_balance = ctx.accounts.custody.amount;
    let share_supply = ctx.accounts.share_mint.supply;
    let released = vault_state.quote_unstake(custody_balance, share_supply, amount, now)?;

    // INTERACTIONS
    let authority_bump = vault_state.authority_bump;
    let authority_seeds: &[&[u8]] = &[
        VAULT_AUTHORITY_SEED,
        vault_key.as_ref(),
        &[authority_bump],
    ];
    let signer_seeds = &[&authority_seeds[..]];

    let burn_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        Burn {
            mint: ctx.accounts.share_mint.to_account_info(),
            from: ctx.accounts.silo.to_account_info(),
            authority: ctx.accounts.vault_authority.to_account_info(),
        },
        signer_seeds,
    );
    token::burn(burn_ctx, amount)?;

    if released > 0 {
        let transfer_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.custody.to_account_info(),
                to: ctx.accounts.user_deposit_account.to_account_info(),
                authority: ctx.accounts.vault_authority.to_account_info(),
            },
            signer_seeds,
        );
        token::transfer(transfer_ctx, released)?;
    }

    // EFFECTS on the request record
    let request = &mut ctx.accounts.unstake_request;
    request.apply(next);
    let remaining_locked = request.locked_shares;

    emit!(Unstaked {
        vault: vault_key,
        user: user_key,
        shares_burned: amount,
        amount: released,
        remaining_locked,
        custody_balance: custody_balance - released,
        share_supply: share_supply - amount,
        timestamp: now,
    });

    if next == UnstakeStatus::None {
        request.close(ctx.accounts.user.to_account_info())?;
    }

    Ok(())
}
