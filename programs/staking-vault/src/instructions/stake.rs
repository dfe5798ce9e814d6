use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Stake underlying into the pool and receive shares at the current price
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: User must be signer
/// ✅ 2. ACCOUNT OWNERSHIP: Vault state and authority PDAs validated with seeds
/// ✅ 6. MATH SAFETY: u128 share math, checked sums
/// ✅ 7. TOKEN ACCOUNT VALIDATION: Validates mint and owner
/// ✅ 8. BUSINESS LOGIC: Blacklist and min-shares checks before any transfer
/// ✅ 10. EVENTS: Emits Staked
#[derive(Accounts)]
#[instruction(salt: [u8; 8])]
pub struct Stake<'info> {
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
    /// CHECK: PDA used as mint authority, validated by seeds
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

    /// User's underlying token account (source)
    /// Security: Must be owned by user and correct mint
    #[account(
        mut,
        constraint = user_deposit_account.mint == vault_state.deposit_mint @ VaultError::InvalidMint,
        constraint = user_deposit_account.owner == user.key() @ VaultError::InvalidOwner,
    )]
    pub user_deposit_account: Account<'info, TokenAccount>,

    /// User's share token account (destination)
    /// Security: Must be owned by user and correct mint
    #[account(
        mut,
        constraint = user_share_account.mint == vault_state.share_mint @ VaultError::InvalidMint,
        constraint = user_share_account.owner == user.key() @ VaultError::InvalidOwner,
    )]
    pub user_share_account: Account<'info, TokenAccount>,

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

pub fn handler(ctx: Context<Stake>, _salt: [u8; 8], amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault_key = ctx.accounts.vault_state.key();
    let user_key = ctx.accounts.user.key();

    // CHECKS
    let entry = &mut ctx.accounts.blacklist_entry;
    entry.ensure_initialized(user_key, vault_key, ctx.bumps.blacklist_entry);
    entry.check_allowed()?;

    let vault_state = &ctx.accounts.vault_state;
    let custody_balance = ctx.accounts.custody.amount;
    let share_supply = ctx.accounts.share_mint.supply;
    let shares = vault_state.quote_stake(custody_balance, share_supply, amount, now)?;

    // INTERACTIONS: underlying in, shares out
    let transfer_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: ctx.accounts.user_deposit_account.to_account_info(),
            to: ctx.accounts.custody.to_account_info(),
            authority: ctx.accounts.user.to_account_info(),
        },
    );
    token::transfer(transfer_ctx, amount)?;

    let authority_bump = vault_state.authority_bump;
    let authority_seeds: &[&[u8]] = &[
        VAULT_AUTHORITY_SEED,
        vault_key.as_ref(),
        &[authority_bump],
    ];
    let signer_seeds = &[&authority_seeds[..]];

    let mint_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        MintTo {
            mint: ctx.accounts.share_mint.to_account_info(),
            to: ctx.accounts.user_share_account.to_account_info(),
            authority: ctx.accounts.vault_authority.to_account_info(),
        },
        signer_seeds,
    );
    token::mint_to(mint_ctx, shares)?;

    emit!(Staked {
        vault: vault_key,
        user: user_key,
        amount,
        shares_minted: shares,
        custody_balance: custody_balance + amount,
        share_supply: share_supply + shares,
        timestamp: now,
    });

    Ok(())
}
