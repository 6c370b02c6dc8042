//! Encoder for the `option_redeem` instruction: burn writer tokens for the
//! writer's pro-rata share of the pool after expiry.
//!
//! The split between collateral and exercise proceeds is computed by the
//! program from live pool balances; the client only opens account access.

use anchor_lang::prelude::*;
use std::result::Result;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_spl::token;

use crate::errors::ClientError;
use crate::CRATE_TOKEN_PROGRAM_ID;

/// Accounts for `option_redeem`, in positional order:
///
/// 0. `[writable, signer]` writer authority
/// 1. `[]` options contract
/// 2. `[writable]` writer's writer tokens (burned)
/// 3. `[writable]` writer mint
/// 4. `[writable]` writer's collateral destination
/// 5. `[writable]` writer's exercise-payment destination
/// 6. `[]` writer pool ("crate") token
/// 7. `[writable]` pool collateral tokens
/// 8. `[writable]` pool exercise-payment tokens
/// 9. `[]` SPL token program
/// 10. `[]` pool token program
#[derive(Clone, Debug)]
pub struct OptionRedeemAccounts {
    pub writer_authority: Pubkey,
    pub contract: Pubkey,
    pub writer_token_source: Pubkey,
    pub writer_mint: Pubkey,
    pub collateral_token_destination: Pubkey,
    pub exercise_token_destination: Pubkey,
    pub writer_crate_token: Pubkey,
    pub crate_collateral_tokens: Pubkey,
    pub crate_exercise_tokens: Pubkey,
}

#[derive(AnchorSerialize)]
struct OptionRedeemArgs {
    writer_amount: u64,
}

pub fn option_redeem(
    accounts: &OptionRedeemAccounts,
    writer_amount: u64,
) -> Result<Instruction, ClientError> {
    Ok(Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(accounts.writer_authority, true),
            AccountMeta::new_readonly(accounts.contract, false),
            AccountMeta::new(accounts.writer_token_source, false),
            AccountMeta::new(accounts.writer_mint, false),
            AccountMeta::new(accounts.collateral_token_destination, false),
            AccountMeta::new(accounts.exercise_token_destination, false),
            AccountMeta::new_readonly(accounts.writer_crate_token, false),
            AccountMeta::new(accounts.crate_collateral_tokens, false),
            AccountMeta::new(accounts.crate_exercise_tokens, false),
            AccountMeta::new_readonly(token::ID, false),
            AccountMeta::new_readonly(CRATE_TOKEN_PROGRAM_ID, false),
        ],
        data: super::encode("option_redeem", &OptionRedeemArgs { writer_amount })?,
    })
}
