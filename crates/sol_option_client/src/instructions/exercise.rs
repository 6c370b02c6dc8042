//! Encoder for the `option_exercise` instruction: burn option tokens, pay
//! the strike (minus the protocol fee), receive collateral from the pool.

use anchor_lang::prelude::*;
use std::result::Result;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_spl::token;

use crate::errors::ClientError;
use crate::CRATE_TOKEN_PROGRAM_ID;

/// Accounts for `option_exercise`, in positional order:
///
/// 0. `[writable, signer]` exerciser authority
/// 1. `[]` options contract
/// 2. `[writable]` exerciser's exercise-payment tokens
/// 3. `[writable]` option mint
/// 4. `[writable]` exerciser's option tokens (burned)
/// 5. `[]` writer pool ("crate") token
/// 6. `[writable]` pool collateral tokens
/// 7. `[writable]` pool exercise-payment tokens
/// 8. `[writable]` exerciser's collateral destination
/// 9. `[writable]` protocol fee destination for the exercise asset
/// 10. `[]` SPL token program
/// 11. `[]` pool token program
#[derive(Clone, Debug)]
pub struct OptionExerciseAccounts {
    pub exerciser_authority: Pubkey,
    pub contract: Pubkey,
    pub exercise_token_source: Pubkey,
    pub option_mint: Pubkey,
    pub option_token_source: Pubkey,
    pub writer_crate_token: Pubkey,
    pub crate_collateral_tokens: Pubkey,
    pub crate_exercise_tokens: Pubkey,
    pub collateral_token_destination: Pubkey,
    pub exercise_fee_destination: Pubkey,
}

#[derive(AnchorSerialize)]
struct OptionExerciseArgs {
    option_amount: u64,
}

pub fn option_exercise(
    accounts: &OptionExerciseAccounts,
    option_amount: u64,
) -> Result<Instruction, ClientError> {
    Ok(Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(accounts.exerciser_authority, true),
            AccountMeta::new_readonly(accounts.contract, false),
            AccountMeta::new(accounts.exercise_token_source, false),
            AccountMeta::new(accounts.option_mint, false),
            AccountMeta::new(accounts.option_token_source, false),
            AccountMeta::new_readonly(accounts.writer_crate_token, false),
            AccountMeta::new(accounts.crate_collateral_tokens, false),
            AccountMeta::new(accounts.crate_exercise_tokens, false),
            AccountMeta::new(accounts.collateral_token_destination, false),
            AccountMeta::new(accounts.exercise_fee_destination, false),
            AccountMeta::new_readonly(token::ID, false),
            AccountMeta::new_readonly(CRATE_TOKEN_PROGRAM_ID, false),
        ],
        data: super::encode("option_exercise", &OptionExerciseArgs { option_amount })?,
    })
}
