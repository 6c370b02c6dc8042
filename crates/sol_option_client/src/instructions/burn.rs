//! Encoder for the `option_burn` instruction: burn equal amounts of writer
//! and option tokens to reclaim collateral 1:1 before expiry.

use anchor_lang::prelude::*;
use std::result::Result;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_spl::token;

use crate::errors::ClientError;
use crate::CRATE_TOKEN_PROGRAM_ID;

/// Accounts for `option_burn`, in positional order:
///
/// 0. `[writable, signer]` writer authority
/// 1. `[]` options contract
/// 2. `[writable]` writer mint
/// 3. `[writable]` option mint
/// 4. `[writable]` writer's writer tokens (burned)
/// 5. `[writable]` writer's option tokens (burned)
/// 6. `[writable]` pool collateral tokens
/// 7. `[writable]` writer's collateral destination
/// 8. `[]` collateral mint
/// 9. `[]` writer pool ("crate") token
/// 10. `[]` pool mint (the writer mint)
/// 11. `[writable]` pool token account
/// 12. `[]` pool token program
/// 13. `[writable]` pool exercise-payment tokens
/// 14. `[]` SPL token program
/// 15. `[]` pool token program
#[derive(Clone, Debug)]
pub struct OptionBurnAccounts {
    pub writer_authority: Pubkey,
    pub contract: Pubkey,
    pub writer_mint: Pubkey,
    pub option_mint: Pubkey,
    pub writer_token_source: Pubkey,
    pub option_token_source: Pubkey,
    pub crate_collateral_tokens: Pubkey,
    pub collateral_token_destination: Pubkey,
    pub collateral_mint: Pubkey,
    pub writer_crate_token: Pubkey,
    pub crate_exercise_tokens: Pubkey,
}

#[derive(AnchorSerialize)]
struct OptionBurnArgs {
    burn_amount: u64,
}

pub fn option_burn(
    accounts: &OptionBurnAccounts,
    burn_amount: u64,
) -> Result<Instruction, ClientError> {
    Ok(Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(accounts.writer_authority, true),
            AccountMeta::new_readonly(accounts.contract, false),
            AccountMeta::new(accounts.writer_mint, false),
            AccountMeta::new(accounts.option_mint, false),
            AccountMeta::new(accounts.writer_token_source, false),
            AccountMeta::new(accounts.option_token_source, false),
            AccountMeta::new(accounts.crate_collateral_tokens, false),
            AccountMeta::new(accounts.collateral_token_destination, false),
            AccountMeta::new_readonly(accounts.collateral_mint, false),
            AccountMeta::new_readonly(accounts.writer_crate_token, false),
            // the pool's own mint and token account, as the pool program
            // expects to see them
            AccountMeta::new_readonly(accounts.writer_mint, false),
            AccountMeta::new(accounts.writer_crate_token, false),
            AccountMeta::new_readonly(CRATE_TOKEN_PROGRAM_ID, false),
            AccountMeta::new(accounts.crate_exercise_tokens, false),
            AccountMeta::new_readonly(token::ID, false),
            AccountMeta::new_readonly(CRATE_TOKEN_PROGRAM_ID, false),
        ],
        data: super::encode("option_burn", &OptionBurnArgs { burn_amount })?,
    })
}
