//! Encoder for the `option_write` instruction: deposit collateral, mint an
//! equal amount of writer and option tokens.

use anchor_lang::prelude::*;
use std::result::Result;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_spl::token;

use crate::errors::ClientError;
use crate::CRATE_TOKEN_PROGRAM_ID;

/// Accounts for `option_write`, in positional order:
///
/// 0. `[writable, signer]` writer authority
/// 1. `[]` options contract
/// 2. `[writable]` writer's collateral funding tokens
/// 3. `[writable]` option token destination
/// 4. `[writable]` pool collateral tokens
/// 5. `[writable]` writer token destination
/// 6. `[]` writer pool ("crate") token
/// 7. `[writable]` writer mint
/// 8. `[writable]` option mint
/// 9. `[]` SPL token program
/// 10. `[]` pool token program
#[derive(Clone, Debug)]
pub struct OptionWriteAccounts {
    pub writer_authority: Pubkey,
    pub contract: Pubkey,
    pub user_collateral_funding_tokens: Pubkey,
    pub option_token_destination: Pubkey,
    pub crate_collateral_tokens: Pubkey,
    pub writer_token_destination: Pubkey,
    pub writer_crate_token: Pubkey,
    pub writer_mint: Pubkey,
    pub option_mint: Pubkey,
}

#[derive(AnchorSerialize)]
struct OptionWriteArgs {
    write_amount: u64,
}

pub fn option_write(
    accounts: &OptionWriteAccounts,
    write_amount: u64,
) -> Result<Instruction, ClientError> {
    Ok(Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(accounts.writer_authority, true),
            AccountMeta::new_readonly(accounts.contract, false),
            AccountMeta::new(accounts.user_collateral_funding_tokens, false),
            AccountMeta::new(accounts.option_token_destination, false),
            AccountMeta::new(accounts.crate_collateral_tokens, false),
            AccountMeta::new(accounts.writer_token_destination, false),
            AccountMeta::new_readonly(accounts.writer_crate_token, false),
            AccountMeta::new(accounts.writer_mint, false),
            AccountMeta::new(accounts.option_mint, false),
            AccountMeta::new_readonly(token::ID, false),
            AccountMeta::new_readonly(CRATE_TOKEN_PROGRAM_ID, false),
        ],
        data: super::encode("option_write", &OptionWriteArgs { write_amount })?,
    })
}
