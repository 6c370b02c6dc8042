//! Encoder for the `new_contract` instruction: initialize the contract
//! account and its collateral pool.

use anchor_lang::prelude::*;
use std::result::Result;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::system_program;

use crate::errors::ClientError;
use crate::CRATE_TOKEN_PROGRAM_ID;

/// Accounts for `new_contract`, in positional order:
///
/// 0. `[writable]` options contract (PDA to initialize)
/// 1. `[]` underlying mint
/// 2. `[]` quote mint
/// 3. `[]` pool mint (becomes the writer mint)
/// 4. `[writable]` pool token account to create
/// 5. `[]` pool token program
/// 6. `[]` option mint
/// 7. `[writable, signer]` payer
/// 8. `[]` system program
#[derive(Clone, Debug)]
pub struct NewContractAccounts {
    pub contract: Pubkey,
    pub underlying_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub crate_mint: Pubkey,
    pub crate_token: Pubkey,
    pub option_mint: Pubkey,
    pub payer: Pubkey,
}

#[derive(AnchorSerialize)]
struct NewContractArgs {
    strike: u64,
    expiry_ts: i64,
    is_put: bool,
    contract_bump: u8,
    crate_bump: u8,
}

pub fn new_contract(
    accounts: &NewContractAccounts,
    strike: u64,
    expiry_ts: i64,
    is_put: bool,
    contract_bump: u8,
    crate_bump: u8,
) -> Result<Instruction, ClientError> {
    Ok(Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(accounts.contract, false),
            AccountMeta::new_readonly(accounts.underlying_mint, false),
            AccountMeta::new_readonly(accounts.quote_mint, false),
            AccountMeta::new_readonly(accounts.crate_mint, false),
            AccountMeta::new(accounts.crate_token, false),
            AccountMeta::new_readonly(CRATE_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(accounts.option_mint, false),
            AccountMeta::new(accounts.payer, true),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: super::encode(
            "new_contract",
            &NewContractArgs {
                strike,
                expiry_ts,
                is_put,
                contract_bump,
                crate_bump,
            },
        )?,
    })
}
