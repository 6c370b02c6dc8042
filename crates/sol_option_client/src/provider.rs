//! External transport seam and transaction envelope assembly.

use anchor_lang::prelude::*;
use std::result::Result;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_spl::associated_token::{self, spl_associated_token_account};
use async_trait::async_trait;
use tracing::debug;

use crate::errors::{ClientError, TransportError};

/// Read-only view of the chain plus the identity of the signing wallet.
///
/// Implementations wrap whatever RPC transport the caller already uses.
/// This crate performs no retries and applies no timeouts on top of it;
/// failures propagate unchanged.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Raw data of the account at `address`, or `None` if no account
    /// exists there.
    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, TransportError>;

    /// Minimum lamport balance making an account of `data_len` bytes
    /// rent-exempt.
    async fn minimum_balance(&self, data_len: usize) -> Result<u64, TransportError>;

    /// Public key of the wallet that signs and pays for assembled
    /// transactions.
    fn wallet(&self) -> Pubkey;
}

/// An ordered instruction list for the caller to sign and submit as one
/// atomic transaction, plus any signers required beyond the wallet.
///
/// Atomicity across the list comes from the chain's transaction semantics,
/// not from this crate: either every instruction lands or none do.
#[derive(Clone, Debug, Default)]
pub struct TransactionEnvelope {
    pub instructions: Vec<Instruction>,
    /// Extra signatures the transaction needs, e.g. freshly generated mint
    /// keypairs. The wallet itself is implied.
    pub additional_signers: Vec<Pubkey>,
}

impl TransactionEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }
}

/// Resolves the associated token account of `(owner, mint)`, appending a
/// create instruction to `envelope` when the account does not exist yet.
///
/// The check-then-create pair is not atomic here; it becomes atomic once the
/// whole envelope is submitted as one transaction. Calling again after the
/// account exists appends nothing, so provisioning is idempotent.
pub async fn ensure_ata<P: Provider>(
    provider: &P,
    envelope: &mut TransactionEnvelope,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<Pubkey, ClientError> {
    let address = associated_token::get_associated_token_address(owner, mint);
    if provider.account_data(&address).await?.is_none() {
        debug!(%address, %owner, %mint, "creating associated token account");
        envelope.push(
            spl_associated_token_account::instruction::create_associated_token_account(
                &provider.wallet(),
                owner,
                mint,
                &anchor_spl::token::ID,
            ),
        );
    }
    Ok(address)
}
