//! SDK facade: provider ownership and contract construction.

use anchor_lang::prelude::*;
use std::result::Result;
use anchor_lang::solana_program::program_pack::Pack;
use anchor_lang::solana_program::system_instruction;
use anchor_spl::token::spl_token;
use tracing::info;

use crate::contract::ContractClient;
use crate::errors::ClientError;
use crate::instructions::{new_contract, NewContractAccounts};
use crate::instrument::Instrument;
use crate::provider::{ensure_ata, Provider, TransactionEnvelope};
use crate::utils::pda::find_crate_address;

/// Parameters for [`OptionsSdk::new_contract`].
///
/// The two mint keypairs are generated by the caller's wallet layer; only
/// their public keys travel here, and both come back in the envelope as
/// required signers.
#[derive(Clone, Debug)]
pub struct NewContractParams {
    pub instrument: Instrument,
    /// Funds account creation. Defaults to the provider wallet.
    pub payer: Option<Pubkey>,
    /// Mint of the short-side writer token; also the pool mint.
    pub writer_mint: Pubkey,
    /// Mint of the exercisable option token.
    pub option_mint: Pubkey,
}

/// Entry point of the SDK: owns the provider and hands out contract
/// clients.
pub struct OptionsSdk<P> {
    provider: P,
}

impl<P: Provider> OptionsSdk<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Client for the contract with the given parameters. The contract may
    /// or may not exist on-chain yet; existence is only checked on fetch.
    pub fn load_contract(&self, instrument: Instrument) -> ContractClient<'_, P> {
        ContractClient::new(&self.provider, instrument)
    }

    /// Assembles the creation transaction for a new contract, returning its
    /// client alongside the envelope.
    ///
    /// The envelope initializes the two claim mints (writer mint authority
    /// is the pool; option mint authority is the contract), provisions the
    /// contract's own token accounts plus the protocol fee account for the
    /// exercise asset, and ends with the `new_contract` instruction.
    pub async fn new_contract(
        &self,
        params: NewContractParams,
    ) -> Result<(ContractClient<'_, P>, TransactionEnvelope), ClientError> {
        let payer = params.payer.unwrap_or_else(|| self.provider.wallet());
        let client = self.load_contract(params.instrument.clone());
        let (contract, contract_bump) = client.locate()?;
        let instrument = client.instrument();
        let strike = instrument.raw_strike()?;
        let underlying_mint = instrument.underlying().mint;
        let quote_mint = instrument.quote().mint;

        let mut envelope = TransactionEnvelope::new();
        ensure_ata(&self.provider, &mut envelope, &contract, &underlying_mint).await?;
        ensure_ata(&self.provider, &mut envelope, &contract, &quote_mint).await?;

        let (pool, crate_bump) = find_crate_address(&params.writer_mint)?;
        self.push_init_mint(
            &mut envelope,
            &payer,
            &params.writer_mint,
            &pool,
            instrument.decimals(),
        )
        .await?;
        self.push_init_mint(
            &mut envelope,
            &payer,
            &params.option_mint,
            &contract,
            instrument.decimals(),
        )
        .await?;

        // provision the exercise fee account now so exercises never have to
        ensure_ata(
            &self.provider,
            &mut envelope,
            &crate::FEE_OWNER,
            &instrument.exercise_token().mint,
        )
        .await?;

        envelope.push(new_contract(
            &NewContractAccounts {
                contract,
                underlying_mint,
                quote_mint,
                crate_mint: params.writer_mint,
                crate_token: pool,
                option_mint: params.option_mint,
                payer,
            },
            strike,
            instrument.expiry_ts,
            instrument.is_put,
            contract_bump,
            crate_bump,
        )?);
        envelope.additional_signers = vec![params.writer_mint, params.option_mint];
        info!(%contract, "assembled contract creation");
        Ok((client, envelope))
    }

    /// Appends the create + initialize pair for a fresh SPL mint signed by
    /// its own keypair.
    async fn push_init_mint(
        &self,
        envelope: &mut TransactionEnvelope,
        payer: &Pubkey,
        mint: &Pubkey,
        authority: &Pubkey,
        decimals: u8,
    ) -> Result<(), ClientError> {
        let space = spl_token::state::Mint::LEN;
        let lamports = self.provider.minimum_balance(space).await?;
        envelope.push(system_instruction::create_account(
            payer,
            mint,
            lamports,
            space as u64,
            &anchor_spl::token::ID,
        ));
        envelope.push(spl_token::instruction::initialize_mint(
            &anchor_spl::token::ID,
            mint,
            authority,
            Some(authority),
            decimals,
        )?);
        Ok(())
    }
}
