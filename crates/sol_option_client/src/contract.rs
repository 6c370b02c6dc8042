//! Wrapper for interacting with one options contract.

use std::sync::{PoisonError, RwLock};

use anchor_lang::prelude::*;
use std::result::Result;
use tracing::{debug, info};

use crate::errors::ClientError;
use crate::instructions::{
    option_burn, option_exercise, option_redeem, option_write, OptionBurnAccounts,
    OptionExerciseAccounts, OptionRedeemAccounts, OptionWriteAccounts,
};
use crate::instrument::{Instrument, Token};
use crate::provider::{ensure_ata, Provider, TransactionEnvelope};
use crate::state::{parse_options_contract, OptionsContract};
use crate::utils::pda::{fee_destination, find_contract_address};

/// Parameters for [`ContractClient::write`].
#[derive(Clone, Debug)]
pub struct WriteParams {
    /// Authority funding the collateral deposit. Defaults to the provider
    /// wallet when `None`; the default is resolved at the call site.
    pub writer_authority: Option<Pubkey>,
    /// Collateral to deposit, in raw units. Mints the same number of writer
    /// and option tokens.
    pub amount: u64,
}

/// Parameters for [`ContractClient::exercise`].
#[derive(Clone, Debug)]
pub struct ExerciseParams {
    /// Authority holding the option tokens. Defaults to the provider wallet.
    pub exerciser_authority: Option<Pubkey>,
    /// Option tokens to exercise, in raw units.
    pub amount: u64,
}

/// Parameters for [`ContractClient::redeem`].
#[derive(Clone, Debug)]
pub struct RedeemParams {
    /// Authority holding the writer tokens. Defaults to the provider wallet.
    pub writer_authority: Option<Pubkey>,
    /// Writer tokens to redeem, in raw units.
    pub amount: u64,
}

/// Parameters for [`ContractClient::burn`].
#[derive(Clone, Debug)]
pub struct BurnParams {
    /// Authority holding both claim tokens. Defaults to the provider wallet.
    pub writer_authority: Option<Pubkey>,
    /// Amount of paired writer + option tokens to burn, in raw units.
    pub amount: u64,
}

/// Client for one options contract: address derivation, cached state reads,
/// and lifecycle transaction assembly.
///
/// Builders assemble unconditionally and leave every state check (expiry,
/// phase, balances) to the program; a transaction built out of order is
/// rejected on-chain, not here.
pub struct ContractClient<'a, P> {
    provider: &'a P,
    instrument: Instrument,
    /// Single-entry cache of fetched contract state. Invalidation is
    /// explicit via [`ContractClient::refresh`]; concurrent first fetches
    /// may duplicate the read, which is harmless.
    cache: RwLock<Option<OptionsContract>>,
}

impl<'a, P: Provider> ContractClient<'a, P> {
    pub fn new(provider: &'a P, instrument: Instrument) -> Self {
        Self {
            provider,
            instrument,
            cache: RwLock::new(None),
        }
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    /// Derives the `(address, bump)` of this contract. Pure and cache-free.
    pub fn locate(&self) -> Result<(Pubkey, u8), ClientError> {
        let strike = self.instrument.raw_strike()?;
        find_contract_address(
            &self.instrument.underlying().mint,
            &self.instrument.quote().mint,
            strike,
            self.instrument.expiry_ts,
            self.instrument.is_put,
        )
    }

    /// Returns the contract state, reading it from the chain on first use.
    ///
    /// A missing account is a hard [`ClientError::ContractNotFound`]: there
    /// is no sensible default to build transactions against. Staleness of
    /// the cached copy is the caller's responsibility.
    pub async fn fetch(&self) -> Result<OptionsContract, ClientError> {
        let (address, _) = self.locate()?;
        if let Some(state) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            debug!(%address, "contract state cache hit");
            return Ok(state);
        }
        let data = self
            .provider
            .account_data(&address)
            .await?
            .ok_or(ClientError::ContractNotFound(address))?;
        let state = parse_options_contract(&data)?;
        debug!(%address, "fetched contract state");
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = Some(state.clone());
        Ok(state)
    }

    /// Drops the cached state and reads it again.
    pub async fn refresh(&self) -> Result<OptionsContract, ClientError> {
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.fetch().await
    }

    /// The exercisable option token of this contract.
    pub async fn option_token(&self) -> Result<Token, ClientError> {
        let state = self.fetch().await?;
        Ok(Token::new(
            state.option_mint,
            self.instrument.symbol()?,
            self.instrument.decimals(),
        ))
    }

    /// The short-side writer token of this contract.
    pub async fn writer_token(&self) -> Result<Token, ClientError> {
        let state = self.fetch().await?;
        Ok(Token::new(
            state.writer_mint,
            format!("wrt{}", self.instrument.symbol()?),
            self.instrument.decimals(),
        ))
    }

    /// Builds the transaction depositing collateral in exchange for writer
    /// and option tokens, 1:1 with the deposit.
    pub async fn write(&self, params: WriteParams) -> Result<TransactionEnvelope, ClientError> {
        let writer_authority = params
            .writer_authority
            .unwrap_or_else(|| self.provider.wallet());
        let (contract, _) = self.locate()?;
        let state = self.fetch().await?;
        let roles = self.instrument.settlement_roles();

        let mut envelope = TransactionEnvelope::new();
        let user_collateral = ensure_ata(
            self.provider,
            &mut envelope,
            &writer_authority,
            &roles.collateral.mint,
        )
        .await?;
        let writer_destination = ensure_ata(
            self.provider,
            &mut envelope,
            &writer_authority,
            &state.writer_mint,
        )
        .await?;
        let option_destination = ensure_ata(
            self.provider,
            &mut envelope,
            &writer_authority,
            &state.option_mint,
        )
        .await?;
        let crate_collateral = ensure_ata(
            self.provider,
            &mut envelope,
            &state.writer_crate,
            &roles.collateral.mint,
        )
        .await?;

        envelope.push(option_write(
            &OptionWriteAccounts {
                writer_authority,
                contract,
                user_collateral_funding_tokens: user_collateral,
                option_token_destination: option_destination,
                crate_collateral_tokens: crate_collateral,
                writer_token_destination: writer_destination,
                writer_crate_token: state.writer_crate,
                writer_mint: state.writer_mint,
                option_mint: state.option_mint,
            },
            params.amount,
        )?);
        info!(%contract, amount = params.amount, "assembled option write");
        Ok(envelope)
    }

    /// Builds the transaction burning option tokens and paying the strike
    /// (minus the 1bp protocol fee) for collateral from the pool.
    pub async fn exercise(
        &self,
        params: ExerciseParams,
    ) -> Result<TransactionEnvelope, ClientError> {
        let exerciser_authority = params
            .exerciser_authority
            .unwrap_or_else(|| self.provider.wallet());
        let (contract, _) = self.locate()?;
        let state = self.fetch().await?;
        let roles = self.instrument.settlement_roles();

        let mut envelope = TransactionEnvelope::new();
        let user_collateral = ensure_ata(
            self.provider,
            &mut envelope,
            &exerciser_authority,
            &roles.collateral.mint,
        )
        .await?;
        let user_option = ensure_ata(
            self.provider,
            &mut envelope,
            &exerciser_authority,
            &state.option_mint,
        )
        .await?;
        let user_exercise = ensure_ata(
            self.provider,
            &mut envelope,
            &exerciser_authority,
            &roles.exercise.mint,
        )
        .await?;
        let crate_collateral = ensure_ata(
            self.provider,
            &mut envelope,
            &state.writer_crate,
            &roles.collateral.mint,
        )
        .await?;
        let crate_exercise = ensure_ata(
            self.provider,
            &mut envelope,
            &state.writer_crate,
            &roles.exercise.mint,
        )
        .await?;

        envelope.push(option_exercise(
            &OptionExerciseAccounts {
                exerciser_authority,
                contract,
                exercise_token_source: user_exercise,
                option_mint: state.option_mint,
                option_token_source: user_option,
                writer_crate_token: state.writer_crate,
                crate_collateral_tokens: crate_collateral,
                crate_exercise_tokens: crate_exercise,
                collateral_token_destination: user_collateral,
                exercise_fee_destination: fee_destination(&roles.exercise.mint),
            },
            params.amount,
        )?);
        info!(%contract, amount = params.amount, "assembled option exercise");
        Ok(envelope)
    }

    /// Builds the transaction redeeming writer tokens for the writer's
    /// pro-rata share of whatever mix of collateral and exercise proceeds
    /// sits in the pool. The split is program-determined.
    pub async fn redeem(&self, params: RedeemParams) -> Result<TransactionEnvelope, ClientError> {
        let writer_authority = params
            .writer_authority
            .unwrap_or_else(|| self.provider.wallet());
        let (contract, _) = self.locate()?;
        let state = self.fetch().await?;
        let roles = self.instrument.settlement_roles();

        let mut envelope = TransactionEnvelope::new();
        let user_collateral = ensure_ata(
            self.provider,
            &mut envelope,
            &writer_authority,
            &roles.collateral.mint,
        )
        .await?;
        let writer_source = ensure_ata(
            self.provider,
            &mut envelope,
            &writer_authority,
            &state.writer_mint,
        )
        .await?;
        let user_exercise = ensure_ata(
            self.provider,
            &mut envelope,
            &writer_authority,
            &roles.exercise.mint,
        )
        .await?;
        let crate_collateral = ensure_ata(
            self.provider,
            &mut envelope,
            &state.writer_crate,
            &roles.collateral.mint,
        )
        .await?;
        let crate_exercise = ensure_ata(
            self.provider,
            &mut envelope,
            &state.writer_crate,
            &roles.exercise.mint,
        )
        .await?;

        envelope.push(option_redeem(
            &OptionRedeemAccounts {
                writer_authority,
                contract,
                writer_token_source: writer_source,
                writer_mint: state.writer_mint,
                collateral_token_destination: user_collateral,
                exercise_token_destination: user_exercise,
                writer_crate_token: state.writer_crate,
                crate_collateral_tokens: crate_collateral,
                crate_exercise_tokens: crate_exercise,
            },
            params.amount,
        )?);
        info!(%contract, amount = params.amount, "assembled option redeem");
        Ok(envelope)
    }

    /// Builds the transaction burning paired writer + option tokens to
    /// reclaim collateral 1:1 before expiry.
    pub async fn burn(&self, params: BurnParams) -> Result<TransactionEnvelope, ClientError> {
        let writer_authority = params
            .writer_authority
            .unwrap_or_else(|| self.provider.wallet());
        let (contract, _) = self.locate()?;
        let state = self.fetch().await?;
        let roles = self.instrument.settlement_roles();

        let mut envelope = TransactionEnvelope::new();
        let writer_source = ensure_ata(
            self.provider,
            &mut envelope,
            &writer_authority,
            &state.writer_mint,
        )
        .await?;
        let option_source = ensure_ata(
            self.provider,
            &mut envelope,
            &writer_authority,
            &state.option_mint,
        )
        .await?;
        let user_collateral = ensure_ata(
            self.provider,
            &mut envelope,
            &writer_authority,
            &roles.collateral.mint,
        )
        .await?;
        let crate_collateral = ensure_ata(
            self.provider,
            &mut envelope,
            &state.writer_crate,
            &roles.collateral.mint,
        )
        .await?;
        let crate_exercise = ensure_ata(
            self.provider,
            &mut envelope,
            &state.writer_crate,
            &roles.exercise.mint,
        )
        .await?;

        envelope.push(option_burn(
            &OptionBurnAccounts {
                writer_authority,
                contract,
                writer_mint: state.writer_mint,
                option_mint: state.option_mint,
                writer_token_source: writer_source,
                option_token_source: option_source,
                crate_collateral_tokens: crate_collateral,
                collateral_token_destination: user_collateral,
                collateral_mint: roles.collateral.mint,
                writer_crate_token: state.writer_crate,
                crate_exercise_tokens: crate_exercise,
            },
            params.amount,
        )?);
        info!(%contract, amount = params.amount, "assembled option burn");
        Ok(envelope)
    }
}
