//! Client SDK for a fully collateralized American options protocol on Solana.
//!
//! The on-chain program issues American options: writers deposit collateral
//! into a per-contract pool and receive writer tokens (the short-side claim)
//! plus option tokens (the exercisable right), both 1:1 with the deposit.
//! This crate derives contract addresses, models the instrument economics,
//! and assembles the unsigned transactions for the contract lifecycle.
//!
//! Signing, broadcast, and the RPC transport stay outside; see [`Provider`].

use anchor_lang::prelude::*;

pub mod contract;
pub mod errors;
pub mod instructions;
pub mod instrument;
pub mod provider;
pub mod sdk;
pub mod state;
pub mod utils;

pub use contract::{BurnParams, ContractClient, ExerciseParams, RedeemParams, WriteParams};
pub use errors::{ClientError, TransportError};
pub use instrument::{Instrument, SettlementRoles, StrikePrice, Token, TokenAmount};
pub use provider::{Provider, TransactionEnvelope};
pub use sdk::{NewContractParams, OptionsSdk};
pub use state::OptionsContract;

declare_id!("TRXf3r361YRfV6Zktov3nvdEqJwAuCowkjh4PUUBYEc");

/// Owner of all accounts that receive fees earned by the protocol.
pub const FEE_OWNER: Pubkey =
    anchor_lang::pubkey!("2DDSpDyRbu9gZbcp2JCq2ZaA9FrCzXzoiyiGLyUFYSP5");

/// Program holding each contract's collateral pool ("writer crate").
pub const CRATE_TOKEN_PROGRAM_ID: Pubkey =
    anchor_lang::pubkey!("CRATwLpu6YZEeiVq9ajjxs61wPQ9f29s1UoQR9siJCRs");

/// Thousands of BPS of the exercise fee. (1bp)
pub const EXERCISE_FEE_KBPS: u64 = 1_000;

/// Number of raw units of the underlying the strike price is denominated in.
pub const STRIKE_PRICE_UNITS: u64 = 1_000_000_000;
