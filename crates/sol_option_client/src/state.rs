//! On-chain account schema for the options program.

use anchor_lang::prelude::*;
use std::result::Result;

use crate::errors::ClientError;
use crate::STRIKE_PRICE_UNITS;

/// An American options contract, stored at the PDA derived from its economic
/// parameters.
///
/// Every contract is a call on the underlying at the program level; a put is
/// the same contract rendered with the quote and underlying swapped, which
/// is what [`OptionsContract::is_put`] records.
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct OptionsContract {
    /// Underlying asset.
    pub underlying_mint: Pubkey,
    /// Strike price is denominated in this.
    pub quote_mint: Pubkey,
    /// Number of `quote_mint` tokens required to purchase `10^9` raw units
    /// of the `underlying_mint`.
    pub strike: u64,
    /// When the option expires.
    pub expiry_ts: i64,
    /// Whether the contract prefers to be rendered as a put.
    pub is_put: bool,
    /// Bump seed of the contract address.
    pub bump: u8,

    /// Mint of the short-side claim on the pool, redeemable after expiry.
    pub writer_mint: Pubkey,
    /// The collateral pool ("writer crate") of the contract.
    pub writer_crate: Pubkey,
    /// The pool's collateral token account.
    pub crate_collateral_tokens: Pubkey,
    /// The pool's exercise-payment token account.
    pub crate_exercise_tokens: Pubkey,
    /// Mint of the exercisable option token.
    pub option_mint: Pubkey,
}

impl OptionsContract {
    /// Mint deposited by writers: the underlying for calls, the quote for
    /// puts.
    pub fn collateral_mint(&self) -> Pubkey {
        if self.is_put {
            self.quote_mint
        } else {
            self.underlying_mint
        }
    }

    /// Mint paid by exercisers: the quote for calls, the underlying for
    /// puts.
    pub fn exercise_mint(&self) -> Pubkey {
        if self.is_put {
            self.underlying_mint
        } else {
            self.quote_mint
        }
    }

    /// Exercise payment owed for `option_amount` options, before fees.
    pub fn exercise_amount_for_options(&self, option_amount: u64) -> Option<u64> {
        option_amount
            .checked_mul(self.strike)?
            .checked_div(STRIKE_PRICE_UNITS)
    }
}

/// Decodes an [`OptionsContract`] from raw account data, verifying the
/// account discriminator.
pub fn parse_options_contract(data: &[u8]) -> Result<OptionsContract, ClientError> {
    OptionsContract::try_deserialize(&mut &data[..])
        .map_err(|err| ClientError::AccountDecode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OptionsContract {
        OptionsContract {
            underlying_mint: Pubkey::new_unique(),
            quote_mint: Pubkey::new_unique(),
            strike: 100_000_000_000,
            expiry_ts: 1_800_000_000,
            is_put: false,
            bump: 254,
            writer_mint: Pubkey::new_unique(),
            writer_crate: Pubkey::new_unique(),
            crate_collateral_tokens: Pubkey::new_unique(),
            crate_exercise_tokens: Pubkey::new_unique(),
            option_mint: Pubkey::new_unique(),
        }
    }

    #[test]
    fn parses_account_data() {
        let contract = sample();
        let mut data = Vec::new();
        contract.try_serialize(&mut data).unwrap();

        let parsed = parse_options_contract(&data).unwrap();
        assert_eq!(parsed, contract);
    }

    #[test]
    fn rejects_wrong_discriminator() {
        let contract = sample();
        let mut data = Vec::new();
        contract.try_serialize(&mut data).unwrap();
        data[0] ^= 0xff;

        assert!(matches!(
            parse_options_contract(&data),
            Err(ClientError::AccountDecode(_))
        ));
    }

    #[test]
    fn roles_swap_for_puts() {
        let call = sample();
        let put = OptionsContract {
            is_put: true,
            ..call.clone()
        };

        assert_eq!(call.collateral_mint(), call.underlying_mint);
        assert_eq!(call.exercise_mint(), call.quote_mint);
        assert_eq!(put.collateral_mint(), put.quote_mint);
        assert_eq!(put.exercise_mint(), put.underlying_mint);
    }

    #[test]
    fn quotes_exercise_payment_against_reference_units() {
        let contract = sample();
        // 1_000 options with 6 decimals at 100 quote per 10^9 underlying
        assert_eq!(
            contract.exercise_amount_for_options(1_000_000_000),
            Some(100_000_000_000)
        );
        assert_eq!(contract.exercise_amount_for_options(u64::MAX), None);
    }
}
