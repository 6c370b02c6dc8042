//! Instrument economics: asset roles, strike normalization, and the display
//! grammar for symbols and names.
//!
//! Everything here is a pure function over an immutable descriptor. Display
//! functions that depend on "today" take the instant explicitly; the
//! convenience wrappers resolve it to `Utc::now()`.

use anchor_lang::prelude::*;
use std::result::Result;
use chrono::{DateTime, Datelike, Utc};

use crate::errors::ClientError;
use crate::STRIKE_PRICE_UNITS;

/// An SPL token, described just enough to build and render instruments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Mint address.
    pub mint: Pubkey,
    /// Ticker used in rendered symbols and names.
    pub symbol: String,
    /// Decimals of the mint.
    pub decimals: u8,
}

impl Token {
    pub fn new(mint: Pubkey, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            mint,
            symbol: symbol.into(),
            decimals,
        }
    }
}

/// A raw quantity of a specific token, in the token's smallest unit.
///
/// All quantity math in this crate is fixed-point integer math under the
/// token's decimal scale; nothing passes through floating point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenAmount {
    pub token: Token,
    pub amount: u64,
}

impl TokenAmount {
    pub fn new(token: Token, amount: u64) -> Self {
        Self { token, amount }
    }

    /// Exact decimal rendering in whole token units, trailing zeros
    /// stripped.
    pub fn to_exact(&self) -> String {
        format_ratio(
            self.amount as u128,
            10u128.pow(self.token.decimals as u32),
            self.token.decimals,
        )
    }
}

/// Strike price as an exact rational: `quote_amount` raw quote units per
/// `underlying_amount` raw underlying units. Held as a fraction so
/// normalization is reproducible bit-for-bit regardless of who computes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrikePrice {
    pub underlying: Token,
    pub quote: Token,
    pub underlying_amount: u64,
    pub quote_amount: u64,
}

impl StrikePrice {
    pub fn new(underlying: Token, quote: Token, underlying_amount: u64, quote_amount: u64) -> Self {
        Self {
            underlying,
            quote,
            underlying_amount,
            quote_amount,
        }
    }

    /// Quote raw units per [`STRIKE_PRICE_UNITS`] raw units of the
    /// underlying: the integer the program stores and the contract address
    /// is derived from. A strike that does not divide evenly is an error,
    /// never a truncation.
    pub fn normalized(&self) -> Result<u64, ClientError> {
        if self.underlying_amount == 0 || self.quote_amount == 0 {
            return Err(ClientError::DegenerateStrike);
        }
        let scaled = self.quote_amount as u128 * STRIKE_PRICE_UNITS as u128;
        let denominator = self.underlying_amount as u128;
        if scaled % denominator != 0 {
            return Err(ClientError::InexactStrike);
        }
        u64::try_from(scaled / denominator).map_err(|_| ClientError::AmountOverflow)
    }

    /// Decimal rendering of the amount of underlying one whole quote unit
    /// buys, truncated to the underlying's decimals, trailing zeros
    /// stripped. This is the strike figure embedded in symbols and names.
    pub fn rendered(&self) -> Result<String, ClientError> {
        if self.underlying_amount == 0 || self.quote_amount == 0 {
            return Err(ClientError::DegenerateStrike);
        }
        let numerator = self.underlying_amount as u128 * 10u128.pow(self.quote.decimals as u32);
        let denominator = self.quote_amount as u128 * 10u128.pow(self.underlying.decimals as u32);
        Ok(format_ratio(numerator, denominator, self.underlying.decimals))
    }
}

/// Collateral/exercise-payment pair for one contract, resolved once per
/// operation so every use site sees the same mapping.
#[derive(Clone, Copy, Debug)]
pub struct SettlementRoles<'a> {
    /// Asset deposited by writers.
    pub collateral: &'a Token,
    /// Asset paid by exercisers.
    pub exercise: &'a Token,
}

/// Economic parameters of one options contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instrument {
    pub strike: StrikePrice,
    /// Expiry, in seconds since the unix epoch.
    pub expiry_ts: i64,
    pub is_put: bool,
}

impl Instrument {
    pub fn new(strike: StrikePrice, expiry_ts: i64, is_put: bool) -> Self {
        Self {
            strike,
            expiry_ts,
            is_put,
        }
    }

    pub fn underlying(&self) -> &Token {
        &self.strike.underlying
    }

    pub fn quote(&self) -> &Token {
        &self.strike.quote
    }

    /// Resolves which asset collateralizes the contract and which pays for
    /// exercise. A put is the mirrored call, so the pair swaps.
    pub fn settlement_roles(&self) -> SettlementRoles<'_> {
        if self.is_put {
            SettlementRoles {
                collateral: self.quote(),
                exercise: self.underlying(),
            }
        } else {
            SettlementRoles {
                collateral: self.underlying(),
                exercise: self.quote(),
            }
        }
    }

    pub fn collateral_token(&self) -> &Token {
        self.settlement_roles().collateral
    }

    pub fn exercise_token(&self) -> &Token {
        self.settlement_roles().exercise
    }

    /// Normalized strike used for address derivation and on-chain state.
    pub fn raw_strike(&self) -> Result<u64, ClientError> {
        self.strike.normalized()
    }

    /// Decimals of the option and writer tokens: those of the collateral,
    /// which the program checks against both mints at creation.
    pub fn decimals(&self) -> u8 {
        self.collateral_token().decimals
    }

    fn expiry(&self) -> Result<DateTime<Utc>, ClientError> {
        DateTime::from_timestamp(self.expiry_ts, 0)
            .ok_or(ClientError::InvalidExpiry(self.expiry_ts))
    }

    /// Human-readable expiry: `Mon D` within `now`'s year, `Mon D, YYYY`
    /// otherwise. Rendered against the UTC calendar.
    pub fn formatted_expiry_at(&self, now: DateTime<Utc>) -> Result<String, ClientError> {
        let expiry = self.expiry()?;
        let rendered = if expiry.year() == now.year() {
            expiry.format("%b %-d").to_string()
        } else {
            expiry.format("%b %-d, %Y").to_string()
        };
        Ok(rendered)
    }

    /// Compact expiry for symbols: `{day}{MMM}{year}` with the day omitted
    /// on the 1st of the month and the year omitted within `now`'s year.
    pub fn formatted_expiry_short_at(&self, now: DateTime<Utc>) -> Result<String, ClientError> {
        let expiry = self.expiry()?;
        let month = expiry.format("%b").to_string().to_uppercase();
        let day = if expiry.day() == 1 {
            String::new()
        } else {
            expiry.day().to_string()
        };
        let year = if expiry.year() == now.year() {
            String::new()
        } else {
            expiry.year().to_string()
        };
        Ok(format!("{day}{month}{year}"))
    }

    /// Symbol grammar:
    /// `{short_expiry}-{risk}-{P|C}{rendered_strike}-{other}`, where the
    /// risk asset is the underlying for a call and the quote for a put.
    /// Consumers parse generated symbols, so this format is a contract.
    pub fn symbol_at(&self, now: DateTime<Utc>) -> Result<String, ClientError> {
        let (risk, other) = self.risk_pair();
        let marker = if self.is_put { 'P' } else { 'C' };
        Ok(format!(
            "{}-{}-{}{}-{}",
            self.formatted_expiry_short_at(now)?,
            risk.symbol,
            marker,
            self.strike.rendered()?,
            other.symbol
        ))
    }

    /// Name grammar: `{expiry} {risk} {rendered_strike} {CALL|PUT}`.
    pub fn name_at(&self, now: DateTime<Utc>) -> Result<String, ClientError> {
        let (risk, _) = self.risk_pair();
        let kind = if self.is_put { "PUT" } else { "CALL" };
        Ok(format!(
            "{} {} {} {}",
            self.formatted_expiry_at(now)?,
            risk.symbol,
            self.strike.rendered()?,
            kind
        ))
    }

    pub fn formatted_expiry(&self) -> Result<String, ClientError> {
        self.formatted_expiry_at(Utc::now())
    }

    pub fn formatted_expiry_short(&self) -> Result<String, ClientError> {
        self.formatted_expiry_short_at(Utc::now())
    }

    pub fn symbol(&self) -> Result<String, ClientError> {
        self.symbol_at(Utc::now())
    }

    pub fn name(&self) -> Result<String, ClientError> {
        self.name_at(Utc::now())
    }

    fn risk_pair(&self) -> (&Token, &Token) {
        if self.is_put {
            (self.quote(), self.underlying())
        } else {
            (self.underlying(), self.quote())
        }
    }
}

/// Renders `numerator / denominator` as a decimal string with at most
/// `max_places` fractional digits, truncating, trailing zeros stripped.
fn format_ratio(numerator: u128, denominator: u128, max_places: u8) -> String {
    let mut out = (numerator / denominator).to_string();
    let mut remainder = numerator % denominator;
    if remainder == 0 || max_places == 0 {
        return out;
    }
    let mut fraction = String::new();
    for _ in 0..max_places {
        remainder *= 10;
        fraction.push(char::from(b'0' + (remainder / denominator) as u8));
        remainder %= denominator;
        if remainder == 0 {
            break;
        }
    }
    while fraction.ends_with('0') {
        fraction.pop();
    }
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(&fraction);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn usdc() -> Token {
        Token::new(Pubkey::new_unique(), "USDC", 6)
    }

    fn sol() -> Token {
        Token::new(Pubkey::new_unique(), "SOL", 9)
    }

    /// 100 USDC per SOL: 10^9 raw SOL = 100 * 10^6 raw USDC.
    fn sol_call_100(expiry_ts: i64) -> Instrument {
        Instrument::new(
            StrikePrice::new(sol(), usdc(), 1_000_000_000, 100_000_000),
            expiry_ts,
            false,
        )
    }

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn normalizes_strike_to_reference_units() {
        let instrument = sol_call_100(1_800_000_000);
        assert_eq!(instrument.raw_strike().unwrap(), 100_000_000);

        // Same price expressed against one whole six-decimal unit.
        let strike = StrikePrice::new(
            Token::new(Pubkey::new_unique(), "AAA", 6),
            usdc(),
            1_000_000,
            100_000_000,
        );
        assert_eq!(strike.normalized().unwrap(), 100_000_000_000);
    }

    #[test]
    fn normalization_never_truncates() {
        let strike = StrikePrice::new(sol(), usdc(), 3, 1);
        assert!(matches!(
            strike.normalized(),
            Err(ClientError::InexactStrike)
        ));

        let degenerate = StrikePrice::new(sol(), usdc(), 0, 1);
        assert!(matches!(
            degenerate.normalized(),
            Err(ClientError::DegenerateStrike)
        ));
    }

    #[test]
    fn roles_are_symmetric_between_put_and_call() {
        let call = sol_call_100(1_800_000_000);
        let put = Instrument::new(call.strike.clone(), call.expiry_ts, true);

        assert_eq!(call.collateral_token(), put.exercise_token());
        assert_eq!(call.exercise_token(), put.collateral_token());
    }

    #[test]
    fn renders_strike_as_underlying_per_quote_unit() {
        // 100 USDC per SOL means one USDC buys 0.01 SOL.
        let instrument = sol_call_100(1_800_000_000);
        assert_eq!(instrument.strike.rendered().unwrap(), "0.01");
    }

    #[test]
    fn short_expiry_omits_day_one_and_current_year() {
        let now = at(2026, 8, 6);
        let first_of_jan = Instrument::new(
            StrikePrice::new(sol(), usdc(), 1_000_000_000, 100_000_000),
            at(2026, 1, 1).timestamp(),
            false,
        );
        assert_eq!(first_of_jan.formatted_expiry_short_at(now).unwrap(), "JAN");

        let next_year = Instrument::new(
            first_of_jan.strike.clone(),
            at(2027, 1, 15).timestamp(),
            false,
        );
        assert_eq!(
            next_year.formatted_expiry_short_at(now).unwrap(),
            "15JAN2027"
        );
    }

    #[test]
    fn long_expiry_appends_year_outside_current() {
        let now = at(2026, 8, 6);
        let instrument = sol_call_100(at(2026, 3, 14).timestamp());
        assert_eq!(instrument.formatted_expiry_at(now).unwrap(), "Mar 14");

        let later = Instrument::new(instrument.strike.clone(), at(2027, 3, 14).timestamp(), false);
        assert_eq!(later.formatted_expiry_at(now).unwrap(), "Mar 14, 2027");
    }

    #[test]
    fn symbol_follows_the_grammar() {
        let now = at(2026, 8, 6);
        let call = sol_call_100(at(2027, 1, 15).timestamp());
        assert_eq!(call.symbol_at(now).unwrap(), "15JAN2027-SOL-C0.01-USDC");

        let put = Instrument::new(call.strike.clone(), call.expiry_ts, true);
        assert_eq!(put.symbol_at(now).unwrap(), "15JAN2027-USDC-P0.01-SOL");
    }

    #[test]
    fn name_follows_the_grammar() {
        let now = at(2026, 8, 6);
        let call = sol_call_100(at(2027, 1, 15).timestamp());
        assert_eq!(call.name_at(now).unwrap(), "Jan 15, 2027 SOL 0.01 CALL");
    }

    #[test]
    fn token_amount_renders_exactly() {
        assert_eq!(TokenAmount::new(usdc(), 100_000_000).to_exact(), "100");
        assert_eq!(TokenAmount::new(usdc(), 1_500_000).to_exact(), "1.5");
        assert_eq!(TokenAmount::new(usdc(), 1).to_exact(), "0.000001");
    }
}
