//! Integer math mirroring the on-chain program's arithmetic.
//!
//! Rounding here must agree with the program bit-for-bit: the client quoting
//! a different payment or fee than the program charges is a protocol bug,
//! not an approximation.

use crate::errors::ClientError;
use crate::{EXERCISE_FEE_KBPS, STRIKE_PRICE_UNITS};

/// Protocol fee withheld from an exercise payment: 1bp, truncating division,
/// with the same u64 arithmetic the program applies.
pub fn exercise_fee(exercise_amount: u64) -> Result<u64, ClientError> {
    exercise_amount
        .checked_mul(EXERCISE_FEE_KBPS)
        .and_then(|f| f.checked_div(10_000 * 1_000))
        .ok_or(ClientError::AmountOverflow)
}

/// Exercise payment owed for `option_amount` options at `strike`, the
/// quote amount per [`STRIKE_PRICE_UNITS`] raw units of the underlying.
pub fn exercise_amount_for_options(option_amount: u64, strike: u64) -> Result<u64, ClientError> {
    option_amount
        .checked_mul(strike)
        .and_then(|v| v.checked_div(STRIKE_PRICE_UNITS))
        .ok_or(ClientError::AmountOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_is_one_basis_point_truncating() {
        assert_eq!(exercise_fee(1_000_000).unwrap(), 100);
        assert_eq!(exercise_fee(9_999).unwrap(), 0);
        assert_eq!(exercise_fee(10_000).unwrap(), 1);
        assert_eq!(exercise_fee(0).unwrap(), 0);
    }

    #[test]
    fn fee_overflows_like_the_program() {
        // The program multiplies before dividing; quantities that overflow
        // the multiply are rejected rather than rounded differently.
        assert!(matches!(
            exercise_fee(u64::MAX),
            Err(ClientError::AmountOverflow)
        ));
    }

    #[test]
    fn exercise_payment_scales_by_reference_units() {
        // 1_000 six-decimal options at 100 quote units per underlying unit
        // (strike normalized against 10^9): pay 100_000 quote units.
        assert_eq!(
            exercise_amount_for_options(1_000_000_000, 100_000_000_000).unwrap(),
            100_000_000_000
        );
        assert_eq!(exercise_amount_for_options(1, 500_000_000).unwrap(), 0);
    }
}
