//! Positional instruction encoders for the options program ABI.
//!
//! Each builder fills the program's fixed account list in the exact
//! documented order and role. Reordering or omitting an account is a
//! protocol-incompatibility bug the chain surfaces only as an opaque
//! rejection, so the lists here are the ground truth for this client.

pub mod burn;
pub mod exercise;
pub mod new_contract;
pub mod redeem;
pub mod write;

pub use burn::{option_burn, OptionBurnAccounts};
pub use exercise::{option_exercise, OptionExerciseAccounts};
pub use new_contract::{new_contract, NewContractAccounts};
pub use redeem::{option_redeem, OptionRedeemAccounts};
pub use write::{option_write, OptionWriteAccounts};

use solana_program::hash::hash;
use anchor_lang::AnchorSerialize;

use crate::errors::ClientError;

/// 8-byte instruction discriminator: `sha256("global:{name}")[..8]`.
pub(crate) fn sighash(name: &str) -> [u8; 8] {
    let preimage = format!("global:{name}");
    let mut out = [0u8; 8];
    out.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    out
}

/// Instruction data: discriminator followed by the borsh-encoded arguments.
pub(crate) fn encode<T: AnchorSerialize>(name: &str, args: &T) -> Result<Vec<u8>, ClientError> {
    let mut data = sighash(name).to_vec();
    args.serialize(&mut data)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use anchor_lang::prelude::*;

    use super::*;

    #[test]
    fn discriminators_are_stable() {
        assert_eq!(sighash("new_contract"), [10, 212, 44, 34, 99, 127, 195, 143]);
        assert_eq!(sighash("option_write"), [189, 35, 220, 24, 224, 95, 114, 27]);
        assert_eq!(
            sighash("option_exercise"),
            [43, 86, 237, 78, 235, 74, 131, 206]
        );
        assert_eq!(
            sighash("option_redeem"),
            [20, 12, 170, 148, 17, 129, 88, 90]
        );
        assert_eq!(
            sighash("option_burn"),
            [252, 49, 147, 252, 235, 81, 166, 51]
        );
    }

    #[test]
    fn encodes_amount_after_discriminator() {
        #[derive(AnchorSerialize)]
        struct Args {
            amount: u64,
        }

        let data = encode("option_write", &Args { amount: 7 }).unwrap();
        assert_eq!(&data[..8], &sighash("option_write"));
        assert_eq!(&data[8..], &7u64.to_le_bytes());
    }
}
