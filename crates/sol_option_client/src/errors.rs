use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::program_error::ProgramError;
use thiserror::Error;

/// Failure raised by the external transport, carried through unchanged.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced while deriving addresses, reading contract state, or
/// assembling transactions. Recovery policy (retries, backoff) belongs to
/// the caller; nothing here is retried.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no options contract found at {0}")]
    ContractNotFound(Pubkey),

    #[error("no bump seed yields an off-curve program address")]
    BumpSeedNotFound,

    #[error("strike is not a whole number of quote tokens per 10^9 units of the underlying")]
    InexactStrike,

    #[error("strike price must have nonzero terms")]
    DegenerateStrike,

    #[error("arithmetic overflow in amount computation")]
    AmountOverflow,

    #[error("expiry timestamp {0} is out of range")]
    InvalidExpiry(i64),

    #[error("failed to decode options contract account: {0}")]
    AccountDecode(String),

    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("failed to encode instruction data: {0}")]
    Serialize(#[from] std::io::Error),

    #[error("invalid instruction construction: {0}")]
    Program(#[from] ProgramError),
}
