use solana_program::program_error::ProgramError;
use thiserror::Error;

/// Raised while encoding a vote instruction on the client side.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("User key must be 32 bytes, got {len}")]
    InvalidUserKeyLength { len: usize },

    #[error("Vote value does not fit in a byte")]
    VoteValueOutOfRange,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SnsReputationError {
    #[error("This account is already initialized")]
    AlreadyInitialized,

    #[error("Data type mismatch")]
    DataTypeMismatch,

    #[error("Wrong account owner")]
    WrongOwner,

    #[error("Account is uninitialized")]
    Uninitialized,

    #[error("Already voted")]
    AlreadyVoted,

    #[error("No vote exists")]
    NoVoteExists,

    #[error("Invalid vote value")]
    InvalidVoteValue,

    #[error("Wrong system program")]
    WrongSystemProgram,

    #[error("State account does not match its derived address")]
    WrongStateAccount,

    #[error("A stake account is necessary to be allowed to vote")]
    MissingStakeAccount,

    #[error("Stake account is not owned by the stake program")]
    InvalidStakeAccount,

    #[error("You cannot vote for yourself")]
    CannotVoteForYourself,
}

impl From<SnsReputationError> for ProgramError {
    fn from(e: SnsReputationError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
