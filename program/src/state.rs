use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{entrypoint::ProgramResult, program_error::ProgramError, pubkey::Pubkey};

use crate::error::SnsReputationError;

/// Stored as a little-endian `u64` in the first 8 bytes of every state account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u64)]
pub enum Tag {
    Uninitialized = 0,
    ReputationScore = 1,
    UserVote = 2,
}

const TAG_LEN: usize = 8;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum VoteValue {
    NoVote = 0,
    Downvote = 1,
    Upvote = 2,
}

impl TryFrom<u8> for VoteValue {
    type Error = SnsReputationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(VoteValue::NoVote),
            1 => Ok(VoteValue::Downvote),
            2 => Ok(VoteValue::Upvote),
            _ => Err(SnsReputationError::InvalidVoteValue),
        }
    }
}

impl From<VoteValue> for u8 {
    fn from(value: VoteValue) -> Self {
        value as u8
    }
}

/// Program-owned account laid out as `tag (u64) | borsh(Self)`.
pub trait StateAccount: BorshSerialize + BorshDeserialize {
    const TAG: Tag;
    /// Account size including the tag.
    const LEN: usize;

    fn from_account_data(data: &[u8]) -> Result<Self, ProgramError> {
        check_tag(data, Self::TAG)?;
        Self::deserialize(&mut &data[TAG_LEN..]).map_err(|_| ProgramError::InvalidAccountData)
    }

    fn save(&self, dst: &mut [u8]) -> ProgramResult {
        if dst.len() < Self::LEN {
            return Err(ProgramError::AccountDataTooSmall);
        }
        dst[..TAG_LEN].copy_from_slice(&(Self::TAG as u64).to_le_bytes());
        self.serialize(&mut &mut dst[TAG_LEN..])
            .map_err(|e| ProgramError::BorshIoError(e.to_string()))
    }

    /// Like `save`, but only into a freshly allocated account.
    fn initialize(&self, dst: &mut [u8]) -> ProgramResult {
        if read_tag(dst)? != Tag::Uninitialized as u64 {
            return Err(SnsReputationError::AlreadyInitialized.into());
        }
        self.save(dst)
    }
}

fn read_tag(data: &[u8]) -> Result<u64, ProgramError> {
    let bytes: [u8; TAG_LEN] = data
        .get(..TAG_LEN)
        .and_then(|b| b.try_into().ok())
        .ok_or(ProgramError::InvalidAccountData)?;
    Ok(u64::from_le_bytes(bytes))
}

fn check_tag(data: &[u8], expected: Tag) -> ProgramResult {
    match read_tag(data)? {
        t if t == expected as u64 => Ok(()),
        t if t == Tag::Uninitialized as u64 => Err(SnsReputationError::Uninitialized.into()),
        _ => Err(SnsReputationError::DataTypeMismatch.into()),
    }
}

/// Aggregated votes on a user. PDA seed: `[user_key]`.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ReputationScore {
    pub nonce: u8,
    pub upvote: u64,
    pub downvote: u64,
}

impl StateAccount for ReputationScore {
    const TAG: Tag = Tag::ReputationScore;
    const LEN: usize = TAG_LEN + 1 + 8 + 8;
}

impl ReputationScore {
    pub fn new(nonce: u8) -> Self {
        Self {
            nonce,
            ..Self::default()
        }
    }

    pub fn score(&self) -> i64 {
        (self.upvote as i64).saturating_sub(self.downvote as i64)
    }

    /// Replaces a voter's `previous` vote with `next`.
    pub fn apply(&mut self, previous: VoteValue, next: VoteValue) -> ProgramResult {
        match previous {
            VoteValue::Upvote => self.upvote = decrement(self.upvote)?,
            VoteValue::Downvote => self.downvote = decrement(self.downvote)?,
            VoteValue::NoVote => {}
        }
        match next {
            VoteValue::Upvote => self.upvote = increment(self.upvote)?,
            VoteValue::Downvote => self.downvote = increment(self.downvote)?,
            VoteValue::NoVote => {}
        }
        Ok(())
    }
}

fn increment(n: u64) -> Result<u64, ProgramError> {
    n.checked_add(1).ok_or(ProgramError::ArithmeticOverflow)
}

fn decrement(n: u64) -> Result<u64, ProgramError> {
    n.checked_sub(1).ok_or(ProgramError::ArithmeticOverflow)
}

/// Current vote of `voter` on `votee`. PDA seeds: `[votee, voter]`.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserVote {
    pub value: VoteValue,
    pub votee: Pubkey,
    pub voter: Pubkey,
}

impl StateAccount for UserVote {
    const TAG: Tag = Tag::UserVote;
    const LEN: usize = TAG_LEN + 1 + 32 + 32;
}

/// Reputation score PDA of a user (seed: [user_key]).
pub fn find_reputation_score_key(program_id: &Pubkey, user_key: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[user_key.as_ref()], program_id)
}

/// Vote cast by `voter` on `user_key` (seed: [user_key, voter]).
pub fn find_user_vote_key(
    program_id: &Pubkey,
    user_key: &Pubkey,
    voter: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[user_key.as_ref(), voter.as_ref()], program_id)
}
