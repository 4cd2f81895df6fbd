use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
};

use crate::{
    error::EncodingError,
    state::{find_reputation_score_key, find_user_vote_key, VoteValue},
};

/// Encoded size of a `Vote`: tag, user key, vote value.
pub const VOTE_INSTRUCTION_LEN: usize = 1 + 32 + 1;

/// The borsh variant index is the wire tag, so variant order must not change.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum SnsReputationInstruction {
    /// Cast, change or undo a vote on a user.
    /// Accounts:
    /// 0. [] system_program
    /// 1. [writable, signer] voter
    /// 2. [writable] reputation score (PDA of user_key)
    /// 3. [writable] user vote (PDA of user_key, voter)
    /// 4.. [] voter stake accounts
    Vote {
        /// Key of the user being voted on.
        user_key: [u8; 32],
        /// Raw vote, see `VoteValue`.
        vote_value: u8,
    },
}

impl SnsReputationInstruction {
    pub fn pack(&self) -> Vec<u8> {
        match self {
            Self::Vote {
                user_key,
                vote_value,
            } => {
                let mut buf = Vec::with_capacity(VOTE_INSTRUCTION_LEN);
                buf.push(0);
                buf.extend_from_slice(user_key);
                buf.push(*vote_value);
                buf
            }
        }
    }

    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        Self::try_from_slice(input).map_err(|_| ProgramError::InvalidInstructionData)
    }
}

/// Encodes a vote as `0 | user_key | vote_value`.
///
/// Key length and value range are checked before packing.
pub fn encode<V: TryInto<u8>>(user_key: &[u8], vote_value: V) -> Result<Vec<u8>, EncodingError> {
    let user_key: [u8; 32] = user_key
        .try_into()
        .map_err(|_| EncodingError::InvalidUserKeyLength {
            len: user_key.len(),
        })?;
    let vote_value = vote_value
        .try_into()
        .map_err(|_| EncodingError::VoteValueOutOfRange)?;

    Ok(SnsReputationInstruction::Vote {
        user_key,
        vote_value,
    }
    .pack())
}

fn vote_accounts(
    system_program: &Pubkey,
    voter: &Pubkey,
    reputation_state_account: &Pubkey,
    user_vote_state_account: &Pubkey,
    voter_stake_accounts: &[Pubkey],
) -> Vec<AccountMeta> {
    let mut accounts = Vec::with_capacity(4 + voter_stake_accounts.len());
    accounts.push(AccountMeta::new_readonly(*system_program, false));
    accounts.push(AccountMeta::new(*voter, true));
    accounts.push(AccountMeta::new(*reputation_state_account, false));
    accounts.push(AccountMeta::new(*user_vote_state_account, false));
    accounts.extend(
        voter_stake_accounts
            .iter()
            .map(|k| AccountMeta::new_readonly(*k, false)),
    );
    accounts
}

/// Builds the `Vote` instruction with its positional account list.
#[allow(clippy::too_many_arguments)]
pub fn build_instruction<V: TryInto<u8>>(
    user_key: &[u8],
    vote_value: V,
    program_id: &Pubkey,
    system_program: &Pubkey,
    voter: &Pubkey,
    reputation_state_account: &Pubkey,
    user_vote_state_account: &Pubkey,
    voter_stake_accounts: &[Pubkey],
) -> Result<Instruction, EncodingError> {
    let data = encode(user_key, vote_value)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vote_accounts(
            system_program,
            voter,
            reputation_state_account,
            user_vote_state_account,
            voter_stake_accounts,
        ),
        data,
    })
}

/// Creates a `Vote` instruction, deriving both state accounts from `user_key` and `voter`.
pub fn vote(
    program_id: &Pubkey,
    voter: &Pubkey,
    user_key: &Pubkey,
    vote_value: VoteValue,
    voter_stake_accounts: &[Pubkey],
) -> Instruction {
    let (reputation_state_account, _) = find_reputation_score_key(program_id, user_key);
    let (user_vote_state_account, _) = find_user_vote_key(program_id, user_key, voter);

    let data = SnsReputationInstruction::Vote {
        user_key: user_key.to_bytes(),
        vote_value: vote_value.into(),
    }
    .pack();

    Instruction {
        program_id: *program_id,
        accounts: vote_accounts(
            &system_program::ID,
            voter,
            &reputation_state_account,
            &user_vote_state_account,
            voter_stake_accounts,
        ),
        data,
    }
}
