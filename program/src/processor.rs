use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program::invoke_signed,
    program_error::ProgramError,
    pubkey::Pubkey,
    stake, system_instruction, system_program,
    sysvar::{rent::Rent, Sysvar},
};

use crate::{
    error::SnsReputationError,
    instruction::SnsReputationInstruction,
    state::{
        find_reputation_score_key, find_user_vote_key, ReputationScore, StateAccount, UserVote,
        VoteValue,
    },
};

pub struct Processor;

impl Processor {
    pub fn process(program_id: &Pubkey, accounts: &[AccountInfo], input: &[u8]) -> ProgramResult {
        let ix = SnsReputationInstruction::unpack(input)?;

        match ix {
            SnsReputationInstruction::Vote {
                user_key,
                vote_value,
            } => {
                msg!("Instruction: Vote");
                Self::process_vote(
                    program_id,
                    accounts,
                    &Pubkey::new_from_array(user_key),
                    vote_value,
                )
            }
        }
    }

    fn process_vote(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        user_key: &Pubkey,
        vote_value: u8,
    ) -> ProgramResult {
        let acc_iter = &mut accounts.iter();
        let system_program_ai = next_account_info(acc_iter)?;
        let voter = next_account_info(acc_iter)?;
        let reputation_ai = next_account_info(acc_iter)?;
        let user_vote_ai = next_account_info(acc_iter)?;
        let stake_accounts = acc_iter.as_slice();

        if *system_program_ai.key != system_program::ID {
            return Err(SnsReputationError::WrongSystemProgram.into());
        }
        if !voter.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        let value = VoteValue::try_from(vote_value)?;
        if voter.key == user_key {
            return Err(SnsReputationError::CannotVoteForYourself.into());
        }

        let (reputation_key, reputation_nonce) = find_reputation_score_key(program_id, user_key);
        if *reputation_ai.key != reputation_key || !reputation_ai.is_writable {
            return Err(SnsReputationError::WrongStateAccount.into());
        }
        let (user_vote_key, user_vote_nonce) =
            find_user_vote_key(program_id, user_key, voter.key);
        if *user_vote_ai.key != user_vote_key || !user_vote_ai.is_writable {
            return Err(SnsReputationError::WrongStateAccount.into());
        }

        if stake_accounts.is_empty() {
            return Err(SnsReputationError::MissingStakeAccount.into());
        }
        if stake_accounts
            .iter()
            .any(|ai| *ai.owner != stake::program::ID)
        {
            return Err(SnsReputationError::InvalidStakeAccount.into());
        }

        let previous = if user_vote_ai.data_is_empty() {
            VoteValue::NoVote
        } else {
            check_owner(user_vote_ai, program_id)?;
            UserVote::from_account_data(&user_vote_ai.data.borrow())?.value
        };
        if previous == value {
            return Err(match value {
                VoteValue::NoVote => SnsReputationError::NoVoteExists,
                _ => SnsReputationError::AlreadyVoted,
            }
            .into());
        }

        let mut reputation = if reputation_ai.data_is_empty() {
            create_state_account(
                program_id,
                system_program_ai,
                voter,
                reputation_ai,
                ReputationScore::LEN,
                &[user_key.as_ref(), &[reputation_nonce]],
            )?;
            let reputation = ReputationScore::new(reputation_nonce);
            reputation.initialize(&mut reputation_ai.data.borrow_mut())?;
            reputation
        } else {
            check_owner(reputation_ai, program_id)?;
            ReputationScore::from_account_data(&reputation_ai.data.borrow())?
        };

        let new_user_vote = user_vote_ai.data_is_empty();
        if new_user_vote {
            create_state_account(
                program_id,
                system_program_ai,
                voter,
                user_vote_ai,
                UserVote::LEN,
                &[user_key.as_ref(), voter.key.as_ref(), &[user_vote_nonce]],
            )?;
        }

        reputation.apply(previous, value)?;
        reputation.save(&mut reputation_ai.data.borrow_mut())?;

        let user_vote = UserVote {
            value,
            votee: *user_key,
            voter: *voter.key,
        };
        if new_user_vote {
            user_vote.initialize(&mut user_vote_ai.data.borrow_mut())?;
        } else {
            user_vote.save(&mut user_vote_ai.data.borrow_mut())?;
        }

        msg!(
            "Vote recorded: user={} {:?} -> {:?} score={}",
            user_key,
            previous,
            value,
            reputation.score()
        );
        Ok(())
    }
}

fn check_owner(account: &AccountInfo, owner: &Pubkey) -> ProgramResult {
    if account.owner != owner {
        return Err(SnsReputationError::WrongOwner.into());
    }
    Ok(())
}

fn create_state_account<'a>(
    program_id: &Pubkey,
    system_program_ai: &AccountInfo<'a>,
    payer: &AccountInfo<'a>,
    account: &AccountInfo<'a>,
    space: usize,
    seeds: &[&[u8]],
) -> ProgramResult {
    let rent = Rent::get()?;
    let lamports = rent.minimum_balance(space);

    invoke_signed(
        &system_instruction::create_account(
            payer.key,
            account.key,
            lamports,
            space as u64,
            program_id,
        ),
        &[payer.clone(), account.clone(), system_program_ai.clone()],
        &[seeds],
    )
}
