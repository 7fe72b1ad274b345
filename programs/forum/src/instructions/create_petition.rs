use pinocchio::{error::ProgramError, ProgramResult};
use pinocchio_log::log;

use crate::{
    account::{check_owner, check_signer, ForumAccount},
    constants::MAX_PETITION_SIZE,
    errors::ForumError,
    state::{
        signature_capacity, voting_requirement, PetitionHeader, PetitionState, PostId,
        UserHeader,
    },
};

// Accounts for opening a petition against one of the offender's posts
pub struct CreatePetitionAccounts<'a, A: ForumAccount> {
    // Fresh petition account, signs for its own creation
    pub petition: &'a A,
    // User account that authored the offending post
    pub offender: &'a A,
}

impl<'a, A: ForumAccount> TryFrom<&'a [A]> for CreatePetitionAccounts<'a, A> {
    type Error = ProgramError;

    fn try_from(accounts: &'a [A]) -> Result<Self, Self::Error> {
        let [petition, offender, ..] = accounts else {
            return Err(ForumError::NotEnoughAccounts.into());
        };

        check_signer(petition)?;
        check_owner(petition)?;
        check_owner(offender)?;

        Ok(Self { petition, offender })
    }
}

// Instruction data: target post index (u16 LE)
#[derive(Clone, Copy)]
pub struct CreatePetitionData {
    pub target_index: u16,
}

impl<'a> TryFrom<&'a [u8]> for CreatePetitionData {
    type Error = ProgramError;

    fn try_from(data: &'a [u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; 2] = data
            .try_into()
            .map_err(|_| ForumError::MalformedInstruction)?;
        Ok(Self { target_index: u16::from_le_bytes(bytes) })
    }
}

pub struct CreatePetitionInstruction<'a, A: ForumAccount> {
    pub accounts: CreatePetitionAccounts<'a, A>,
    pub data: CreatePetitionData,
}

impl<'a, A: ForumAccount> TryFrom<(&'a [A], &'a [u8])> for CreatePetitionInstruction<'a, A> {
    type Error = ProgramError;

    fn try_from((accounts, data): (&'a [A], &'a [u8])) -> Result<Self, Self::Error> {
        let accounts = CreatePetitionAccounts::try_from(accounts)?;
        let data = CreatePetitionData::try_from(data)?;

        Ok(Self { accounts, data })
    }
}

impl<'a, A: ForumAccount> CreatePetitionInstruction<'a, A> {
    pub fn handler(&self) -> ProgramResult {
        // 1: Petition buffer must be blank and sized within bounds
        let capacity = self.accounts.petition.read(|data| {
            if PetitionState::of(data)? != PetitionState::Uninitialized {
                return Err(ForumError::InvalidAccountState);
            }
            let capacity = signature_capacity(data.len());
            if capacity == 0 {
                return Err(ForumError::AccountTooSmall);
            }
            if capacity > MAX_PETITION_SIZE {
                return Err(ForumError::InvalidArgument);
            }
            Ok(capacity)
        })??;

        // 2: Offending post must exist
        let offender = self.accounts.offender.read(UserHeader::load)??;
        if self.data.target_index >= offender.post_count {
            return Err(ForumError::InvalidArgument.into());
        }

        // 3: Requirement is fixed here for the life of the petition
        let header = PetitionHeader {
            offending_post: PostId {
                poster: *self.accounts.offender.key(),
                index: self.data.target_index,
            },
            completed: false,
            net_tally: 0,
            reputation_requirement: voting_requirement(offender.reputation, capacity),
            signature_count: 0,
        };

        self.accounts.petition.write(|data| header.store(data))??;

        log!(
            "Petition opened: {} slots, requirement {}",
            capacity,
            header.reputation_requirement
        );
        Ok(())
    }
}
