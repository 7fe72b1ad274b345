use pinocchio::{error::ProgramError, ProgramResult};
use pinocchio_log::log;

use crate::{
    account::{check_owner, check_signer, ForumAccount},
    errors::ForumError,
    state::{PetitionHeader, PetitionSignature, PetitionState, UserHeader},
};

pub struct VotePetitionAccounts<'a, A: ForumAccount> {
    pub petition: &'a A,
    // Voter's user account, signs the vote
    pub voter: &'a A,
}

impl<'a, A: ForumAccount> TryFrom<&'a [A]> for VotePetitionAccounts<'a, A> {
    type Error = ProgramError;

    fn try_from(accounts: &'a [A]) -> Result<Self, Self::Error> {
        let [petition, voter, ..] = accounts else {
            return Err(ForumError::NotEnoughAccounts.into());
        };

        check_owner(petition)?;
        check_signer(voter)?;
        check_owner(voter)?;

        Ok(Self { petition, voter })
    }
}

// Instruction data: a single 0/1 byte, 1 supports the petition
#[derive(Clone, Copy)]
pub struct VotePetitionData {
    pub vote: bool,
}

impl<'a> TryFrom<&'a [u8]> for VotePetitionData {
    type Error = ProgramError;

    fn try_from(data: &'a [u8]) -> Result<Self, Self::Error> {
        match data {
            [0] => Ok(Self { vote: false }),
            [1] => Ok(Self { vote: true }),
            _ => Err(ForumError::MalformedInstruction.into()),
        }
    }
}

pub struct VotePetitionInstruction<'a, A: ForumAccount> {
    pub accounts: VotePetitionAccounts<'a, A>,
    pub data: VotePetitionData,
}

impl<'a, A: ForumAccount> TryFrom<(&'a [A], &'a [u8])> for VotePetitionInstruction<'a, A> {
    type Error = ProgramError;

    fn try_from((accounts, data): (&'a [A], &'a [u8])) -> Result<Self, Self::Error> {
        let accounts = VotePetitionAccounts::try_from(accounts)?;
        let data = VotePetitionData::try_from(data)?;

        Ok(Self { accounts, data })
    }
}

// Validated vote: the slot it lands in and the header after it
pub struct VotePlan {
    pub slot: usize,
    pub signature: PetitionSignature,
    pub header: PetitionHeader,
}

impl VotePlan {
    pub fn new(
        petition: &[u8],
        voter: &PetitionSignature,
        voter_reputation: u64,
    ) -> Result<Self, ForumError> {
        match PetitionState::of(petition)? {
            PetitionState::Open => {}
            PetitionState::Uninitialized => return Err(ForumError::UninitializedAccount),
            PetitionState::Full | PetitionState::Completed => {
                return Err(ForumError::InvalidAccountState)
            }
        }

        let mut header = PetitionHeader::load(petition)?;
        let slot = header.signature_count as usize;

        for stored in 0..slot {
            if PetitionSignature::load(petition, stored)?.signer == voter.signer {
                return Err(ForumError::InvalidAccountState);
            }
        }

        if voter_reputation < header.reputation_requirement as u64 {
            return Err(ForumError::InvalidAccountState);
        }

        header.signature_count += 1;
        Ok(Self { slot, signature: *voter, header })
    }

    pub fn apply(&self, petition: &mut [u8]) -> Result<(), ForumError> {
        self.signature.store(petition, self.slot)?;
        self.header.store(petition)
    }
}

impl<'a, A: ForumAccount> VotePetitionInstruction<'a, A> {
    pub fn handler(&self) -> ProgramResult {
        let voter = self.accounts.voter.read(UserHeader::load)??;
        let signature = PetitionSignature {
            signer: *self.accounts.voter.key(),
            vote: self.data.vote,
        };

        let plan = self
            .accounts
            .petition
            .read(|data| VotePlan::new(data, &signature, voter.reputation))??;

        self.accounts.petition.write(|data| plan.apply(data))??;

        log!(
            "Vote recorded in slot {} ({} signatures)",
            plan.slot,
            plan.header.signature_count
        );
        Ok(())
    }
}
