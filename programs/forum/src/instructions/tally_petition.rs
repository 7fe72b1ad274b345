use pinocchio::{error::ProgramError, Address, ProgramResult};
use pinocchio_log::log;

use crate::{
    account::{check_owner, ForumAccount},
    constants::MAX_PETITION_SIZE,
    errors::ForumError,
    state::{
        apply_offender_penalty, apply_outcome, redact, PetitionHeader, PetitionSignature,
        PetitionState, UserHeader,
    },
};

const EMPTY_SIGNATURE: PetitionSignature = PetitionSignature {
    signer: Address::new_from_array([0; 32]),
    vote: false,
};

// Accounts for closing a full petition.
//
// Voters must be passed in the order their signatures were recorded.
pub struct TallyPetitionAccounts<'a, A: ForumAccount> {
    pub petition: &'a A,
    pub offender: &'a A,
    pub voters: &'a [A],
}

impl<'a, A: ForumAccount> TryFrom<&'a [A]> for TallyPetitionAccounts<'a, A> {
    type Error = ProgramError;

    fn try_from(accounts: &'a [A]) -> Result<Self, Self::Error> {
        let [petition, offender, voters @ ..] = accounts else {
            return Err(ForumError::NotEnoughAccounts.into());
        };

        check_owner(petition)?;
        check_owner(offender)?;
        for voter in voters {
            check_owner(voter)?;
        }

        Ok(Self { petition, offender, voters })
    }
}

pub struct TallyPetitionInstruction<'a, A: ForumAccount> {
    pub accounts: TallyPetitionAccounts<'a, A>,
}

impl<'a, A: ForumAccount> TryFrom<(&'a [A], &'a [u8])> for TallyPetitionInstruction<'a, A> {
    type Error = ProgramError;

    fn try_from((accounts, data): (&'a [A], &'a [u8])) -> Result<Self, Self::Error> {
        if !data.is_empty() {
            return Err(ForumError::MalformedInstruction.into());
        }
        let accounts = TallyPetitionAccounts::try_from(accounts)?;

        Ok(Self { accounts })
    }
}

// Everything tally will write, decided before the first write happens
pub struct TallyPlan {
    pub header: PetitionHeader,
    pub signatures: [PetitionSignature; MAX_PETITION_SIZE],
}

impl TallyPlan {
    pub fn succeeded(&self) -> bool {
        self.header.net_tally > 0
    }

    pub fn signatures(&self) -> &[PetitionSignature] {
        &self.signatures[..self.header.signature_count as usize]
    }
}

impl<'a, A: ForumAccount> TallyPetitionInstruction<'a, A> {
    fn plan(&self) -> Result<TallyPlan, ProgramError> {
        // 1: Petition must be full and not yet completed
        let (mut header, signatures) = self.accounts.petition.read(|data| {
            match PetitionState::of(data)? {
                PetitionState::Full => {}
                PetitionState::Uninitialized => return Err(ForumError::UninitializedAccount),
                PetitionState::Open | PetitionState::Completed => {
                    return Err(ForumError::InvalidAccountState)
                }
            }

            let header = PetitionHeader::load(data)?;
            let count = header.signature_count as usize;
            if count > MAX_PETITION_SIZE {
                return Err(ForumError::InvalidArgument);
            }

            let mut signatures = [EMPTY_SIGNATURE; MAX_PETITION_SIZE];
            for (slot, signature) in signatures.iter_mut().enumerate().take(count) {
                *signature = PetitionSignature::load(data, slot)?;
            }
            Ok((header, signatures))
        })??;
        let signed = &signatures[..header.signature_count as usize];

        // 2: Offender must be the author named by the petition
        if self.accounts.offender.key() != &header.offending_post.poster {
            return Err(ForumError::InvalidArgument.into());
        }
        self.accounts.offender.read(UserHeader::load)??;

        // 3: One voter handle per signature, in recording order
        if self.accounts.voters.len() != signed.len() {
            return Err(ForumError::InvalidArgument.into());
        }
        for (voter, signature) in self.accounts.voters.iter().zip(signed) {
            if voter.key() != &signature.signer {
                return Err(ForumError::InvalidArgument.into());
            }
            voter.read(UserHeader::load)??;
        }

        // 4: Outcome. Ties fail.
        header.net_tally = signed
            .iter()
            .map(|signature| if signature.vote { 1 } else { -1 })
            .sum();
        header.completed = true;

        Ok(TallyPlan { header, signatures })
    }

    pub fn handler(&self) -> ProgramResult {
        let plan = self.plan()?;
        let requirement = plan.header.reputation_requirement;
        let succeeded = plan.succeeded();

        self.accounts.petition.write(|data| plan.header.store(data))??;

        if succeeded {
            let index = plan.header.offending_post.index;
            let net_tally = plan.header.net_tally;
            self.accounts.offender.write(|data| -> Result<(), ForumError> {
                redact(data, index);
                let offender = UserHeader::load(data)?;
                let reputation =
                    apply_offender_penalty(offender.reputation, requirement, net_tally);
                UserHeader::store_reputation(data, reputation)
            })??;
        }

        for (voter, signature) in self.accounts.voters.iter().zip(plan.signatures()) {
            let voted_with_outcome = signature.vote == succeeded;
            voter.write(|data| -> Result<(), ForumError> {
                let header = UserHeader::load(data)?;
                let reputation = apply_outcome(header.reputation, requirement, voted_with_outcome);
                UserHeader::store_reputation(data, reputation)
            })??;
        }

        log!("Petition tallied: net {}", plan.header.net_tally);
        if succeeded {
            log!("Petition succeeded against post {}", plan.header.offending_post.index);
        } else {
            log!("Petition failed");
        }
        Ok(())
    }
}
