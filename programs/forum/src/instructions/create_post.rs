use pinocchio::{error::ProgramError, ProgramResult};
use pinocchio_log::log;

use crate::{
    account::{check_owner, check_signer, ForumAccount},
    errors::ForumError,
    state::{AppendPlan, PostRecord},
};

// Accounts for post, reply, like and report.
//
// The author's own user account signs and receives the record.
pub struct CreatePostAccounts<'a, A: ForumAccount> {
    pub author: &'a A,
}

impl<'a, A: ForumAccount> TryFrom<&'a [A]> for CreatePostAccounts<'a, A> {
    type Error = ProgramError;

    fn try_from(accounts: &'a [A]) -> Result<Self, Self::Error> {
        let [author, ..] = accounts else {
            return Err(ForumError::NotEnoughAccounts.into());
        };

        check_signer(author)?;
        check_owner(author)?;

        Ok(Self { author })
    }
}

pub struct CreatePostInstruction<'a, A: ForumAccount> {
    pub accounts: CreatePostAccounts<'a, A>,
    pub record: PostRecord<'a>,
}

impl<'a, A: ForumAccount> TryFrom<(&'a [A], &'a [u8])> for CreatePostInstruction<'a, A> {
    type Error = ProgramError;

    // `data` is the whole instruction, selector included
    fn try_from((accounts, data): (&'a [A], &'a [u8])) -> Result<Self, Self::Error> {
        let accounts = CreatePostAccounts::try_from(accounts)?;
        let record = PostRecord::decode(data)?;

        Ok(Self { accounts, record })
    }
}

impl<'a, A: ForumAccount> CreatePostInstruction<'a, A> {
    pub fn handler(&self) -> ProgramResult {
        let plan = self
            .accounts
            .author
            .read(|data| AppendPlan::new(data, self.record))??;

        self.accounts.author.write(|data| plan.apply(data))??;

        log!(
            "Stored post {} at offset {} ({} bytes)",
            plan.index(),
            plan.offset,
            self.record.stored_size()
        );
        Ok(())
    }
}
