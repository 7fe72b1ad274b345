use pinocchio::{error::ProgramError, AccountView, Address};

use crate::errors::ForumError;

// The view of an account handle the forum core needs.
//
// On-chain this is the runtime's AccountView. Host tests plug in an
// in-memory account instead, so handlers never touch AccountView directly.
pub trait ForumAccount {
    fn key(&self) -> &Address;

    fn is_signer(&self) -> bool;

    fn owned_by(&self, program_id: &Address) -> bool;

    // Run `f` over an immutable borrow of the account data
    fn read<R>(&self, f: impl FnOnce(&[u8]) -> R) -> Result<R, ProgramError>;

    // Run `f` over a mutable borrow of the account data.
    // The borrow is released before this returns.
    fn write<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> Result<R, ProgramError>;
}

impl ForumAccount for AccountView {
    #[inline(always)]
    fn key(&self) -> &Address {
        self.address()
    }

    #[inline(always)]
    fn is_signer(&self) -> bool {
        AccountView::is_signer(self)
    }

    #[inline(always)]
    fn owned_by(&self, program_id: &Address) -> bool {
        AccountView::owned_by(self, program_id)
    }

    #[inline(always)]
    fn read<R>(&self, f: impl FnOnce(&[u8]) -> R) -> Result<R, ProgramError> {
        let data = self.try_borrow()?;
        Ok(f(&data))
    }

    #[inline(always)]
    fn write<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> Result<R, ProgramError> {
        let mut data = self.try_borrow_mut()?;
        Ok(f(&mut data))
    }
}

// Owner + signer gate shared by every handler
#[inline(always)]
pub fn check_owner<A: ForumAccount>(account: &A) -> Result<(), ProgramError> {
    if !account.owned_by(&crate::ID) {
        return Err(ForumError::IncorrectOwner.into());
    }
    Ok(())
}

#[inline(always)]
pub fn check_signer<A: ForumAccount>(account: &A) -> Result<(), ProgramError> {
    if !account.is_signer() {
        return Err(ForumError::MissingSignature.into());
    }
    Ok(())
}
