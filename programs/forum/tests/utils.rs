// Common test utilities shared by the host-side forum tests
//
// MockAccount stands in for the runtime AccountView. Its data lives behind an
// Rc<RefCell<..>> so cloning a handle aliases the same buffer, which is how
// the runtime presents an account passed twice in one instruction.

#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use forum::{
    account::ForumAccount,
    constants::*,
    state::{PetitionHeader, PetitionSignature, PostId, UserHeader},
};
use pinocchio::{error::ProgramError, Address, ProgramResult};

// Account size used for most user accounts in the tests
pub const USER_ACCOUNT_LEN: usize = 200;

#[derive(Clone)]
pub struct MockAccount {
    pub key: Address,
    pub owner: Address,
    pub is_signer: bool,
    pub data: Rc<RefCell<Vec<u8>>>,
}

impl MockAccount {
    pub fn new(seed: u8, len: usize) -> Self {
        Self {
            key: key(seed),
            owner: forum::ID,
            is_signer: true,
            data: Rc::new(RefCell::new(vec![0; len])),
        }
    }

    // Same account, passed without a signature
    pub fn unsigned(&self) -> Self {
        Self { is_signer: false, ..self.clone() }
    }

    // Same key and data, owned by someone else
    pub fn foreign(&self) -> Self {
        Self { owner: key(0xEE), ..self.clone() }
    }

    pub fn snapshot(&self) -> Vec<u8> {
        self.data.borrow().clone()
    }

    pub fn user(&self) -> UserHeader {
        UserHeader::load(&self.data.borrow()).expect("user header")
    }

    pub fn petition(&self) -> PetitionHeader {
        PetitionHeader::load(&self.data.borrow()).expect("petition header")
    }

    pub fn signature(&self, slot: usize) -> PetitionSignature {
        PetitionSignature::load(&self.data.borrow(), slot).expect("signature slot")
    }

    pub fn set_reputation(&self, reputation: u64) {
        UserHeader::store_reputation(&mut self.data.borrow_mut(), reputation)
            .expect("reputation field");
    }
}

impl ForumAccount for MockAccount {
    fn key(&self) -> &Address {
        &self.key
    }

    fn is_signer(&self) -> bool {
        self.is_signer
    }

    fn owned_by(&self, program_id: &Address) -> bool {
        &self.owner == program_id
    }

    fn read<R>(&self, f: impl FnOnce(&[u8]) -> R) -> Result<R, ProgramError> {
        let data = self
            .data
            .try_borrow()
            .map_err(|_| ProgramError::AccountBorrowFailed)?;
        Ok(f(&data))
    }

    fn write<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> Result<R, ProgramError> {
        let mut data = self
            .data
            .try_borrow_mut()
            .map_err(|_| ProgramError::AccountBorrowFailed)?;
        Ok(f(&mut data))
    }
}

pub fn key(seed: u8) -> Address {
    Address::new_from_array([seed; 32])
}

pub fn petition_len(slots: usize) -> usize {
    PetitionHeader::LEN + slots * PetitionSignature::LEN
}

pub fn run(accounts: &[MockAccount], data: &[u8]) -> ProgramResult {
    forum::process(&forum::ID, accounts, data)
}

// ======================== INSTRUCTION BUILDERS ========================

pub fn post_ix(body: &[u8]) -> Vec<u8> {
    let mut data = vec![POST_SELECTOR];
    data.extend_from_slice(body);
    data
}

fn with_target(selector: u8, target: &PostId, body: &[u8]) -> Vec<u8> {
    let mut data = vec![selector];
    data.extend_from_slice(target.poster.as_array());
    data.extend_from_slice(&target.index.to_le_bytes());
    data.extend_from_slice(body);
    data
}

pub fn reply_ix(target: &PostId, body: &[u8]) -> Vec<u8> {
    with_target(REPLY_SELECTOR, target, body)
}

pub fn like_ix(target: &PostId) -> Vec<u8> {
    with_target(LIKE_SELECTOR, target, &[])
}

pub fn report_ix(target: &PostId, reason: &[u8]) -> Vec<u8> {
    with_target(REPORT_SELECTOR, target, reason)
}

pub fn create_petition_ix(target_index: u16) -> Vec<u8> {
    let mut data = vec![CREATE_PETITION_SELECTOR];
    data.extend_from_slice(&target_index.to_le_bytes());
    data
}

pub fn vote_ix(vote: bool) -> Vec<u8> {
    vec![VOTE_SELECTOR, vote as u8]
}

pub fn tally_ix() -> Vec<u8> {
    vec![TALLY_PETITION_SELECTOR]
}

// ======================== SCENARIO HELPERS ========================

// Initialized user account with `posts` posts (at least one) and the given reputation
pub fn funded_user(seed: u8, posts: usize, reputation: u64) -> MockAccount {
    let account = MockAccount::new(seed, USER_ACCOUNT_LEN);
    for n in 0..posts.max(1) {
        let body = format!("post number {}", n);
        run(&[account.clone()], &post_ix(body.as_bytes())).expect("seed post");
    }
    account.set_reputation(reputation);
    account
}

// Petition with `slots` signature slots against `offender`'s post `index`
pub fn open_petition(seed: u8, slots: usize, offender: &MockAccount, index: u16) -> MockAccount {
    let petition = MockAccount::new(seed, petition_len(slots));
    run(&[petition.clone(), offender.clone()], &create_petition_ix(index))
        .expect("create petition");
    petition
}

pub fn cast_vote(petition: &MockAccount, voter: &MockAccount, vote: bool) -> ProgramResult {
    run(&[petition.clone(), voter.clone()], &vote_ix(vote))
}

pub fn tally(
    petition: &MockAccount,
    offender: &MockAccount,
    voters: &[&MockAccount],
) -> ProgramResult {
    let mut accounts = vec![petition.clone(), offender.clone()];
    accounts.extend(voters.iter().map(|voter| (*voter).clone()));
    run(&accounts, &tally_ix())
}
