pub mod create_post;
pub mod create_petition;
pub mod vote_petition;
pub mod tally_petition;

pub use create_post::*;
pub use create_petition::*;
pub use vote_petition::*;
pub use tally_petition::*;

use crate::{constants::*, errors::ForumError};

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    Post = POST_SELECTOR,
    Reply = REPLY_SELECTOR,
    Like = LIKE_SELECTOR,
    Report = REPORT_SELECTOR,
    Vote = VOTE_SELECTOR,
    CreatePetition = CREATE_PETITION_SELECTOR,
    TallyPetition = TALLY_PETITION_SELECTOR,
}

impl TryFrom<&u8> for Instruction {
    type Error = ForumError;

    fn try_from(value: &u8) -> Result<Self, Self::Error> {
        match *value {
            POST_SELECTOR => Ok(Instruction::Post),
            REPLY_SELECTOR => Ok(Instruction::Reply),
            LIKE_SELECTOR => Ok(Instruction::Like),
            REPORT_SELECTOR => Ok(Instruction::Report),
            VOTE_SELECTOR => Ok(Instruction::Vote),
            CREATE_PETITION_SELECTOR => Ok(Instruction::CreatePetition),
            TALLY_PETITION_SELECTOR => Ok(Instruction::TallyPetition),
            _ => Err(ForumError::MalformedInstruction),
        }
    }
}
