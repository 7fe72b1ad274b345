#![no_std]

use pinocchio::{
    AccountView,
    Address,
    ProgramResult,
    error::ProgramError,
    address,
    no_allocator,
    nostd_panic_handler,
    program_entrypoint
};

pub mod account;
pub mod constants;
pub mod errors;
pub mod state;
pub mod instructions;

use account::ForumAccount;
use errors::ForumError;
use instructions::{
    CreatePetitionInstruction,
    CreatePostInstruction,
    Instruction,
    TallyPetitionInstruction,
    VotePetitionInstruction
};

address::declare_id!("B2yTNrJ5XNy6rCUmzrNuUeyAVDmPQMCQwzGCHm2BeVNh");

program_entrypoint!(process_instruction);
no_allocator!();
nostd_panic_handler!();

pub fn process_instruction(
    program_id: &Address,
    accounts: &[AccountView],
    instruction_data: &[u8],
) -> ProgramResult {
    process(program_id, accounts, instruction_data)
}

// Runtime-independent dispatch, shared by the entrypoint and host tests
pub fn process<A: ForumAccount>(
    program_id: &Address,
    accounts: &[A],
    instruction_data: &[u8],
) -> ProgramResult {

    // Verify correct program ID
    if program_id != &crate::ID {
        return Err(ProgramError::IncorrectProgramId);
    }

    // Split selector from instruction data
    let (selector, data) = instruction_data
        .split_first()
        .ok_or(ForumError::MalformedInstruction)?;

    // Route to appropriate instruction handler
    match Instruction::try_from(selector)? {
        // Post records keep their selector byte
        Instruction::Post | Instruction::Reply | Instruction::Like | Instruction::Report => {
            let ix = CreatePostInstruction::try_from((accounts, instruction_data))?;
            ix.handler()
        }
        Instruction::CreatePetition => {
            let ix = CreatePetitionInstruction::try_from((accounts, data))?;
            ix.handler()
        }
        Instruction::Vote => {
            let ix = VotePetitionInstruction::try_from((accounts, data))?;
            ix.handler()
        }
        Instruction::TallyPetition => {
            let ix = TallyPetitionInstruction::try_from((accounts, data))?;
            ix.handler()
        }
    }
}
