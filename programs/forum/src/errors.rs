use pinocchio::error::ProgramError;

// Errors surfaced by the forum program.
//
// Each variant maps 1:1 onto a builtin ProgramError so clients see the
// standard runtime codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForumError {
    // Fewer account handles than the instruction needs
    NotEnoughAccounts,

    // Account is not owned by this program
    IncorrectOwner,

    // Required signer did not sign
    MissingSignature,

    // Account tag is zero where an initialized account is required
    UninitializedAccount,

    // Buffer cannot hold the header or the record being appended
    AccountTooSmall,

    // Unknown selector, truncated payload or bad payload length
    MalformedInstruction,

    // Wrong phase, already completed, not full, duplicate vote,
    // insufficient reputation or wrong account type
    InvalidAccountState,

    // Account list or ordering does not match stored state
    InvalidArgument,
}

impl From<ForumError> for ProgramError {
    fn from(e: ForumError) -> Self {
        match e {
            ForumError::NotEnoughAccounts => ProgramError::NotEnoughAccountKeys,
            ForumError::IncorrectOwner => ProgramError::IncorrectProgramId,
            ForumError::MissingSignature => ProgramError::MissingRequiredSignature,
            ForumError::UninitializedAccount => ProgramError::UninitializedAccount,
            ForumError::AccountTooSmall => ProgramError::AccountDataTooSmall,
            ForumError::MalformedInstruction => ProgramError::InvalidInstructionData,
            ForumError::InvalidAccountState => ProgramError::InvalidAccountData,
            ForumError::InvalidArgument => ProgramError::InvalidArgument,
        }
    }
}
