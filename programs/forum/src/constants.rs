// Instruction selectors (first byte of instruction data)
pub const POST_SELECTOR: u8 = b'P';
pub const REPLY_SELECTOR: u8 = b'R';
pub const LIKE_SELECTOR: u8 = b'L';
pub const REPORT_SELECTOR: u8 = b'X';
pub const VOTE_SELECTOR: u8 = b'V';
pub const CREATE_PETITION_SELECTOR: u8 = b'C';
pub const TALLY_PETITION_SELECTOR: u8 = b'F';

// Account type tags. Zero is reserved for "uninitialized"
pub const UNINITIALIZED_TAG: u8 = 0;
pub const USER_TAG: u8 = 1;
pub const PETITION_TAG: u8 = 2;

pub const PUBKEY_LEN: usize = 32;
pub const USERNAME_LEN: usize = 32;

// Every stored post record starts with a u16 length prefix
pub const LENGTH_PREFIX_LEN: usize = 2;

// Upper bound on petition signers.
// Tally takes one account handle per signer plus the petition and the
// offender, and a transaction can only carry so many accounts.
pub const MAX_PETITION_SIZE: usize = 24;

// Byte written over a post body when a petition against it succeeds
pub const REDACTED_FILLER: u8 = b'*';
