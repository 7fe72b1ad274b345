use crate::{constants::*, errors::ForumError};

use super::{read_array, read_u16, write_bytes};

// Leading tag shared by every account this program owns
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountType {
    Uninitialized = UNINITIALIZED_TAG,
    User = USER_TAG,
    Petition = PETITION_TAG,
}

impl AccountType {
    // Reads the tag byte of an account buffer
    pub fn of(bytes: &[u8]) -> Result<Self, ForumError> {
        let tag = bytes.first().ok_or(ForumError::AccountTooSmall)?;
        Self::try_from(tag)
    }
}

impl TryFrom<&u8> for AccountType {
    type Error = ForumError;

    fn try_from(value: &u8) -> Result<Self, Self::Error> {
        match *value {
            UNINITIALIZED_TAG => Ok(AccountType::Uninitialized),
            USER_TAG => Ok(AccountType::User),
            PETITION_TAG => Ok(AccountType::Petition),
            _ => Err(ForumError::InvalidAccountState),
        }
    }
}

// User account header, followed in the buffer by the post log.
//
// Layout: tag(1) post_count(2) username(32) reputation(8)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserHeader {
    pub post_count: u16,
    pub username: [u8; USERNAME_LEN],
    pub reputation: u64,
}

impl UserHeader {
    pub const LEN: usize = 1 + 2 + USERNAME_LEN + 8;

    const POST_COUNT_OFFSET: usize = 1;
    const USERNAME_OFFSET: usize = 3;
    const REPUTATION_OFFSET: usize = 3 + USERNAME_LEN;

    // Header written by the first post
    pub const fn empty() -> Self {
        Self {
            post_count: 0,
            username: [0; USERNAME_LEN],
            reputation: 0,
        }
    }

    // Decode the header of an initialized user account
    pub fn load(bytes: &[u8]) -> Result<Self, ForumError> {
        if bytes.len() < Self::LEN {
            return Err(ForumError::AccountTooSmall);
        }
        match AccountType::of(bytes)? {
            AccountType::User => {}
            AccountType::Uninitialized => return Err(ForumError::UninitializedAccount),
            AccountType::Petition => return Err(ForumError::InvalidAccountState),
        }

        Ok(Self {
            post_count: read_u16(bytes, Self::POST_COUNT_OFFSET)?,
            username: read_array(bytes, Self::USERNAME_OFFSET)?,
            reputation: u64::from_le_bytes(read_array(bytes, Self::REPUTATION_OFFSET)?),
        })
    }

    // Like `load`, but an uninitialized buffer yields an empty header.
    // Used by the post path, which initializes accounts lazily.
    pub fn load_or_empty(bytes: &[u8]) -> Result<Self, ForumError> {
        if bytes.len() < Self::LEN {
            return Err(ForumError::AccountTooSmall);
        }
        match AccountType::of(bytes)? {
            AccountType::Uninitialized => Ok(Self::empty()),
            _ => Self::load(bytes),
        }
    }

    // Write the full header, tag included
    pub fn store(&self, bytes: &mut [u8]) -> Result<(), ForumError> {
        if bytes.len() < Self::LEN {
            return Err(ForumError::AccountTooSmall);
        }
        bytes[0] = USER_TAG;
        write_bytes(bytes, Self::POST_COUNT_OFFSET, &self.post_count.to_le_bytes())?;
        write_bytes(bytes, Self::USERNAME_OFFSET, &self.username)?;
        write_bytes(bytes, Self::REPUTATION_OFFSET, &self.reputation.to_le_bytes())
    }

    // Rewrite only the reputation field of an initialized account
    pub fn store_reputation(bytes: &mut [u8], reputation: u64) -> Result<(), ForumError> {
        write_bytes(bytes, Self::REPUTATION_OFFSET, &reputation.to_le_bytes())
    }

    // Username up to the first null byte
    pub fn username(&self) -> &[u8] {
        let end = self
            .username
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(USERNAME_LEN);
        &self.username[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout_is_packed() {
        assert_eq!(UserHeader::LEN, 43);
    }

    #[test]
    fn load_rejects_wrong_tags() {
        let mut data = [0u8; 64];
        assert_eq!(UserHeader::load(&data), Err(ForumError::UninitializedAccount));

        data[0] = PETITION_TAG;
        assert_eq!(UserHeader::load(&data), Err(ForumError::InvalidAccountState));

        data[0] = 9;
        assert_eq!(UserHeader::load(&data), Err(ForumError::InvalidAccountState));

        assert_eq!(UserHeader::load(&data[..10]), Err(ForumError::AccountTooSmall));
    }

    #[test]
    fn store_then_load() {
        let mut data = [0u8; 64];
        let mut header = UserHeader::empty();
        header.post_count = 3;
        header.reputation = 77;
        header.username[..5].copy_from_slice(b"alice");
        header.store(&mut data).unwrap();

        assert_eq!(data[0], USER_TAG);
        assert_eq!(&data[1..3], &3u16.to_le_bytes());
        assert_eq!(&data[35..43], &77u64.to_le_bytes());

        let loaded = UserHeader::load(&data).unwrap();
        assert_eq!(loaded, header);
        assert_eq!(loaded.username(), b"alice");
    }

    #[test]
    fn username_without_terminator_uses_full_field() {
        let mut header = UserHeader::empty();
        header.username = [b'a'; USERNAME_LEN];
        assert_eq!(header.username().len(), USERNAME_LEN);
        assert_eq!(UserHeader::empty().username(), b"");
    }

    #[test]
    fn load_or_empty_initializes_blank_buffers() {
        let data = [0u8; 50];
        assert_eq!(UserHeader::load_or_empty(&data), Ok(UserHeader::empty()));
    }
}
