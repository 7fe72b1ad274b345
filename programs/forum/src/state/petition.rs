use pinocchio::Address;

use crate::{constants::*, errors::ForumError};

use super::{read_array, read_u16, write_bytes, AccountType, PostId};

// Petition account header, followed by `capacity` signature slots.
//
// Layout: tag(1) offending_post(34) completed(1) net_tally(8)
//         reputation_requirement(4) signature_count(2)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PetitionHeader {
    pub offending_post: PostId,
    pub completed: bool,
    pub net_tally: i64,
    pub reputation_requirement: u32,
    pub signature_count: u16,
}

impl PetitionHeader {
    pub const LEN: usize = 1 + PostId::LEN + 1 + 8 + 4 + 2;

    const OFFENDING_POST_OFFSET: usize = 1;
    const COMPLETED_OFFSET: usize = 1 + PostId::LEN;
    const NET_TALLY_OFFSET: usize = Self::COMPLETED_OFFSET + 1;
    const REQUIREMENT_OFFSET: usize = Self::NET_TALLY_OFFSET + 8;
    const SIGNATURE_COUNT_OFFSET: usize = Self::REQUIREMENT_OFFSET + 4;

    pub fn load(bytes: &[u8]) -> Result<Self, ForumError> {
        if bytes.len() < Self::LEN {
            return Err(ForumError::AccountTooSmall);
        }
        match AccountType::of(bytes)? {
            AccountType::Petition => {}
            AccountType::Uninitialized => return Err(ForumError::UninitializedAccount),
            AccountType::User => return Err(ForumError::InvalidAccountState),
        }

        let offending_post = PostId::decode(
            bytes
                .get(Self::OFFENDING_POST_OFFSET..Self::COMPLETED_OFFSET)
                .ok_or(ForumError::AccountTooSmall)?,
        )
        .map_err(|_| ForumError::AccountTooSmall)?;

        Ok(Self {
            offending_post,
            completed: bytes[Self::COMPLETED_OFFSET] != 0,
            net_tally: i64::from_le_bytes(read_array(bytes, Self::NET_TALLY_OFFSET)?),
            reputation_requirement: u32::from_le_bytes(read_array(
                bytes,
                Self::REQUIREMENT_OFFSET,
            )?),
            signature_count: read_u16(bytes, Self::SIGNATURE_COUNT_OFFSET)?,
        })
    }

    pub fn store(&self, bytes: &mut [u8]) -> Result<(), ForumError> {
        if bytes.len() < Self::LEN {
            return Err(ForumError::AccountTooSmall);
        }
        bytes[0] = PETITION_TAG;
        self.offending_post.encode(
            &mut bytes[Self::OFFENDING_POST_OFFSET..Self::COMPLETED_OFFSET],
        )?;
        bytes[Self::COMPLETED_OFFSET] = self.completed as u8;
        write_bytes(bytes, Self::NET_TALLY_OFFSET, &self.net_tally.to_le_bytes())?;
        write_bytes(
            bytes,
            Self::REQUIREMENT_OFFSET,
            &self.reputation_requirement.to_le_bytes(),
        )?;
        write_bytes(
            bytes,
            Self::SIGNATURE_COUNT_OFFSET,
            &self.signature_count.to_le_bytes(),
        )
    }
}

// One signer's vote. `true` supports the petition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PetitionSignature {
    pub signer: Address,
    pub vote: bool,
}

impl PetitionSignature {
    pub const LEN: usize = PUBKEY_LEN + 1;

    fn offset(slot: usize) -> usize {
        PetitionHeader::LEN + slot * Self::LEN
    }

    pub fn load(bytes: &[u8], slot: usize) -> Result<Self, ForumError> {
        let offset = Self::offset(slot);
        let signer = Address::new_from_array(read_array(bytes, offset)?);
        let vote = *bytes
            .get(offset + PUBKEY_LEN)
            .ok_or(ForumError::AccountTooSmall)?;
        Ok(Self { signer, vote: vote != 0 })
    }

    pub fn store(&self, bytes: &mut [u8], slot: usize) -> Result<(), ForumError> {
        let offset = Self::offset(slot);
        write_bytes(bytes, offset, self.signer.as_array())?;
        write_bytes(bytes, offset + PUBKEY_LEN, &[self.vote as u8])
    }
}

// Number of signature slots a petition buffer of `len` bytes holds
pub fn signature_capacity(len: usize) -> usize {
    len.saturating_sub(PetitionHeader::LEN) / PetitionSignature::LEN
}

// Phase of a petition account
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PetitionState {
    Uninitialized,
    Open,
    Full,
    Completed,
}

impl PetitionState {
    pub fn of(bytes: &[u8]) -> Result<Self, ForumError> {
        if AccountType::of(bytes)? == AccountType::Uninitialized {
            return Ok(PetitionState::Uninitialized);
        }
        let header = PetitionHeader::load(bytes)?;
        Ok(if header.completed {
            PetitionState::Completed
        } else if (header.signature_count as usize) < signature_capacity(bytes.len()) {
            PetitionState::Open
        } else {
            PetitionState::Full
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> PetitionHeader {
        PetitionHeader {
            offending_post: PostId {
                poster: Address::new_from_array([9; 32]),
                index: 4,
            },
            completed: false,
            net_tally: -3,
            reputation_requirement: 26,
            signature_count: 1,
        }
    }

    #[test]
    fn layout_sizes() {
        assert_eq!(PetitionHeader::LEN, 50);
        assert_eq!(PetitionSignature::LEN, 33);
        assert_eq!(signature_capacity(50), 0);
        assert_eq!(signature_capacity(83), 1);
        assert_eq!(signature_capacity(50 + 33 * 4 + 32), 4);
        assert_eq!(signature_capacity(10), 0);
    }

    #[test]
    fn header_field_offsets() {
        let mut data = [0u8; 83];
        header().store(&mut data).unwrap();

        assert_eq!(data[0], PETITION_TAG);
        assert_eq!(&data[1..33], &[9; 32]);
        assert_eq!(&data[33..35], &4u16.to_le_bytes());
        assert_eq!(data[35], 0);
        assert_eq!(&data[36..44], &(-3i64).to_le_bytes());
        assert_eq!(&data[44..48], &26u32.to_le_bytes());
        assert_eq!(&data[48..50], &1u16.to_le_bytes());

        assert_eq!(PetitionHeader::load(&data), Ok(header()));
    }

    #[test]
    fn signatures_live_after_header() {
        let mut data = [0u8; 50 + 33 * 2];
        let signature = PetitionSignature {
            signer: Address::new_from_array([5; 32]),
            vote: true,
        };
        signature.store(&mut data, 1).unwrap();
        assert_eq!(&data[83..115], &[5; 32]);
        assert_eq!(data[115], 1);
        assert_eq!(PetitionSignature::load(&data, 1), Ok(signature));
        assert_eq!(
            PetitionSignature::load(&data, 2),
            Err(ForumError::AccountTooSmall)
        );
    }

    #[test]
    fn state_follows_count_and_completion() {
        let mut data = [0u8; 50 + 33 * 2];
        assert_eq!(PetitionState::of(&data), Ok(PetitionState::Uninitialized));

        let mut petition = header();
        petition.signature_count = 1;
        petition.store(&mut data).unwrap();
        assert_eq!(PetitionState::of(&data), Ok(PetitionState::Open));

        petition.signature_count = 2;
        petition.store(&mut data).unwrap();
        assert_eq!(PetitionState::of(&data), Ok(PetitionState::Full));

        petition.completed = true;
        petition.store(&mut data).unwrap();
        assert_eq!(PetitionState::of(&data), Ok(PetitionState::Completed));
    }

    #[test]
    fn load_rejects_user_accounts() {
        let mut data = [0u8; 83];
        data[0] = USER_TAG;
        assert_eq!(PetitionHeader::load(&data), Err(ForumError::InvalidAccountState));
        assert_eq!(PetitionState::of(&data), Err(ForumError::InvalidAccountState));
    }
}
