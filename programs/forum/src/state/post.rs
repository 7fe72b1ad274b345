use pinocchio::Address;

use crate::{constants::*, errors::ForumError};

use super::{read_array, read_u16, write_bytes};

// Stable reference to the `index`th record in `poster`'s post log
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PostId {
    pub poster: Address,
    pub index: u16,
}

impl PostId {
    pub const LEN: usize = PUBKEY_LEN + 2;

    pub fn decode(bytes: &[u8]) -> Result<Self, ForumError> {
        if bytes.len() < Self::LEN {
            return Err(ForumError::MalformedInstruction);
        }
        Ok(Self {
            poster: Address::new_from_array(read_array(bytes, 0)?),
            index: read_u16(bytes, PUBKEY_LEN)?,
        })
    }

    pub fn encode(&self, out: &mut [u8]) -> Result<(), ForumError> {
        write_bytes(out, 0, self.poster.as_array())?;
        write_bytes(out, PUBKEY_LEN, &self.index.to_le_bytes())
    }
}

// One entry of a user's post log.
//
// Bodies borrow from the buffer they were decoded from, either the
// instruction data or the account data itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PostRecord<'a> {
    Post { body: &'a [u8] },
    Reply { target: PostId, body: &'a [u8] },
    Like { target: PostId },
    Report { target: PostId, reason: &'a [u8] },
}

impl<'a> PostRecord<'a> {
    // Parse selector + payload. Undersized input and unknown selectors are
    // both hard rejections.
    pub fn decode(bytes: &'a [u8]) -> Result<Self, ForumError> {
        let (selector, payload) = bytes
            .split_first()
            .ok_or(ForumError::MalformedInstruction)?;

        let record = match *selector {
            POST_SELECTOR => {
                if payload.is_empty() {
                    return Err(ForumError::MalformedInstruction);
                }
                PostRecord::Post { body: payload }
            }
            REPLY_SELECTOR | REPORT_SELECTOR => {
                if payload.len() < PostId::LEN + 1 {
                    return Err(ForumError::MalformedInstruction);
                }
                let target = PostId::decode(payload)?;
                let body = &payload[PostId::LEN..];
                if *selector == REPLY_SELECTOR {
                    PostRecord::Reply { target, body }
                } else {
                    PostRecord::Report { target, reason: body }
                }
            }
            LIKE_SELECTOR => {
                if payload.len() != PostId::LEN {
                    return Err(ForumError::MalformedInstruction);
                }
                PostRecord::Like { target: PostId::decode(payload)? }
            }
            _ => return Err(ForumError::MalformedInstruction),
        };

        // The stored length prefix is a u16
        if u16::try_from(record.record_len()).is_err() {
            return Err(ForumError::MalformedInstruction);
        }
        Ok(record)
    }

    pub fn selector(&self) -> u8 {
        match self {
            PostRecord::Post { .. } => POST_SELECTOR,
            PostRecord::Reply { .. } => REPLY_SELECTOR,
            PostRecord::Like { .. } => LIKE_SELECTOR,
            PostRecord::Report { .. } => REPORT_SELECTOR,
        }
    }

    pub fn target(&self) -> Option<&PostId> {
        match self {
            PostRecord::Post { .. } => None,
            PostRecord::Reply { target, .. }
            | PostRecord::Like { target }
            | PostRecord::Report { target, .. } => Some(target),
        }
    }

    pub fn body(&self) -> Option<&'a [u8]> {
        match *self {
            PostRecord::Post { body } | PostRecord::Reply { body, .. } => Some(body),
            PostRecord::Report { reason, .. } => Some(reason),
            PostRecord::Like { .. } => None,
        }
    }

    // Offset of the body from the start of the selector byte
    pub fn body_offset(&self) -> usize {
        match self {
            PostRecord::Post { .. } => 1,
            _ => 1 + PostId::LEN,
        }
    }

    // Value of the length prefix: selector + fixed fields + body
    pub fn record_len(&self) -> usize {
        self.body_offset() + self.body().map_or(0, <[u8]>::len)
    }

    // Bytes taken in the post log, length prefix included
    pub fn stored_size(&self) -> usize {
        LENGTH_PREFIX_LEN + self.record_len()
    }

    // Write length prefix, selector, then the variant fields.
    // `out` must hold at least `stored_size()` bytes.
    pub fn encode(&self, out: &mut [u8]) -> Result<(), ForumError> {
        let len =
            u16::try_from(self.record_len()).map_err(|_| ForumError::MalformedInstruction)?;
        write_bytes(out, 0, &len.to_le_bytes())?;
        write_bytes(out, LENGTH_PREFIX_LEN, &[self.selector()])?;

        let fields = LENGTH_PREFIX_LEN + 1;
        if let Some(target) = self.target() {
            let end = fields + PostId::LEN;
            target.encode(out.get_mut(fields..end).ok_or(ForumError::AccountTooSmall)?)?;
        }
        if let Some(body) = self.body() {
            write_bytes(out, LENGTH_PREFIX_LEN + self.body_offset(), body)?;
        }
        Ok(())
    }
}
