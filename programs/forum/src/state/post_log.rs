use pinocchio_log::log;

use crate::{constants::*, errors::ForumError};

use super::{read_u16, PostRecord, UserHeader};

// The post log starts right after the user header and is a run of
// [len: u16][selector: u8][payload] records. A zero length marks the first
// unused byte.

// First unused offset in the post log, or `bytes.len()` if the log is full
pub fn scan_for_write_offset(bytes: &[u8]) -> usize {
    let post_count = read_u16(bytes, 1).unwrap_or(0);
    if post_count == 0 {
        return UserHeader::LEN;
    }

    let mut offset = UserHeader::LEN;
    while offset < bytes.len() {
        let len = match read_u16(bytes, offset) {
            Ok(len) => len,
            Err(_) => return bytes.len(),
        };
        if len == 0 {
            return offset;
        }
        offset += len as usize + LENGTH_PREFIX_LEN;
    }
    bytes.len()
}

// A validated append: where the record goes and the header it leaves behind
pub struct AppendPlan<'a> {
    pub offset: usize,
    pub record: PostRecord<'a>,
    pub header: UserHeader,
}

impl<'a> AppendPlan<'a> {
    // Check that `record` fits after the last stored record.
    // Nothing is written.
    pub fn new(bytes: &[u8], record: PostRecord<'a>) -> Result<Self, ForumError> {
        let mut header = UserHeader::load_or_empty(bytes)?;
        let offset = scan_for_write_offset(bytes);

        if offset + record.stored_size() > bytes.len() {
            return Err(ForumError::AccountTooSmall);
        }
        header.post_count = header
            .post_count
            .checked_add(1)
            .ok_or(ForumError::InvalidAccountState)?;

        Ok(Self { offset, record, header })
    }

    // Index the appended record will be referenced by
    pub fn index(&self) -> u16 {
        self.header.post_count - 1
    }

    pub fn apply(&self, bytes: &mut [u8]) -> Result<(), ForumError> {
        let end = self.offset + self.record.stored_size();
        let slot = bytes
            .get_mut(self.offset..end)
            .ok_or(ForumError::AccountTooSmall)?;
        self.record.encode(slot)?;
        self.header.store(bytes)
    }
}

// Append `record` and bump the post count, or leave `bytes` untouched
pub fn append(bytes: &mut [u8], record: PostRecord<'_>) -> Result<usize, ForumError> {
    let plan = AppendPlan::new(bytes, record)?;
    plan.apply(bytes)?;
    Ok(plan.offset)
}

// Offset of the length prefix of record `index`
pub fn locate_post(bytes: &[u8], index: u16) -> Result<usize, ForumError> {
    let header = UserHeader::load(bytes)?;
    if index >= header.post_count {
        return Err(ForumError::InvalidArgument);
    }

    let mut offset = UserHeader::LEN;
    for _ in 0..index {
        let len = read_u16(bytes, offset).map_err(|_| ForumError::InvalidArgument)?;
        if len == 0 {
            return Err(ForumError::InvalidArgument);
        }
        offset += len as usize + LENGTH_PREFIX_LEN;
    }
    if offset + LENGTH_PREFIX_LEN > bytes.len() {
        return Err(ForumError::InvalidArgument);
    }
    Ok(offset)
}

// Decode the stored record at `offset`
pub fn record_at(bytes: &[u8], offset: usize) -> Result<PostRecord<'_>, ForumError> {
    let len = read_u16(bytes, offset)? as usize;
    let start = offset + LENGTH_PREFIX_LEN;
    let stored = bytes
        .get(start..start + len)
        .ok_or(ForumError::AccountTooSmall)?;
    PostRecord::decode(stored)
}

// Overwrite the body of record `index` with the filler byte.
//
// Best effort: a record that cannot be located or decoded, or has no body,
// is left alone and `false` is returned.
pub fn redact(bytes: &mut [u8], index: u16) -> bool {
    let view: &[u8] = bytes;
    let body = locate_post(view, index).and_then(|offset| {
        let record = record_at(view, offset)?;
        let start = offset + LENGTH_PREFIX_LEN + record.body_offset();
        Ok(record.body().map(|body| (start, body.len())))
    });

    match body {
        Ok(Some((start, len))) => {
            bytes[start..start + len].fill(REDACTED_FILLER);
            true
        }
        Ok(None) => {
            log!("Warning: post {} has no body to redact", index);
            false
        }
        Err(_) => {
            log!("Warning: post {} could not be decoded for redaction", index);
            false
        }
    }
}

// Iterator over the records of an initialized user account
pub struct Posts<'a> {
    bytes: &'a [u8],
    offset: usize,
    remaining: u16,
}

pub fn posts(bytes: &[u8]) -> Result<Posts<'_>, ForumError> {
    let header = UserHeader::load(bytes)?;
    Ok(Posts {
        bytes,
        offset: UserHeader::LEN,
        remaining: header.post_count,
    })
}

impl<'a> Iterator for Posts<'a> {
    type Item = Result<PostRecord<'a>, ForumError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let item = record_at(self.bytes, self.offset);
        match &item {
            Ok(record) => self.offset += record.stored_size(),
            // Stop after the first corrupt record
            Err(_) => self.remaining = 0,
        }
        Some(item)
    }
}
