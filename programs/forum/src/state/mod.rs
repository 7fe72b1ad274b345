pub mod user;
pub mod post;
pub mod post_log;
pub mod petition;
pub mod reputation;

pub use user::*;
pub use post::*;
pub use post_log::*;
pub use petition::*;
pub use reputation::*;

use crate::errors::ForumError;

// Little-endian field access over raw account bytes.
// Out-of-range reads surface as AccountTooSmall, never as a panic.

#[inline(always)]
pub(crate) fn read_array<const N: usize>(
    bytes: &[u8],
    offset: usize,
) -> Result<[u8; N], ForumError> {
    bytes
        .get(offset..offset + N)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(ForumError::AccountTooSmall)
}

#[inline(always)]
pub(crate) fn read_u16(bytes: &[u8], offset: usize) -> Result<u16, ForumError> {
    read_array::<2>(bytes, offset).map(u16::from_le_bytes)
}

#[inline(always)]
pub(crate) fn write_bytes(
    bytes: &mut [u8],
    offset: usize,
    value: &[u8],
) -> Result<(), ForumError> {
    bytes
        .get_mut(offset..offset + value.len())
        .ok_or(ForumError::AccountTooSmall)?
        .copy_from_slice(value);
    Ok(())
}
