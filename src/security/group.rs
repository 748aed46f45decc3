//! Count-prefixed repeated groups.
//!
//! A group is a single count byte followed by that many fixed size entries. A count of
//! zero means the group has no entries; the count byte itself is always present.
use bytes::BufMut;

use crate::bytes::Reader;
use crate::{Error, Result};

/// Most entries a group can hold; the count is a single byte.
pub const MAX_ENTRIES: usize = u8::MAX as usize;

/// A fixed size group entry.
pub trait Entry: Sized {
    /// Encoded entry length in bytes.
    const LEN: usize;

    fn encode<B: BufMut>(&self, buf: &mut B);

    /// # Errors
    /// [Error::NotEnoughData] if fewer than [Self::LEN] bytes remain.
    fn decode(r: &mut Reader) -> Result<Self>;
}

fn count<T>(entries: &[T]) -> Result<u8> {
    u8::try_from(entries.len()).map_err(|_| Error::TooManyEntries {
        actual: entries.len(),
        maximum: MAX_ENTRIES,
    })
}

/// Encoded length of a group holding `entries`, count byte included.
pub fn encoded_len<T: Entry>(entries: &[T]) -> Result<usize> {
    count(entries)?;
    Ok(1 + entries.len() * T::LEN)
}

pub fn write<T: Entry, B: BufMut>(buf: &mut B, entries: &[T]) -> Result<()> {
    buf.put_u8(count(entries)?);
    for entry in entries {
        entry.encode(buf);
    }
    Ok(())
}

pub fn read<T: Entry>(r: &mut Reader) -> Result<Vec<T>> {
    let num = r.u8()?;
    (0..num).map(|_| T::decode(r)).collect()
}
