//! Checked big-endian field reads and width masking.
//!
//! Frames are written with `bytes::BufMut`; reads go through [Reader] so a short buffer
//! surfaces as [Error::NotEnoughData] rather than a panic.
use crate::{Error, Result};

/// Keep only the low `bits` bits of `value`.
///
/// Field setters use this to silently truncate values wider than their declared width.
#[must_use]
pub const fn mask(value: u32, bits: u32) -> u32 {
    if bits >= 32 {
        value
    } else {
        value & ((1 << bits) - 1)
    }
}

/// Reader reads big-endian fields from the front of a byte slice, keeping track of how
/// many bytes have been consumed.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    dat: &'a [u8],
    num_read: usize,
}

impl<'a> Reader<'a> {
    #[must_use]
    pub fn new(dat: &'a [u8]) -> Self {
        Reader { dat, num_read: 0 }
    }

    /// Take the next `num` bytes.
    ///
    /// # Errors
    /// [Error::NotEnoughData] if fewer than `num` bytes remain.
    pub fn take(&mut self, num: usize) -> Result<&'a [u8]> {
        if self.dat.len() < num {
            return Err(Error::NotEnoughData {
                actual: self.num_read + self.dat.len(),
                minimum: self.num_read + num,
            });
        }
        let (head, tail) = self.dat.split_at(num);
        self.dat = tail;
        self.num_read += num;
        Ok(head)
    }

    /// Take the next `N` bytes as an array.
    ///
    /// # Errors
    /// [Error::NotEnoughData] if fewer than `N` bytes remain.
    pub fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    /// # Errors
    /// [Error::NotEnoughData] if no bytes remain.
    pub fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// # Errors
    /// [Error::NotEnoughData] if fewer than 2 bytes remain.
    pub fn u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.array()?))
    }

    /// # Errors
    /// [Error::NotEnoughData] if fewer than 3 bytes remain.
    pub fn u24(&mut self) -> Result<u32> {
        let [a, b, c] = self.array()?;
        Ok(u32::from_be_bytes([0, a, b, c]))
    }

    /// # Errors
    /// [Error::NotEnoughData] if fewer than 4 bytes remain.
    pub fn u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.array()?))
    }

    /// Skip `num` bytes.
    ///
    /// # Errors
    /// [Error::NotEnoughData] if fewer than `num` bytes remain.
    pub fn skip(&mut self, num: usize) -> Result<()> {
        self.take(num).map(|_| ())
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.num_read
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.dat.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_truncates_to_width() {
        assert_eq!(mask(0x7f, 6), 0x3f);
        assert_eq!(mask(0x3f, 6), 0x3f);
        assert_eq!(mask(0xffff_ffff, 1), 1);
        assert_eq!(mask(0xffff_ffff, 32), 0xffff_ffff);
        assert_eq!(mask(0x1234, 0), 0);
    }

    #[test]
    fn reads_back_fields_written_with_buf_mut() {
        use bytes::BufMut;

        let mut dat = Vec::new();
        dat.put_u8(0x01);
        dat.put_u16(0x0203);
        dat.put_uint(0x04_0506, 3);
        dat.put_u32(0x0708_090a);
        dat.put_bytes(0, 2);
        assert_eq!(dat, [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0, 0]);

        let mut r = Reader::new(&dat);
        assert_eq!(r.u8().unwrap(), 0x01);
        assert_eq!(r.u16().unwrap(), 0x0203);
        assert_eq!(r.u24().unwrap(), 0x04_0506);
        assert_eq!(r.u32().unwrap(), 0x0708_090a);
        assert_eq!(r.array::<2>().unwrap(), [0, 0]);
    }

    #[test]
    fn reader_reads_fields() {
        let dat = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a];
        let mut r = Reader::new(&dat);
        assert_eq!(r.u8().unwrap(), 0x01);
        assert_eq!(r.u16().unwrap(), 0x0203);
        assert_eq!(r.u24().unwrap(), 0x04_0506);
        assert_eq!(r.offset(), 6);
        assert_eq!(r.u32().unwrap(), 0x0708_090a);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn reader_not_enough_data() {
        let dat = [0u8; 5];
        let mut r = Reader::new(&dat);
        r.skip(3).unwrap();
        let err = r.u32().unwrap_err();
        assert!(
            matches!(
                err,
                Error::NotEnoughData {
                    actual: 5,
                    minimum: 7
                }
            ),
            "got {err:?}"
        );
        // failed reads do not consume
        assert_eq!(r.offset(), 3);
        assert_eq!(r.u16().unwrap(), 0);
    }
}
