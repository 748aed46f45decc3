//! Arbitrary bit width field packing.
//!
//! Fields are packed most-significant-bit first, each one starting immediately after the
//! previous one, with no alignment.
use bitvec::prelude::*;

use crate::bytes::mask;

/// Packs fields of arbitrary width into a fixed size, zero initialized, buffer.
#[derive(Debug, Clone)]
pub struct BitWriter<const N: usize> {
    bits: BitArray<[u8; N], Msb0>,
    pos: usize,
}

impl<const N: usize> Default for BitWriter<N> {
    fn default() -> Self {
        BitWriter {
            bits: BitArray::ZERO,
            pos: 0,
        }
    }
}

impl<const N: usize> BitWriter<N> {
    /// Write the low `width` bits of `value`. Wider values are masked to `width`.
    ///
    /// # Panics
    /// If `width` is greater than 32 or the field does not fit in the remaining bits.
    pub fn write(&mut self, value: u32, width: u32) -> &mut Self {
        assert!(width <= 32, "field width {width} exceeds 32 bits");
        let end = self.pos + width as usize;
        assert!(end <= N * 8, "field overruns {N} byte buffer");
        if width > 0 {
            self.bits[self.pos..end].store_be(mask(value, width));
        }
        self.pos = end;
        self
    }

    /// Number of bits written.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Packed bytes. Any bits after the last field are zero.
    #[must_use]
    pub fn into_bytes(self) -> [u8; N] {
        self.bits.into_inner()
    }
}

/// Extracts fields of arbitrary width from a byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    pos: usize,
}

impl<'a> BitReader<'a> {
    #[must_use]
    pub fn new(dat: &'a [u8]) -> Self {
        BitReader {
            bits: dat.view_bits::<Msb0>(),
            pos: 0,
        }
    }

    /// Read the next `width` bits as an unsigned value, or `None` if there are not
    /// enough bits left.
    ///
    /// # Panics
    /// If `width` is greater than 32.
    pub fn read(&mut self, width: u32) -> Option<u32> {
        assert!(width <= 32, "field width {width} exceeds 32 bits");
        let end = self.pos + width as usize;
        if end > self.bits.len() {
            return None;
        }
        let value = if width == 0 {
            0
        } else {
            self.bits[self.pos..end].load_be::<u32>()
        };
        self.pos = end;
        Some(value)
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_msb_first_across_bytes() {
        let mut w = BitWriter::<3>::default();
        w.write(0b1, 1).write(0b010, 3).write(0xabc, 12).write(0b11, 2);
        assert_eq!(w.position(), 18);
        // 1 010 1010_1011_1100 11 + 000000 padding
        assert_eq!(w.into_bytes(), [0b1010_1010, 0b1011_1100, 0b1100_0000]);
    }

    #[test]
    fn write_masks_values() {
        let mut a = BitWriter::<1>::default();
        a.write(0x7f, 6);
        let mut b = BitWriter::<1>::default();
        b.write(0x3f, 6);
        assert_eq!(a.into_bytes(), b.into_bytes());
    }

    #[test]
    fn full_width_fields() {
        let mut w = BitWriter::<5>::default();
        w.write(0, 4).write(0xdead_beef, 32);
        let bytes = w.into_bytes();
        assert_eq!(bytes, [0x0d, 0xea, 0xdb, 0xee, 0xf0]);

        let mut r = BitReader::new(&bytes);
        assert_eq!(r.read(4), Some(0));
        assert_eq!(r.read(32), Some(0xdead_beef));
        assert_eq!(r.read(4), Some(0));
        assert_eq!(r.read(1), None);
    }

    #[test]
    fn reader_reads_what_writer_wrote() {
        let widths = [6, 13, 4, 14, 5, 17, 11, 22, 24, 1];
        let mut w = BitWriter::<16>::default();
        for (i, width) in widths.iter().enumerate() {
            w.write(i as u32 + 1, *width);
        }
        let bytes = w.into_bytes();
        let mut r = BitReader::new(&bytes);
        for (i, width) in widths.iter().enumerate() {
            assert_eq!(r.read(*width), Some(mask(i as u32 + 1, *width)));
        }
        assert_eq!(r.position(), widths.iter().sum::<u32>() as usize);
    }

    #[test]
    #[should_panic(expected = "overruns")]
    fn writer_overrun_panics() {
        let mut w = BitWriter::<1>::default();
        w.write(0, 6).write(0, 3);
    }
}
