//! CRC-24Q frame integrity.
//!
//! CRC-24Q (polynomial 0x1864CFB, initial value 0, no reflection, no final xor) is
//! the checksum used by RTCM3 and by every CRC-protected frame in this crate. It is
//! catalogued by the `crc` crate as CRC-24/LTE-A.
use crc::{Crc, CRC_24_LTE_A};

use crate::{Error, Result};

/// Number of bytes of the big-endian CRC trailer.
pub const CRC_LEN: usize = 3;

const CRC24Q: Crc<u32> = Crc::<u32>::new(&CRC_24_LTE_A);

/// Compute the CRC-24Q of `dat`. Only the low 24 bits of the result are significant.
#[must_use]
pub fn crc24q(dat: &[u8]) -> u32 {
    CRC24Q.checksum(dat)
}

/// Append the 3-byte big-endian CRC-24Q of the current contents of `buf` to `buf`.
pub fn append(buf: &mut Vec<u8>) {
    let crc = crc24q(buf).to_be_bytes();
    buf.extend_from_slice(&crc[1..]);
}

/// Verify the trailing 3-byte CRC of `frame` against the bytes preceding it.
///
/// # Errors
/// [Error::NotEnoughData] if there are no bytes for a trailer, or [Error::Integrity] if the
/// trailer does not match.
pub fn verify(frame: &[u8]) -> Result<()> {
    if frame.len() < CRC_LEN {
        return Err(Error::NotEnoughData {
            actual: frame.len(),
            minimum: CRC_LEN,
        });
    }
    let (dat, trailer) = frame.split_at(frame.len() - CRC_LEN);
    let expected = u32::from_be_bytes([0, trailer[0], trailer[1], trailer[2]]);
    let computed = crc24q(dat);
    if expected != computed {
        return Err(Error::Integrity { expected, computed });
    }
    Ok(())
}
