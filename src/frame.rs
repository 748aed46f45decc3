//! Common frame header shared by the auxiliary location and location security families.
use std::fmt::Display;

use bytes::{BufMut, Bytes};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Frame identifier, ASCII "JTDW". Both families use the same value.
pub const IDENTIFIER: u32 = 0x4a54_4457;
/// Frame format version.
pub const VERSION: u8 = 0x00;

/// Frame header.
///
/// ```text
/// [0:4) identifier  [4:5) version  [5:7) length  [7:9) message type
/// ```
/// All fields are big-endian. `length` is the total frame length in bytes, including the
/// header and any CRC trailer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub identifier: u32,
    pub version: u8,
    pub length: u16,
    pub message_type: u16,
}

impl Header {
    /// Header length in bytes
    pub const LEN: usize = 9;
    /// Offset of the length field
    pub const LENGTH_OFFSET: usize = 5;
    /// Offset of the message type field
    pub const TYPE_OFFSET: usize = 7;

    /// Header with the fixed identifier and version.
    #[must_use]
    pub fn new(message_type: u16, length: u16) -> Self {
        Header {
            identifier: IDENTIFIER,
            version: VERSION,
            length,
            message_type,
        }
    }

    /// Decode from bytes. Returns `None` if there are not enough bytes to construct the
    /// header. No field is validated.
    #[must_use]
    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < Self::LEN {
            return None;
        }
        Some(Header {
            identifier: u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]),
            version: buf[4],
            length: u16::from_be_bytes([buf[5], buf[6]]),
            message_type: u16::from_be_bytes([buf[7], buf[8]]),
        })
    }

    pub(crate) fn encode(&self, buf: &mut impl BufMut) {
        buf.put_u32(self.identifier);
        buf.put_u8(self.version);
        buf.put_u16(self.length);
        buf.put_u16(self.message_type);
    }

    /// Check the identifier and version against the fixed values.
    ///
    /// # Errors
    /// [Error::InvalidIdentifier] or [Error::InvalidVersion].
    pub fn validate(&self) -> Result<()> {
        if self.identifier != IDENTIFIER {
            return Err(Error::InvalidIdentifier(self.identifier));
        }
        if self.version != VERSION {
            return Err(Error::InvalidVersion(self.version));
        }
        Ok(())
    }
}

/// Decode and check the header of a complete frame: at least `minimum` bytes, fixed
/// identifier and version, and a length field equal to the number of bytes in `dat`.
pub(crate) fn checked_header(dat: &[u8], minimum: usize) -> Result<Header> {
    if dat.len() < minimum {
        return Err(Error::FrameTooShort {
            actual: dat.len(),
            minimum,
        });
    }
    let header = Header::decode(dat).ok_or(Error::FrameTooShort {
        actual: dat.len(),
        minimum: Header::LEN,
    })?;
    header.validate()?;
    if header.length as usize != dat.len() {
        return Err(Error::LengthMismatch {
            declared: header.length as usize,
            actual: dat.len(),
        });
    }
    Ok(header)
}

/// One complete frame as delimited on the wire, header through optional CRC trailer.
///
/// A frame is only delimited, not validated; use [crate::decode_auxiliary] or
/// [crate::decode_security] to check and decode its contents.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub header: Header,
    /// All frame bytes, including header
    pub data: Bytes,
}

impl Frame {
    /// Construct from bytes, or `None` if there are not enough bytes for a header.
    #[must_use]
    pub fn decode(data: Bytes) -> Option<Self> {
        let header = Header::decode(&data)?;
        Some(Frame { header, data })
    }

    #[must_use]
    pub fn message_type(&self) -> u16 {
        self.header.message_type
    }

    /// Bytes following the header, including any trailer.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.data[Header::LEN.min(self.data.len())..]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Contiguous upper case hex of the whole frame, the form producers print for a frame.
impl Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode_upper(&self.data))
    }
}
