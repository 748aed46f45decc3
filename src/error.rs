#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Fewer bytes than the smallest valid frame of a family.
    #[error("frame too short; got {actual} bytes, need at least {minimum}")]
    FrameTooShort { actual: usize, minimum: usize },

    #[error("invalid frame identifier {0:#010x}")]
    InvalidIdentifier(u32),

    #[error("invalid frame version {0:#04x}")]
    InvalidVersion(u8),

    /// The header length field does not match the number of bytes provided.
    #[error("declared frame length {declared} does not match actual length {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("unknown message type {0:#06x}")]
    UnknownMessageType(u16),

    /// A header length field that can never describe a valid frame.
    #[error("invalid frame length {length}; must be between {minimum} and {maximum}")]
    InvalidLength {
        length: u16,
        minimum: u16,
        maximum: u16,
    },

    /// Payload size does not match the layout required by the message type.
    #[error("invalid payload length for message type {message_type:#06x}; got {actual}, expected {expected}")]
    InvalidPayloadLength {
        message_type: u16,
        actual: usize,
        expected: usize,
    },

    /// A repeated-group count the message layout does not support.
    #[error("unsupported entry count {count} for message type {message_type:#06x}")]
    UnsupportedCount { message_type: u16, count: u8 },

    /// A repeated group has more entries than its count byte can represent.
    #[error("too many entries; got {actual}, maximum is {maximum}")]
    TooManyEntries { actual: usize, maximum: usize },

    /// CRC-24Q trailer does not match the checksum of the frame contents.
    #[error("crc mismatch; trailer {expected:#08x}, computed {computed:#08x}")]
    Integrity { expected: u32, computed: u32 },

    #[error("not enough bytes; got {actual}, need at least {minimum}")]
    NotEnoughData { actual: usize, minimum: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors describing a structurally invalid frame, i.e., a bad identifier,
    /// version, length or message type.
    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            Error::FrameTooShort { .. }
                | Error::InvalidIdentifier(_)
                | Error::InvalidVersion(_)
                | Error::LengthMismatch { .. }
                | Error::UnknownMessageType(_)
                | Error::InvalidLength { .. }
                | Error::InvalidPayloadLength { .. }
                | Error::UnsupportedCount { .. }
                | Error::TooManyEntries { .. }
        )
    }

    #[must_use]
    pub fn is_integrity(&self) -> bool {
        matches!(self, Error::Integrity { .. })
    }

    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::NotEnoughData { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
