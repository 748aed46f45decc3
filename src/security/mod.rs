//! Location security frames.
//!
//! Security frames share the auxiliary header. Only [MessageType::ServiceStatus] frames carry
//! a CRC-24Q trailer; every other type ends with its payload. The header length always covers
//! the whole frame, trailer included when present.
//!
//! [MessageType::InterferenceDetection] has a variable payload: a fixed block followed by three
//! count-prefixed groups. Its length is only known once all three groups have been walked, and
//! [frame_length] and [encode] walk them the same way.
mod control;
mod group;
mod interference;
mod status;

pub use control::Control;
pub use group::MAX_ENTRIES;
pub use interference::{
    InterferenceDetection, Jammer, JammingAlarm, RaimFault, SpoofedSignal, SpoofingAlarm,
    SpoofingSource,
};
pub use status::{MessageVerification, ServiceStatus};

use bytes::BufMut;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::bytes::Reader;
use crate::crc::{self, CRC_LEN};
use crate::frame::{checked_header, Header};
use crate::{Error, Result};

/// Navigation signal identifiers. Each system uses a contiguous range of ids.
pub mod nav_signal {
    pub const BDS_B1I: u8 = 0x11;
    pub const BDS_B1C: u8 = 0x12;
    pub const BDS_B2A: u8 = 0x13;
    pub const BDS_B2B: u8 = 0x14;
    pub const BDS_B3I: u8 = 0x15;
    pub const GPS_L1CA: u8 = 0x21;
    pub const GPS_L1C: u8 = 0x22;
    pub const GPS_L2C: u8 = 0x23;
    pub const GPS_L5C: u8 = 0x24;
    pub const GLONASS_G1: u8 = 0x31;
    pub const GLONASS_G2: u8 = 0x32;
    pub const GLONASS_G3: u8 = 0x33;
    pub const GALILEO_E1: u8 = 0x41;
    pub const GALILEO_E5A: u8 = 0x42;
    pub const GALILEO_E5B: u8 = 0x43;
    pub const GALILEO_E6: u8 = 0x44;

    #[must_use]
    pub fn name(id: u8) -> Option<&'static str> {
        let name = match id {
            BDS_B1I => "BDS-B1I",
            BDS_B1C => "BDS-B1C",
            BDS_B2A => "BDS-B2a",
            BDS_B2B => "BDS-B2b",
            BDS_B3I => "BDS-B3I",
            GPS_L1CA => "GPS-L1C/A",
            GPS_L1C => "GPS-L1C",
            GPS_L2C => "GPS-L2C",
            GPS_L5C => "GPS-L5C",
            GLONASS_G1 => "GLONASS-G1",
            GLONASS_G2 => "GLONASS-G2",
            GLONASS_G3 => "GLONASS-G3",
            GALILEO_E1 => "GALILEO-E1",
            GALILEO_E5A => "GALILEO-E5a",
            GALILEO_E5B => "GALILEO-E5b",
            GALILEO_E6 => "GALILEO-E6",
            _ => return None,
        };
        Some(name)
    }
}

/// Navigation system status values.
pub mod nav_status {
    pub const NORMAL: u8 = 0x00;
    pub const ABNORMAL: u8 = 0x03;

    #[must_use]
    pub fn name(status: u8) -> Option<&'static str> {
        match status {
            NORMAL => Some("normal"),
            ABNORMAL => Some("abnormal"),
            _ => None,
        }
    }
}

/// Jamming classification used by jamming alarms and jammer entries.
pub mod interference_kind {
    pub const NARROWBAND: u8 = 1;
    pub const WIDEBAND: u8 = 2;
    pub const OTHER: u8 = 3;

    #[must_use]
    pub fn name(kind: u8) -> Option<&'static str> {
        match kind {
            NARROWBAND => Some("narrowband"),
            WIDEBAND => Some("wideband"),
            OTHER => Some("other"),
            _ => None,
        }
    }
}

/// Location security message types.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum MessageType {
    ServiceStatus = 0x0101,
    MessageVerification = 0x0102,
    JammingAlarm = 0x0103,
    SpoofingAlarm = 0x0104,
    InterferenceDetection = 0x0105,
    Control = 0x0106,
}

impl MessageType {
    /// Wire value of this type.
    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }

    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        let typ = match code {
            0x0101 => MessageType::ServiceStatus,
            0x0102 => MessageType::MessageVerification,
            0x0103 => MessageType::JammingAlarm,
            0x0104 => MessageType::SpoofingAlarm,
            0x0105 => MessageType::InterferenceDetection,
            0x0106 => MessageType::Control,
            _ => return None,
        };
        Some(typ)
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            MessageType::ServiceStatus => "navigation system service status",
            MessageType::MessageVerification => "navigation message verification",
            MessageType::JammingAlarm => "jamming alarm",
            MessageType::SpoofingAlarm => "spoofing alarm",
            MessageType::InterferenceDetection => "module interference detection",
            MessageType::Control => "information exchange control",
        }
    }

    /// True if frames of this type end with a CRC-24Q trailer.
    #[must_use]
    pub fn has_crc(self) -> bool {
        self == MessageType::ServiceStatus
    }

    /// Payload length, or `None` for the variable length type.
    #[must_use]
    pub fn fixed_payload_len(self) -> Option<usize> {
        match self {
            MessageType::ServiceStatus => Some(ServiceStatus::PAYLOAD_LEN),
            MessageType::MessageVerification => Some(MessageVerification::PAYLOAD_LEN),
            MessageType::JammingAlarm => Some(JammingAlarm::PAYLOAD_LEN),
            MessageType::SpoofingAlarm => Some(SpoofingAlarm::PAYLOAD_LEN),
            MessageType::InterferenceDetection => None,
            MessageType::Control => Some(Control::PAYLOAD_LEN),
        }
    }

    fn trailer_len(self) -> usize {
        if self.has_crc() {
            CRC_LEN
        } else {
            0
        }
    }
}

impl TryFrom<u16> for MessageType {
    type Error = Error;

    fn try_from(code: u16) -> Result<Self> {
        MessageType::from_code(code).ok_or(Error::UnknownMessageType(code))
    }
}

/// One location security message.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityMessage {
    ServiceStatus(ServiceStatus),
    MessageVerification(MessageVerification),
    JammingAlarm(JammingAlarm),
    SpoofingAlarm(SpoofingAlarm),
    InterferenceDetection(InterferenceDetection),
    Control(Control),
}

impl SecurityMessage {
    #[must_use]
    pub fn message_type(&self) -> MessageType {
        match self {
            SecurityMessage::ServiceStatus(_) => MessageType::ServiceStatus,
            SecurityMessage::MessageVerification(_) => MessageType::MessageVerification,
            SecurityMessage::JammingAlarm(_) => MessageType::JammingAlarm,
            SecurityMessage::SpoofingAlarm(_) => MessageType::SpoofingAlarm,
            SecurityMessage::InterferenceDetection(_) => MessageType::InterferenceDetection,
            SecurityMessage::Control(_) => MessageType::Control,
        }
    }

    fn payload_len(&self) -> Result<usize> {
        match self {
            SecurityMessage::InterferenceDetection(det) => det.payload_len(),
            _ => Ok(self.message_type().fixed_payload_len().unwrap_or_default()),
        }
    }

    fn encode_payload(&self, buf: &mut impl BufMut) -> Result<()> {
        match self {
            SecurityMessage::ServiceStatus(msg) => msg.encode_payload(buf),
            SecurityMessage::MessageVerification(msg) => msg.encode_payload(buf),
            SecurityMessage::JammingAlarm(msg) => msg.encode_payload(buf),
            SecurityMessage::SpoofingAlarm(msg) => msg.encode_payload(buf),
            SecurityMessage::InterferenceDetection(msg) => msg.encode_payload(buf)?,
            SecurityMessage::Control(msg) => msg.encode_payload(buf),
        }
        Ok(())
    }
}

macro_rules! impl_from_message {
    ($($name:ident),+ $(,)?) => {
        $(
            impl From<$name> for SecurityMessage {
                fn from(value: $name) -> Self {
                    SecurityMessage::$name(value)
                }
            }
        )+
    };
}

impl_from_message!(
    ServiceStatus,
    MessageVerification,
    JammingAlarm,
    SpoofingAlarm,
    InterferenceDetection,
    Control,
);

/// Total frame length of `msg`: header, payload and trailer if the type has one.
///
/// # Errors
/// [Error::TooManyEntries] if a group of an [InterferenceDetection] has more than 255 entries.
pub fn frame_length(msg: &SecurityMessage) -> Result<u16> {
    let len = Header::LEN + msg.payload_len()? + msg.message_type().trailer_len();
    // bounded by the group entry limit, far below u16::MAX
    Ok(len as u16)
}

/// Encode `msg` as a complete frame.
///
/// # Errors
/// [Error::TooManyEntries] if a group of an [InterferenceDetection] has more than 255 entries.
pub fn encode(msg: &SecurityMessage) -> Result<Vec<u8>> {
    let length = frame_length(msg)?;
    let typ = msg.message_type();
    let mut buf = Vec::with_capacity(length as usize);
    Header::new(typ.code(), length).encode(&mut buf);
    msg.encode_payload(&mut buf)?;
    if typ.has_crc() {
        crc::append(&mut buf);
    }
    debug_assert_eq!(buf.len(), length as usize);
    Ok(buf)
}

/// Decode a complete security frame.
///
/// # Errors
/// A format error ([Error::is_format]) if the header is invalid, the declared length is not
/// the number of bytes provided, the type is unknown, the payload size does not match the type
/// or its groups, or an alarm count is not 1. [Error::Integrity] if a
/// [MessageType::ServiceStatus] trailer does not match.
pub fn decode(dat: &[u8]) -> Result<SecurityMessage> {
    let header = checked_header(dat, Header::LEN)?;
    let typ = MessageType::try_from(header.message_type)?;
    let minimum = Header::LEN + typ.trailer_len();
    if dat.len() < minimum {
        return Err(Error::FrameTooShort {
            actual: dat.len(),
            minimum,
        });
    }
    let payload = &dat[Header::LEN..dat.len() - typ.trailer_len()];
    if let Some(expected) = typ.fixed_payload_len() {
        if payload.len() != expected {
            return Err(Error::InvalidPayloadLength {
                message_type: typ.code(),
                actual: payload.len(),
                expected,
            });
        }
    }
    if typ.has_crc() {
        crc::verify(dat)?;
    }

    trace!(message_type = typ.code(), len = dat.len(), "decoding security payload");
    let mut r = Reader::new(payload);
    let msg = decode_payload(typ, &mut r).map_err(|err| match err {
        // the frame is complete, so running out of payload means the groups are malformed
        Error::NotEnoughData { minimum, .. } => Error::InvalidPayloadLength {
            message_type: typ.code(),
            actual: payload.len(),
            expected: minimum,
        },
        err => err,
    })?;
    if r.remaining() != 0 {
        return Err(Error::InvalidPayloadLength {
            message_type: typ.code(),
            actual: payload.len(),
            expected: r.offset(),
        });
    }
    Ok(msg)
}

fn decode_payload(typ: MessageType, r: &mut Reader) -> Result<SecurityMessage> {
    let msg: SecurityMessage = match typ {
        MessageType::ServiceStatus => ServiceStatus::decode_payload(r)?.into(),
        MessageType::MessageVerification => MessageVerification::decode_payload(r)?.into(),
        MessageType::JammingAlarm => JammingAlarm::decode_payload(r)?.into(),
        MessageType::SpoofingAlarm => SpoofingAlarm::decode_payload(r)?.into(),
        MessageType::InterferenceDetection => {
            InterferenceDetection::decode_payload(r)?.into()
        }
        MessageType::Control => Control::decode_payload(r)?.into(),
    };
    Ok(msg)
}
