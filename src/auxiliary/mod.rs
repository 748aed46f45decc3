//! Auxiliary location frames.
//!
//! Every auxiliary frame is the common header, a fixed size payload selected by the
//! message type, and a 3-byte CRC-24Q trailer covering header and payload.
mod ephemeris;
mod position;

pub use ephemeris::{Ephemeris, NUM_FIELDS as EPHEMERIS_NUM_FIELDS, SUBTYPE as EPHEMERIS_SUBTYPE};
pub use position::{DataFlag, PositionTime};

use bytes::BufMut;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::bytes::Reader;
use crate::crc::{self, CRC_LEN};
use crate::frame::{checked_header, Header};
use crate::{Error, Result};

/// Message type of [PositionTime] frames.
pub const POSITION_TIME: u16 = 0x0201;
/// Message type of [Ephemeris] frames.
pub const BDS_EPHEMERIS: u16 = 0x0202;

/// Smallest number of bytes that can hold an auxiliary frame: header plus trailer.
pub const MIN_FRAME_LEN: usize = Header::LEN + CRC_LEN;

/// One auxiliary location message.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuxiliaryMessage {
    PositionTime(PositionTime),
    Ephemeris(Ephemeris),
}

impl AuxiliaryMessage {
    #[must_use]
    pub fn message_type(&self) -> u16 {
        match self {
            AuxiliaryMessage::PositionTime(_) => POSITION_TIME,
            AuxiliaryMessage::Ephemeris(_) => BDS_EPHEMERIS,
        }
    }

    /// Total encoded frame length.
    #[must_use]
    pub fn frame_length(&self) -> u16 {
        frame_length(self.message_type()).unwrap_or_default()
    }
}

impl From<PositionTime> for AuxiliaryMessage {
    fn from(value: PositionTime) -> Self {
        AuxiliaryMessage::PositionTime(value)
    }
}

impl From<Ephemeris> for AuxiliaryMessage {
    fn from(value: Ephemeris) -> Self {
        AuxiliaryMessage::Ephemeris(value)
    }
}

fn payload_len(message_type: u16) -> Option<usize> {
    match message_type {
        POSITION_TIME => Some(position::PAYLOAD_LEN),
        BDS_EPHEMERIS => Some(ephemeris::PAYLOAD_LEN),
        _ => None,
    }
}

/// Total frame length for an auxiliary message type, or `None` if the type is unknown.
#[must_use]
pub fn frame_length(message_type: u16) -> Option<u16> {
    payload_len(message_type).map(|n| (Header::LEN + n + CRC_LEN) as u16)
}

/// Human readable name of an auxiliary message type.
#[must_use]
pub fn description(message_type: u16) -> Option<&'static str> {
    match message_type {
        POSITION_TIME => Some("position and time assistance"),
        BDS_EPHEMERIS => Some("BDS ephemeris assistance"),
        _ => None,
    }
}

/// Encode `msg` as a complete frame, including the CRC-24Q trailer.
#[must_use]
pub fn encode(msg: &AuxiliaryMessage) -> Vec<u8> {
    let length = msg.frame_length();
    let mut buf = Vec::with_capacity(length as usize);
    Header::new(msg.message_type(), length).encode(&mut buf);
    match msg {
        AuxiliaryMessage::PositionTime(pt) => pt.encode_payload(&mut buf),
        AuxiliaryMessage::Ephemeris(eph) => buf.put_slice(&eph.encode_payload()),
    }
    crc::append(&mut buf);
    debug_assert_eq!(buf.len(), length as usize);
    buf
}

/// Decode a complete auxiliary frame.
///
/// # Errors
/// A format error ([Error::is_format]) if there are fewer than 12 bytes, the identifier or
/// version is wrong, the declared length is not the number of bytes provided, the message
/// type is unknown, or the payload size does not match the type. [Error::Integrity] if the
/// CRC-24Q trailer does not match.
pub fn decode(dat: &[u8]) -> Result<AuxiliaryMessage> {
    let header = checked_header(dat, MIN_FRAME_LEN)?;
    let expected =
        payload_len(header.message_type).ok_or(Error::UnknownMessageType(header.message_type))?;
    let actual = dat.len() - MIN_FRAME_LEN;
    if actual != expected {
        return Err(Error::InvalidPayloadLength {
            message_type: header.message_type,
            actual,
            expected,
        });
    }
    crc::verify(dat)?;

    let payload = &dat[Header::LEN..dat.len() - CRC_LEN];
    trace!(message_type = header.message_type, "decoding auxiliary payload");
    let msg = match header.message_type {
        POSITION_TIME => {
            AuxiliaryMessage::PositionTime(PositionTime::decode_payload(&mut Reader::new(payload))?)
        }
        _ => AuxiliaryMessage::Ephemeris(Ephemeris::decode_payload(payload)?),
    };
    Ok(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0x0201 with pos_x=1, week=1024, seconds=345600, data_flag=0x11
    const POSITION_TIME_FRAME: [u8; 36] = [
        0x4a, 0x54, 0x44, 0x57, 0x00, 0x00, 0x24, 0x02, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x05, 0x46, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x11, 0x00, 0x81, 0x38, 0x15,
    ];

    fn position_time() -> PositionTime {
        PositionTime {
            pos_x: 1,
            week: 1024,
            seconds: 345_600,
            data_flag: DataFlag::ALL_VALID,
            ..Default::default()
        }
    }

    #[test]
    fn encode_position_time() {
        let dat = encode(&position_time().into());
        assert_eq!(dat, POSITION_TIME_FRAME);
    }

    #[test]
    fn decode_position_time() {
        let msg = decode(&POSITION_TIME_FRAME).unwrap();
        assert_eq!(msg, AuxiliaryMessage::PositionTime(position_time()));
    }

    #[test]
    fn frame_lengths() {
        assert_eq!(frame_length(POSITION_TIME), Some(36));
        assert_eq!(frame_length(BDS_EPHEMERIS), Some(76));
        assert_eq!(frame_length(0x0203), None);
        assert_eq!(
            AuxiliaryMessage::Ephemeris(Ephemeris::default()).frame_length(),
            76
        );
    }

    #[test]
    fn ephemeris_frame() {
        let msg = AuxiliaryMessage::Ephemeris(Ephemeris::max());
        let dat = encode(&msg);
        assert_eq!(dat.len(), 76);
        assert_eq!(&dat[5..9], &[0x00, 0x4c, 0x02, 0x02]);
        assert_eq!(decode(&dat).unwrap(), msg);
    }

    #[test]
    fn decode_too_short() {
        let err = decode(&POSITION_TIME_FRAME[..11]).unwrap_err();
        assert!(
            matches!(
                err,
                Error::FrameTooShort {
                    actual: 11,
                    minimum: 12
                }
            ),
            "got {err:?}"
        );
    }

    #[test]
    fn decode_unknown_type() {
        let mut dat = POSITION_TIME_FRAME.to_vec();
        dat[8] = 0x03;
        assert!(matches!(
            decode(&dat),
            Err(Error::UnknownMessageType(0x0203))
        ));
    }

    #[test]
    fn decode_wrong_payload_size_for_type() {
        // a well formed frame claiming to be an ephemeris but carrying a position payload
        let mut dat = POSITION_TIME_FRAME[..33].to_vec();
        dat[8] = 0x02;
        crc::append(&mut dat);
        let err = decode(&dat).unwrap_err();
        assert!(
            matches!(
                err,
                Error::InvalidPayloadLength {
                    message_type: BDS_EPHEMERIS,
                    actual: 24,
                    expected: 64
                }
            ),
            "got {err:?}"
        );
    }

    #[test]
    fn decode_bad_crc() {
        let mut dat = POSITION_TIME_FRAME;
        dat[35] ^= 0x01;
        assert!(decode(&dat).unwrap_err().is_integrity());
    }
}
