//! Approximate position and time assistance (message type 0x0201).
use bytes::BufMut;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bytes::Reader;
use crate::epoch::{self, GnssTime, System};
use crate::Result;

/// Position/time payload length in bytes.
pub const PAYLOAD_LEN: usize = 24;

/// Data validity flag. The high nibble flags the position, the low nibble the time.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DataFlag(pub u8);

impl DataFlag {
    pub const NONE_VALID: DataFlag = DataFlag(0x00);
    pub const TIME_VALID: DataFlag = DataFlag(0x01);
    pub const POSITION_VALID: DataFlag = DataFlag(0x10);
    pub const ALL_VALID: DataFlag = DataFlag(0x11);

    /// True if this is one of the four defined flag values.
    #[must_use]
    pub fn is_known(self) -> bool {
        matches!(self.0, 0x00 | 0x01 | 0x10 | 0x11)
    }

    #[must_use]
    pub fn position_valid(self) -> bool {
        self.0 & 0xf0 == 0x10
    }

    #[must_use]
    pub fn time_valid(self) -> bool {
        self.0 & 0x0f == 0x01
    }
}

/// Approximate receiver position, current time and their error bounds.
///
/// The reserved byte that follows `data_flag` on the wire is always written as 0 and ignored
/// when decoding.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionTime {
    pub pos_x: u32,
    pub pos_y: u32,
    pub pos_z: u32,
    pub week: u16,
    pub seconds: u32,
    pub pos_error: u16,
    pub time_error: u16,
    pub data_flag: DataFlag,
}

impl PositionTime {
    /// A record stamped with `time`, all other fields zero.
    #[must_use]
    pub fn at(time: GnssTime) -> Self {
        PositionTime {
            week: time.week,
            seconds: time.second,
            ..Default::default()
        }
    }

    /// A record stamped with the current BDS time.
    #[must_use]
    pub fn now() -> Self {
        Self::at(epoch::current(System::Bds))
    }

    pub(crate) fn encode_payload(&self, buf: &mut impl BufMut) {
        buf.put_u32(self.pos_x);
        buf.put_u32(self.pos_y);
        buf.put_u32(self.pos_z);
        buf.put_u16(self.week);
        buf.put_u32(self.seconds);
        buf.put_u16(self.pos_error);
        buf.put_u16(self.time_error);
        buf.put_u8(self.data_flag.0);
        // reserved
        buf.put_u8(0);
    }

    pub(crate) fn decode_payload(r: &mut Reader) -> Result<Self> {
        let zult = PositionTime {
            pos_x: r.u32()?,
            pos_y: r.u32()?,
            pos_z: r.u32()?,
            week: r.u16()?,
            seconds: r.u32()?,
            pos_error: r.u16()?,
            time_error: r.u16()?,
            data_flag: DataFlag(r.u8()?),
        };
        r.skip(1)?;
        Ok(zult)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_layout() {
        let pt = PositionTime {
            pos_x: 0x0102_0304,
            pos_y: 0x0506_0708,
            pos_z: 0x090a_0b0c,
            week: 0x0d0e,
            seconds: 0x0f10_1112,
            pos_error: 0x1314,
            time_error: 0x1516,
            data_flag: DataFlag::ALL_VALID,
        };
        let mut dat = Vec::new();
        pt.encode_payload(&mut dat);
        assert_eq!(dat.len(), PAYLOAD_LEN);
        let mut expected: Vec<u8> = (1..=0x16).collect();
        expected.extend([0x11, 0x00]);
        assert_eq!(dat, expected);

        let mut r = Reader::new(&dat);
        assert_eq!(PositionTime::decode_payload(&mut r).unwrap(), pt);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn data_flags() {
        assert!(DataFlag::ALL_VALID.position_valid());
        assert!(DataFlag::ALL_VALID.time_valid());
        assert!(!DataFlag::TIME_VALID.position_valid());
        assert!(!DataFlag::POSITION_VALID.time_valid());
        assert!(DataFlag::NONE_VALID.is_known());
        assert!(!DataFlag(0x02).is_known());
    }

    #[test]
    fn at_stamps_time() {
        let pt = PositionTime::at(GnssTime {
            week: 939,
            second: 86_400,
        });
        assert_eq!(pt.week, 939);
        assert_eq!(pt.seconds, 86_400);
        assert_eq!(pt.pos_x, 0);
    }
}
