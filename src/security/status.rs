//! Navigation system service status (0x0101) and navigation message verification (0x0102).
use bytes::BufMut;
use chrono::NaiveDateTime;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::nav_signal;
use crate::bytes::Reader;
use crate::epoch::{self, GnssTime, System};
use crate::Result;

const RESERVED_LEN: usize = 8;

/// Service status of one navigation signal and its satellites.
///
/// The only security message carrying a CRC-24Q trailer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceStatus {
    /// BDS reference week
    pub week: u16,
    /// BDS reference second of week
    pub seconds: u32,
    /// Navigation signal id, see [nav_signal]
    pub nav_system: u8,
    /// See [super::nav_status]
    pub nav_status: u8,
    pub signal_status: [u8; 4],
    pub satellite_status: [u8; 8],
}

impl ServiceStatus {
    /// Payload length in bytes, including the 8 reserved bytes.
    pub const PAYLOAD_LEN: usize = 2 + 4 + 1 + 1 + 4 + 8 + RESERVED_LEN;

    /// Default status stamped with `time`.
    #[must_use]
    pub fn at(time: GnssTime) -> Self {
        ServiceStatus {
            week: time.week,
            seconds: time.second,
            ..Default::default()
        }
    }

    /// Default status stamped with the current BDS time.
    #[must_use]
    pub fn now() -> Self {
        Self::at(epoch::current(System::Bds))
    }

    pub(crate) fn encode_payload(&self, buf: &mut impl BufMut) {
        buf.put_u16(self.week);
        buf.put_u32(self.seconds);
        buf.put_u8(self.nav_system);
        buf.put_u8(self.nav_status);
        buf.put_slice(&self.signal_status);
        buf.put_slice(&self.satellite_status);
        buf.put_bytes(0, RESERVED_LEN);
    }

    pub(crate) fn decode_payload(r: &mut Reader) -> Result<Self> {
        let zult = ServiceStatus {
            week: r.u16()?,
            seconds: r.u32()?,
            nav_system: r.u8()?,
            nav_status: r.u8()?,
            signal_status: r.array()?,
            satellite_status: r.array()?,
        };
        r.skip(RESERVED_LEN)?;
        Ok(zult)
    }
}

impl Default for ServiceStatus {
    fn default() -> Self {
        ServiceStatus {
            week: 0,
            seconds: 0,
            nav_system: nav_signal::BDS_B2B,
            nav_status: super::nav_status::NORMAL,
            signal_status: [0; 4],
            satellite_status: [0; 8],
        }
    }
}

/// Verification of one navigation message from one satellite.
///
/// The reference week and time follow the time base of `nav_system`; see
/// [epoch::reference_time].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageVerification {
    pub week: u16,
    pub time: u32,
    pub nav_system: u8,
    pub verification_count: u8,
    pub satellite_number: u8,
    pub message_subtype: u8,
    pub reference_time: [u8; 3],
    pub verification_word: [u8; 3],
}

impl MessageVerification {
    pub const PAYLOAD_LEN: usize = 2 + 4 + 1 + 1 + 1 + 1 + 3 + 3;

    /// Copy with week and time set from `now` in the time base of `nav_system`.
    #[must_use]
    pub fn stamped(self, now: NaiveDateTime) -> Self {
        let time = epoch::reference_time(self.nav_system, now);
        MessageVerification {
            week: time.week,
            time: time.second,
            ..self
        }
    }

    pub(crate) fn encode_payload(&self, buf: &mut impl BufMut) {
        buf.put_u16(self.week);
        buf.put_u32(self.time);
        buf.put_u8(self.nav_system);
        buf.put_u8(self.verification_count);
        buf.put_u8(self.satellite_number);
        buf.put_u8(self.message_subtype);
        buf.put_slice(&self.reference_time);
        buf.put_slice(&self.verification_word);
    }

    pub(crate) fn decode_payload(r: &mut Reader) -> Result<Self> {
        Ok(MessageVerification {
            week: r.u16()?,
            time: r.u32()?,
            nav_system: r.u8()?,
            verification_count: r.u8()?,
            satellite_number: r.u8()?,
            message_subtype: r.u8()?,
            reference_time: r.array()?,
            verification_word: r.array()?,
        })
    }
}

impl Default for MessageVerification {
    fn default() -> Self {
        MessageVerification {
            week: 0,
            time: 0,
            nav_system: nav_signal::BDS_B2B,
            verification_count: 0,
            satellite_number: 0,
            message_subtype: 0x01,
            reference_time: [0; 3],
            verification_word: [0xff; 3],
        }
    }
}
