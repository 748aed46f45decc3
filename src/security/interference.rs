//! Jamming alarm (0x0103), spoofing alarm (0x0104) and module interference
//! detection (0x0105).
use bytes::BufMut;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::group::{self, Entry};
use super::interference_kind;
use crate::bytes::Reader;
use crate::{Error, Result};

/// Alarms are only ever sent with a single entry.
const ALARM_COUNT: u8 = 1;

fn write_alarm_count(buf: &mut impl BufMut) {
    buf.put_u8(ALARM_COUNT);
}

fn read_alarm_count(r: &mut Reader, message_type: u16) -> Result<()> {
    let count = r.u8()?;
    if count != ALARM_COUNT {
        return Err(Error::UnsupportedCount {
            message_type,
            count,
        });
    }
    Ok(())
}

/// Broadband or narrowband jamming detected at a location.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JammingAlarm {
    /// BDS reference week
    pub week: u16,
    /// BDS reference second of week
    pub seconds: u32,
    pub latitude: u32,
    pub longitude: u32,
    pub center_frequency: u32,
    pub bandwidth: u16,
    /// See [interference_kind]
    pub interference_type: u8,
    pub intensity: u8,
    pub confidence: u8,
}

impl JammingAlarm {
    /// Payload length; time, the count byte and one entry.
    pub const PAYLOAD_LEN: usize = 2 + 4 + 1 + 4 + 4 + 4 + 2 + 1 + 1 + 1;

    pub(crate) fn encode_payload(&self, buf: &mut impl BufMut) {
        buf.put_u16(self.week);
        buf.put_u32(self.seconds);
        write_alarm_count(buf);
        buf.put_u32(self.latitude);
        buf.put_u32(self.longitude);
        buf.put_u32(self.center_frequency);
        buf.put_u16(self.bandwidth);
        buf.put_u8(self.interference_type);
        buf.put_u8(self.intensity);
        buf.put_u8(self.confidence);
    }

    pub(crate) fn decode_payload(r: &mut Reader) -> Result<Self> {
        let week = r.u16()?;
        let seconds = r.u32()?;
        read_alarm_count(r, super::MessageType::JammingAlarm.code())?;
        Ok(JammingAlarm {
            week,
            seconds,
            latitude: r.u32()?,
            longitude: r.u32()?,
            center_frequency: r.u32()?,
            bandwidth: r.u16()?,
            interference_type: r.u8()?,
            intensity: r.u8()?,
            confidence: r.u8()?,
        })
    }
}

impl Default for JammingAlarm {
    fn default() -> Self {
        JammingAlarm {
            week: 0,
            seconds: 0,
            latitude: 0,
            longitude: 0,
            center_frequency: 0,
            bandwidth: 0,
            interference_type: interference_kind::NARROWBAND,
            intensity: 0,
            confidence: 0,
        }
    }
}

/// Location and signal of a detected spoofing source.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpoofingSource {
    pub latitude: u32,
    pub longitude: u32,
    /// Navigation signal id, see [super::nav_signal]
    pub signal_id: u8,
    pub spoofing_type: u8,
    pub confidence: u8,
}

impl Entry for SpoofingSource {
    const LEN: usize = 4 + 4 + 1 + 1 + 1;

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u32(self.latitude);
        buf.put_u32(self.longitude);
        buf.put_u8(self.signal_id);
        buf.put_u8(self.spoofing_type);
        buf.put_u8(self.confidence);
    }

    fn decode(r: &mut Reader) -> Result<Self> {
        Ok(SpoofingSource {
            latitude: r.u32()?,
            longitude: r.u32()?,
            signal_id: r.u8()?,
            spoofing_type: r.u8()?,
            confidence: r.u8()?,
        })
    }
}

/// Spoofing detected; always exactly one source.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpoofingAlarm {
    pub week: u16,
    pub seconds: u32,
    pub source: SpoofingSource,
}

impl SpoofingAlarm {
    pub const PAYLOAD_LEN: usize = 2 + 4 + 1 + SpoofingSource::LEN;

    pub(crate) fn encode_payload(&self, buf: &mut impl BufMut) {
        buf.put_u16(self.week);
        buf.put_u32(self.seconds);
        write_alarm_count(buf);
        self.source.encode(buf);
    }

    pub(crate) fn decode_payload(r: &mut Reader) -> Result<Self> {
        let week = r.u16()?;
        let seconds = r.u32()?;
        read_alarm_count(r, super::MessageType::SpoofingAlarm.code())?;
        Ok(SpoofingAlarm {
            week,
            seconds,
            source: SpoofingSource::decode(r)?,
        })
    }
}

/// Satellite excluded by the receiver's integrity monitoring.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RaimFault {
    pub satellite_id: u8,
    pub signal_id: u8,
}

impl Entry for RaimFault {
    const LEN: usize = 2;

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.satellite_id);
        buf.put_u8(self.signal_id);
    }

    fn decode(r: &mut Reader) -> Result<Self> {
        Ok(RaimFault {
            satellite_id: r.u8()?,
            signal_id: r.u8()?,
        })
    }
}

/// One jammer seen by the receiver.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Jammer {
    pub frequency: u32,
    pub bandwidth: u16,
    /// See [interference_kind]
    pub jamming_type: u8,
    pub strength: u8,
    pub confidence: u8,
}

impl Entry for Jammer {
    const LEN: usize = 4 + 2 + 1 + 1 + 1;

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u32(self.frequency);
        buf.put_u16(self.bandwidth);
        buf.put_u8(self.jamming_type);
        buf.put_u8(self.strength);
        buf.put_u8(self.confidence);
    }

    fn decode(r: &mut Reader) -> Result<Self> {
        Ok(Jammer {
            frequency: r.u32()?,
            bandwidth: r.u16()?,
            jamming_type: r.u8()?,
            strength: r.u8()?,
            confidence: r.u8()?,
        })
    }
}

/// A navigation signal the receiver believes is spoofed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpoofedSignal {
    pub signal_id: u8,
}

impl Entry for SpoofedSignal {
    const LEN: usize = 1;

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.signal_id);
    }

    fn decode(r: &mut Reader) -> Result<Self> {
        Ok(SpoofedSignal {
            signal_id: r.u8()?,
        })
    }
}

/// Receiver navigation solution with everything its interference monitoring found.
///
/// The fixed block is followed by three groups, RAIM faults, jammers and spoofed signals,
/// each a count byte and that many entries.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterferenceDetection {
    pub week: u16,
    pub seconds: u32,
    /// ECEF x, y, z
    pub position: [u32; 3],
    pub velocity: [u32; 3],
    pub pdop: u16,
    pub hdop: u16,
    pub vdop: u16,
    pub signal_mask: u32,
    pub satellite_count: u8,
    pub raim_faults: Vec<RaimFault>,
    pub jammers: Vec<Jammer>,
    pub spoofed_signals: Vec<SpoofedSignal>,
}

impl InterferenceDetection {
    /// Length of the block preceding the groups.
    pub const FIXED_LEN: usize = 2 + 4 + 3 * 4 + 3 * 4 + 3 * 2 + 4 + 1;

    /// Payload length including all three groups.
    ///
    /// # Errors
    /// [Error::TooManyEntries] if a group has more than 255 entries.
    pub fn payload_len(&self) -> Result<usize> {
        Ok(Self::FIXED_LEN
            + group::encoded_len(&self.raim_faults)?
            + group::encoded_len(&self.jammers)?
            + group::encoded_len(&self.spoofed_signals)?)
    }

    pub(crate) fn encode_payload<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        buf.put_u16(self.week);
        buf.put_u32(self.seconds);
        for x in self.position.iter().chain(&self.velocity) {
            buf.put_u32(*x);
        }
        buf.put_u16(self.pdop);
        buf.put_u16(self.hdop);
        buf.put_u16(self.vdop);
        buf.put_u32(self.signal_mask);
        buf.put_u8(self.satellite_count);
        group::write(buf, &self.raim_faults)?;
        group::write(buf, &self.jammers)?;
        group::write(buf, &self.spoofed_signals)
    }

    pub(crate) fn decode_payload(r: &mut Reader) -> Result<Self> {
        Ok(InterferenceDetection {
            week: r.u16()?,
            seconds: r.u32()?,
            position: [r.u32()?, r.u32()?, r.u32()?],
            velocity: [r.u32()?, r.u32()?, r.u32()?],
            pdop: r.u16()?,
            hdop: r.u16()?,
            vdop: r.u16()?,
            signal_mask: r.u32()?,
            satellite_count: r.u8()?,
            raim_faults: group::read(r)?,
            jammers: group::read(r)?,
            spoofed_signals: group::read(r)?,
        })
    }
}
