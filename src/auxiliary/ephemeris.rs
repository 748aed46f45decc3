//! BDS ephemeris record (message type 0x0202).
//!
//! The payload is one 512-bit string: a zero pad bit, the 12-bit message number of the
//! record, then the ephemeris fields below in order, each most-significant-bit first. Values
//! are raw integers as broadcast; no scale factors are applied.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::bits::{BitReader, BitWriter};
use crate::bytes::mask;
use crate::{Error, Result};

/// Ephemeris payload length in bytes.
pub const PAYLOAD_LEN: usize = 64;
/// Message number carried in the 12 bits after the pad bit.
pub const SUBTYPE: u16 = 1042;

const PAD_BITS: u32 = 1;
const SUBTYPE_BITS: u32 = 12;

/// Declares the ephemeris fields once. The struct, the ordered width table and the
/// conversions to and from an ordered value array are all generated from the same list,
/// so encoding and decoding cannot disagree on order or width.
macro_rules! ephemeris_fields {
    ($( $(#[$doc:meta])* $name:ident: $width:literal ),+ $(,)?) => {
        /// BDS satellite ephemeris parameters.
        ///
        /// Each field holds the unsigned raw value of its declared bit width. Wider values are
        /// truncated to the declared width when encoded.
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct Ephemeris {
            $( $(#[$doc])* pub $name: u32, )+
        }

        impl Ephemeris {
            /// Field names and bit widths, in wire order.
            pub const FIELDS: [(&'static str, u32); NUM_FIELDS] = [
                $( (stringify!($name), $width), )+
            ];

            fn to_values(self) -> [u32; NUM_FIELDS] {
                [ $( self.$name, )+ ]
            }

            fn from_values(values: [u32; NUM_FIELDS]) -> Self {
                let [ $( $name, )+ ] = values;
                Ephemeris { $( $name, )+ }
            }
        }
    };
}

/// Number of ephemeris fields.
pub const NUM_FIELDS: usize = 28;

ephemeris_fields! {
    /// Satellite id
    sat_id: 6,
    /// BDS week number
    week: 13,
    /// User range accuracy index
    urai: 4,
    /// Rate of inclination angle
    idot: 14,
    /// Age of data, ephemeris
    aode: 5,
    /// Clock data reference time
    toc: 17,
    a2: 11,
    a1: 22,
    a0: 24,
    /// Age of data, clock
    aodc: 5,
    crs: 18,
    /// Mean motion difference
    delta_n: 16,
    /// Mean anomaly at reference time
    m0: 32,
    cuc: 18,
    /// Eccentricity
    e: 32,
    cus: 18,
    /// Square root of the semi-major axis
    sqrt_a: 32,
    /// Ephemeris reference time
    toe: 17,
    cic: 18,
    omega0: 32,
    cis: 18,
    i0: 32,
    crc: 18,
    omega: 32,
    omega_dot: 24,
    /// Equipment group delay B1I
    tgd1: 10,
    /// Equipment group delay B2I
    tgd2: 10,
    /// Autonomous satellite health flag, 0 is healthy
    health: 1,
}

const fn total_bits() -> u32 {
    let mut total = PAD_BITS + SUBTYPE_BITS;
    let mut i = 0;
    while i < NUM_FIELDS {
        total += Ephemeris::FIELDS[i].1;
        i += 1;
    }
    total
}

const _: () = assert!(total_bits() as usize == PAYLOAD_LEN * 8);

impl Ephemeris {
    /// Copy with every field truncated to its declared width. This is the value that
    /// decoding an encoded record produces.
    #[must_use]
    pub fn masked(&self) -> Self {
        let mut values = self.to_values();
        for (value, (_, width)) in values.iter_mut().zip(Self::FIELDS) {
            *value = mask(*value, width);
        }
        Self::from_values(values)
    }

    /// Ephemeris with every field set to the maximum value of its width.
    #[must_use]
    pub fn max() -> Self {
        Self::from_values([u32::MAX; NUM_FIELDS]).masked()
    }

    pub(crate) fn encode_payload(&self) -> [u8; PAYLOAD_LEN] {
        let mut w = BitWriter::<PAYLOAD_LEN>::default();
        w.write(0, PAD_BITS).write(u32::from(SUBTYPE), SUBTYPE_BITS);
        for (value, (_, width)) in self.to_values().into_iter().zip(Self::FIELDS) {
            w.write(value, width);
        }
        w.into_bytes()
    }

    /// Decode a payload. Field extraction cannot fail on content; only a short payload is
    /// an error.
    pub(crate) fn decode_payload(dat: &[u8]) -> Result<Self> {
        let short = || Error::NotEnoughData {
            actual: dat.len(),
            minimum: PAYLOAD_LEN,
        };
        let mut r = BitReader::new(dat);
        r.read(PAD_BITS).ok_or_else(short)?;
        let subtype = r.read(SUBTYPE_BITS).ok_or_else(short)?;
        if subtype != u32::from(SUBTYPE) {
            warn!(subtype, expected = SUBTYPE, "unexpected ephemeris message number");
        }
        let mut values = [0u32; NUM_FIELDS];
        for (value, (_, width)) in values.iter_mut().zip(Self::FIELDS) {
            *value = r.read(width).ok_or_else(short)?;
        }
        Ok(Self::from_values(values))
    }
}
