//! GNSS week / second-of-week time helpers.
//!
//! Times are computed from a naive wall-clock instant against a fixed epoch origin per
//! system. No leap second correction is applied; the result is what a producer reading the
//! local clock will put on the wire.
use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::security::nav_signal::{
    BDS_B1I, BDS_B3I, GALILEO_E1, GALILEO_E6, GLONASS_G1, GLONASS_G3, GPS_L1CA, GPS_L5C,
};

const SECONDS_PER_WEEK: i64 = 7 * 86_400;

/// Satellite navigation system time bases.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum System {
    Bds,
    Gps,
    Galileo,
    Glonass,
}

impl System {
    /// Epoch origin for the system's week numbering.
    ///
    /// GLONASS does not count weeks; its origin is the start of its four year cycle and
    /// it is only provided for completeness.
    #[must_use]
    pub fn epoch(self) -> NaiveDateTime {
        let (y, m, d) = match self {
            System::Bds => (2006, 1, 1),
            System::Gps => (1980, 1, 6),
            System::Galileo => (1999, 8, 22),
            System::Glonass => (1996, 1, 1),
        };
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    /// The system a navigation signal id belongs to, or `None` for ids not listed in
    /// [crate::security::nav_signal].
    #[must_use]
    pub fn from_nav_signal(id: u8) -> Option<System> {
        match id {
            BDS_B1I..=BDS_B3I => Some(System::Bds),
            GPS_L1CA..=GPS_L5C => Some(System::Gps),
            GLONASS_G1..=GLONASS_G3 => Some(System::Glonass),
            GALILEO_E1..=GALILEO_E6 => Some(System::Galileo),
            _ => None,
        }
    }
}

/// A week number and a second within that week.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GnssTime {
    pub week: u16,
    pub second: u32,
}

/// Week number and second-of-week of `now` relative to the epoch of `system`.
///
/// Instants before the epoch produce week 0 second 0. Week numbers wider than 16 bits are
/// truncated, as they are when placed in a 2-byte week field.
#[must_use]
pub fn week_and_second(system: System, now: NaiveDateTime) -> GnssTime {
    let elapsed = (now - system.epoch()).num_seconds();
    if elapsed < 0 {
        return GnssTime::default();
    }
    GnssTime {
        week: (elapsed / SECONDS_PER_WEEK) as u16,
        second: (elapsed % SECONDS_PER_WEEK) as u32,
    }
}

/// Seconds elapsed since midnight of `now`, the GLONASS day-second.
#[must_use]
pub fn day_second(now: NaiveDateTime) -> u32 {
    now.time().num_seconds_from_midnight()
}

/// Reference time for a message carrying a navigation signal id.
///
/// BDS, GPS and GALILEO signals use their own system's week and second-of-week. GLONASS
/// signals use week 0 and the day-second. Unknown signals use week 0, second 0.
#[must_use]
pub fn reference_time(nav_signal: u8, now: NaiveDateTime) -> GnssTime {
    match System::from_nav_signal(nav_signal) {
        Some(System::Glonass) => GnssTime {
            week: 0,
            second: day_second(now),
        },
        Some(system) => week_and_second(system, now),
        None => GnssTime::default(),
    }
}

/// Current local wall-clock time.
///
/// Read it once and pass it to the helpers above when several fields must agree on the same
/// instant.
#[must_use]
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// [week_and_second] for the current local time.
#[must_use]
pub fn current(system: System) -> GnssTime {
    week_and_second(system, now())
}
