#![doc = include_str!("../README.md")]

mod error;

pub mod auxiliary;
pub mod bits;
pub mod bytes;
pub mod crc;
pub mod epoch;
pub mod frame;
pub mod framer;
pub mod security;

pub use auxiliary::{AuxiliaryMessage, DataFlag, Ephemeris, PositionTime};
pub use error::{Error, Result};
pub use frame::{Frame, Header, IDENTIFIER, VERSION};
pub use framer::{read_frames, Framer, FramerConfig};
pub use security::{
    Control, InterferenceDetection, Jammer, JammingAlarm, MessageType, MessageVerification,
    RaimFault, SecurityMessage, ServiceStatus, SpoofedSignal, SpoofingAlarm, SpoofingSource,
};

/// Encode an auxiliary location message as a complete CRC-protected frame.
#[must_use]
pub fn encode_auxiliary(msg: &AuxiliaryMessage) -> Vec<u8> {
    auxiliary::encode(msg)
}

/// Decode a complete auxiliary location frame.
///
/// # Errors
/// See [auxiliary::decode].
pub fn decode_auxiliary(dat: &[u8]) -> Result<AuxiliaryMessage> {
    auxiliary::decode(dat)
}

/// Encode a location security message as a complete frame.
///
/// # Errors
/// See [security::encode].
pub fn encode_security(msg: &SecurityMessage) -> Result<Vec<u8>> {
    security::encode(msg)
}

/// Total frame length `msg` encodes to.
///
/// # Errors
/// See [security::frame_length].
pub fn security_frame_length(msg: &SecurityMessage) -> Result<u16> {
    security::frame_length(msg)
}

/// Decode a complete location security frame.
///
/// # Errors
/// See [security::decode].
pub fn decode_security(dat: &[u8]) -> Result<SecurityMessage> {
    security::decode(dat)
}
