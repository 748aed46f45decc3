//! Information exchange control command (0x0106).
use bytes::BufMut;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bytes::Reader;
use crate::Result;

/// Asks the receiver to change how it broadcasts another message type.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Control {
    pub target_message_type: u16,
    pub broadcast_mode: u8,
    pub interval: u8,
    pub offset: u8,
}

impl Control {
    pub const PAYLOAD_LEN: usize = 5;

    pub(crate) fn encode_payload(&self, buf: &mut impl BufMut) {
        buf.put_u16(self.target_message_type);
        buf.put_u8(self.broadcast_mode);
        buf.put_u8(self.interval);
        buf.put_u8(self.offset);
    }

    pub(crate) fn decode_payload(r: &mut Reader) -> Result<Self> {
        Ok(Control {
            target_message_type: r.u16()?,
            broadcast_mode: r.u8()?,
            interval: r.u8()?,
            offset: r.u8()?,
        })
    }
}
