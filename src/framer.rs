//! Reassembly of complete frames from an arbitrarily chunked byte stream.
//!
//! The framer trusts the header length field. It does not look for the identifier or check
//! any CRC; a frame it emits is only delimited and must still be decoded with
//! [crate::decode_auxiliary] or [crate::decode_security]. A length field that can never be
//! valid is reported as [Error::InvalidLength] and the offending bytes stay buffered until
//! the caller calls [Framer::resync] or [Framer::reset].
//!
//! ```
//! use gnssaux::{Control, Framer, SecurityMessage};
//!
//! let msg = SecurityMessage::Control(Control::default());
//! let dat = gnssaux::encode_security(&msg).unwrap();
//!
//! let mut framer = Framer::default();
//! assert!(framer.feed(&dat[..5]).unwrap().is_empty());
//! let frames = framer.feed(&dat[5..]).unwrap();
//! assert_eq!(frames.len(), 1);
//! assert_eq!(frames[0].message_type(), 0x0106);
//! ```
use std::collections::{HashSet, VecDeque};
use std::io::{ErrorKind, Read};

use bytes::BytesMut;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

use crate::frame::{Frame, Header, IDENTIFIER};
use crate::{Error, Result};

/// Largest frame accepted when not otherwise configured.
pub const DEFAULT_MAX_FRAME_LEN: u16 = 4096;

const READ_CHUNK_LEN: usize = 4096;

/// Framer options.
#[derive(TypedBuilder, Debug, Clone, PartialEq, Eq)]
pub struct FramerConfig {
    /// Largest header length value accepted. Larger values are reported as
    /// [Error::InvalidLength].
    #[builder(default = DEFAULT_MAX_FRAME_LEN)]
    pub max_frame_len: u16,
    /// Message types to emit. Frames of other types are consumed and dropped. When empty,
    /// every frame is emitted.
    #[builder(default, setter(into))]
    pub message_types: HashSet<u16>,
}

impl Default for FramerConfig {
    fn default() -> Self {
        FramerConfig::builder().build()
    }
}

/// Buffers stream bytes and splits them into complete frames.
///
/// A framer is owned by a single reader; feeding the same bytes in one call or split at any
/// boundaries over many calls produces the same frames in the same order.
#[derive(Debug, Default)]
pub struct Framer {
    buf: BytesMut,
    config: FramerConfig,
}

impl Framer {
    #[must_use]
    pub fn new(config: FramerConfig) -> Self {
        Framer {
            buf: BytesMut::with_capacity(config.max_frame_len as usize),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &FramerConfig {
        &self.config
    }

    /// Append `dat` and extract every complete frame now buffered.
    ///
    /// Incomplete trailing data is kept for the next call and is never an error.
    ///
    /// # Errors
    /// [Error::InvalidLength] if the buffered header has a length below the header length or
    /// above the configured maximum. Frames completed before the bad header in the same call
    /// are returned first; the error is then reported by the next call.
    pub fn feed(&mut self, dat: &[u8]) -> Result<Vec<Frame>> {
        self.buf.extend_from_slice(dat);

        let mut frames = Vec::new();
        loop {
            match self.next_frame() {
                Ok(Some(frame)) => {
                    if self.accepts(&frame) {
                        frames.push(frame);
                    } else {
                        trace!(message_type = frame.message_type(), "dropping filtered frame");
                    }
                }
                Ok(None) => break,
                Err(err) if frames.is_empty() => return Err(err),
                Err(err) => {
                    debug!(
                        num_frames = frames.len(),
                        "deferring error until next call: {err}"
                    );
                    break;
                }
            }
        }
        Ok(frames)
    }

    fn accepts(&self, frame: &Frame) -> bool {
        self.config.message_types.is_empty()
            || self.config.message_types.contains(&frame.message_type())
    }

    fn next_frame(&mut self) -> Result<Option<Frame>> {
        if self.buf.len() < Header::LEN {
            return Ok(None);
        }
        let off = Header::LENGTH_OFFSET;
        let length = u16::from_be_bytes([self.buf[off], self.buf[off + 1]]);
        if (length as usize) < Header::LEN || length > self.config.max_frame_len {
            warn!(length, buffered = self.buf.len(), "invalid frame length");
            return Err(Error::InvalidLength {
                length,
                minimum: Header::LEN as u16,
                maximum: self.config.max_frame_len,
            });
        }
        if self.buf.len() < length as usize {
            return Ok(None);
        }
        let data = self.buf.split_to(length as usize).freeze();
        let frame = Frame::decode(data);
        if let Some(frame) = &frame {
            trace!(
                message_type = frame.message_type(),
                len = frame.len(),
                "extracted frame"
            );
        }
        Ok(frame)
    }

    /// Discard at least one buffered byte and then everything up to the next occurrence of
    /// the frame identifier. If no identifier is buffered, only the last 3 bytes are kept
    /// since they may begin one. Returns the number of bytes discarded.
    pub fn resync(&mut self) -> usize {
        if self.buf.is_empty() {
            return 0;
        }
        let ident = IDENTIFIER.to_be_bytes();
        let skip = self.buf[1..]
            .windows(ident.len())
            .position(|w| w == ident)
            .map_or_else(|| self.buf.len().saturating_sub(ident.len() - 1).max(1), |idx| idx + 1);
        let _ = self.buf.split_to(skip);
        debug!(discarded = skip, buffered = self.buf.len(), "resynchronized");
        skip
    }

    /// Discard all buffered bytes.
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Number of bytes buffered but not yet emitted as a frame.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }
}

/// Iterates over frames read from a [Read], created by [read_frames].
pub struct FrameIter<R>
where
    R: Read + Send,
{
    reader: R,
    framer: Framer,
    ready: VecDeque<Frame>,
    done: bool,
}

impl<R> FrameIter<R>
where
    R: Read + Send,
{
    fn fill(&mut self) -> Result<()> {
        let mut chunk = [0u8; READ_CHUNK_LEN];
        loop {
            match self.reader.read(&mut chunk) {
                Ok(0) => {
                    self.done = true;
                    // surfaces any error deferred by the last feed
                    self.ready.extend(self.framer.feed(&[])?);
                    if self.framer.buffered() > 0 {
                        debug!(
                            buffered = self.framer.buffered(),
                            "dropping partial frame at end of stream"
                        );
                    }
                    return Ok(());
                }
                Ok(num) => {
                    self.ready.extend(self.framer.feed(&chunk[..num])?);
                    return Ok(());
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }
}

impl<R> Iterator for FrameIter<R>
where
    R: Read + Send,
{
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(frame) = self.ready.pop_front() {
                return Some(Ok(frame));
            }
            if self.done {
                return None;
            }
            if let Err(err) = self.fill() {
                self.done = true;
                return Some(Err(err));
            }
        }
    }
}

/// Creates an iterator over the frames in a byte stream.
///
/// Reads are fed to a [Framer] built from `config`. A partial frame at the end of the stream
/// is dropped.
///
/// # Errors
/// The iterator produces a single error and then ends if reading fails or the framer reports
/// an invalid length. Use a [Framer] directly for control over resynchronization.
pub fn read_frames<R>(reader: R, config: FramerConfig) -> FrameIter<R>
where
    R: Read + Send,
{
    FrameIter {
        reader,
        framer: Framer::new(config),
        ready: VecDeque::new(),
        done: false,
    }
}
