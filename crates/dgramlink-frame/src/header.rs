use bytes::{Buf, BufMut, BytesMut};

use crate::error::{FrameError, Result};

/// Largest single frame (datagram) the channel sends or receives.
pub const MAX_FRAME_SIZE: usize = 4096;

/// Encoded header size: payload size (4) + sub-packet count (4) + control (4).
pub const HEADER_SIZE: usize = 12;

/// Control value carried in every header.
///
/// A payload-level convention between the two callers; the channel
/// forwards it without acting on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep the exchange going.
    Run = 0,
    /// The sender is done.
    Stop = 1,
}

impl TryFrom<u32> for Control {
    type Error = FrameError;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Control::Run),
            1 => Ok(Control::Stop),
            other => Err(FrameError::InvalidControl(other)),
        }
    }
}

/// Header carried in the first frame of every logical message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    /// Total bytes the sender declared for this logical message.
    pub payload_size: u32,
    /// Number of frames the message spans.
    pub sub_packet_count: u32,
    /// Caller-interpreted control value.
    pub control: Control,
}

impl MessageHeader {
    /// Build the header for a message of `payload_size` bytes.
    ///
    /// A message that fits one frame spans exactly one sub-packet.
    /// Larger messages span `payload_size / max_frame_size` full frames;
    /// the division truncates, so the trailing remainder of a
    /// non-multiple size never reaches the wire. Receivers count frames
    /// from this field, which keeps both sides consistent; do not round
    /// up without changing every deployed peer.
    pub fn for_payload(payload_size: u32, max_frame_size: usize, control: Control) -> Result<Self> {
        if (payload_size as usize) < HEADER_SIZE {
            return Err(FrameError::PayloadTooSmall {
                size: payload_size,
                min: HEADER_SIZE,
            });
        }

        let sub_packet_count = if payload_size as usize <= max_frame_size {
            1
        } else {
            payload_size / max_frame_size as u32
        };

        Ok(Self {
            payload_size,
            sub_packet_count,
            control,
        })
    }

    /// Append the fixed [`HEADER_SIZE`]-byte encoding to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(HEADER_SIZE);
        dst.put_u32_le(self.payload_size);
        dst.put_u32_le(self.sub_packet_count);
        dst.put_u32_le(self.control as u32);
    }

    /// Parse a header from the first [`HEADER_SIZE`] bytes of `src`.
    pub fn decode(mut src: &[u8]) -> Result<Self> {
        if src.len() < HEADER_SIZE {
            return Err(FrameError::TruncatedHeader { len: src.len() });
        }

        let payload_size = src.get_u32_le();
        let sub_packet_count = src.get_u32_le();
        let control = Control::try_from(src.get_u32_le())?;

        Ok(Self {
            payload_size,
            sub_packet_count,
            control,
        })
    }
}
