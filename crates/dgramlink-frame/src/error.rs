/// Errors that can occur encoding or decoding message headers.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The received frame is shorter than a message header.
    #[error("truncated header ({len} bytes)")]
    TruncatedHeader { len: usize },

    /// The control field holds a value outside the known set.
    #[error("invalid control value {0}")]
    InvalidControl(u32),

    /// The requested message is too small to carry its own header.
    #[error("payload too small ({size} bytes, min {min})")]
    PayloadTooSmall { size: u32, min: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;
