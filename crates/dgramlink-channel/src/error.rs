/// Errors that can occur on a framed channel.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// Transport-level error.
    #[error("transport error: {0}")]
    Transport(#[from] dgramlink_transport::TransportError),

    /// Header-level error.
    #[error("frame error: {0}")]
    Frame(#[from] dgramlink_frame::FrameError),
}

pub type Result<T> = std::result::Result<T, ChannelError>;
