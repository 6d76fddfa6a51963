use std::path::PathBuf;

/// Errors that can occur in datagram transport operations.
///
/// [`PeerMissing`](TransportError::PeerMissing) and
/// [`SendBufferFull`](TransportError::SendBufferFull) are the two transient
/// conditions callers are expected to retry; everything else is fatal to
/// the exchange.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to create a socket.
    #[error("socket error: {0}")]
    Socket(#[source] std::io::Error),

    /// Failed to bind the receive socket to its address.
    #[error("bind error on {path}: {source}")]
    Bind {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The destination address does not exist (yet).
    #[error("send error: destination address not present")]
    PeerMissing,

    /// The kernel send buffer is full.
    #[error("send error: kernel send buffer full")]
    SendBufferFull,

    /// A send failed for a reason other than the retryable conditions.
    #[error("send error: {0}")]
    Send(#[source] std::io::Error),

    /// A blocking receive failed.
    #[error("receive error: {0}")]
    Receive(#[source] std::io::Error),

    /// Failed to remove a socket address artifact.
    #[error("unlink error on {path}: {source}")]
    Unlink {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, TransportError>;
