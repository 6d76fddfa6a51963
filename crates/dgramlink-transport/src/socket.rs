use std::os::unix::net::UnixDatagram;

use tracing::debug;

use crate::addr::TransportAddress;
use crate::error::{Result, TransportError};
use crate::traits::Datagram;

/// A Unix-domain `SOCK_DGRAM` socket.
///
/// Receive sockets are bound to their own resolved address so peers can
/// reach them; send sockets stay unbound and only address datagrams at a
/// peer. Single owner; the file descriptor closes on drop, but only
/// [`close_and_unlink`](DatagramSocket::close_and_unlink) removes the
/// filesystem artifact of a bound socket.
#[derive(Debug)]
pub struct DatagramSocket {
    inner: UnixDatagram,
    bound: Option<TransportAddress>,
}

impl DatagramSocket {
    /// Create a receive socket bound to `address`.
    ///
    /// Binding fails while a previous run's artifact still exists at the
    /// address; run [`cleanup_stale`] first.
    pub fn bind(address: &TransportAddress) -> Result<Self> {
        let inner = UnixDatagram::bind(address.path()).map_err(|e| TransportError::Bind {
            path: address.path().to_path_buf(),
            source: e,
        })?;
        debug!(path = ?address.path(), "bound datagram socket");
        Ok(Self {
            inner,
            bound: Some(address.clone()),
        })
    }

    /// Create an unbound send socket.
    pub fn unbound() -> Result<Self> {
        let inner = UnixDatagram::unbound().map_err(TransportError::Socket)?;
        Ok(Self { inner, bound: None })
    }

    /// The address this socket is bound to, if any.
    pub fn bound_address(&self) -> Option<&TransportAddress> {
        self.bound.as_ref()
    }

    /// Close the socket; for a bound socket, also remove its address
    /// artifact. Unbound sockets have no artifact and skip the unlink.
    pub fn close_and_unlink(self) -> Result<()> {
        let Self { inner, bound } = self;
        drop(inner);
        if let Some(address) = bound {
            debug!(path = ?address.path(), "unlinking socket address");
            std::fs::remove_file(address.path()).map_err(|e| TransportError::Unlink {
                path: address.path().to_path_buf(),
                source: e,
            })?;
        }
        Ok(())
    }
}

impl Datagram for DatagramSocket {
    fn send_to(&self, buf: &[u8], peer: &TransportAddress) -> Result<()> {
        match self.inner.send_to(buf, peer.path()) {
            Ok(_) => Ok(()),
            Err(err) => Err(classify_send_error(err)),
        }
    }

    fn recv(&self, buf: &mut [u8]) -> Result<usize> {
        self.inner.recv(buf).map_err(TransportError::Receive)
    }
}

/// Remove a stale address artifact left behind by a previous run.
///
/// A missing artifact is not an error, so the call is idempotent and safe
/// on a first run. Must happen before [`DatagramSocket::bind`] whenever an
/// earlier process may have exited without unlinking.
pub fn cleanup_stale(address: &TransportAddress) -> Result<()> {
    match std::fs::remove_file(address.path()) {
        Ok(()) => {
            debug!(path = ?address.path(), "removed stale socket address");
            Ok(())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(TransportError::Unlink {
            path: address.path().to_path_buf(),
            source: err,
        }),
    }
}

fn classify_send_error(err: std::io::Error) -> TransportError {
    match err.raw_os_error() {
        Some(libc::ENOENT) => TransportError::PeerMissing,
        Some(libc::ENOBUFS) => TransportError::SendBufferFull,
        _ => TransportError::Send(err),
    }
}
