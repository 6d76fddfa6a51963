//! Point-to-point framed messaging over Unix datagram sockets.
//!
//! dgramlink pairs two independently started processes over the OS's
//! connectionless local datagram transport: a rendezvous handshake that
//! needs no shared clock or third-party broker, header-tagged
//! fragmentation so a logical message can exceed the datagram size, and
//! sends that ride out transient kernel buffer exhaustion.
//!
//! # Crate Structure
//!
//! - [`transport`] — endpoint addresses, socket lifecycle, raw datagram I/O
//! - [`frame`] — the message header codec
//! - [`channel`] — framed channel, rendezvous, role drivers (behind the
//!   `channel` feature)

/// Re-export transport types.
pub mod transport {
    pub use dgramlink_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use dgramlink_frame::*;
}

/// Re-export channel types (requires `channel` feature).
#[cfg(feature = "channel")]
pub mod channel {
    pub use dgramlink_channel::*;
}
