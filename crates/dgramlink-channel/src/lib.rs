//! Point-to-point framed messaging over Unix datagram sockets.
//!
//! The core value-add layer of dgramlink. A [`Channel`] owns a bound
//! receive socket and an unbound send socket, synchronizes with its peer
//! through a role-asymmetric rendezvous (the responder blocks for first
//! contact, the initiator probes), and exchanges logical messages that
//! may span several datagrams.
//!
//! A channel instance moves through one phase sequence: opened (both
//! sockets exist, receive side bound), synchronized (rendezvous done),
//! exchanging (any number of sends/receives, any order per role), closed.
//! [`Channel::shutdown`] consumes the channel, so there is no way back
//! out of the final phase.

pub mod channel;
pub mod driver;
pub mod error;

pub use channel::{Channel, ChannelConfig};
pub use driver::{establish_follower, establish_leader, ChannelNames};
pub use error::{ChannelError, Result};
