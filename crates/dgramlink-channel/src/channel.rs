use std::time::Duration;

use bytes::BytesMut;
use tracing::{debug, trace};

use dgramlink_frame::{Control, MessageHeader, MAX_FRAME_SIZE};
use dgramlink_transport::{Datagram, DatagramSocket, TransportAddress, TransportError};

use crate::error::Result;

/// Tuning knobs for a channel.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Largest datagram the channel sends or receives.
    pub max_frame_size: usize,
    /// Pause between rendezvous probes while the peer address is absent.
    pub probe_interval: Duration,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            max_frame_size: MAX_FRAME_SIZE,
            probe_interval: Duration::from_millis(10),
        }
    }
}

/// A point-to-point framed channel over two datagram sockets.
///
/// `rx` is bound to this process's own resolved address so the peer can
/// reach it; `tx` stays unbound and only addresses datagrams at the
/// peer. Cooperating processes construct their channels with swapped
/// names so each side's send address is the other's receive address.
/// That pairing is the caller's convention; the channel does not verify
/// it, nor does it filter received datagrams by source.
pub struct Channel<D> {
    rx: D,
    tx: D,
    local: TransportAddress,
    peer: TransportAddress,
    scratch: Vec<u8>,
    frame: BytesMut,
    config: ChannelConfig,
}

impl Channel<DatagramSocket> {
    /// Open a channel: bind the receive socket at `local` and create the
    /// unbound send socket.
    ///
    /// Stale artifacts at `local` make the bind fail, so callers run
    /// [`cleanup_stale`](dgramlink_transport::cleanup_stale) for both
    /// endpoint addresses first (the role drivers do).
    pub fn open(
        local: TransportAddress,
        peer: TransportAddress,
        config: ChannelConfig,
    ) -> Result<Self> {
        let rx = DatagramSocket::bind(&local)?;
        let tx = DatagramSocket::unbound()?;
        Ok(Self::from_parts(rx, tx, local, peer, config))
    }

    /// Close both sockets and remove the receive address artifact.
    pub fn shutdown(self) -> Result<()> {
        debug!(local = %self.local, "shutting down channel");
        self.tx.close_and_unlink()?;
        self.rx.close_and_unlink()?;
        Ok(())
    }
}

impl<D: Datagram> Channel<D> {
    /// Assemble a channel from already-opened endpoints.
    pub fn from_parts(
        rx: D,
        tx: D,
        local: TransportAddress,
        peer: TransportAddress,
        config: ChannelConfig,
    ) -> Self {
        let scratch = vec![0u8; config.max_frame_size];
        Self {
            rx,
            tx,
            local,
            peer,
            scratch,
            frame: BytesMut::new(),
            config,
        }
    }

    /// The address this channel receives on.
    pub fn local(&self) -> &TransportAddress {
        &self.local
    }

    /// The address this channel sends to.
    pub fn peer(&self) -> &TransportAddress {
        &self.peer
    }

    /// Responder half of the rendezvous: block until any datagram
    /// arrives.
    ///
    /// The datagram's content is not inspected; arrival alone means the
    /// initiator is up. The initiator only waits for this side's address
    /// to exist, not for its probe to be read, so the datagram consumed
    /// here may already be the peer's first real message.
    pub fn await_contact(&mut self) -> Result<()> {
        self.rx.recv(&mut self.scratch)?;
        debug!("contact received");
        Ok(())
    }

    /// Initiator half of the rendezvous: probe with zero-length
    /// datagrams until the peer's address exists.
    ///
    /// While the peer has not bound yet, the probe fails with a missing
    /// destination; that case sleeps one probe interval and retries.
    /// Any other failure propagates. The loop has no timeout: a peer
    /// that never starts keeps the caller blocked here.
    pub fn announce(&mut self) -> Result<()> {
        loop {
            match self.tx.send_to(&[], &self.peer) {
                Ok(()) => break,
                Err(TransportError::PeerMissing) => {
                    trace!(peer = %self.peer, "peer address not present yet");
                    std::thread::sleep(self.config.probe_interval);
                }
                Err(err) => return Err(err.into()),
            }
        }
        debug!(peer = %self.peer, "peer address present");
        Ok(())
    }

    /// Send one logical message of `payload_size` bytes.
    ///
    /// The header travels at the front of the first frame. A message
    /// that fits one frame goes out as a single datagram of exactly
    /// `payload_size` bytes; larger messages go out as
    /// `sub_packet_count` datagrams of exactly `max_frame_size` bytes,
    /// each repeating the same header-prefixed buffer. Only the first
    /// frame's header is meaningful to the peer; everything past it is
    /// sized filler. Returns the header that was sent.
    pub fn send_message(&mut self, payload_size: u32, control: Control) -> Result<MessageHeader> {
        let header = MessageHeader::for_payload(payload_size, self.config.max_frame_size, control)?;

        let frame_len = if header.sub_packet_count == 1 {
            payload_size as usize
        } else {
            self.config.max_frame_size
        };

        self.frame.clear();
        header.encode(&mut self.frame);
        self.frame.resize(frame_len, 0);

        for _ in 0..header.sub_packet_count {
            self.send_frame(&self.frame)?;
        }

        trace!(
            payload_size,
            sub_packets = header.sub_packet_count,
            "sent message"
        );
        Ok(header)
    }

    /// Receive one logical message and return the header from its first
    /// frame.
    ///
    /// After the first frame, `sub_packet_count - 1` further frames are
    /// received and discarded so the whole message is drained off the
    /// socket before this returns.
    pub fn receive_message(&mut self) -> Result<MessageHeader> {
        let received = self.receive_frame()?;
        let header = MessageHeader::decode(&self.scratch[..received])?;

        for _ in 1..header.sub_packet_count {
            self.receive_frame()?;
        }

        trace!(
            payload_size = header.payload_size,
            sub_packets = header.sub_packet_count,
            "received message"
        );
        Ok(header)
    }

    /// Send one frame of exactly `buf.len()` bytes to the peer address.
    ///
    /// A full kernel send buffer is retried immediately, in a busy loop
    /// with no sleep, until the datagram is accepted. Any other failure
    /// propagates. The rendezvous probe is the only send path that
    /// sleeps between attempts.
    pub fn send_frame(&self, buf: &[u8]) -> Result<()> {
        loop {
            match self.tx.send_to(buf, &self.peer) {
                Ok(()) => return Ok(()),
                Err(TransportError::SendBufferFull) => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Block until one frame arrives; returns the received byte count.
    ///
    /// At most `max_frame_size` bytes are kept. Datagrams from any
    /// sender are accepted; the namespaced, per-run addresses are what
    /// keep strangers out.
    pub fn receive_frame(&mut self) -> Result<usize> {
        let n = self.rx.recv(&mut self.scratch)?;
        Ok(n)
    }
}
