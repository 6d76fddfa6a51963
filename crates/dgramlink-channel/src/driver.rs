use tracing::info;

use dgramlink_frame::{Control, HEADER_SIZE};
use dgramlink_transport::{
    cleanup_stale, resolve, DatagramSocket, TransportAddress, NAMESPACE_PREFIX,
};

use crate::channel::{Channel, ChannelConfig};
use crate::error::Result;

/// The two endpoint names a channel is built from.
///
/// Cooperating processes swap them: the leader's `local` is the
/// follower's `peer` and vice versa. Getting the swap right is the
/// caller's job; nothing here checks it.
#[derive(Debug, Clone)]
pub struct ChannelNames {
    /// This process's own receive endpoint.
    pub local: String,
    /// The peer's receive endpoint.
    pub peer: String,
}

impl ChannelNames {
    /// Resolve both names under the shared namespace prefix.
    pub fn resolve(&self) -> (TransportAddress, TransportAddress) {
        (
            resolve(NAMESPACE_PREFIX, &self.local),
            resolve(NAMESPACE_PREFIX, &self.peer),
        )
    }
}

/// Reclaim stale artifacts for both endpoints, then open the channel.
///
/// Each role removes whatever a crashed predecessor left behind at
/// either address before binding its own. Both processes are expected to
/// start fresh together: a process that begins long after its peer has
/// bound would reclaim the peer's live address as if it were stale.
fn prepare(names: &ChannelNames, config: ChannelConfig) -> Result<Channel<DatagramSocket>> {
    let (local, peer) = names.resolve();
    cleanup_stale(&local)?;
    cleanup_stale(&peer)?;
    Channel::open(local, peer, config)
}

/// Bring up the side that waits to be contacted.
///
/// Cleans up stale address artifacts, opens both sockets, then blocks
/// until the follower makes contact. The returned channel is in the
/// exchange phase; the follower's readiness announcement arrives as the
/// first `receive_message` result.
pub fn establish_leader(
    names: &ChannelNames,
    config: ChannelConfig,
) -> Result<Channel<DatagramSocket>> {
    let mut channel = prepare(names, config)?;
    info!("waiting for follower");
    channel.await_contact()?;
    Ok(channel)
}

/// Bring up the side that makes first contact.
///
/// Cleans up stale address artifacts, opens both sockets, probes until
/// the leader's address exists, then announces readiness with a
/// header-sized `Run` message. The returned channel is in the exchange
/// phase.
pub fn establish_follower(
    names: &ChannelNames,
    config: ChannelConfig,
) -> Result<Channel<DatagramSocket>> {
    let mut channel = prepare(names, config)?;
    info!("registering with the leader");
    channel.announce()?;
    channel.send_message(HEADER_SIZE as u32, Control::Run)?;
    Ok(channel)
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::{Duration, Instant};

    use super::*;

    fn unique_names(tag: &str) -> (ChannelNames, ChannelNames) {
        let leader = format!("dgramlink-test-{tag}-leader-{}", std::process::id());
        let follower = format!("dgramlink-test-{tag}-follower-{}", std::process::id());
        (
            ChannelNames {
                local: leader.clone(),
                peer: follower.clone(),
            },
            ChannelNames {
                local: follower,
                peer: leader,
            },
        )
    }

    fn fast_config() -> ChannelConfig {
        ChannelConfig {
            max_frame_size: 1024,
            probe_interval: Duration::from_millis(1),
        }
    }

    /// Wait until `addr`'s artifact appears. Binding happens after the
    /// role's stale cleanup, so an existing artifact also means the
    /// owner is past the window in which it would unlink peers.
    fn wait_for_bind(addr: &TransportAddress) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !addr.path().exists() {
            assert!(Instant::now() < deadline, "timed out waiting for {addr}");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn resolve_applies_namespace_prefix_to_both_names() {
        let names = ChannelNames {
            local: "alpha".to_string(),
            peer: "beta".to_string(),
        };
        let (local, peer) = names.resolve();
        assert_eq!(local, resolve(NAMESPACE_PREFIX, "alpha"));
        assert_eq!(peer, resolve(NAMESPACE_PREFIX, "beta"));
    }

    #[test]
    fn leader_establishment_and_full_exchange() {
        let (leader_names, follower_names) = unique_names("exchange");
        let (leader_addr, follower_addr) = leader_names.resolve();

        let leader = thread::spawn(move || {
            let mut channel = establish_leader(&leader_names, fast_config()).unwrap();

            // First message is the follower's announcement.
            let announce = channel.receive_message().unwrap();
            assert_eq!(announce.payload_size, HEADER_SIZE as u32);
            assert_eq!(announce.sub_packet_count, 1);
            assert_eq!(announce.control, Control::Run);

            // A fragmented message arrives as one header, fully drained.
            let large = channel.receive_message().unwrap();
            assert_eq!(large.payload_size, 2048);
            assert_eq!(large.sub_packet_count, 2);

            let stop = channel.receive_message().unwrap();
            assert_eq!(stop.control, Control::Stop);

            channel.shutdown().unwrap();
        });

        // Enter the exchange only once the leader is bound; skipping the
        // follower-side cleanup keeps this test from reclaiming the
        // leader's live address.
        wait_for_bind(&leader_addr);
        let (local, peer) = follower_names.resolve();
        let mut channel = Channel::open(local, peer, fast_config()).unwrap();
        channel.announce().unwrap();
        channel
            .send_message(HEADER_SIZE as u32, Control::Run)
            .unwrap();
        channel.send_message(2048, Control::Run).unwrap();
        channel
            .send_message(HEADER_SIZE as u32, Control::Stop)
            .unwrap();

        leader.join().unwrap();
        channel.shutdown().unwrap();

        // Both receive addresses were unlinked on shutdown.
        assert!(!leader_addr.path().exists());
        assert!(!follower_addr.path().exists());
    }

    #[test]
    fn follower_establishment_probes_until_leader_binds() {
        let (leader_names, follower_names) = unique_names("late-leader");
        let (leader_addr, follower_addr) = leader_names.resolve();

        let follower = thread::spawn(move || {
            // The leader does not exist yet; the probe loop polls until
            // its address appears.
            let channel = establish_follower(&follower_names, fast_config()).unwrap();
            channel.shutdown().unwrap();
        });

        // The follower binds (and finishes its cleanup) before probing;
        // only then is it safe to bring the leader up underneath it.
        wait_for_bind(&follower_addr);
        thread::sleep(Duration::from_millis(20));

        let mut channel = Channel::open(leader_addr, follower_addr, fast_config()).unwrap();
        channel.await_contact().unwrap();
        let announce = channel.receive_message().unwrap();
        assert_eq!(announce.payload_size, HEADER_SIZE as u32);
        assert_eq!(announce.control, Control::Run);

        follower.join().unwrap();
        channel.shutdown().unwrap();
    }

    #[test]
    fn prepare_reclaims_stale_artifacts_of_a_previous_run() {
        let (leader_names, _) = unique_names("stale");
        let (leader_addr, follower_addr) = leader_names.resolve();

        // Simulate a crashed previous run: bound sockets dropped without
        // unlinking leave both artifacts behind.
        drop(DatagramSocket::bind(&leader_addr).unwrap());
        drop(DatagramSocket::bind(&follower_addr).unwrap());
        assert!(leader_addr.path().exists());
        assert!(follower_addr.path().exists());

        // Binding over the stale artifact succeeds only because both
        // addresses are reclaimed first.
        let channel = prepare(&leader_names, fast_config()).unwrap();
        assert!(
            !follower_addr.path().exists(),
            "peer's stale artifact is reclaimed too"
        );

        channel.shutdown().unwrap();
        assert!(!leader_addr.path().exists());
    }
}
