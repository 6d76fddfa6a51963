use std::path::{Path, PathBuf};

/// Namespace prefix prepended to every endpoint name.
///
/// Keeps the sockets of cooperating processes in one well-known place so a
/// restarted run can find and reclaim its predecessor's artifacts.
pub const NAMESPACE_PREFIX: &str = "/tmp/";

/// Capacity of `sockaddr_un.sun_path`: 108 bytes on Linux, 104 elsewhere.
#[cfg(target_os = "linux")]
pub const ADDRESS_CAPACITY: usize = 108;
#[cfg(not(target_os = "linux"))]
pub const ADDRESS_CAPACITY: usize = 104;

/// A resolved socket address.
///
/// Produced once by [`resolve`] at channel construction and immutable
/// afterwards. The wrapped path is guaranteed to fit the platform's
/// address encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportAddress {
    path: PathBuf,
}

impl TransportAddress {
    /// The filesystem path naming this endpoint.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Display for TransportAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Resolve a logical endpoint name to a transport address.
///
/// Pure concatenation of `prefix` and `name`; no I/O.
///
/// # Panics
///
/// Panics when the concatenation would not leave room for the terminating
/// NUL in `sockaddr_un.sun_path`. The capacity is a fixed platform limit
/// known at compile time, so an oversized name is a caller bug rather
/// than a runtime condition.
pub fn resolve(prefix: &str, name: &str) -> TransportAddress {
    let len = prefix.len() + name.len();
    assert!(
        len <= ADDRESS_CAPACITY - 1,
        "endpoint name too long: {len} bytes (address capacity {ADDRESS_CAPACITY})"
    );
    TransportAddress {
        path: PathBuf::from(format!("{prefix}{name}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_concatenates_prefix_and_name() {
        let addr = resolve(NAMESPACE_PREFIX, "leader");
        assert_eq!(addr.path(), Path::new("/tmp/leader"));
    }

    #[test]
    fn resolve_is_deterministic() {
        let a = resolve("/run/", "node-a");
        let b = resolve("/run/", "node-a");
        assert_eq!(a, b);
    }

    #[test]
    fn longest_fitting_name_is_accepted() {
        let name = "x".repeat(ADDRESS_CAPACITY - 1 - NAMESPACE_PREFIX.len());
        let addr = resolve(NAMESPACE_PREFIX, &name);
        assert_eq!(
            addr.path().as_os_str().len(),
            ADDRESS_CAPACITY - 1,
            "resolved path must leave room for the terminator"
        );
    }

    #[test]
    #[should_panic(expected = "endpoint name too long")]
    fn oversized_name_panics() {
        let name = "x".repeat(ADDRESS_CAPACITY);
        let _ = resolve(NAMESPACE_PREFIX, &name);
    }

    #[test]
    fn display_matches_path() {
        let addr = resolve("/tmp/", "display-check");
        assert_eq!(addr.to_string(), "/tmp/display-check");
    }
}
