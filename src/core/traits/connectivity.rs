//! Connectivity signal
//!
//! Polled once per routing call. When the remote network is unreachable the
//! chain collapses to the local provider.

use std::sync::atomic::{AtomicBool, Ordering};

/// Synchronous reachability predicate
pub trait ConnectivityProbe: Send + Sync {
    fn is_reachable(&self) -> bool;
}

/// Probe that always reports the network as reachable
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysReachable;

impl ConnectivityProbe for AlwaysReachable {
    fn is_reachable(&self) -> bool {
        true
    }
}

/// Probe backed by a flag flipped by an external monitor
#[derive(Debug)]
pub struct StaticConnectivity {
    reachable: AtomicBool,
}

impl StaticConnectivity {
    pub fn new(reachable: bool) -> Self {
        Self {
            reachable: AtomicBool::new(reachable),
        }
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::Relaxed);
    }
}

impl Default for StaticConnectivity {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ConnectivityProbe for StaticConnectivity {
    fn is_reachable(&self) -> bool {
        self.reachable.load(Ordering::Relaxed)
    }
}
