//! Port definition for the network reachability gate.

use async_trait::async_trait;

/// Coarse "is some network path available" signal.
///
/// No distinction is made between missing hardware, airplane mode or a
/// captive portal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReachabilityPort: Send + Sync {
    /// Returns true if a remote fetch is worth attempting.
    async fn is_network_reachable(&self) -> bool;
}
