//! Network reachability checks.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::net::UdpSocket;
use tracing::{debug, warn};

use crate::domain::errors::FetchError;
use crate::domain::ports::ReachabilityPort;

/// Default endpoints used to ask the OS for a route. Nothing is sent to them.
const ROUTE_TARGETS: [&str; 2] = ["1.1.1.1:53", "[2606:4700:4700::1111]:53"];

/// Default URL for [`ProbeReachability`].
pub const DEFAULT_PROBE_URL: &str = "http://connectivitycheck.gstatic.com/generate_204";

/// Strategy used to answer "is the network reachable".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReachabilityMode {
    /// Ask the OS whether any route to the internet exists.
    #[default]
    Route,
    /// Send a HEAD request to a probe URL.
    Probe,
    /// Always reachable.
    Online,
    /// Never reachable; only cached images load.
    Offline,
}

impl std::fmt::Display for ReachabilityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Route => write!(f, "route"),
            Self::Probe => write!(f, "probe"),
            Self::Online => write!(f, "online"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// Reports reachable if a UDP socket can be connected to a public address.
///
/// Connecting a UDP socket only consults the routing table, so this answers
/// the same coarse question an OS "no network" indicator does.
#[derive(Debug, Clone)]
pub struct RouteReachability {
    targets: Vec<SocketAddr>,
}

impl RouteReachability {
    /// Uses the built-in public targets.
    #[must_use]
    pub fn new() -> Self {
        Self::with_targets(ROUTE_TARGETS.iter().filter_map(|t| t.parse().ok()).collect())
    }

    /// Uses explicit targets; reachable if any of them routes.
    #[must_use]
    pub const fn with_targets(targets: Vec<SocketAddr>) -> Self {
        Self { targets }
    }

    async fn routes_to(target: SocketAddr) -> std::io::Result<()> {
        let bind: SocketAddr = if target.is_ipv4() {
            ([0u8; 4], 0).into()
        } else {
            ([0u16; 8], 0).into()
        };
        let socket = UdpSocket::bind(bind).await?;
        socket.connect(target).await
    }
}

impl Default for RouteReachability {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReachabilityPort for RouteReachability {
    async fn is_network_reachable(&self) -> bool {
        for target in &self.targets {
            match Self::routes_to(*target).await {
                Ok(()) => return true,
                Err(e) => debug!(target = %target, error = %e, "No route"),
            }
        }
        false
    }
}

/// Reports reachable if a HEAD request to the probe URL gets any response.
#[derive(Debug, Clone)]
pub struct ProbeReachability {
    client: reqwest::Client,
    probe_url: String,
}

impl ProbeReachability {
    /// Creates a probe with the given URL and timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(probe_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::transport(format!("Failed to create probe client: {e}")))?;
        Ok(Self {
            client,
            probe_url: probe_url.into(),
        })
    }
}

#[async_trait]
impl ReachabilityPort for ProbeReachability {
    async fn is_network_reachable(&self) -> bool {
        match self.client.head(&self.probe_url).send().await {
            Ok(resp) => {
                debug!(url = %self.probe_url, status = %resp.status(), "Probe answered");
                true
            }
            Err(e) => {
                debug!(url = %self.probe_url, error = %e, "Probe request failed");
                false
            }
        }
    }
}

/// Constant answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedReachability(pub bool);

#[async_trait]
impl ReachabilityPort for FixedReachability {
    async fn is_network_reachable(&self) -> bool {
        self.0
    }
}

/// Builds the reachability check selected by `mode`.
///
/// # Errors
/// Returns error if the probe client cannot be created.
pub fn build_reachability(
    mode: ReachabilityMode,
    probe_url: &str,
    probe_timeout: Duration,
) -> Result<Arc<dyn ReachabilityPort>, FetchError> {
    let check: Arc<dyn ReachabilityPort> = match mode {
        ReachabilityMode::Route => Arc::new(RouteReachability::new()),
        ReachabilityMode::Probe => Arc::new(ProbeReachability::new(probe_url, probe_timeout)?),
        ReachabilityMode::Online => Arc::new(FixedReachability(true)),
        ReachabilityMode::Offline => {
            warn!("Reachability forced offline; only cached images will load");
            Arc::new(FixedReachability(false))
        }
    };
    Ok(check)
}
