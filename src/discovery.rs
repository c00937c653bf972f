//! Bridge discovery through the Hue discovery endpoint.

use std::net::IpAddr;
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::errors::Error;
use crate::pairing::{Pairing, PairingRequest};

type Result<T> = std::result::Result<T, Error>;

/// The public endpoint listing the bridges behind the caller's address.
pub const DISCOVERY_URL: &str = "https://discovery.meethue.com/";

/// A Hue bridge found on the network.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiscoveredBridge {
    /// Bridge id, derived from its MAC address
    pub id: String,
    /// Address of the bridge on the local network
    #[serde(rename = "internalipaddress")]
    pub ip: IpAddr,
    #[serde(default)]
    pub port: Option<u16>,
}

impl DiscoveredBridge {
    /// The host to reach the bridge at, as used in a [`crate::Credential`].
    ///
    /// The API is served over plain HTTP on port 80, so the port is only
    /// kept when it is neither 80 nor the HTTPS port 443 the discovery
    /// endpoint reports for every bridge.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge::DiscoveredBridge;
    ///
    /// let bridge = DiscoveredBridge {
    ///     id: "001788fffe100491".into(),
    ///     ip: "192.168.2.23".parse().unwrap(),
    ///     port: Some(443),
    /// };
    /// assert_eq!(bridge.host(), "192.168.2.23");
    /// ```
    pub fn host(&self) -> String {
        let ip = match self.ip {
            IpAddr::V4(ip) => ip.to_string(),
            IpAddr::V6(ip) => format!("[{ip}]"),
        };
        match self.port {
            Some(port) if port != 80 && port != 443 => format!("{ip}:{port}"),
            _ => ip,
        }
    }

    /// Start pairing with this bridge.
    pub fn into_pairing(self, request: PairingRequest) -> Pairing {
        Pairing::new(&self.host(), request)
    }
}

/// Asks the Hue discovery endpoint for the bridges on this network.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use hue_bridge::discover_bridges;
///
/// let bridges = discover_bridges(Duration::from_secs(5))?;
/// for bridge in bridges {
///     println!("  {} - {}", bridge.ip, bridge.id);
/// }
/// # Ok::<(), hue_bridge::Error>(())
/// ```
pub fn discover_bridges(timeout: Duration) -> Result<Vec<DiscoveredBridge>> {
    discover_bridges_at(DISCOVERY_URL, timeout)
}

/// Like [`discover_bridges`], against another discovery endpoint.
pub fn discover_bridges_at(url: &str, timeout: Duration) -> Result<Vec<DiscoveredBridge>> {
    let client = Client::builder().timeout(timeout).build()?;
    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus(status.as_u16()));
    }

    let text = response.text()?;
    debug!("discovery response: {}", text);
    serde_json::from_str(&text).map_err(Error::JsonLoad)
}
