//! Authenticated session with a Hue bridge.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use reqwest::Method;
use serde_json::{Value, json};

use crate::client::Transport;
use crate::config::{Credential, default_config_path};
use crate::errors::Error;
use crate::light::{Light, NewLights, parse_light_names, parse_lights, parse_new_lights};
use crate::pairing::{Pairing, PairingRequest};
use crate::state::LightState;

type Result<T> = std::result::Result<T, Error>;

/// A session with one Hue bridge.
///
/// A `HueBridge` only exists with a credential: either one loaded from the
/// credential file or one obtained by pairing. Every method maps to exactly
/// one blocking HTTP request.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use hue_bridge::{HueBridge, LightAlert, LightState};
///
/// let bridge = HueBridge::open(Path::new("hue_bridge_config.json"))?;
/// for (id, name) in bridge.lights()? {
///     println!("{id}: {name}");
///     bridge.set_light_state(id, &LightState::from(LightAlert::Select))?;
/// }
/// # Ok::<(), hue_bridge::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct HueBridge {
    credential: Credential,
    transport: Transport,
}

impl HueBridge {
    pub fn builder() -> HueBridgeBuilder {
        HueBridgeBuilder::default()
    }

    /// Opens a session with the credential stored at `config_path`.
    ///
    /// Fails with an authentication error when there is no credential
    /// there; use [`HueBridge::builder`] with a host to pair instead.
    pub fn open(config_path: &Path) -> Result<Self> {
        Self::builder().config_path(config_path).open()
    }

    /// Opens a session with a credential already at hand.
    pub fn from_credential(credential: Credential) -> Result<Self> {
        Self::with_transport_options(
            credential,
            Transport::DEFAULT_TIMEOUT,
            crate::DEFAULT_LOG_TARGET,
        )
    }

    fn with_transport_options(
        credential: Credential,
        timeout: Duration,
        log_target: &str,
    ) -> Result<Self> {
        let transport = Transport::new(&credential.host, timeout, log_target)?
            .with_username(&credential.username);
        Ok(HueBridge {
            credential,
            transport,
        })
    }

    pub fn host(&self) -> &str {
        self.transport.host()
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Authenticated GET of `resource`, relative to `/api/<username>`.
    pub fn get(&self, resource: &str) -> Result<Value> {
        self.transport.request(Method::GET, resource, None)
    }

    pub fn put(&self, resource: &str, body: &Value) -> Result<Value> {
        self.transport.request(Method::PUT, resource, Some(body))
    }

    pub fn post(&self, resource: &str, body: &Value) -> Result<Value> {
        self.transport.request(Method::POST, resource, Some(body))
    }

    pub fn delete(&self, resource: &str) -> Result<Value> {
        self.transport.request(Method::DELETE, resource, None)
    }

    /// Everything the bridge knows: lights, groups, config, schedules...
    pub fn get_full_state(&self) -> Result<Value> {
        self.get("")
    }

    pub fn get_configuration(&self) -> Result<Value> {
        self.get("config")
    }

    pub fn set_configuration(&self, config: &Value) -> Result<()> {
        self.put("config", config)?;
        Ok(())
    }

    /// Fetches the `id -> name` map of every light the bridge knows.
    pub fn lights(&self) -> Result<BTreeMap<u32, String>> {
        let body = self.get("lights")?;
        parse_light_names(&body)
    }

    /// Fetches every light with all its attributes.
    pub fn get_lights(&self) -> Result<BTreeMap<u32, Light>> {
        parse_lights(self.get("lights")?)
    }

    pub fn get_light(&self, light_id: u32) -> Result<Light> {
        let body = self.get(&format!("lights/{light_id}"))?;
        serde_json::from_value(body).map_err(Error::JsonLoad)
    }

    /// Lights discovered by the last search. The list is cleared whenever a
    /// new search starts.
    pub fn get_new_lights(&self) -> Result<NewLights> {
        let body = self.get("lights/new")?;
        parse_new_lights(&body)
    }

    pub fn rename_light(&self, light_id: u32, name: &str) -> Result<()> {
        self.put(&format!("lights/{light_id}"), &json!({ "name": name }))?;
        Ok(())
    }

    /// Applies a state change to a light.
    ///
    /// Only the options set on `state` are sent. Whether `light_id` exists is
    /// left to the bridge, which answers with an error for unknown lights.
    pub fn set_light_state(&self, light_id: u32, state: &LightState) -> Result<()> {
        if !state.is_valid() {
            return Err(Error::NoAttribute);
        }
        let body = state.to_json()?;
        let response = self.put(&format!("lights/{light_id}/state"), &body)?;
        debug!(target: self.transport.log_target(), "light {} updated: {}", light_id, response);
        Ok(())
    }

    /// Applies a state change given as `(option name, value)` pairs.
    ///
    /// Nothing is sent when an option is unknown or invalid.
    pub fn set_light_options<I, K>(&self, light_id: u32, options: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let state = LightState::from_options(options)?;
        self.set_light_state(light_id, &state)
    }
}

impl fmt::Display for HueBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hue bridge at {}", self.host())
    }
}

/// Configures how a [`HueBridge`] session is opened.
///
/// Without a host, [`HueBridgeBuilder::open`] only loads an existing
/// credential. With one, a missing credential triggers pairing with that
/// bridge and the new credential is saved to the config path.
#[derive(Debug, Clone)]
pub struct HueBridgeBuilder {
    config_path: Option<PathBuf>,
    host: Option<String>,
    pairing: Option<PairingRequest>,
    pairing_attempts: u32,
    pairing_interval: Duration,
    timeout: Duration,
    log_target: String,
}

impl Default for HueBridgeBuilder {
    fn default() -> Self {
        HueBridgeBuilder {
            config_path: None,
            host: None,
            pairing: None,
            pairing_attempts: Pairing::DEFAULT_ATTEMPTS,
            pairing_interval: Pairing::DEFAULT_INTERVAL,
            timeout: Transport::DEFAULT_TIMEOUT,
            log_target: crate::DEFAULT_LOG_TARGET.to_string(),
        }
    }
}

impl HueBridgeBuilder {
    pub const DEFAULT_APPLICATION_NAME: &'static str = "hue_bridge";
    pub const DEFAULT_DEVICE_NAME: &'static str = "rust";

    /// Credential file to load, and to write after pairing. Defaults to
    /// [`default_config_path`].
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Bridge to pair with when no credential is stored.
    pub fn host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    pub fn pairing_request(mut self, request: PairingRequest) -> Self {
        self.pairing = Some(request);
        self
    }

    pub fn pairing_attempts(mut self, attempts: u32) -> Self {
        self.pairing_attempts = attempts;
        self
    }

    pub fn pairing_interval(mut self, interval: Duration) -> Self {
        self.pairing_interval = interval;
        self
    }

    /// Timeout of every request made by the session.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Log target of every record the session emits.
    pub fn log_target(mut self, target: &str) -> Self {
        self.log_target = target.to_string();
        self
    }

    pub fn open(self) -> Result<HueBridge> {
        let path = match &self.config_path {
            Some(path) => path.clone(),
            None => default_config_path()?,
        };

        let credential = match Credential::load(&path)? {
            Some(credential) => {
                debug!(target: self.log_target.as_str(), "loaded credential from {:?}", path);
                credential
            }
            None => self.pair(&path)?,
        };

        HueBridge::with_transport_options(credential, self.timeout, &self.log_target)
    }

    fn pair(&self, path: &Path) -> Result<Credential> {
        let Some(host) = &self.host else {
            return Err(Error::Authentication(format!(
                "no credential in {path:?} and no bridge to pair with"
            )));
        };
        let request = match &self.pairing {
            Some(request) => request.clone(),
            None => PairingRequest::new(Self::DEFAULT_APPLICATION_NAME, Self::DEFAULT_DEVICE_NAME)?,
        };

        Pairing::new(host, request)
            .attempts(self.pairing_attempts)
            .interval(self.pairing_interval)
            .timeout(self.timeout)
            .log_target(&self.log_target)
            .run_and_save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_display() {
        let bridge = HueBridge::from_credential(Credential::new("192.168.1.20", "abc")).unwrap();
        assert_eq!(bridge.to_string(), "Hue bridge at 192.168.1.20");
        assert_eq!(bridge.host(), "192.168.1.20");
    }

    #[test]
    fn test_empty_state_is_rejected_locally() {
        // Nothing listens on this address; reaching the network would fail
        // with a different error.
        let bridge = HueBridge::from_credential(Credential::new("192.0.2.1", "abc")).unwrap();
        let err = bridge.set_light_state(1, &LightState::new()).unwrap_err();
        assert_eq!(err, Error::NoAttribute);
    }

    #[test]
    fn test_open_without_credential_or_host() {
        let path = std::env::temp_dir()
            .join(format!("hue-bridge-open-{}", std::process::id()))
            .join("missing.json");
        let err = HueBridge::open(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert!(!path.exists());
    }
}
