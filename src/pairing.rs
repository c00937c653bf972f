//! Link-button pairing.
//!
//! A bridge only hands out a username to clients that ask for one while its
//! physical link button is armed (for 30 seconds after a press). Until the
//! button is pressed every attempt is answered with error type 101, so the
//! flow keeps asking until it succeeds or runs out of attempts.

use std::path::Path;
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::client::Transport;
use crate::config::Credential;
use crate::errors::Error;
use crate::response::LINK_BUTTON_NOT_PRESSED;

type Result<T> = std::result::Result<T, Error>;

/// Identifies the application asking to be paired.
///
/// The bridge stores the pair as `<application>#<device>` so a user can tell
/// which token belongs to what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingRequest {
    application_name: String,
    device_name: String,
    generate_client_key: bool,
}

impl PairingRequest {
    pub const MAX_APPLICATION_NAME: usize = 20;
    pub const MAX_DEVICE_NAME: usize = 19;

    /// # Examples
    ///
    /// ```
    /// use hue_bridge::PairingRequest;
    ///
    /// let request = PairingRequest::new("hue_bridge", "desk").unwrap();
    /// assert_eq!(request.devicetype(), "hue_bridge#desk");
    ///
    /// assert!(PairingRequest::new("an-application-name-too-long", "desk").is_err());
    /// ```
    pub fn new(application_name: &str, device_name: &str) -> Result<Self> {
        check_name(
            "application_name",
            application_name,
            Self::MAX_APPLICATION_NAME,
        )?;
        check_name("device_name", device_name, Self::MAX_DEVICE_NAME)?;
        Ok(PairingRequest {
            application_name: application_name.to_string(),
            device_name: device_name.to_string(),
            generate_client_key: false,
        })
    }

    /// Also ask for a random 16 byte client key (returned as 32 hex digits).
    pub fn generate_client_key(mut self, generate: bool) -> Self {
        self.generate_client_key = generate;
        self
    }

    pub fn devicetype(&self) -> String {
        format!("{}#{}", self.application_name, self.device_name)
    }

    fn body(&self) -> Value {
        let mut body = json!({ "devicetype": self.devicetype() });
        if self.generate_client_key {
            body["generateclientkey"] = Value::Bool(true);
        }
        body
    }
}

fn check_name(option: &str, name: &str, max: usize) -> Result<()> {
    if name.chars().count() > max {
        return Err(Error::validation(
            option,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(())
}

/// Where a [`Pairing`] stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingState {
    Unpaired,
    /// Waiting for the link button; `attempt` counts from 1.
    Pairing { attempt: u32 },
    Paired(Credential),
}

#[derive(Debug, Deserialize)]
struct PairingSuccess {
    username: String,
    #[serde(default)]
    clientkey: Option<String>,
}

/// The pairing handshake with one bridge.
#[derive(Debug)]
pub struct Pairing {
    host: String,
    request: PairingRequest,
    attempts: u32,
    interval: Duration,
    timeout: Duration,
    log_target: String,
    state: PairingState,
}

impl Pairing {
    pub const DEFAULT_ATTEMPTS: u32 = 30;
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

    pub fn new(host: &str, request: PairingRequest) -> Self {
        Pairing {
            host: host.to_string(),
            request,
            attempts: Self::DEFAULT_ATTEMPTS,
            interval: Self::DEFAULT_INTERVAL,
            timeout: Transport::DEFAULT_TIMEOUT,
            log_target: crate::DEFAULT_LOG_TARGET.to_string(),
            state: PairingState::Unpaired,
        }
    }

    /// How many times to ask before giving up.
    pub fn attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    /// Pause between two attempts.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn log_target(mut self, target: &str) -> Self {
        self.log_target = target.to_string();
        self
    }

    pub fn state(&self) -> &PairingState {
        &self.state
    }

    /// Asks the bridge for a username until the link button is pressed or
    /// the attempts run out.
    ///
    /// Only a missing button press is retried; any other failure ends the
    /// handshake right away. On failure the state goes back to
    /// [`PairingState::Unpaired`].
    pub fn run(&mut self) -> Result<Credential> {
        let result = self.handshake();
        match &result {
            Ok(credential) => self.state = PairingState::Paired(credential.clone()),
            Err(e) => {
                warn!(target: self.log_target.as_str(), "pairing with {} failed: {}", self.host, e);
                self.state = PairingState::Unpaired;
            }
        }
        result
    }

    /// Like [`Pairing::run`], then writes the credential to `path`.
    ///
    /// Nothing is written when pairing fails.
    pub fn run_and_save(&mut self, path: &Path) -> Result<Credential> {
        let credential = self.run()?;
        credential.save(path)?;
        debug!(target: self.log_target.as_str(), "credential written to {:?}", path);
        Ok(credential)
    }

    fn handshake(&mut self) -> Result<Credential> {
        let transport = Transport::new(&self.host, self.timeout, &self.log_target)?;
        let body = self.request.body();

        for attempt in 1..=self.attempts {
            self.state = PairingState::Pairing { attempt };
            match transport.request(Method::POST, "", Some(&body)) {
                Ok(success) => {
                    let success: PairingSuccess =
                        serde_json::from_value(success).map_err(Error::JsonLoad)?;
                    info!(target: self.log_target.as_str(), "paired with bridge at {}", self.host);
                    return Ok(Credential {
                        host: self.host.clone(),
                        username: success.username,
                        clientkey: success.clientkey,
                    });
                }
                Err(e) if e.bridge_error_type() == Some(LINK_BUTTON_NOT_PRESSED) => {
                    info!(
                        target: self.log_target.as_str(),
                        "link button not pressed yet (attempt {}/{})", attempt, self.attempts
                    );
                    if attempt < self.attempts {
                        thread::sleep(self.interval);
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Err(Error::Authentication(format!(
            "link button was not pressed within {} attempts",
            self.attempts
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_name_limits() {
        assert!(PairingRequest::new(&"a".repeat(20), &"d".repeat(19)).is_ok());

        let err = PairingRequest::new(&"a".repeat(21), "desk").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let err = PairingRequest::new("app", &"d".repeat(20)).unwrap_err();
        assert_eq!(
            err,
            Error::validation("device_name", "must be at most 19 characters")
        );
    }

    #[test]
    fn test_body() {
        let request = PairingRequest::new("app", "desk").unwrap();
        assert_eq!(request.body(), json!({"devicetype": "app#desk"}));

        let request = request.generate_client_key(true);
        assert_eq!(
            request.body(),
            json!({"devicetype": "app#desk", "generateclientkey": true})
        );
    }

    #[test]
    fn test_no_attempts_fails_without_contacting_bridge() {
        let request = PairingRequest::new("app", "desk").unwrap();
        let mut pairing = Pairing::new("192.0.2.1", request).attempts(0);

        let err = pairing.run().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(pairing.state(), &PairingState::Unpaired);
    }
}
