//! Blocking HTTP transport to a bridge.

use std::time::Duration;

use log::{debug, trace};
use reqwest::Method;
use reqwest::blocking::Client;
use serde_json::Value;

use crate::errors::Error;
use crate::response::parse_response;

type Result<T> = std::result::Result<T, Error>;

/// Sends requests to the `api` resource tree of one bridge.
///
/// Requests go to `http://<host>/api/<username>/<resource>`, or to
/// `http://<host>/api` when no username is set (pairing).
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: Client,
    host: String,
    username: Option<String>,
    log_target: String,
}

impl Transport {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(host: &str, timeout: Duration, log_target: &str) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Transport {
            http,
            host: host.to_string(),
            username: None,
            log_target: log_target.to_string(),
        })
    }

    pub fn with_username(mut self, username: &str) -> Self {
        self.username = Some(username.to_string());
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn log_target(&self) -> &str {
        &self.log_target
    }

    pub fn request(&self, method: Method, resource: &str, body: Option<&Value>) -> Result<Value> {
        let url = format!("http://{}/{}", self.host, self.path(resource, false));
        let target = self.log_target.as_str();

        debug!(target: target, "{} request to {}", method, self.path(resource, true));
        let mut request = self.http.request(method, url.as_str());
        if let Some(body) = body {
            trace!(target: target, "request body: {}", body);
            request = request.json(body);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            debug!(target: target, "bridge answered with status {}", status);
            return Err(Error::HttpStatus(status.as_u16()));
        }

        let text = response.text()?;
        debug!(target: target, "response: {}", text);
        let body: Value = serde_json::from_str(&text).map_err(Error::JsonLoad)?;
        parse_response(body)
    }

    fn path(&self, resource: &str, redact: bool) -> String {
        let mut path = String::from("api");
        if let Some(username) = &self.username {
            path.push('/');
            path.push_str(if redact { "<username>" } else { username });
        }
        let resource = resource.trim_matches('/');
        if !resource.is_empty() {
            path.push('/');
            path.push_str(resource);
        }
        path
    }
}
