//! Bridge response interpretation.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// Error type the bridge reports while the link button has not been pressed.
pub const LINK_BUTTON_NOT_PRESSED: u16 = 101;

/// An error entry from a bridge response list.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub(crate) struct BridgeErrorPayload {
    #[serde(rename = "type")]
    pub kind: u16,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
}

impl From<BridgeErrorPayload> for Error {
    fn from(payload: BridgeErrorPayload) -> Self {
        Error::Bridge {
            kind: payload.kind,
            address: payload.address,
            description: payload.description,
        }
    }
}

/// Interprets a decoded bridge response body.
///
/// Writes answer with a list of `{"success": ...}` / `{"error": ...}`
/// entries; reads answer with a plain object. Any error entry wins over the
/// successes around it, otherwise the first success is the result.
pub(crate) fn parse_response(body: Value) -> Result<Value> {
    match body {
        Value::Array(entries) => {
            let mut success = None;
            for mut entry in entries {
                if let Some(error) = entry.get_mut("error") {
                    let payload: BridgeErrorPayload =
                        serde_json::from_value(error.take()).map_err(Error::JsonLoad)?;
                    return Err(payload.into());
                }
                if success.is_none() {
                    success = entry.get_mut("success").map(Value::take);
                }
            }
            success.ok_or_else(|| Error::Protocol("no success or error entry in list".into()))
        }
        Value::Object(_) => Ok(body),
        other => Err(Error::Protocol(format!("unexpected response {other}"))),
    }
}
