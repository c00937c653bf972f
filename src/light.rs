//! Lights as reported by the bridge.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// Attributes of a light.
///
/// Every light has a name; the other attributes depend on the model and
/// firmware and default to empty.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Light {
    pub name: String,
    #[serde(default)]
    pub uniqueid: String,
    #[serde(rename = "type", default)]
    pub light_type: String,
    #[serde(default)]
    pub modelid: String,
    #[serde(default)]
    pub manufacturername: String,
    #[serde(default)]
    pub productid: Option<String>,
    #[serde(default)]
    pub swversion: String,
    #[serde(default)]
    pub swconfigid: Option<String>,
    #[serde(default)]
    pub state: LightStatus,
}

/// Current state of a light.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct LightStatus {
    pub on: bool,
    /// Brightness
    pub bri: Option<u8>,
    pub hue: Option<u16>,
    pub sat: Option<u8>,
    pub xy: Option<[f64; 2]>,
    /// Color tone, in mired
    pub ct: Option<u16>,
    /// Last alert sent, not necessarily the one running
    pub alert: Option<String>,
    pub effect: Option<String>,
    pub colormode: Option<String>,
    pub mode: Option<String>,
    pub reachable: bool,
}

/// Lights found by the last search for new lights.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NewLights {
    pub lights: BTreeMap<u32, String>,
    /// `"active"` while a search runs, `"none"` if none ran yet, otherwise the
    /// time the last search started.
    pub last_scan: Option<String>,
}

/// Reads the `id -> name` pairs out of a lights resource.
pub(crate) fn parse_light_names(body: &Value) -> Result<BTreeMap<u32, String>> {
    let lights = as_object(body)?;
    lights.iter().map(|(id, light)| parse_entry(id, light)).collect()
}

pub(crate) fn parse_lights(body: Value) -> Result<BTreeMap<u32, Light>> {
    let lights = match body {
        Value::Object(lights) => lights,
        other => {
            return Err(Error::Protocol(format!(
                "expected a lights object, got {other}"
            )));
        }
    };
    lights
        .into_iter()
        .map(|(id, light)| {
            let light: Light = serde_json::from_value(light).map_err(Error::JsonLoad)?;
            Ok((parse_id(&id)?, light))
        })
        .collect()
}

pub(crate) fn parse_new_lights(body: &Value) -> Result<NewLights> {
    let mut new = NewLights::default();
    for (key, value) in as_object(body)? {
        if key == "lastscan" {
            new.last_scan = value.as_str().map(String::from);
            continue;
        }
        let (id, name) = parse_entry(key, value)?;
        new.lights.insert(id, name);
    }
    Ok(new)
}

fn as_object(body: &Value) -> Result<&Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| Error::Protocol(format!("expected a lights object, got {body}")))
}

fn parse_entry(id: &str, light: &Value) -> Result<(u32, String)> {
    let name = light
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Protocol(format!("light {id} has no name")))?;
    Ok((parse_id(id)?, name.to_string()))
}

fn parse_id(id: &str) -> Result<u32> {
    id.parse()
        .map_err(|_| Error::Protocol(format!("light id {id:?} is not an integer")))
}
