//! Light state changes sent to the bridge.

use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::errors::Error;
use crate::types::{Brightness, CieXy, ColorTemperature, LightAlert, LightEffect, Saturation};

type Result<T> = std::result::Result<T, Error>;

/// A state change to send to a Hue light.
///
/// Only the options that were set end up in the request body, so anything
/// left unset keeps its current value on the device.
///
/// # Creating States
///
/// 1. **Builder pattern** with typed values:
///    ```
///    use hue_bridge::{Brightness, LightState, LightEffect};
///    let mut state = LightState::new();
///    state
///        .on(true)
///        .brightness(&Brightness::create(200).unwrap())
///        .effect(LightEffect::ColorLoop);
///    assert!(state.is_valid());
///    ```
///
/// 2. **By option name** for callers driven by configuration:
///    ```
///    use hue_bridge::LightState;
///    use serde_json::json;
///    let state = LightState::from_options([("on", json!(true)), ("bri", json!(200))]).unwrap();
///    assert_eq!(state.to_json().unwrap(), json!({"on": true, "bri": 200}));
///
///    assert!(LightState::from_options([("blink", json!(true))]).is_err());
///    ```
///
/// A state cannot be deserialized directly, so every option goes through the
/// checks above:
///
/// ```compile_fail
/// use hue_bridge::LightState;
/// use serde_json::json;
/// let state: LightState = serde_json::from_value(json!({"bri": 0})).unwrap();
/// ```
#[serde_with::skip_serializing_none]
#[derive(Default, Debug, Serialize, Clone, PartialEq)]
pub struct LightState {
    pub(crate) on: Option<bool>,
    pub(crate) bri: Option<u8>,
    pub(crate) bri_inc: Option<i16>,
    pub(crate) hue: Option<u16>,
    pub(crate) hue_inc: Option<i32>,
    pub(crate) sat: Option<u8>,
    pub(crate) sat_inc: Option<i16>,
    pub(crate) xy: Option<CieXy>,
    pub(crate) xy_inc: Option<[f64; 2]>,
    pub(crate) ct: Option<u16>,
    pub(crate) ct_inc: Option<i16>,
    pub(crate) alert: Option<LightAlert>,
    pub(crate) effect: Option<LightEffect>,
    pub(crate) transitiontime: Option<u16>,
}

impl LightState {
    /// Every option name the bridge accepts in a light state body.
    pub const OPTIONS: [&'static str; 14] = [
        "on",
        "bri",
        "bri_inc",
        "hue",
        "hue_inc",
        "sat",
        "sat_inc",
        "xy",
        "xy_inc",
        "ct",
        "ct_inc",
        "alert",
        "effect",
        "transitiontime",
    ];

    const BRI_INC: (i64, i64) = (-254, 254);
    const HUE_INC: (i64, i64) = (-65534, 65534);
    const SAT_INC: (i64, i64) = (-254, 254);
    const CT_INC: (i64, i64) = (-364, 635);
    const XY_INC: f64 = 0.5;

    /// Create a new empty state.
    ///
    /// At least one option must be set for the state to be sent.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge::LightState;
    ///
    /// let state = LightState::new();
    /// assert_eq!(state.is_valid(), false);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from `(option name, value)` pairs.
    ///
    /// Fails on the first unrecognized name, mistyped value or value out of
    /// range.
    pub fn from_options<I, K>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut state = LightState::new();
        for (name, value) in options {
            state.set_option(name.as_ref(), &value)?;
        }
        Ok(state)
    }

    /// Check if this state contains at least one option.
    pub fn is_valid(&self) -> bool {
        self.on.is_some()
            || self.bri.is_some()
            || self.bri_inc.is_some()
            || self.hue.is_some()
            || self.hue_inc.is_some()
            || self.sat.is_some()
            || self.sat_inc.is_some()
            || self.xy.is_some()
            || self.xy_inc.is_some()
            || self.ct.is_some()
            || self.ct_inc.is_some()
            || self.alert.is_some()
            || self.effect.is_some()
            || self.transitiontime.is_some()
    }

    /// The request body for this state.
    pub fn to_json(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Error::JsonDump)
    }

    /// Set one option by name.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge::{ErrorKind, LightState};
    /// use serde_json::json;
    ///
    /// let mut state = LightState::new();
    /// state.set_option("alert", &json!("lselect")).unwrap();
    ///
    /// let err = state.set_option("bri", &json!(0)).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Validation);
    /// ```
    pub fn set_option(&mut self, name: &str, value: &Value) -> Result<&mut Self> {
        match name {
            "on" => {
                self.on(expect_bool(name, value)?);
            }
            "bri" => {
                let bri = expect_int(name, value, Brightness::MIN.into(), Brightness::MAX.into())?;
                self.bri = Some(bri as u8);
            }
            "bri_inc" => {
                let (min, max) = Self::BRI_INC;
                self.bri_inc = Some(expect_int(name, value, min, max)? as i16);
            }
            "hue" => {
                self.hue = Some(expect_int(name, value, 0, u16::MAX.into())? as u16);
            }
            "hue_inc" => {
                let (min, max) = Self::HUE_INC;
                self.hue_inc = Some(expect_int(name, value, min, max)? as i32);
            }
            "sat" => {
                self.sat = Some(expect_int(name, value, 0, Saturation::MAX.into())? as u8);
            }
            "sat_inc" => {
                let (min, max) = Self::SAT_INC;
                self.sat_inc = Some(expect_int(name, value, min, max)? as i16);
            }
            "xy" => {
                let [x, y] = expect_pair(name, value)?;
                let xy = CieXy::create(x, y)
                    .ok_or_else(|| Error::validation(name, "coordinates must be between 0 and 1"))?;
                self.xy(&xy);
            }
            "xy_inc" => {
                let [x, y] = expect_pair(name, value)?;
                self.xy_inc(x, y)?;
            }
            "ct" => {
                let ct = expect_int(
                    name,
                    value,
                    ColorTemperature::MIN.into(),
                    ColorTemperature::MAX.into(),
                )?;
                self.ct = Some(ct as u16);
            }
            "ct_inc" => {
                let (min, max) = Self::CT_INC;
                self.ct_inc = Some(expect_int(name, value, min, max)? as i16);
            }
            "alert" => {
                let alert = expect_str(name, value)?;
                let alert = LightAlert::from_str(alert)
                    .map_err(|_| Error::validation(name, format!("unknown alert {alert:?}")))?;
                self.alert(alert);
            }
            "effect" => {
                let effect = expect_str(name, value)?;
                let effect = LightEffect::from_str(effect)
                    .map_err(|_| Error::validation(name, format!("unknown effect {effect:?}")))?;
                self.effect(effect);
            }
            "transitiontime" => {
                let time = expect_int(name, value, 0, u16::MAX.into())?;
                self.transitiontime = Some(time as u16);
            }
            _ => return Err(Error::validation(name, "unrecognized option")),
        }
        Ok(self)
    }

    /// Turn the light on or off.
    pub fn on(&mut self, on: bool) -> &mut Self {
        self.on = Some(on);
        self
    }

    pub fn brightness(&mut self, brightness: &Brightness) -> &mut Self {
        self.bri = Some(brightness.value);
        self
    }

    /// Change the brightness relative to its current value.
    ///
    /// Ignored by the bridge if an absolute brightness is also set. A delta
    /// of 0 stops an ongoing brightness transition.
    pub fn brightness_inc(&mut self, delta: i16) -> Result<&mut Self> {
        let (min, max) = Self::BRI_INC;
        check_range("bri_inc", delta.into(), min, max)?;
        self.bri_inc = Some(delta);
        Ok(self)
    }

    /// Set the hue, a wrapping value where 0 and 65535 are red, 25500 is
    /// green and 46920 is blue.
    pub fn hue(&mut self, hue: u16) -> &mut Self {
        self.hue = Some(hue);
        self
    }

    /// Change the hue relative to its current value, wrapping around.
    pub fn hue_inc(&mut self, delta: i32) -> Result<&mut Self> {
        let (min, max) = Self::HUE_INC;
        check_range("hue_inc", delta.into(), min, max)?;
        self.hue_inc = Some(delta);
        Ok(self)
    }

    pub fn saturation(&mut self, saturation: &Saturation) -> &mut Self {
        self.sat = Some(saturation.value);
        self
    }

    pub fn saturation_inc(&mut self, delta: i16) -> Result<&mut Self> {
        let (min, max) = Self::SAT_INC;
        check_range("sat_inc", delta.into(), min, max)?;
        self.sat_inc = Some(delta);
        Ok(self)
    }

    pub fn xy(&mut self, xy: &CieXy) -> &mut Self {
        self.xy = Some(*xy);
        self
    }

    /// Move the color in CIE space. The bridge stops at the gamut boundaries.
    pub fn xy_inc(&mut self, dx: f64, dy: f64) -> Result<&mut Self> {
        let valid = |v: f64| (-Self::XY_INC..=Self::XY_INC).contains(&v);
        if !valid(dx) || !valid(dy) {
            return Err(Error::validation(
                "xy_inc",
                "increments must be between -0.5 and 0.5",
            ));
        }
        self.xy_inc = Some([dx, dy]);
        Ok(self)
    }

    pub fn color_temperature(&mut self, temperature: &ColorTemperature) -> &mut Self {
        self.ct = Some(temperature.mired);
        self
    }

    pub fn color_temperature_inc(&mut self, delta: i16) -> Result<&mut Self> {
        let (min, max) = Self::CT_INC;
        check_range("ct_inc", delta.into(), min, max)?;
        self.ct_inc = Some(delta);
        Ok(self)
    }

    pub fn alert(&mut self, alert: LightAlert) -> &mut Self {
        self.alert = Some(alert);
        self
    }

    pub fn effect(&mut self, effect: LightEffect) -> &mut Self {
        self.effect = Some(effect);
        self
    }

    /// Set the transition duration, in multiples of 100ms. The bridge uses
    /// 4 (400ms) when this is not set.
    pub fn transition_time(&mut self, deciseconds: u16) -> &mut Self {
        self.transitiontime = Some(deciseconds);
        self
    }
}

impl From<LightAlert> for LightState {
    fn from(alert: LightAlert) -> Self {
        let mut s = LightState::new();
        s.alert(alert);
        s
    }
}

impl From<LightEffect> for LightState {
    fn from(effect: LightEffect) -> Self {
        let mut s = LightState::new();
        s.effect(effect);
        s
    }
}

impl From<&Brightness> for LightState {
    fn from(brightness: &Brightness) -> Self {
        let mut s = LightState::new();
        s.brightness(brightness);
        s
    }
}

impl From<&ColorTemperature> for LightState {
    fn from(temperature: &ColorTemperature) -> Self {
        let mut s = LightState::new();
        s.color_temperature(temperature);
        s
    }
}

fn check_range(option: &str, value: i64, min: i64, max: i64) -> Result<i64> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(Error::validation(
            option,
            format!("value must be between {min} and {max}, got {value}"),
        ))
    }
}

fn expect_bool(option: &str, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| Error::validation(option, "expected a boolean"))
}

fn expect_int(option: &str, value: &Value, min: i64, max: i64) -> Result<i64> {
    let value = value
        .as_i64()
        .ok_or_else(|| Error::validation(option, "expected an integer"))?;
    check_range(option, value, min, max)
}

fn expect_str<'a>(option: &str, value: &'a Value) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| Error::validation(option, "expected a string"))
}

fn expect_pair(option: &str, value: &Value) -> Result<[f64; 2]> {
    match value.as_array().map(Vec::as_slice) {
        Some([x, y]) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => Ok([x, y]),
            _ => Err(Error::validation(option, "expected two numbers")),
        },
        _ => Err(Error::validation(option, "expected a pair of numbers")),
    }
}
