//! Alert effects.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// The values accepted by the `alert` option of a light.
///
/// An alert is a temporary change to the bulb's state. The bridge keeps the
/// last alert sent rather than the current one: once a breathe cycle is over
/// it does not reset the alert to [`LightAlert::None`].
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use hue_bridge::LightAlert;
///
/// assert_eq!(LightAlert::from_str("lselect").unwrap(), LightAlert::LSelect);
/// assert_eq!(LightAlert::Select.to_string(), "select");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LightAlert {
    /// The light is not performing an alert effect.
    None,
    /// One breathe cycle.
    Select,
    /// Breathe cycles for 15 seconds or until an alert of `none` is received.
    LSelect,
}
