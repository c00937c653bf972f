//! Dynamic light effects.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// The values accepted by the `effect` option of a light.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LightEffect {
    /// Stop any ongoing color loop.
    None,
    /// Cycle through all hues using the current brightness and saturation.
    ColorLoop,
}
