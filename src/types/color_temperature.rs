//! Color temperature control.

use serde::Serialize;

/// Color temperature in mired, with valid values from 153 (6500K) to 500 (2000K).
///
/// Higher values produce warmer light. Mired is the reciprocal of the
/// temperature in megakelvin, so `mired = 1_000_000 / kelvin`.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(transparent)]
pub struct ColorTemperature {
    pub(crate) mired: u16,
}

impl ColorTemperature {
    pub const MIN: u16 = 153;
    pub const MAX: u16 = 500;

    pub fn mired(&self) -> u16 {
        self.mired
    }

    /// Approximate temperature in Kelvin.
    pub fn kelvin(&self) -> u32 {
        1_000_000 / u32::from(self.mired)
    }

    /// Returns `None` if value is outside the valid range (153-500).
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge::ColorTemperature;
    ///
    /// assert!(ColorTemperature::create(152).is_none());
    /// assert!(ColorTemperature::create(153).is_some());
    /// assert!(ColorTemperature::create(500).is_some());
    /// assert!(ColorTemperature::create(501).is_none());
    /// ```
    pub fn create(mired: u16) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&mired) {
            Some(ColorTemperature { mired })
        } else {
            None
        }
    }

    /// Converts a Kelvin temperature, returning `None` when it falls outside
    /// the range lights accept (2000K-6500K).
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge::ColorTemperature;
    ///
    /// assert_eq!(ColorTemperature::from_kelvin(4000).unwrap().mired(), 250);
    /// assert!(ColorTemperature::from_kelvin(10_000).is_none());
    /// ```
    pub fn from_kelvin(kelvin: u32) -> Option<Self> {
        if kelvin == 0 {
            return None;
        }
        let mired = 1_000_000 / kelvin;
        u16::try_from(mired).ok().and_then(Self::create)
    }
}
