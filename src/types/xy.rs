//! CIE color space coordinates.

use serde::Serialize;

/// A color as x and y coordinates in the CIE color space.
///
/// Both coordinates must be between 0 and 1. When the point lies outside
/// the gamut of a light, the bridge picks the closest color it can show.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[f64; 2]")]
pub struct CieXy {
    x: f64,
    y: f64,
}

impl CieXy {
    /// Returns `None` if either coordinate is outside 0.0-1.0.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge::CieXy;
    ///
    /// assert!(CieXy::create(0.3227, 0.329).is_some());
    /// assert!(CieXy::create(1.2, 0.5).is_none());
    /// assert!(CieXy::create(0.5, f64::NAN).is_none());
    /// ```
    pub fn create(x: f64, y: f64) -> Option<Self> {
        let valid = |v: f64| (0.0..=1.0).contains(&v);
        if valid(x) && valid(y) {
            Some(CieXy { x, y })
        } else {
            None
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

impl From<CieXy> for [f64; 2] {
    fn from(xy: CieXy) -> Self {
        [xy.x, xy.y]
    }
}
