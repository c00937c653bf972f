use serde::Serialize;

/// Color saturation: 254 is the most saturated (colored), 0 the least (white).
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(transparent)]
pub struct Saturation {
    pub(crate) value: u8,
}

impl Saturation {
    pub const MAX: u8 = 254;

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Returns None if value is above 254.
    pub fn create(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Saturation { value })
    }
}
