//! Value types for light state options.

mod alert;
mod brightness;
mod color_temperature;
mod effect;
mod saturation;
mod xy;

pub use alert::LightAlert;
pub use brightness::Brightness;
pub use color_temperature::ColorTemperature;
pub use effect::LightEffect;
pub use saturation::Saturation;
pub use xy::CieXy;
