//! # hue_bridge
//!
//! A blocking Rust client for the local HTTP API of a Philips Hue bridge.
//!
//! The crate pairs with a bridge through its link button, keeps the resulting
//! credential in a small JSON file, lists the lights the bridge knows and
//! changes their state.
//!
//! ## Quick Start
//!
//! ```no_run
//! use hue_bridge::{HueBridge, LightEffect, LightState, PairingRequest};
//!
//! fn run() -> Result<(), hue_bridge::Error> {
//!     // Loads ~/.config/hue_bridge_config.json, or pairs with the bridge at
//!     // 192.168.1.20 (press its link button) and writes that file.
//!     let bridge = HueBridge::builder()
//!         .host("192.168.1.20")
//!         .pairing_request(PairingRequest::new("my_app", "laptop")?)
//!         .open()?;
//!
//!     for (id, name) in bridge.lights()? {
//!         println!("{id}: {name}");
//!     }
//!
//!     let mut state = LightState::new();
//!     state.on(true).effect(LightEffect::ColorLoop);
//!     bridge.set_light_state(1, &state)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Pairing**: link-button handshake with retries via [`Pairing`]
//! - **Credentials**: load and save [`Credential`] files
//! - **Lights**: list names with [`HueBridge::lights`] or full attributes
//!   with [`HueBridge::get_lights`]
//! - **State changes**: typed or by-name options with [`LightState`]
//! - **Discovery**: find bridges on your network with [`discover_bridges`]
//!
//! ## Logging
//!
//! Records go through the [`log`] facade; install any logger to see them.
//! Each session logs under its own target, [`DEFAULT_LOG_TARGET`] unless
//! set with [`HueBridgeBuilder::log_target`].

mod bridge;
mod client;
mod config;
mod discovery;
mod errors;
mod light;
mod pairing;
mod response;
mod state;
mod types;

/// Log target used by sessions that were not given one.
pub const DEFAULT_LOG_TARGET: &str = "hue_bridge";

// Re-export public API
pub use bridge::{HueBridge, HueBridgeBuilder};
pub use config::{Credential, DEFAULT_CONFIG_FILE, default_config_path};
pub use discovery::{DISCOVERY_URL, DiscoveredBridge, discover_bridges, discover_bridges_at};
pub use errors::{Error, ErrorKind};
pub use light::{Light, LightStatus, NewLights};
pub use pairing::{Pairing, PairingRequest, PairingState};
pub use response::LINK_BUTTON_NOT_PRESSED;
pub use state::LightState;
pub use types::{Brightness, CieXy, ColorTemperature, LightAlert, LightEffect, Saturation};
