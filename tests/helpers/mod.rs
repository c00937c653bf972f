//! Test helpers for mock-bridge integration tests

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use hue_bridge::{Credential, HueBridge};
use mockito::ServerGuard;

/// Username every mock bridge accepts
pub const USERNAME: &str = "83b7780291a6ceffbe0bd049104df";

/// Load a fixture from the fixtures directory
pub fn fixture(filename: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(filename);

    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", filename, e))
}

/// A fresh path under the temp dir, with nothing at it yet
pub fn scratch_path(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hue-bridge-tests-{}", std::process::id()));
    let path = dir.join(test).join("hue_bridge_config.json");
    let _ = fs::remove_file(&path);
    path
}

/// Session against the mock server, authenticated as [`USERNAME`]
pub fn bridge_for(server: &ServerGuard) -> HueBridge {
    HueBridge::from_credential(Credential::new(&server.host_with_port(), USERNAME))
        .expect("Failed to build session")
}

/// Path of an authenticated resource on the mock server
pub fn api_path(resource: &str) -> String {
    format!("/api/{}/{}", USERNAME, resource)
}
