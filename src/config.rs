//! Bridge credential persistence.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// File name of the credential file, relative to the user's home directory.
pub const DEFAULT_CONFIG_FILE: &str = ".config/hue_bridge_config.json";

/// Where the credential lives when no path is given.
pub fn default_config_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_CONFIG_FILE))
        .ok_or(Error::NoHomeDir)
}

/// Authentication data handed out by a bridge when pairing succeeds.
///
/// The `host` is the address the bridge was paired at (optionally with a
/// port) and `username` is the access token to put in every request path.
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Credential {
    pub host: String,
    pub username: String,
    #[serde(default)]
    pub clientkey: Option<String>,
}

impl Credential {
    pub fn new(host: &str, username: &str) -> Self {
        Credential {
            host: host.to_string(),
            username: username.to_string(),
            clientkey: None,
        }
    }

    /// Reads a credential file.
    ///
    /// Returns `Ok(None)` when there is no file at `path`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::config_io(path, "read", e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| Error::config_format(path, e))
    }

    /// Writes this credential, replacing any file already at `path` and
    /// creating missing parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::config_io(parent, "create", e))?;
        }
        let content = serde_json::to_string_pretty(self).map_err(Error::JsonDump)?;
        fs::write(path, content).map_err(|e| Error::config_io(path, "write", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("hue-bridge-config-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("nested/dir/credential.json");
        let mut credential = Credential::new("192.168.1.20", "a8Xk2Lq0");
        credential.clientkey = Some("00112233445566778899AABBCCDDEEFF".into());

        credential.save(&path).unwrap();
        assert_eq!(Credential::load(&path).unwrap(), Some(credential));
    }

    #[test]
    fn test_missing_file() {
        let path = scratch_path("does-not-exist.json");
        assert_eq!(Credential::load(&path).unwrap(), None);
    }

    #[test]
    fn test_invalid_file() {
        let path = scratch_path("invalid.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{\"host\": \"10.0.0.2\"}").unwrap();

        let err = Credential::load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_clientkey_is_optional() {
        let credential: Credential =
            serde_json::from_str(r#"{"host": "10.0.0.2", "username": "abc"}"#).unwrap();
        assert_eq!(credential, Credential::new("10.0.0.2", "abc"));
        assert_eq!(
            serde_json::to_value(&credential).unwrap(),
            serde_json::json!({"host": "10.0.0.2", "username": "abc"})
        );
    }
}
