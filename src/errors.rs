use std::path::PathBuf;

/// Broad classification of an [`Error`].
///
/// Useful when a caller only cares about what went wrong in general terms,
/// e.g. to decide whether a retry makes sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Pairing failed or no credential is available.
    Authentication,
    /// The bridge could not be reached or answered with a failure status.
    Network,
    /// The bridge answered with content this crate does not understand.
    Protocol,
    /// A request was rejected locally before being sent.
    Validation,
    /// The bridge reported an error for the request.
    Bridge,
    /// The credential file could not be read or written.
    Config,
}

/// All error types that can occur when talking to a Hue bridge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Pairing with the bridge failed, or there is no credential to use.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The HTTP request could not be completed.
    #[error("request to bridge failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The bridge answered with a non-success HTTP status.
    #[error("bridge answered with HTTP status {0}")]
    HttpStatus(u16),

    /// Failed to serialize a request body.
    #[error("failed to dump json: {0:?}")]
    JsonDump(serde_json::Error),

    /// Failed to deserialize a bridge response.
    #[error("failed to load json: {0:?}")]
    JsonLoad(serde_json::Error),

    /// The bridge response had an unexpected shape.
    #[error("unexpected response content: {0}")]
    Protocol(String),

    /// A light state option was unknown, mistyped or out of range.
    #[error("invalid option {option}: {reason}")]
    Validation { option: String, reason: String },

    /// Attempted to send a [`crate::LightState`] with no options set.
    #[error("invalid light state; no options set")]
    NoAttribute,

    /// The bridge reported an error payload.
    #[error("bridge error {kind} at {address}: {description}")]
    Bridge {
        kind: u16,
        address: String,
        description: String,
    },

    /// Reading or writing the credential file failed.
    #[error("config file {path:?} {action} error: {err:?}")]
    ConfigIo {
        path: PathBuf,
        action: String,
        err: std::io::Error,
    },

    /// The credential file does not hold a valid credential.
    #[error("config file {path:?} is invalid: {err:?}")]
    ConfigFormat {
        path: PathBuf,
        err: serde_json::Error,
    },

    /// No home directory to derive the default config path from.
    #[error("unable to locate the home directory")]
    NoHomeDir,
}

impl Error {
    /// Create a new validation error
    pub fn validation(option: &str, reason: impl Into<String>) -> Self {
        Error::Validation {
            option: option.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a new config I/O error
    pub fn config_io(path: impl Into<PathBuf>, action: &str, err: std::io::Error) -> Self {
        Error::ConfigIo {
            path: path.into(),
            action: action.to_string(),
            err,
        }
    }

    /// Create a new config format error
    pub fn config_format(path: impl Into<PathBuf>, err: serde_json::Error) -> Self {
        Error::ConfigFormat {
            path: path.into(),
            err,
        }
    }

    /// The [`ErrorKind`] this error falls under.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Authentication(_) => ErrorKind::Authentication,
            Error::Network(_) | Error::HttpStatus(_) => ErrorKind::Network,
            Error::JsonLoad(_) | Error::Protocol(_) => ErrorKind::Protocol,
            Error::JsonDump(_) | Error::Validation { .. } | Error::NoAttribute => {
                ErrorKind::Validation
            }
            Error::Bridge { .. } => ErrorKind::Bridge,
            Error::ConfigIo { .. } | Error::ConfigFormat { .. } | Error::NoHomeDir => {
                ErrorKind::Config
            }
        }
    }

    /// The bridge error type, if this is a bridge-reported error.
    pub fn bridge_error_type(&self) -> Option<u16> {
        match self {
            Error::Bridge { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
