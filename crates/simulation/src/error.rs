// ---------------------------------------------------------------------------
// ConfigError: typed errors for runtime configuration
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors raised while assembling an [`crate::config::EngineConfig`].
///
/// None of these are fatal: the app crate logs them and starts with defaults.
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON config document could not be parsed.
    Json(serde_json::Error),
    /// A numeric value did not parse (or was NaN/infinite).
    InvalidNumber { key: String, value: String },
    /// A boolean value was not one of true/false/yes/no/on/off/1/0.
    InvalidBool { key: String, value: String },
    /// A value parsed but lies outside its accepted range.
    OutOfRange {
        key: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "JSON error: {e}"),
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "'{key}' expects a number, got '{value}'")
            }
            ConfigError::InvalidBool { key, value } => {
                write!(f, "'{key}' expects a boolean, got '{value}'")
            }
            ConfigError::OutOfRange {
                key,
                value,
                min,
                max,
            } => write!(f, "'{key}' = {value} is outside [{min}, {max}]"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}
