//! Error-mode selector shared by every guarded conversion.

use crate::error::MatheError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a conversion does with an element outside its domain.
///
/// The set is closed: an unrecognized mode can only appear when parsing a
/// string (CLI flag, configuration file) and is rejected there with
/// [`MatheError::InvalidMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ErrorMode {
    /// Fail the whole call with [`MatheError::Domain`]. No partial result.
    #[default]
    Raise,
    /// Emit a `warn` event per invalid element and substitute a placeholder.
    Warn,
    /// Substitute a placeholder without any diagnostic.
    Ignore,
}

impl ErrorMode {
    /// All modes, in declaration order.
    pub const ALL: [ErrorMode; 3] = [ErrorMode::Raise, ErrorMode::Warn, ErrorMode::Ignore];

    /// Lowercase name as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorMode::Raise => "raise",
            ErrorMode::Warn => "warn",
            ErrorMode::Ignore => "ignore",
        }
    }
}

impl fmt::Display for ErrorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorMode {
    type Err = MatheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raise" => Ok(ErrorMode::Raise),
            "warn" => Ok(ErrorMode::Warn),
            "ignore" => Ok(ErrorMode::Ignore),
            _ => Err(MatheError::InvalidMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for ErrorMode {
    type Error = MatheError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
