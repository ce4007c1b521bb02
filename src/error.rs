//! Custom error types for the library.
//!
//! This module defines the primary error type, `MatheError`, for the entire crate.
//! Using the `thiserror` crate, it provides a centralized and consistent way to handle
//! everything that can go wrong, from invalid conversion input to file I/O.
//!
//! ## Error Hierarchy
//!
//! `MatheError` is an enum that consolidates various error sources:
//!
//! - **`Domain`**: A value outside the domain of a conversion (for example a
//!   non-positive power passed to `watt2dbm`) under `ErrorMode::Raise`. Carries the
//!   function name, the offending value and, for array input, its position.
//! - **`InvalidMode`**: An error-mode string that is not one of `raise`, `warn` or
//!   `ignore`. This is a programmer or configuration error, never a data error.
//! - **`NotFound`**: A file that a loader expected to exist is missing.
//! - **`Io`**, **`Json`**, **`Yaml`**, **`Csv`**, **`Binary`**: Wrap the underlying
//!   I/O and serialization failures.
//! - **`Config`**: Wraps errors from `figment` while layering configuration sources.
//! - **`FeatureNotEnabled`**: The code attempted to use functionality (like the CSV
//!   backend) that was not compiled in via feature flags.
//!
//! By using `#[from]`, `MatheError` can be created from underlying error types,
//! simplifying error handling throughout the crate with the `?` operator.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias for results using the crate error type.
pub type MatheResult<T> = std::result::Result<T, MatheError>;

#[allow(missing_docs)]
#[derive(Error, Debug)]
pub enum MatheError {
    #[error("Invalid input in '{function}': {} must be strictly positive (> 0)", describe_position(.index, .value))]
    Domain {
        function: &'static str,
        index: Option<usize>,
        value: f64,
    },

    #[error("Invalid error mode '{0}'. Must be one of: raise, warn, ignore")]
    InvalidMode(String),

    #[error("{kind} file not found: {}", .path.display())]
    NotFound { kind: &'static str, path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[cfg(feature = "storage_csv")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Binary serialization error: {0}")]
    Binary(#[from] bincode::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Configuration validation error: {0}")]
    Configuration(String),

    #[error("Feature '{0}' is not enabled. Please build with --features {0}")]
    FeatureNotEnabled(String),
}

impl From<figment::Error> for MatheError {
    fn from(err: figment::Error) -> Self {
        MatheError::Config(Box::new(err))
    }
}

impl MatheError {
    /// Returns true for errors caused by the input data rather than the environment.
    #[must_use]
    pub fn is_domain(&self) -> bool {
        matches!(self, MatheError::Domain { .. })
    }
}

fn describe_position(index: &Option<usize>, value: &f64) -> String {
    match index {
        Some(i) => format!("element {i} (value {value})"),
        None => format!("value {value}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_names_array_position() {
        let err = MatheError::Domain {
            function: "watt2dbm",
            index: Some(2),
            value: -1.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("watt2dbm"));
        assert!(msg.contains("element 2"));
        assert!(msg.contains("-1"));
        assert!(err.is_domain());
    }

    #[test]
    fn domain_error_for_scalar_has_no_position() {
        let err = MatheError::Domain {
            function: "lin2db",
            index: None,
            value: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid input in 'lin2db': value 0 must be strictly positive (> 0)"
        );
    }

    #[test]
    fn invalid_mode_lists_choices() {
        let err = MatheError::InvalidMode("loud".into());
        assert!(err.to_string().contains("raise, warn, ignore"));
        assert!(!err.is_domain());
    }
}
