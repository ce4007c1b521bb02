//! # mathe-core
//!
//! Small building blocks for optical-communication experiments: unit conversions
//! with an explicit policy for invalid input, and helpers that organize experiment
//! output on disk.
//!
//! ## Crate Structure
//!
//! - **`converters`**: Elementwise conversions between W, dBm, dB and linear ratios,
//!   and between frequency and wavelength. Guarded conversions take an `ErrorMode`.
//! - **`constants`**: Speed of light and unit scale factors.
//! - **`io`**: `ExperimentFolder` for timestamped run directories, plus JSON, YAML,
//!   CSV and binary readers/writers.
//! - **`config`**: Layered configuration (defaults, TOML file, `MATHE_` environment).
//! - **`error`**: The `MatheError` enum shared by every module.
//! - **`tracing_setup`**: Subscriber initialization for binaries.

pub mod config;
pub mod constants;
pub mod converters;
pub mod error;
pub mod io;
pub mod tracing_setup;

pub use converters::ErrorMode;
pub use error::{MatheError, MatheResult};
