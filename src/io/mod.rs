//! Filesystem helpers: experiment output folders and format readers/writers.

pub mod files;
pub mod folders;

pub use files::{
    load_binary, load_csv, load_json, load_yaml, save_binary, save_csv, save_json, save_yaml,
    DEFAULT_JSON_INDENT,
};
pub use folders::{ExperimentFolder, RunStatus};
