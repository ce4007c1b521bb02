//! Timestamped output folders for experiment runs.
//!
//! An [`ExperimentFolder`] is created as `<base>/<timestamp>[_<version>]_<tag>`
//! (for example `results/2023-10-27_14-30-00_v1.0_GA_Optimization`) and lives
//! until [`ExperimentFolder::finish`] renames it with a `_Success` or `_Fail`
//! suffix, so aborted runs stand out when browsing the results directory.

use crate::error::{MatheError, MatheResult};
use chrono::{DateTime, Local};
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// Timestamp layout used in folder names.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Outcome recorded when an experiment folder is finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The run completed.
    Success,
    /// The run aborted or produced unusable results.
    Fail,
}

impl RunStatus {
    /// Capitalized label appended to the folder name.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            RunStatus::Success => "Success",
            RunStatus::Fail => "Fail",
        }
    }

    /// File that receives the closing message, if any.
    #[must_use]
    pub fn message_file(self) -> &'static str {
        match self {
            RunStatus::Success => "Success.txt",
            RunStatus::Fail => "Error.txt",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for RunStatus {
    type Err = MatheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "success" => Ok(RunStatus::Success),
            "fail" => Ok(RunStatus::Fail),
            _ => Err(MatheError::Configuration(format!(
                "Invalid run status '{s}'. Must be one of: success, fail"
            ))),
        }
    }
}

/// Output directory of a single experiment run.
#[derive(Debug)]
pub struct ExperimentFolder {
    timestamp: String,
    folder_name: String,
    path: PathBuf,
    finalized: bool,
}

impl ExperimentFolder {
    /// Creates `<base_path>/<now>[_<version>]_<tag>` on disk.
    ///
    /// `base_path` is created when missing. The run folder itself must not exist
    /// yet; a name collision fails with an `AlreadyExists` I/O error.
    pub fn new(base_path: impl AsRef<Path>, tag: &str, version: &str) -> MatheResult<Self> {
        Self::create_at(base_path, tag, version, Local::now())
    }

    /// Same as [`ExperimentFolder::new`] with an explicit timestamp.
    pub fn create_at(
        base_path: impl AsRef<Path>,
        tag: &str,
        version: &str,
        now: DateTime<Local>,
    ) -> MatheResult<Self> {
        let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
        let folder_name = folder_name(&timestamp, tag, version);

        let base_path = base_path.as_ref();
        fs::create_dir_all(base_path)?;
        let path = base_path.join(&folder_name);
        fs::create_dir(&path)?;

        info!(path = %path.display(), "Created experiment folder");

        Ok(Self {
            timestamp,
            folder_name,
            path,
            finalized: false,
        })
    }

    /// Folder name without the status suffix.
    #[must_use]
    pub fn folder_name(&self) -> &str {
        &self.folder_name
    }

    /// Creation timestamp as it appears in the folder name.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Current location of the folder (includes the suffix once finished).
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether [`ExperimentFolder::finish`] has already renamed the folder.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Full path for `filename` inside the folder.
    #[must_use]
    pub fn file_path(&self, filename: impl AsRef<Path>) -> PathBuf {
        self.path.join(filename)
    }

    /// Copies an external file into the folder, optionally under a new name.
    pub fn copy_file(
        &self,
        src_path: impl AsRef<Path>,
        new_name: Option<&str>,
    ) -> MatheResult<PathBuf> {
        let src_path = src_path.as_ref();
        if !src_path.is_file() {
            return Err(MatheError::NotFound {
                kind: "Source",
                path: src_path.to_path_buf(),
            });
        }

        let dst_path = match new_name {
            Some(name) => self.file_path(name),
            None => match src_path.file_name() {
                Some(name) => self.file_path(name),
                None => {
                    return Err(MatheError::Configuration(format!(
                        "Cannot derive a file name from '{}'",
                        src_path.display()
                    )))
                }
            },
        };

        fs::copy(src_path, &dst_path)?;
        Ok(dst_path)
    }

    /// Writes UTF-8 text to `filename` inside the folder.
    pub fn save_text(&self, filename: &str, content: &str) -> MatheResult<PathBuf> {
        let path = self.file_path(filename);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Finalizes the run by renaming the folder to `<name>_Success` or `<name>_Fail`.
    ///
    /// A non-empty `info_msg` is saved first to `Success.txt` or `Error.txt`.
    /// Calling `finish` again after success does nothing. If the rename fails the
    /// error is returned and the folder stays unfinalized.
    pub fn finish(&mut self, status: RunStatus, info_msg: &str) -> MatheResult<()> {
        if self.finalized {
            return Ok(());
        }

        if !info_msg.is_empty() {
            self.save_text(status.message_file(), info_msg)?;
        }

        let mut renamed: OsString = self.path.clone().into_os_string();
        renamed.push("_");
        renamed.push(status.suffix());
        let new_path = PathBuf::from(renamed);

        if let Err(e) = fs::rename(&self.path, &new_path) {
            warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to rename experiment folder"
            );
            return Err(e.into());
        }

        info!(path = %new_path.display(), %status, "Finished experiment folder");
        self.path = new_path;
        self.finalized = true;
        Ok(())
    }
}

impl fmt::Display for ExperimentFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExperimentFolder({})", self.path.display())
    }
}

fn folder_name(timestamp: &str, tag: &str, version: &str) -> String {
    let mut parts = vec![timestamp];
    if !version.is_empty() {
        parts.push(version);
    }
    parts.push(tag);
    parts.join("_")
}
