//! Read/write helpers for the file formats experiments usually produce.
//!
//! - **JSON** (`serde_json`), pretty-printed with a configurable indent.
//! - **YAML** (`serde_yaml`), keys kept in serialization order.
//! - **CSV** (`csv`, feature `storage_csv`), one record per row with a header.
//! - **Binary** (`bincode`), for arbitrary `serde` objects.
//!
//! Every `save_*` creates missing parent directories. Text is always UTF-8.

use crate::error::{MatheError, MatheResult};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Indent used by [`save_json`] callers that have no preference.
pub const DEFAULT_JSON_INDENT: usize = 4;

/// Creates the parent directory of `path` if it does not exist.
fn ensure_parent_dir(path: &Path) -> MatheResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

fn require_file(path: &Path, kind: &'static str) -> MatheResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(MatheError::NotFound {
            kind,
            path: path.to_path_buf(),
        })
    }
}

/// Loads a JSON document.
///
/// Fails with [`MatheError::NotFound`] when the file does not exist.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> MatheResult<T> {
    let path = path.as_ref();
    require_file(path, "JSON")?;
    debug!(path = %path.display(), "Loading JSON");

    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Saves `data` as pretty-printed JSON indented by `indent` spaces.
///
/// Non-ASCII characters are written as-is, not escaped.
pub fn save_json<T: Serialize + ?Sized>(
    data: &T,
    path: impl AsRef<Path>,
    indent: usize,
) -> MatheResult<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    debug!(path = %path.display(), indent, "Saving JSON");

    let indent = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut writer = BufWriter::new(File::create(path)?);
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    data.serialize(&mut serializer)?;
    writer.flush()?;
    Ok(())
}

/// Loads a YAML document.
pub fn load_yaml<T: DeserializeOwned>(path: impl AsRef<Path>) -> MatheResult<T> {
    let path = path.as_ref();
    require_file(path, "YAML")?;
    debug!(path = %path.display(), "Loading YAML");

    let text = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&text)?)
}

/// Saves `data` as YAML, keeping fields in the order they serialize.
pub fn save_yaml<T: Serialize + ?Sized>(data: &T, path: impl AsRef<Path>) -> MatheResult<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    debug!(path = %path.display(), "Saving YAML");

    let text = serde_yaml::to_string(data)?;
    fs::write(path, text)?;
    Ok(())
}

/// Loads every record of a CSV file with a header row.
#[cfg(feature = "storage_csv")]
pub fn load_csv<T: DeserializeOwned>(path: impl AsRef<Path>) -> MatheResult<Vec<T>> {
    let path = path.as_ref();
    require_file(path, "CSV")?;
    debug!(path = %path.display(), "Loading CSV");

    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader
        .deserialize::<T>()
        .collect::<Result<Vec<T>, csv::Error>>()?;
    Ok(rows)
}

/// Saves `rows` as CSV. The header is derived from the record's field names.
#[cfg(feature = "storage_csv")]
pub fn save_csv<T: Serialize>(rows: &[T], path: impl AsRef<Path>) -> MatheResult<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    debug!(path = %path.display(), rows = rows.len(), "Saving CSV");

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Loads every record of a CSV file (requires the `storage_csv` feature).
#[cfg(not(feature = "storage_csv"))]
pub fn load_csv<T: DeserializeOwned>(_path: impl AsRef<Path>) -> MatheResult<Vec<T>> {
    Err(MatheError::FeatureNotEnabled("storage_csv".to_string()))
}

/// Saves `rows` as CSV (requires the `storage_csv` feature).
#[cfg(not(feature = "storage_csv"))]
pub fn save_csv<T: Serialize>(_rows: &[T], _path: impl AsRef<Path>) -> MatheResult<()> {
    Err(MatheError::FeatureNotEnabled("storage_csv".to_string()))
}

/// Loads an object written by [`save_binary`].
pub fn load_binary<T: DeserializeOwned>(path: impl AsRef<Path>) -> MatheResult<T> {
    let path = path.as_ref();
    require_file(path, "Binary")?;
    debug!(path = %path.display(), "Loading binary object");

    let reader = BufReader::new(File::open(path)?);
    Ok(bincode::deserialize_from(reader)?)
}

/// Saves any serializable object in `bincode` format.
pub fn save_binary<T: Serialize + ?Sized>(data: &T, path: impl AsRef<Path>) -> MatheResult<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    debug!(path = %path.display(), "Saving binary object");

    let mut writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(&mut writer, data)?;
    writer.flush()?;
    Ok(())
}
