//! JSON persistence on the local filesystem
//!
//! Features:
//! - Missing files read as `None` (first run)
//! - Writes go to a sibling `.tmp` file first, then replace the target

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ArcadeError;

/// Read and parse a JSON file. `Ok(None)` if it does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ArcadeError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(ArcadeError::io(path, error)),
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| ArcadeError::json(path, e))
}

/// Serialize to pretty JSON and write atomically
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), ArcadeError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| ArcadeError::json(path, e))?;
    write_text_atomic(path, &text).map_err(|e| ArcadeError::io(path, e))
}

fn write_text_atomic(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path_for(path);
    fs::write(&tmp_path, text)?;
    if let Err(error) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("data.json");
    let tmp_name = format!("{file_name}.tmp");
    match path.parent() {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    }
}
