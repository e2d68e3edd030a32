//! JSON storage for bandit snapshots.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, Result};

use super::state::BanditSnapshot;

/// Read a snapshot, returning `None` when the file does not exist.
pub fn load_snapshot(path: &Path) -> Result<Option<BanditSnapshot>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(EngineError::Io(err)),
    };
    let snapshot: BanditSnapshot = serde_json::from_str(&raw)
        .map_err(|err| EngineError::Serialization(format!("bandit state parse: {err}")))?;
    Ok(Some(snapshot))
}

/// `path` with `suffix` appended to the whole file name, so
/// `agent_state.json` and `agent_state.bak` never share a sibling.
#[must_use]
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Write a snapshot via a sibling temp file and rename.
pub fn save_snapshot(path: &Path, snapshot: &BanditSnapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|err| EngineError::Serialization(format!("bandit state serialize: {err}")))?;
    let temp_path = sibling_path(path, ".tmp");
    fs::write(&temp_path, json)?;
    match fs::rename(&temp_path, path) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            fs::remove_file(path)?;
            if let Err(err) = fs::rename(&temp_path, path) {
                let _ = fs::remove_file(&temp_path);
                return Err(EngineError::Io(err));
            }
        }
        Err(err) => {
            let _ = fs::remove_file(&temp_path);
            return Err(EngineError::Io(err));
        }
    }
    Ok(())
}
