//! Durable key-value storage for the timer state
//!
//! The store is a single JSON file holding an object map from key to record,
//! with the entire timer state serialized under one fixed key. Unrelated keys
//! in the same file are preserved across saves.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::warn;

use crate::state::TimerState;

/// Fixed key the timer record is stored under.
pub const TIMER_STORAGE_KEY: &str = "timeFrameTimerState";

/// Durable store for the timer record.
///
/// `load` distinguishes "no usable record" (`Ok(None)`) from a real I/O
/// failure (`Err`); a record that cannot be parsed counts as absent, matching
/// the load-or-fall-back-to-defaults contract. Saving is best-effort from the
/// caller's point of view: a failed save costs durability, never the
/// in-memory transition.
pub trait StateStore: Send + Sync {
    fn load(&self) -> Result<Option<TimerState>>;
    fn save(&self, state: &TimerState) -> Result<()>;
}

/// File-backed JSON store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the key→record map, tolerating a missing or malformed file.
    fn read_map(&self) -> Result<Map<String, Value>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => {
                warn!(
                    "Storage file {} is not a JSON object, treating as empty",
                    self.path.display()
                );
                Ok(Map::new())
            }
        }
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<TimerState>> {
        let map = self.read_map()?;
        let Some(record) = map.get(TIMER_STORAGE_KEY) else {
            return Ok(None);
        };

        match serde_json::from_value::<TimerState>(record.clone()) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                // Includes records without a numeric durationMs.
                warn!("Ignoring unusable timer record: {}", e);
                Ok(None)
            }
        }
    }

    fn save(&self, state: &TimerState) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(
            TIMER_STORAGE_KEY.to_string(),
            serde_json::to_value(state).context("Failed to serialize timer state")?,
        );

        let contents = serde_json::to_string_pretty(&Value::Object(map))?;

        // Write through a sibling temp file so a crash mid-write cannot
        // truncate the existing record.
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, contents)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}
