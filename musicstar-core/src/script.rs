//! Timed action scripts: a JSON array of `{ "at": seconds, "action": ... }`
//! entries, applied as the driver's clock passes each time.

use std::path::Path;

use serde::{Deserialize, Serialize};

use musicstar_types::StarAction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptEntry {
    /// Seconds from the start of the run.
    pub at: f64,
    pub action: StarAction,
}

/// Error type for script loading.
#[derive(Debug)]
pub enum ScriptError {
    Io(std::io::Error),
    Json(serde_json::Error),
    InvalidTime { index: usize, at: f64 },
    InvalidAction { index: usize },
}

impl From<std::io::Error> for ScriptError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ScriptError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Json(e) => write!(f, "JSON error: {}", e),
            Self::InvalidTime { index, at } => {
                write!(f, "entry {} has invalid time {}", index, at)
            }
            Self::InvalidAction { index } => {
                write!(f, "entry {} has an out-of-range step or knob value", index)
            }
        }
    }
}

impl std::error::Error for ScriptError {}

/// Entries ordered by time, with a cursor over the ones already applied.
#[derive(Debug, Clone, Default)]
pub struct Script {
    entries: Vec<ScriptEntry>,
    next: usize,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let contents = std::fs::read_to_string(path)?;
        let script = Self::parse(&contents)?;
        log::info!(target: "script", "loaded {} action(s) from {}", script.len(), path.display());
        Ok(script)
    }

    pub fn parse(contents: &str) -> Result<Self, ScriptError> {
        let entries: Vec<ScriptEntry> = serde_json::from_str(contents)?;
        Self::from_entries(entries)
    }

    /// Entries at equal times keep their given order.
    pub fn from_entries(mut entries: Vec<ScriptEntry>) -> Result<Self, ScriptError> {
        for (index, entry) in entries.iter().enumerate() {
            if !entry.at.is_finite() || entry.at < 0.0 {
                return Err(ScriptError::InvalidTime { index, at: entry.at });
            }
            if !entry.action.is_valid() {
                return Err(ScriptError::InvalidAction { index });
            }
        }
        entries.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(Self { entries, next: 0 })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.entries.len()
    }

    /// Entries due at `now` that have not been taken yet.
    pub fn take_due(&mut self, now: f64) -> &[ScriptEntry] {
        let start = self.next;
        while self.next < self.entries.len() && self.entries[self.next].at <= now {
            self.next += 1;
        }
        &self.entries[start..self.next]
    }
}
