//! Emotional-state persistence
//!
//! A small JSON file per user under the state directory. Only the coarse
//! picture is kept: level, last score, a short score history. Stale state
//! is discarded on load so yesterday's hard evening does not color today.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use chrono::Utc;

use crate::STATE_STALE_SECS;
use crate::types::DistressLevel;

/// How many recent scores to retain
const SCORE_HISTORY_LEN: usize = 10;

/// Persisted emotional state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedState {
    /// Schema version
    pub version: u32,
    /// Coarse distress level at save time
    pub level: DistressLevel,
    /// Last stress score
    pub last_score: f64,
    /// Recent scores, oldest first
    pub recent_scores: Vec<f64>,
    /// Save time (Unix timestamp)
    pub saved_unix: i64,
}

impl PersistedState {
    /// Current schema version
    pub const VERSION: u32 = 1;

    /// Create a state record stamped now
    pub fn new(level: DistressLevel, last_score: f64, recent_scores: Vec<f64>) -> Self {
        let mut recent_scores = recent_scores;
        if recent_scores.len() > SCORE_HISTORY_LEN {
            let skip = recent_scores.len() - SCORE_HISTORY_LEN;
            recent_scores.drain(0..skip);
        }
        Self {
            version: Self::VERSION,
            level,
            last_score,
            recent_scores,
            saved_unix: Utc::now().timestamp(),
        }
    }

    /// Age in seconds
    pub fn age_secs(&self) -> i64 {
        Utc::now().timestamp() - self.saved_unix
    }

    /// Too old to carry forward?
    pub fn is_stale(&self) -> bool {
        self.age_secs() > STATE_STALE_SECS
    }
}

/// File path for a user's state inside the state directory
fn state_path(dir: &str, user: &str) -> PathBuf {
    // Keep filenames tame regardless of what the caller passes as user id
    let safe: String = user
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    Path::new(dir).join(format!("state_{}.json", safe))
}

/// Save state to the state directory, creating it if needed.
/// Returns the path written.
pub fn save_state(state: &PersistedState, dir: &str, user: &str) -> io::Result<String> {
    fs::create_dir_all(dir)?;
    let path = state_path(dir, user);
    let json = serde_json::to_string_pretty(state)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&path, json)?;
    Ok(path.to_string_lossy().into_owned())
}

/// Load state for a user; Ok(None) when no file exists
pub fn load_state(dir: &str, user: &str) -> io::Result<Option<PersistedState>> {
    let path = state_path(dir, user);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    let state: PersistedState = serde_json::from_str(&content)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(Some(state))
}

/// Load state, discarding stale or incompatible records.
/// A discarded record is removed from disk so it is not re-read forever.
pub fn load_and_validate_state(dir: &str, user: &str) -> io::Result<Option<PersistedState>> {
    let Some(state) = load_state(dir, user)? else {
        return Ok(None);
    };
    if state.version != PersistedState::VERSION || state.is_stale() {
        let _ = fs::remove_file(state_path(dir, user));
        return Ok(None);
    }
    Ok(Some(state))
}

// =============================================================================
// TESTS
// =============================================================================
