//! Player state snapshot and resume-position history
//!
//! `PlayerState` is the shared snapshot the shell reads when refreshing the
//! window title; the controller is its only writer. `PositionHistory`
//! remembers where playback stopped per file so reopening resumes there.

use crate::player::PlaybackState;
use crate::utils::format_timestamp_ms;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Snapshot of everything the title bar and observers need
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Current playback state
    pub playback_state: PlaybackState,

    /// Current position in milliseconds
    pub position_ms: u64,

    /// Duration in milliseconds; 0 while unknown
    pub duration_ms: u64,

    /// Playback rate
    pub rate: f32,

    /// Master volume as linear gain
    pub volume: f32,

    /// Muted state
    pub muted: bool,

    /// Title of the current media
    pub title: Option<String>,

    /// Last backend error, surfaced in the title bar
    pub last_error: Option<String>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            playback_state: PlaybackState::Idle,
            position_ms: 0,
            duration_ms: 0,
            rate: 1.0,
            volume: 0.7,
            muted: false,
            title: None,
            last_error: None,
        }
    }
}

impl PlayerState {
    /// Window title line: app name, media title, position/duration,
    /// rate and error markers as applicable.
    pub fn title_string(&self, app_name: &str) -> String {
        let mut parts = vec![app_name.to_string()];

        if let Some(title) = &self.title {
            parts.push(title.clone());
        }

        if self.duration_ms > 0 {
            parts.push(format!(
                "{} / {}",
                format_timestamp_ms(self.position_ms),
                format_timestamp_ms(self.duration_ms)
            ));
        } else if self.position_ms > 0 {
            parts.push(format_timestamp_ms(self.position_ms));
        }

        let mut title = parts.join(" - ");

        if (self.rate - 1.0).abs() > f32::EPSILON {
            title.push_str(&format!(" [{}x]", self.rate));
        }
        if self.muted {
            title.push_str(" [muted]");
        }
        if let Some(error) = &self.last_error {
            title.push_str(&format!(" [error: {}]", error));
        }

        title
    }
}

/// Per-file resume positions, persisted as JSON in the user config dir
#[derive(Debug, Serialize, Deserialize)]
pub struct PositionHistory {
    positions: HashMap<String, PositionEntry>,

    #[serde(skip)]
    path: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PositionEntry {
    /// Last position in milliseconds
    position_ms: u64,

    /// Total duration in milliseconds
    duration_ms: u64,

    /// Last played Unix timestamp
    last_played: u64,
}

impl PositionHistory {
    /// History loaded from (and saved to) the default location
    pub fn load() -> Self {
        Self::load_from(Self::default_file_path())
    }

    /// History backed by an explicit file, mainly for tests
    pub fn load_from(path: Option<PathBuf>) -> Self {
        let mut history = Self {
            positions: HashMap::new(),
            path,
        };
        if let Some(path) = history.path.clone() {
            if let Ok(data) = std::fs::read_to_string(&path) {
                if let Ok(loaded) = serde_json::from_str::<PositionHistory>(&data) {
                    history.positions = loaded.positions;
                }
            }
        }
        history
    }

    /// Record a position; near the start or end the entry is dropped so the
    /// file restarts from the beginning next time.
    pub fn save_position(&mut self, path: &Path, position_ms: u64, duration_ms: u64) {
        let key = path.to_string_lossy().into_owned();

        if duration_ms == 0 {
            return;
        }
        let fraction = position_ms as f64 / duration_ms as f64;
        if !(0.05..=0.95).contains(&fraction) {
            self.positions.remove(&key);
            self.save_to_disk();
            return;
        }

        let entry = PositionEntry {
            position_ms,
            duration_ms,
            last_played: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        };

        self.positions.insert(key, entry);
        self.save_to_disk();
    }

    pub fn get_position(&self, path: &Path) -> Option<u64> {
        self.positions
            .get(path.to_string_lossy().as_ref())
            .map(|e| e.position_ms)
    }

    pub fn forget(&mut self, path: &Path) {
        self.positions.remove(path.to_string_lossy().as_ref());
        self.save_to_disk();
    }

    fn save_to_disk(&self) {
        let Some(path) = &self.path else { return };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Ok(data) = serde_json::to_string_pretty(self) {
            let _ = std::fs::write(path, data);
        }
    }

    fn default_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bvplayer").join("position_history.json"))
    }
}
