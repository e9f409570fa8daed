//! Playlist management for BVPlayer
//!
//! An in-memory ordered sequence of media references with a current index,
//! repeat modes, and optional random playback order.

use crate::utils::error::{PlayerError, Result};
use rand::Rng;
use std::path::{Path, PathBuf};

/// A single playlist entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistItem {
    /// File path or URL
    pub path: PathBuf,

    /// Display title (file stem by default)
    pub title: String,

    /// Duration in milliseconds, once known
    pub duration_ms: Option<u64>,
}

impl PlaylistItem {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            path,
            title,
            duration_ms: None,
        }
    }
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatMode {
    /// Stop at the end of the playlist
    Off,

    /// Repeat the current item
    One,

    /// Wrap around at the ends
    All,
}

/// Ordered media queue with a current position
#[derive(Debug, Default)]
pub struct Playlist {
    items: Vec<PlaylistItem>,
    current: Option<usize>,
    repeat: RepeatMode,
    random: bool,
}

impl Default for RepeatMode {
    fn default() -> Self {
        RepeatMode::Off
    }
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[PlaylistItem] {
        &self.items
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&PlaylistItem> {
        self.current.and_then(|i| self.items.get(i))
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.repeat = mode;
    }

    pub fn is_random(&self) -> bool {
        self.random
    }

    /// Toggle random playback order; returns the new state
    pub fn toggle_random(&mut self) -> bool {
        self.random = !self.random;
        self.random
    }

    /// Append an item; the first item added becomes current
    pub fn add(&mut self, path: impl AsRef<Path>) -> usize {
        self.items.push(PlaylistItem::from_path(path.as_ref()));
        let index = self.items.len() - 1;
        if self.current.is_none() {
            self.current = Some(index);
        }
        index
    }

    /// Remove the item at `index`
    ///
    /// The current position keeps pointing at the same item when possible.
    /// Removing the current item leaves the position on its successor, or
    /// clears it when the removed item was last.
    pub fn remove(&mut self, index: usize) -> Result<PlaylistItem> {
        if index >= self.items.len() {
            return Err(PlayerError::Playlist(format!(
                "index {} out of range (len {})",
                index,
                self.items.len()
            )));
        }

        let removed = self.items.remove(index);

        self.current = match self.current {
            Some(cur) if cur > index => Some(cur - 1),
            Some(cur) if cur == index => {
                if index < self.items.len() {
                    Some(index)
                } else {
                    None
                }
            }
            other => other,
        };

        Ok(removed)
    }

    /// Jump to an explicit index
    pub fn jump(&mut self, index: usize) -> Result<&PlaylistItem> {
        if index >= self.items.len() {
            return Err(PlayerError::Playlist(format!(
                "index {} out of range (len {})",
                index,
                self.items.len()
            )));
        }
        self.current = Some(index);
        Ok(&self.items[index])
    }

    /// Advance to the next item; returns its index if one was selected
    pub fn next(&mut self) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        if self.random {
            return self.pick_random();
        }

        let next = match self.current {
            None => 0,
            Some(cur) if cur + 1 < self.items.len() => cur + 1,
            Some(_) if self.repeat == RepeatMode::All => 0,
            Some(_) => return None,
        };
        self.current = Some(next);
        Some(next)
    }

    /// Step back to the previous item; returns its index if one was selected
    pub fn previous(&mut self) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        if self.random {
            return self.pick_random();
        }

        let prev = match self.current {
            None => 0,
            Some(0) if self.repeat == RepeatMode::All => self.items.len() - 1,
            Some(0) => return None,
            Some(cur) => cur - 1,
        };
        self.current = Some(prev);
        Some(prev)
    }

    /// Select the item to play after the current one finished
    ///
    /// Unlike `next`, honors `RepeatMode::One` by staying in place.
    pub fn advance_after_end(&mut self) -> Option<usize> {
        if self.repeat == RepeatMode::One {
            return self.current;
        }
        self.next()
    }

    /// Record the duration of the current item once the backend reports it
    pub fn set_current_duration(&mut self, duration_ms: u64) {
        if let Some(cur) = self.current {
            if let Some(item) = self.items.get_mut(cur) {
                item.duration_ms = Some(duration_ms);
            }
        }
    }

    fn pick_random(&mut self) -> Option<usize> {
        let len = self.items.len();
        let mut rng = rand::rng();
        let index = if len == 1 {
            0
        } else {
            // Avoid immediately repeating the current item
            loop {
                let candidate = rng.random_range(0..len);
                if Some(candidate) != self.current {
                    break candidate;
                }
            }
        };
        self.current = Some(index);
        Some(index)
    }
}
