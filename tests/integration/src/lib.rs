//! Integration test utilities for BVPlayer
//!
//! Provides a temp-directory fixture with fake media files and a
//! ready-wired player controller backed by the null backend.

use anyhow::Result;
use bvplayer::player::{NullBackend, PlayerController, PositionHistory};
use bvplayer::utils::config::PlaybackConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture holding a temp directory of fake media files
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub media_files: Vec<PathBuf>,
}

impl TestFixture {
    /// Create a fixture with the given number of fake media files
    pub fn with_tracks(count: usize) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let mut media_files = Vec::with_capacity(count);
        for i in 0..count {
            let path = temp_dir.path().join(format!("track{:02}.mp4", i));
            fs::write(&path, b"not a real video")?;
            media_files.push(path);
        }
        Ok(Self {
            temp_dir,
            media_files,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Build a controller over a null backend reporting the given duration
    pub fn controller(&self, duration_ms: u64) -> Result<PlayerController> {
        let config = PlaybackConfig {
            auto_play: false,
            remember_position: false,
            ..Default::default()
        };
        let backend = NullBackend::with_duration_ms(duration_ms);
        Ok(PlayerController::new(Box::new(backend), config)?)
    }

    /// Same, but with resume positions persisted inside the fixture dir
    pub fn controller_with_history(&self, duration_ms: u64) -> Result<PlayerController> {
        let config = PlaybackConfig {
            auto_play: false,
            remember_position: true,
            ..Default::default()
        };
        let history_path = self.temp_dir.path().join("positions.json");
        let backend = NullBackend::with_duration_ms(duration_ms);
        let controller = PlayerController::new(Box::new(backend), config)?
            .with_history(PositionHistory::load_from(Some(history_path)));
        Ok(controller)
    }
}
