//! Media backend boundary for BVPlayer
//!
//! All decoding, rendering, buffering, and mixing live behind the
//! `MediaBackend` trait; the shell only issues commands and consumes change
//! notifications. `NullBackend` is a clock-driven stand-in that lets the
//! shell run and be tested without any media framework.

use crate::player::PlaybackState;
use crate::utils::error::{PlayerError, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Change notification emitted by a backend
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    /// Media duration became known, in milliseconds
    DurationChanged(u64),

    /// Playback position moved, in milliseconds
    PositionChanged(u64),

    /// Playback status changed
    StatusChanged(PlaybackState),

    /// Current media played to its end
    EndOfMedia,

    /// Backend failure (decode error, unsupported format, ...)
    Error(String),
}

/// Playback engine boundary
///
/// Implementations own their decode/render pipeline and report changes
/// through the channel returned by `events`. `poll` is called regularly on
/// the UI thread and must not block.
pub trait MediaBackend: Send {
    /// Load a media file, replacing any current media
    fn open(&mut self, path: &Path) -> Result<()>;

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping the position
    fn pause(&mut self) -> Result<()>;

    /// Stop playback and rewind to the start
    fn stop(&mut self) -> Result<()>;

    /// Seek to an absolute position in milliseconds
    fn set_position(&mut self, position_ms: u64) -> Result<()>;

    /// Current position in milliseconds
    fn position(&self) -> u64;

    /// Media duration in milliseconds; 0 while unknown
    fn duration(&self) -> u64;

    /// Set output volume as linear gain (0.0 - 1.0)
    fn set_volume(&mut self, gain: f32) -> Result<()>;

    /// Mute or unmute output
    fn set_muted(&mut self, muted: bool) -> Result<()>;

    /// Set playback rate (1.0 = normal speed)
    fn set_rate(&mut self, rate: f32) -> Result<()>;

    /// Channel carrying this backend's change notifications
    fn events(&self) -> Receiver<BackendEvent>;

    /// Give the backend a chance to emit progress notifications
    fn poll(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Clock-simulated backend with no actual audio or video output
///
/// Positions advance in real time (scaled by rate) while "playing". A fixed
/// duration can be injected for tests; otherwise the duration stays unknown
/// and the media never ends on its own.
pub struct NullBackend {
    tx: Sender<BackendEvent>,
    rx: Receiver<BackendEvent>,

    current: Option<PathBuf>,
    state: PlaybackState,

    /// Position accumulated up to the last pause/seek
    base_position_ms: u64,

    /// Wall-clock anchor while playing
    playing_since: Option<Instant>,

    duration_ms: u64,
    rate: f32,
    ended_sent: bool,
}

impl NullBackend {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            tx,
            rx,
            current: None,
            state: PlaybackState::Idle,
            base_position_ms: 0,
            playing_since: None,
            duration_ms: 0,
            rate: 1.0,
            ended_sent: false,
        }
    }

    /// Backend that reports a fixed duration for whatever it opens
    pub fn with_duration_ms(duration_ms: u64) -> Self {
        let mut backend = Self::new();
        backend.duration_ms = duration_ms;
        backend
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            let _ = self.tx.send(BackendEvent::StatusChanged(state));
        }
    }

    fn freeze_position(&mut self) {
        self.base_position_ms = self.position();
        self.playing_since = None;
    }
}

impl Default for NullBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaBackend for NullBackend {
    fn open(&mut self, path: &Path) -> Result<()> {
        info!("null backend: open {:?}", path);
        self.current = Some(path.to_path_buf());
        self.base_position_ms = 0;
        self.playing_since = None;
        self.ended_sent = false;
        self.set_state(PlaybackState::Stopped);
        if self.duration_ms > 0 {
            let _ = self.tx.send(BackendEvent::DurationChanged(self.duration_ms));
        }
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.current.is_none() {
            return Err(PlayerError::Backend("no media loaded".to_string()));
        }
        // Playing an ended clip restarts it from the beginning
        if self.state == PlaybackState::Ended {
            self.base_position_ms = 0;
            self.ended_sent = false;
        }
        if self.playing_since.is_none() {
            self.playing_since = Some(Instant::now());
        }
        self.set_state(PlaybackState::Playing);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.freeze_position();
        self.set_state(PlaybackState::Paused);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.playing_since = None;
        self.base_position_ms = 0;
        self.ended_sent = false;
        self.set_state(PlaybackState::Stopped);
        let _ = self.tx.send(BackendEvent::PositionChanged(0));
        Ok(())
    }

    fn set_position(&mut self, position_ms: u64) -> Result<()> {
        let clamped = if self.duration_ms > 0 {
            position_ms.min(self.duration_ms)
        } else {
            position_ms
        };
        let resume = self.playing_since.is_some();
        self.base_position_ms = clamped;
        self.playing_since = if resume { Some(Instant::now()) } else { None };
        self.ended_sent = false;
        let _ = self.tx.send(BackendEvent::PositionChanged(clamped));
        Ok(())
    }

    fn position(&self) -> u64 {
        let elapsed = self
            .playing_since
            .map(|t| (t.elapsed().as_millis() as f64 * self.rate as f64) as u64)
            .unwrap_or(0);
        let position = self.base_position_ms + elapsed;
        if self.duration_ms > 0 {
            position.min(self.duration_ms)
        } else {
            position
        }
    }

    fn duration(&self) -> u64 {
        self.duration_ms
    }

    fn set_volume(&mut self, gain: f32) -> Result<()> {
        debug!("null backend: volume {:.2}", gain);
        Ok(())
    }

    fn set_muted(&mut self, muted: bool) -> Result<()> {
        debug!("null backend: muted {}", muted);
        Ok(())
    }

    fn set_rate(&mut self, rate: f32) -> Result<()> {
        // Re-anchor the clock so the old rate applies to elapsed time
        self.freeze_position();
        self.rate = rate;
        if self.state == PlaybackState::Playing {
            self.playing_since = Some(Instant::now());
        }
        Ok(())
    }

    fn events(&self) -> Receiver<BackendEvent> {
        self.rx.clone()
    }

    fn poll(&mut self) -> Result<()> {
        if self.state != PlaybackState::Playing {
            return Ok(());
        }

        let position = self.position();
        if self.duration_ms > 0 && position >= self.duration_ms && !self.ended_sent {
            self.ended_sent = true;
            self.freeze_position();
            self.base_position_ms = self.duration_ms;
            self.set_state(PlaybackState::Ended);
            let _ = self.tx.send(BackendEvent::PositionChanged(self.duration_ms));
            let _ = self.tx.send(BackendEvent::EndOfMedia);
        } else {
            let _ = self.tx.send(BackendEvent::PositionChanged(position));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_without_media_fails() {
        let mut backend = NullBackend::new();
        assert!(backend.play().is_err());
    }

    #[test]
    fn test_open_reports_duration() {
        let mut backend = NullBackend::with_duration_ms(5000);
        backend.open(Path::new("test.mp4")).unwrap();

        let events: Vec<_> = backend.events().try_iter().collect();
        assert!(events.contains(&BackendEvent::StatusChanged(PlaybackState::Stopped)));
        assert!(events.contains(&BackendEvent::DurationChanged(5000)));
    }

    #[test]
    fn test_seek_clamps_to_duration() {
        let mut backend = NullBackend::with_duration_ms(5000);
        backend.open(Path::new("test.mp4")).unwrap();
        backend.set_position(60_000).unwrap();
        assert_eq!(backend.position(), 5000);
    }

    #[test]
    fn test_stop_rewinds() {
        let mut backend = NullBackend::with_duration_ms(5000);
        backend.open(Path::new("test.mp4")).unwrap();
        backend.set_position(3000).unwrap();
        backend.stop().unwrap();
        assert_eq!(backend.position(), 0);
    }

    #[test]
    fn test_end_of_media_emitted_once() {
        let mut backend = NullBackend::with_duration_ms(1);
        backend.open(Path::new("test.mp4")).unwrap();
        backend.play().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));

        backend.poll().unwrap();
        backend.poll().unwrap();

        let ends = backend
            .events()
            .try_iter()
            .filter(|e| *e == BackendEvent::EndOfMedia)
            .count();
        assert_eq!(ends, 1);
    }

    #[test]
    fn test_play_after_end_restarts() {
        let mut backend = NullBackend::with_duration_ms(1);
        backend.open(Path::new("test.mp4")).unwrap();
        backend.play().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        backend.poll().unwrap();

        let events: Vec<_> = backend.events().try_iter().collect();
        assert!(events.contains(&BackendEvent::EndOfMedia));
        assert_eq!(backend.position(), 1);

        // Playing again starts over and runs to the end a second time;
        // reported positions never exceed the duration.
        backend.play().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert_eq!(backend.position(), 1);
        backend.poll().unwrap();

        let events: Vec<_> = backend.events().try_iter().collect();
        assert!(events.contains(&BackendEvent::EndOfMedia));
    }

    #[test]
    fn test_pause_freezes_position() {
        let mut backend = NullBackend::with_duration_ms(60_000);
        backend.open(Path::new("test.mp4")).unwrap();
        backend.play().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        backend.pause().unwrap();

        let frozen = backend.position();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert_eq!(backend.position(), frozen);
    }
}
