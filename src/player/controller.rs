//! Player controller for BVPlayer
//!
//! Turns shell events into backend commands, keeps the playlist and the
//! shared state snapshot in sync with backend notifications, and notifies
//! registered listeners of player events via an explicit listener list.

use crate::player::{
    BackendEvent, MediaBackend, PlaybackState, PlayerEvent, PlayerState, Playlist,
    PositionHistory, VolumeControl,
};
use crate::utils::config::PlaybackConfig;
use crate::utils::error::Result;
use crate::window::{ControlEvent, Key, ShellEvent};
use crossbeam_channel::Receiver;
use log::{debug, info, warn};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;

/// Available playback rates, cycled by the rate key
const PLAYBACK_RATES: &[f32] = &[0.5, 1.0, 2.0];

/// Resume positions are flushed this often during playback
const POSITION_SAVE_INTERVAL_MS: u64 = 5_000;

/// Window-level action the controller asks the shell to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellDirective {
    Quit,
    ToggleFullscreen,
    ExitFullscreen,
    Minimize,
    ToggleMaximize,
}

/// Listener invoked for every emitted `PlayerEvent`
pub type EventListener = Box<dyn FnMut(&PlayerEvent) + Send>;

/// Orchestrates backend, playlist, volume, and state
pub struct PlayerController {
    backend: Box<dyn MediaBackend>,
    backend_events: Receiver<BackendEvent>,

    playlist: Playlist,
    volume: VolumeControl,
    state: Arc<RwLock<PlayerState>>,
    history: PositionHistory,
    config: PlaybackConfig,

    listeners: Vec<EventListener>,

    /// Index into `PLAYBACK_RATES`
    rate_index: usize,

    last_saved_position_ms: u64,
}

impl PlayerController {
    pub fn new(mut backend: Box<dyn MediaBackend>, config: PlaybackConfig) -> Result<Self> {
        let volume = VolumeControl::new(config.volume);
        backend.set_volume(volume.effective_gain())?;

        let backend_events = backend.events();
        let state = PlayerState {
            volume: volume.volume(),
            ..Default::default()
        };

        let history = if config.remember_position {
            PositionHistory::load()
        } else {
            PositionHistory::load_from(None)
        };

        Ok(Self {
            backend,
            backend_events,
            playlist: Playlist::new(),
            volume,
            state: Arc::new(RwLock::new(state)),
            history,
            config,
            listeners: Vec::new(),
            rate_index: 1, // 1.0x
            last_saved_position_ms: 0,
        })
    }

    /// Replace the resume-position history, mainly for tests
    pub fn with_history(mut self, history: PositionHistory) -> Self {
        self.history = history;
        self
    }

    /// Register a listener for player events
    pub fn add_listener(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    /// Shared state snapshot handle for the shell's title refresh
    pub fn state_handle(&self) -> Arc<RwLock<PlayerState>> {
        Arc::clone(&self.state)
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.state.read().playback_state
    }

    /// Append files to the playlist; starts playback of the first one when
    /// the playlist was empty and auto-play is on.
    pub fn add_files(&mut self, paths: &[PathBuf]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }

        let was_empty = self.playlist.is_empty();
        for path in paths {
            let index = self.playlist.add(path);
            debug!("playlist add [{}]: {:?}", index, path);
        }
        self.emit(&PlayerEvent::MediaLoaded {
            title: self
                .playlist
                .current()
                .map(|i| i.title.clone())
                .unwrap_or_default(),
        });

        if was_empty {
            self.open_current()?;
            if self.config.auto_play {
                self.play()?;
            }
        }
        Ok(())
    }

    /// Remove a playlist entry; stops playback when the playing item goes away
    pub fn remove_track(&mut self, index: usize) -> Result<()> {
        let was_current = self.playlist.current_index() == Some(index);
        self.playlist.remove(index)?;

        if was_current {
            self.backend.stop()?;
            if self.playlist.current().is_some() {
                let was_playing = self.playback_state() == PlaybackState::Playing;
                self.open_current()?;
                if was_playing {
                    self.play()?;
                }
            } else {
                let mut state = self.state.write();
                state.playback_state = PlaybackState::Idle;
                state.title = None;
                state.position_ms = 0;
                state.duration_ms = 0;
            }
        }
        Ok(())
    }

    /// Open the playlist's current item in the backend
    pub fn open_current(&mut self) -> Result<()> {
        let Some(item) = self.playlist.current() else {
            return Ok(());
        };
        let path = item.path.clone();
        let title = item.title.clone();
        let index = self.playlist.current_index().unwrap_or(0);

        info!("opening {:?}", path);
        self.backend.open(&path)?;
        self.backend.set_volume(self.volume.effective_gain())?;
        self.backend.set_rate(PLAYBACK_RATES[self.rate_index])?;
        self.last_saved_position_ms = 0;

        {
            let mut state = self.state.write();
            state.title = Some(title.clone());
            state.position_ms = 0;
            state.duration_ms = self.backend.duration();
            state.last_error = None;
        }

        if self.config.remember_position {
            if let Some(resume_ms) = self.history.get_position(&path) {
                info!("resuming at {} ms", resume_ms);
                self.backend.set_position(resume_ms)?;
                self.state.write().position_ms = resume_ms;
            }
        }

        self.emit(&PlayerEvent::TrackChanged { index });
        Ok(())
    }

    pub fn play(&mut self) -> Result<()> {
        if self.playlist.is_empty() {
            return Ok(());
        }
        self.backend.play()?;
        self.state.write().playback_state = PlaybackState::Playing;
        self.emit(&PlayerEvent::PlaybackStarted);
        Ok(())
    }

    pub fn pause(&mut self) -> Result<()> {
        self.backend.pause()?;
        self.state.write().playback_state = PlaybackState::Paused;
        self.emit(&PlayerEvent::PlaybackPaused);
        Ok(())
    }

    /// Play/pause toggle, the behavior of the main transport button
    pub fn toggle_playback(&mut self) -> Result<()> {
        match self.playback_state() {
            PlaybackState::Playing => self.pause(),
            _ => self.play(),
        }
    }

    pub fn stop(&mut self) -> Result<()> {
        self.backend.stop()?;
        {
            let mut state = self.state.write();
            state.playback_state = PlaybackState::Stopped;
            state.position_ms = 0;
        }
        self.emit(&PlayerEvent::PlaybackStopped);
        Ok(())
    }

    pub fn next(&mut self) -> Result<()> {
        self.switch_track(|playlist| playlist.next())
    }

    pub fn previous(&mut self) -> Result<()> {
        self.switch_track(|playlist| playlist.previous())
    }

    fn switch_track(&mut self, select: impl FnOnce(&mut Playlist) -> Option<usize>) -> Result<()> {
        let was_playing = self.playback_state() == PlaybackState::Playing;
        if select(&mut self.playlist).is_none() {
            return Ok(());
        }
        self.open_current()?;
        if was_playing || self.config.auto_play {
            self.play()?;
        }
        Ok(())
    }

    /// Seek by a signed amount of seconds relative to the current position
    pub fn seek_relative(&mut self, delta_secs: i64) -> Result<()> {
        let position = self.backend.position() as i64;
        let target = (position + delta_secs * 1000).max(0) as u64;
        self.seek_to(target)
    }

    /// Seek to an absolute position in milliseconds
    pub fn seek_to(&mut self, position_ms: u64) -> Result<()> {
        self.backend.set_position(position_ms)?;
        self.state.write().position_ms = self.backend.position();
        Ok(())
    }

    /// Step the volume up or down along the perceptual curve
    pub fn volume_step(&mut self, direction: f32) -> Result<()> {
        self.volume.step(direction * self.config.volume_step);
        self.apply_volume()
    }

    pub fn set_volume(&mut self, gain: f32) -> Result<()> {
        self.volume.set_volume(gain);
        self.apply_volume()
    }

    pub fn toggle_mute(&mut self) -> Result<()> {
        let muted = self.volume.toggle_mute();
        self.backend.set_muted(muted)?;
        self.backend.set_volume(self.volume.effective_gain())?;
        {
            let mut state = self.state.write();
            state.muted = muted;
            state.volume = self.volume.volume();
        }
        self.emit(&PlayerEvent::MutedChanged { muted });
        Ok(())
    }

    fn apply_volume(&mut self) -> Result<()> {
        self.backend.set_volume(self.volume.effective_gain())?;
        {
            let mut state = self.state.write();
            state.volume = self.volume.volume();
            state.muted = self.volume.is_muted();
        }
        self.emit(&PlayerEvent::VolumeChanged {
            volume: self.volume.volume(),
        });
        Ok(())
    }

    /// Step through the rate table without wrapping
    pub fn rate_step(&mut self, direction: i32) -> Result<()> {
        let index = (self.rate_index as i32 + direction)
            .clamp(0, PLAYBACK_RATES.len() as i32 - 1) as usize;
        self.set_rate_index(index)
    }

    /// Cycle through the rate table, wrapping at the end
    pub fn cycle_rate(&mut self) -> Result<()> {
        self.set_rate_index((self.rate_index + 1) % PLAYBACK_RATES.len())
    }

    fn set_rate_index(&mut self, index: usize) -> Result<()> {
        if index == self.rate_index {
            return Ok(());
        }
        self.rate_index = index;
        let rate = PLAYBACK_RATES[index];
        self.backend.set_rate(rate)?;
        self.state.write().rate = rate;
        self.emit(&PlayerEvent::RateChanged { rate });
        Ok(())
    }

    pub fn rate(&self) -> f32 {
        PLAYBACK_RATES[self.rate_index]
    }

    pub fn toggle_random(&mut self) -> bool {
        let random = self.playlist.toggle_random();
        info!("random order {}", if random { "on" } else { "off" });
        random
    }

    /// Dispatch a shell event; returns a directive for the window when one
    /// is needed.
    pub fn handle_shell_event(&mut self, event: &ShellEvent) -> Result<Option<ShellDirective>> {
        match event {
            ShellEvent::CloseRequested => return Ok(Some(ShellDirective::Quit)),

            ShellEvent::Control(ControlEvent::Close) => return Ok(Some(ShellDirective::Quit)),
            ShellEvent::Control(ControlEvent::Minimize) => {
                return Ok(Some(ShellDirective::Minimize))
            }
            ShellEvent::Control(ControlEvent::Maximize) => {
                return Ok(Some(ShellDirective::ToggleMaximize))
            }

            ShellEvent::MouseWheel { delta } => {
                if *delta > 0.0 {
                    self.volume_step(1.0)?;
                } else if *delta < 0.0 {
                    self.volume_step(-1.0)?;
                }
            }

            ShellEvent::FilesDropped { paths } => self.add_files(paths)?,

            ShellEvent::KeyPressed { key, .. } => match key {
                Key::Space | Key::Enter => self.toggle_playback()?,
                Key::Left => self.seek_relative(-(self.config.seek_step as i64))?,
                Key::Right => self.seek_relative(self.config.seek_step as i64)?,
                Key::Up | Key::VolumeUp => self.volume_step(1.0)?,
                Key::Down | Key::VolumeDown => self.volume_step(-1.0)?,
                Key::M | Key::VolumeMute => self.toggle_mute()?,
                Key::N | Key::PageDown => self.next()?,
                Key::P | Key::PageUp => self.previous()?,
                Key::Minus => self.rate_step(-1)?,
                Key::Plus => self.rate_step(1)?,
                Key::R => self.cycle_rate()?,
                Key::S => {
                    self.toggle_random();
                }
                Key::F => return Ok(Some(ShellDirective::ToggleFullscreen)),
                Key::Escape => return Ok(Some(ShellDirective::ExitFullscreen)),
                Key::Q => return Ok(Some(ShellDirective::Quit)),
            },

            ShellEvent::Resized { .. } | ShellEvent::Focused | ShellEvent::Unfocused => {}
        }
        Ok(None)
    }

    /// Drive backend progress and drain its notifications.
    /// Called regularly from the shell's event loop.
    pub fn pump(&mut self) -> Result<()> {
        self.backend.poll()?;

        let pending: Vec<BackendEvent> = self.backend_events.try_iter().collect();
        for event in pending {
            self.handle_backend_event(event)?;
        }
        Ok(())
    }

    fn handle_backend_event(&mut self, event: BackendEvent) -> Result<()> {
        match event {
            BackendEvent::DurationChanged(duration_ms) => {
                self.state.write().duration_ms = duration_ms;
                self.playlist.set_current_duration(duration_ms);
                self.emit(&PlayerEvent::DurationChanged { duration_ms });
            }

            BackendEvent::PositionChanged(position_ms) => {
                self.state.write().position_ms = position_ms;
                self.maybe_save_position(position_ms);
                self.emit(&PlayerEvent::PositionChanged { position_ms });
            }

            BackendEvent::StatusChanged(status) => {
                self.state.write().playback_state = status;
            }

            BackendEvent::EndOfMedia => {
                if let Some(item) = self.playlist.current() {
                    let path = item.path.clone();
                    self.history.forget(&path);
                }
                if self.playlist.advance_after_end().is_some() {
                    self.open_current()?;
                    self.play()?;
                } else {
                    self.state.write().playback_state = PlaybackState::Ended;
                    self.emit(&PlayerEvent::EndOfMedia);
                }
            }

            BackendEvent::Error(message) => {
                warn!("backend error: {}", message);
                {
                    let mut state = self.state.write();
                    state.last_error = Some(message.clone());
                    state.playback_state = PlaybackState::Error;
                }
                self.emit(&PlayerEvent::Error { message });
            }
        }
        Ok(())
    }

    fn maybe_save_position(&mut self, position_ms: u64) {
        if !self.config.remember_position {
            return;
        }
        if position_ms.abs_diff(self.last_saved_position_ms) < POSITION_SAVE_INTERVAL_MS {
            return;
        }
        let Some(item) = self.playlist.current() else {
            return;
        };
        let path = item.path.clone();
        let duration_ms = self.state.read().duration_ms;
        self.history.save_position(&path, position_ms, duration_ms);
        self.last_saved_position_ms = position_ms;
    }

    fn emit(&mut self, event: &PlayerEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}
