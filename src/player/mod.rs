//! Player module for BVPlayer
//!
//! This module coordinates playback: the `MediaBackend` boundary that owns
//! all decoding and rendering, the playlist, volume handling, and the
//! controller that turns shell events into backend commands.

mod backend;
mod controller;
mod playlist;
mod state;
mod volume;

pub use backend::{BackendEvent, MediaBackend, NullBackend};
pub use controller::{PlayerController, ShellDirective};
pub use playlist::{Playlist, PlaylistItem, RepeatMode};
pub use state::{PlayerState, PositionHistory};
pub use volume::{curve, VolumeControl};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No media loaded
    Idle,

    /// Media loaded but not playing
    Stopped,

    /// Currently playing
    Playing,

    /// Playback paused
    Paused,

    /// End of media reached
    Ended,

    /// Error occurred
    Error,
}

/// Player event delivered to registered listeners
#[derive(Debug, Clone)]
pub enum PlayerEvent {
    /// Media loaded
    MediaLoaded { title: String },

    /// Playback started
    PlaybackStarted,

    /// Playback paused
    PlaybackPaused,

    /// Playback stopped
    PlaybackStopped,

    /// Position changed, in milliseconds
    PositionChanged { position_ms: u64 },

    /// Duration became known, in milliseconds
    DurationChanged { duration_ms: u64 },

    /// Volume changed (linear gain, 0.0 - 1.0)
    VolumeChanged { volume: f32 },

    /// Mute state changed
    MutedChanged { muted: bool },

    /// Playback rate changed
    RateChanged { rate: f32 },

    /// Playlist switched to another item
    TrackChanged { index: usize },

    /// End of media reached with nothing left to play
    EndOfMedia,

    /// Error occurred
    Error { message: String },
}
