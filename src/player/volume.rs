//! Volume handling for BVPlayer
//!
//! Sliders and volume keys work in perceptual (logarithmic) positions while
//! the backend wants linear gain; `curve` converts between the two. The
//! `VolumeControl` tracks the master gain and mute state, restoring the
//! pre-mute volume on unmute.

/// Conversion between perceptual slider positions and linear gain
///
/// Uses the exponential curve `gain = (100^s - 1) / 99`: half slider is
/// roughly a tenth of full gain, which matches how loudness is perceived.
/// Both directions are exact inverses and fix the endpoints 0 and 1.
pub mod curve {
    const RANGE: f32 = 99.0;

    /// Convert a slider position (0.0 - 1.0) to linear gain (0.0 - 1.0)
    pub fn slider_to_gain(slider: f32) -> f32 {
        let s = slider.clamp(0.0, 1.0);
        (100.0_f32.powf(s) - 1.0) / RANGE
    }

    /// Convert linear gain (0.0 - 1.0) to a slider position (0.0 - 1.0)
    pub fn gain_to_slider(gain: f32) -> f32 {
        let g = gain.clamp(0.0, 1.0);
        (1.0 + RANGE * g).log10() / 2.0
    }
}

/// Master volume and mute state
#[derive(Debug, Clone)]
pub struct VolumeControl {
    /// Master volume as linear gain (0.0 to 1.0)
    volume: f32,

    /// Volume before muting, restored on unmute
    pre_mute_volume: f32,

    /// Mute state
    muted: bool,
}

impl VolumeControl {
    pub fn new(volume: f32) -> Self {
        let volume = volume.clamp(0.0, 1.0);
        Self {
            volume,
            pre_mute_volume: volume,
            muted: false,
        }
    }

    /// Set master volume; unmutes when a non-zero volume is set explicitly
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if !self.muted {
            self.pre_mute_volume = self.volume;
        } else if self.volume > 0.0 {
            self.muted = false;
            self.pre_mute_volume = self.volume;
        }
    }

    /// Step the volume along the perceptual curve by `step` slider units
    ///
    /// Returns the new linear gain.
    pub fn step(&mut self, step: f32) -> f32 {
        let slider = curve::gain_to_slider(self.volume);
        self.set_volume(curve::slider_to_gain(slider + step));
        self.volume
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Gain the backend should actually apply
    pub fn effective_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn mute(&mut self) {
        if !self.muted {
            self.pre_mute_volume = self.volume;
            self.muted = true;
        }
    }

    pub fn unmute(&mut self) {
        if self.muted {
            self.muted = false;
            self.volume = self.pre_mute_volume;
        }
    }

    /// Toggle mute; returns the new mute state
    pub fn toggle_mute(&mut self) -> bool {
        if self.muted {
            self.unmute();
        } else {
            self.mute();
        }
        self.muted
    }
}

impl Default for VolumeControl {
    fn default() -> Self {
        Self::new(0.7)
    }
}
