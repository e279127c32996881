// SPDX-License-Identifier: MPL-2.0
//! Video playback newtypes.
//!
//! This module provides type-safe wrappers for video playback values,
//! ensuring they are always within valid ranges.

use crate::domain::error::PlaybackError;
use std::fmt;
use std::time::Duration;

// =============================================================================
// Volume
// =============================================================================

/// Volume bounds (0.0 to 1.0, where 1.0 = 100%).
pub mod volume_bounds {
    /// Minimum volume level.
    pub const MIN: f32 = 0.0;
    /// Maximum volume level.
    pub const MAX: f32 = 1.0;
    /// Default volume level.
    pub const DEFAULT: f32 = 1.0;
}

/// Volume level, guaranteed to be within valid range (0.0–1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Silent output.
    pub const SILENT: Self = Self(volume_bounds::MIN);
    /// Full output.
    pub const FULL: Self = Self(volume_bounds::MAX);

    /// Creates a new volume level, clamping to valid range.
    ///
    /// Use this for values read from settings; user intents go through
    /// [`Volume::try_new`] so that out-of-range input is rejected instead.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if volume.is_nan() {
            return Self::default();
        }
        Self(volume.clamp(volume_bounds::MIN, volume_bounds::MAX))
    }

    /// Creates a volume level, rejecting anything outside `0.0..=1.0`.
    pub fn try_new(volume: f32) -> Result<Self, PlaybackError> {
        if volume.is_finite() && (volume_bounds::MIN..=volume_bounds::MAX).contains(&volume) {
            Ok(Self(volume))
        } else {
            Err(PlaybackError::InvalidVolume(volume))
        }
    }

    /// Returns the volume value as f32.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns true if this level produces no sound at all.
    ///
    /// Exactly zero: a tiny but non-zero slider value is still audible.
    #[must_use]
    pub fn is_silent(self) -> bool {
        self.0 == volume_bounds::MIN
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(volume_bounds::DEFAULT)
    }
}

// =============================================================================
// PlaybackRate
// =============================================================================

/// Playback rate presets offered by the effects menu.
pub mod rate_presets {
    /// Supported rates, ascending.
    pub const PRESETS: &[f64] = &[0.5, 0.75, 1.0, 1.25, 1.5, 2.0];
    /// Default playback rate (1.0 = normal speed).
    pub const DEFAULT: f64 = 1.0;
    /// Tolerance used when matching a requested rate against a preset.
    pub const MATCH_TOLERANCE: f64 = 1e-9;
}

/// How a rate feels relative to normal speed, used for menu hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tempo {
    Slow,
    Normal,
    Fast,
}

/// Playback rate, guaranteed to be one of [`rate_presets::PRESETS`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackRate(f64);

impl PlaybackRate {
    /// Looks up the preset matching `rate`.
    ///
    /// Any other value is rejected: the rate menu only offers presets and
    /// the controller enforces the same set.
    pub fn from_preset(rate: f64) -> Result<Self, PlaybackError> {
        rate_presets::PRESETS
            .iter()
            .copied()
            .find(|preset| (preset - rate).abs() < rate_presets::MATCH_TOLERANCE)
            .map(Self)
            .ok_or(PlaybackError::UnsupportedPlaybackRate(rate))
    }

    /// Returns all presets in ascending order.
    pub fn presets() -> impl Iterator<Item = PlaybackRate> {
        rate_presets::PRESETS.iter().copied().map(Self)
    }

    /// Returns the rate as a multiplier.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns the next faster preset, or self if already the fastest.
    #[must_use]
    pub fn faster(self) -> Self {
        rate_presets::PRESETS
            .iter()
            .find(|&&s| s > self.0 + rate_presets::MATCH_TOLERANCE)
            .copied()
            .map_or(self, Self)
    }

    /// Returns the next slower preset, or self if already the slowest.
    #[must_use]
    pub fn slower(self) -> Self {
        rate_presets::PRESETS
            .iter()
            .rev()
            .find(|&&s| s < self.0 - rate_presets::MATCH_TOLERANCE)
            .copied()
            .map_or(self, Self)
    }

    /// Returns whether this rate is slower, equal to, or faster than normal.
    #[must_use]
    pub fn tempo(self) -> Tempo {
        if self.0 < rate_presets::DEFAULT {
            Tempo::Slow
        } else if self.0 > rate_presets::DEFAULT {
            Tempo::Fast
        } else {
            Tempo::Normal
        }
    }

    /// Returns the menu label, e.g. `"1.25x"`.
    #[must_use]
    pub fn label(self) -> String {
        format!("{}x", self.0)
    }
}

impl Default for PlaybackRate {
    fn default() -> Self {
        Self(rate_presets::DEFAULT)
    }
}

impl fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

// =============================================================================
// ControlsHideDelay
// =============================================================================

/// Controls auto-hide delay bounds (in milliseconds).
pub mod hide_delay_bounds {
    /// Minimum delay.
    pub const MIN_MS: u64 = 500;
    /// Maximum delay.
    pub const MAX_MS: u64 = 30_000;
    /// Default delay (2.5 seconds).
    pub const DEFAULT_MS: u64 = 2_500;
}

/// Idle time after which transport controls hide during playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsHideDelay(u64);

impl ControlsHideDelay {
    /// Creates a new delay, clamping to valid range.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis.clamp(hide_delay_bounds::MIN_MS, hide_delay_bounds::MAX_MS))
    }

    /// Returns the delay in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the delay as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for ControlsHideDelay {
    fn default() -> Self {
        Self(hide_delay_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Volume tests
    // -------------------------------------------------------------------------

    #[test]
    fn volume_new_clamps_to_valid_range() {
        assert_eq!(Volume::new(-0.5).value(), volume_bounds::MIN);
        assert_eq!(Volume::new(2.0).value(), volume_bounds::MAX);
        assert_eq!(Volume::new(0.5).value(), 0.5);
        assert_eq!(Volume::new(f32::NAN), Volume::default());
    }

    #[test]
    fn volume_try_new_rejects_out_of_range() {
        assert_eq!(Volume::try_new(0.6).map(Volume::value), Ok(0.6));
        assert_eq!(Volume::try_new(0.0).map(Volume::value), Ok(0.0));
        assert_eq!(Volume::try_new(1.0).map(Volume::value), Ok(1.0));
        assert!(matches!(
            Volume::try_new(1.01),
            Err(PlaybackError::InvalidVolume(_))
        ));
        assert!(Volume::try_new(-0.01).is_err());
        assert!(Volume::try_new(f32::NAN).is_err());
        assert!(Volume::try_new(f32::INFINITY).is_err());
    }

    #[test]
    fn volume_is_silent_only_at_exact_zero() {
        assert!(Volume::SILENT.is_silent());
        assert!(!Volume::new(0.0005).is_silent());
        assert!(!Volume::FULL.is_silent());
    }

    // -------------------------------------------------------------------------
    // PlaybackRate tests
    // -------------------------------------------------------------------------

    #[test]
    fn rate_accepts_every_preset() {
        for &preset in rate_presets::PRESETS {
            assert_eq!(PlaybackRate::from_preset(preset).map(PlaybackRate::value), Ok(preset));
        }
    }

    #[test]
    fn rate_rejects_values_outside_preset_set() {
        for rate in [0.0, -1.0, 0.6, 1.1, 3.0, f64::NAN] {
            assert!(
                PlaybackRate::from_preset(rate).is_err(),
                "{} should be rejected",
                rate
            );
        }
    }

    #[test]
    fn rate_default_is_normal() {
        assert_eq!(PlaybackRate::default().value(), 1.0);
        assert_eq!(PlaybackRate::default().tempo(), Tempo::Normal);
    }

    #[test]
    fn rate_steps_between_presets_and_saturates() {
        let normal = PlaybackRate::default();
        assert_eq!(normal.faster().value(), 1.25);
        assert_eq!(normal.slower().value(), 0.75);

        let slowest = PlaybackRate::from_preset(0.5).unwrap();
        assert_eq!(slowest.slower(), slowest);
        let fastest = PlaybackRate::from_preset(2.0).unwrap();
        assert_eq!(fastest.faster(), fastest);
    }

    #[test]
    fn rate_tempo_and_label() {
        let slow = PlaybackRate::from_preset(0.75).unwrap();
        assert_eq!(slow.tempo(), Tempo::Slow);
        assert_eq!(slow.label(), "0.75x");

        let fast = PlaybackRate::from_preset(2.0).unwrap();
        assert_eq!(fast.tempo(), Tempo::Fast);
        assert_eq!(fast.to_string(), "2x");
    }

    #[test]
    fn rate_presets_iterate_in_order() {
        let values: Vec<f64> = PlaybackRate::presets().map(PlaybackRate::value).collect();
        assert_eq!(values, rate_presets::PRESETS);
    }

    // -------------------------------------------------------------------------
    // ControlsHideDelay tests
    // -------------------------------------------------------------------------

    #[test]
    fn hide_delay_default_is_two_and_a_half_seconds() {
        assert_eq!(
            ControlsHideDelay::default().as_duration(),
            Duration::from_millis(2_500)
        );
    }

    #[test]
    fn hide_delay_clamps() {
        assert_eq!(ControlsHideDelay::from_millis(0).as_millis(), hide_delay_bounds::MIN_MS);
        assert_eq!(
            ControlsHideDelay::from_millis(u64::MAX).as_millis(),
            hide_delay_bounds::MAX_MS
        );
        assert_eq!(ControlsHideDelay::from_millis(4_000).as_millis(), 4_000);
    }
}
