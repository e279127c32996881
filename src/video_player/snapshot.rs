// SPDX-License-Identifier: MPL-2.0
//! Observable player state for the presentation layer.

use super::time_units::{format_clock, progress_fraction};
use crate::domain::video::{PlaybackPhase, PlaybackRate, Tempo, VisualFilter};
use serde::Serialize;

/// Everything the controls overlay needs to render one frame.
///
/// A snapshot is a copy: it never changes after being taken, and taking one
/// has no side effects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    /// Source currently attached (empty once torn down).
    pub source: String,

    /// Primary playback phase.
    pub phase: PlaybackPhase,

    /// Media confirmed playback.
    pub is_playing: bool,

    /// Current position in seconds.
    pub current_time: f64,

    /// Total duration in seconds (0 until metadata loads).
    pub duration: f64,

    /// Stored volume preference (0.0 to 1.0).
    pub volume: f32,

    /// Is audio muted?
    pub is_muted: bool,

    /// Level the media resource outputs (0 when muted).
    pub effective_volume: f32,

    /// Current playback rate multiplier.
    pub playback_rate: f64,

    /// Preview filter applied on render.
    pub active_filter: VisualFilter,

    /// Are the transport controls shown?
    pub controls_visible: bool,

    /// Is the filter/speed menu open?
    pub effects_menu_open: bool,

    /// Does the platform show the player fullscreen?
    pub is_fullscreen: bool,

    /// Is loop mode enabled?
    pub loop_enabled: bool,
}

impl PlaybackSnapshot {
    /// Progress bar fill, tolerant of an unknown duration.
    #[must_use]
    pub fn progress_fraction(&self) -> f64 {
        progress_fraction(self.current_time, self.duration)
    }

    /// Label left of the progress bar.
    #[must_use]
    pub fn elapsed_label(&self) -> String {
        format_clock(self.current_time)
    }

    /// Label right of the progress bar.
    #[must_use]
    pub fn duration_label(&self) -> String {
        format_clock(self.duration)
    }

    /// Whether the large centered play button is shown.
    #[must_use]
    pub fn shows_center_play_button(&self) -> bool {
        !self.is_playing && !self.effects_menu_open
    }

    /// Whether the volume icon shows the muted glyph.
    #[must_use]
    pub fn shows_muted_icon(&self) -> bool {
        self.is_muted || self.volume == 0.0
    }

    /// Label of the speed button, e.g. `"1.25x"`.
    #[must_use]
    pub fn rate_label(&self) -> String {
        self.rate().label()
    }

    /// Whether the speed button shows a slow or fast hint.
    #[must_use]
    pub fn rate_tempo(&self) -> Tempo {
        self.rate().tempo()
    }

    fn rate(&self) -> PlaybackRate {
        PlaybackRate::from_preset(self.playback_rate).unwrap_or_default()
    }

    /// CSS filter expression to apply to the video surface.
    #[must_use]
    pub fn filter_css(&self) -> &'static str {
        self.active_filter.css()
    }
}
