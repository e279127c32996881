// SPDX-License-Identifier: MPL-2.0
//! Video playback state machine.
//!
//! This module defines the primary playback phases. Mute, fullscreen,
//! filter and rate are independent flags layered on top and never change
//! the phase.

/// Represents the primary playback phase of a mounted source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaybackPhase {
    /// No source attached. Terminal once a controller is torn down.
    #[default]
    Unloaded,
    /// Source attached, waiting for metadata.
    Loading,
    /// Media reported a pause (or metadata arrived; media starts paused).
    Paused,
    /// Media confirmed that playback is running.
    Playing,
}

impl PlaybackPhase {
    /// Returns true if the media confirmed playback.
    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Returns true while waiting for metadata.
    #[must_use]
    pub fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns true if nothing is attached.
    #[must_use]
    pub fn is_unloaded(self) -> bool {
        matches!(self, Self::Unloaded)
    }
}
