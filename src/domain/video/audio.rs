// SPDX-License-Identifier: MPL-2.0
//! Volume and mute bookkeeping.
//!
//! The stored volume is a user preference and survives muting, so that
//! unmuting restores it. The level actually sent to the media resource is
//! [`AudioState::effective_volume`], which is silent whenever muted.

use super::newtypes::Volume;

/// Volume preference plus mute flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioState {
    volume: Volume,
    muted: bool,
    /// Last non-zero volume the user picked, restored on unmute.
    last_audible: Option<Volume>,
}

impl AudioState {
    /// Creates the initial audio state for a mount.
    #[must_use]
    pub fn new(volume: Volume, muted: bool) -> Self {
        Self {
            volume,
            muted: muted || volume.is_silent(),
            last_audible: (!volume.is_silent()).then_some(volume),
        }
    }

    /// Stored volume preference.
    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// Whether output is muted.
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level the media resource should output.
    #[must_use]
    pub fn effective_volume(&self) -> Volume {
        if self.muted {
            Volume::SILENT
        } else {
            self.volume
        }
    }

    /// Applies a slider change. Zero mutes, anything else unmutes.
    pub fn set_volume(&mut self, volume: Volume) {
        self.volume = volume;
        self.muted = volume.is_silent();
        if !volume.is_silent() {
            self.last_audible = Some(volume);
        }
    }

    /// Flips the mute flag.
    ///
    /// Unmuting a silent volume brings back the last audible level, or full
    /// volume when none was ever recorded.
    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.muted = false;
            if self.volume.is_silent() {
                self.volume = self.last_audible.unwrap_or(Volume::FULL);
            }
        } else {
            self.muted = true;
        }
    }
}

impl Default for AudioState {
    fn default() -> Self {
        Self::new(Volume::default(), false)
    }
}
