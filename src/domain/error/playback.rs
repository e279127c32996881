// SPDX-License-Identifier: MPL-2.0
//! Errors raised synchronously by the playback controller.
//!
//! Every variant describes a rejected intent: the call was a no-op and the
//! controller kept its prior state. Rejections coming back from the media
//! resource itself are not errors at this level (see
//! [`CommandRejection`](crate::application::port::media::CommandRejection)).

use std::fmt;

/// Reason a playback intent was refused at the API boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackError {
    /// Volume outside `0.0..=1.0` or not a finite number.
    InvalidVolume(f32),

    /// Playback rate that is not one of the supported presets.
    UnsupportedPlaybackRate(f64),

    /// Seek target outside `0.0..=duration`.
    SeekOutOfRange {
        /// Requested position in seconds.
        target_secs: f64,
        /// Known media duration in seconds.
        duration_secs: f64,
    },

    /// Seek to a non-zero position before metadata reported a duration.
    DurationUnknown,

    /// Filter identifier that does not name a preset.
    UnknownFilter(String),

    /// The controller has been torn down; no further intents are accepted.
    Detached,
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::InvalidVolume(volume) => {
                write!(f, "Volume {} is outside 0.0..=1.0", volume)
            }
            PlaybackError::UnsupportedPlaybackRate(rate) => {
                write!(f, "Playback rate {}x is not a supported preset", rate)
            }
            PlaybackError::SeekOutOfRange {
                target_secs,
                duration_secs,
            } => write!(
                f,
                "Seek target {:.3}s is outside 0..={:.3}s",
                target_secs, duration_secs
            ),
            PlaybackError::DurationUnknown => {
                write!(f, "Cannot seek before media duration is known")
            }
            PlaybackError::UnknownFilter(id) => write!(f, "Unknown filter: {}", id),
            PlaybackError::Detached => write!(f, "Player has been torn down"),
        }
    }
}

impl std::error::Error for PlaybackError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_rejected_value() {
        assert!(PlaybackError::InvalidVolume(1.5).to_string().contains("1.5"));
        assert!(PlaybackError::UnsupportedPlaybackRate(3.0)
            .to_string()
            .contains("3x"));
        assert!(PlaybackError::UnknownFilter("vhs".into())
            .to_string()
            .contains("vhs"));
    }

    #[test]
    fn seek_out_of_range_shows_both_bounds() {
        let err = PlaybackError::SeekOutOfRange {
            target_secs: 130.0,
            duration_secs: 125.0,
        };
        let message = err.to_string();
        assert!(message.contains("130.000"));
        assert!(message.contains("125.000"));
    }
}
