// SPDX-License-Identifier: MPL-2.0
//! Time helpers for playback display.
//!
//! Positions and durations are plain `f64` seconds throughout the player;
//! these helpers turn them into what the progress bar and labels show.

const SECS_PER_MINUTE: u64 = 60;

/// Formats seconds as `m:ss`, the label format under the progress bar.
///
/// Minutes are not wrapped into hours: a 75 minute video reads `75:00`.
/// Negative and non-finite input renders as `0:00`.
///
/// # Examples
///
/// ```
/// use pawnet_player::video_player::time_units::format_clock;
///
/// assert_eq!(format_clock(0.0), "0:00");
/// assert_eq!(format_clock(125.9), "2:05");
/// ```
pub fn format_clock(seconds: f64) -> String {
    let total_secs = if seconds.is_finite() {
        seconds.max(0.0) as u64
    } else {
        0
    };
    let minutes = total_secs / SECS_PER_MINUTE;
    let secs = total_secs % SECS_PER_MINUTE;
    format!("{}:{:02}", minutes, secs)
}

/// Fraction of the media already played, in `0.0..=1.0`.
///
/// Returns 0 while the duration is still the unknown sentinel (0).
#[inline]
pub fn progress_fraction(position_secs: f64, duration_secs: f64) -> f64 {
    if duration_secs > 0.0 && position_secs.is_finite() {
        (position_secs / duration_secs).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
