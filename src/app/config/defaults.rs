// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! Constants are organized by category:
//!
//! - **Volume**: Audio playback volume settings
//! - **Playback**: Loop mode and playback rate
//! - **Controls**: Auto-hide delay of the transport controls

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Default playback volume (0.0 to 1.0, where 1.0 = 100%).
pub const DEFAULT_VOLUME: f32 = 1.0;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = 1.0;

// ==========================================================================
// Playback Defaults
// ==========================================================================

/// Clips restart from the beginning when they end.
pub const DEFAULT_LOOP_ENABLED: bool = true;

/// Default playback rate (normal speed).
pub const DEFAULT_PLAYBACK_RATE: f64 = 1.0;

// ==========================================================================
// Controls Defaults
// ==========================================================================

/// Idle time before the controls hide during playback (in milliseconds).
pub const DEFAULT_HIDE_DELAY_MS: u64 = 2_500;

/// Minimum controls hide delay (in milliseconds).
pub const MIN_HIDE_DELAY_MS: u64 = 500;

/// Maximum controls hide delay (in milliseconds).
pub const MAX_HIDE_DELAY_MS: u64 = 30_000;
