// SPDX-License-Identifier: MPL-2.0
//! Video playback controller for PawNet.
//!
//! This module turns user intents and media-element notifications into a
//! consistent playback state, using a [`MediaBackend`] for the resource and
//! Tokio tasks for the controls auto-hide timer.

mod controls;
pub mod snapshot;
mod state;
pub mod time_units;

pub use controls::ControlsTimeout;
pub use snapshot::PlaybackSnapshot;
pub use state::{MediaController, PlayerEvent, PlayerSettings};

use crate::application::port::media::{MediaBackend, MediaSource, MountOptions};

/// Mounts a player for `source` with default preferences.
pub fn mount_player<B: MediaBackend>(
    backend: B,
    source: MediaSource,
    options: MountOptions,
) -> MediaController<B> {
    MediaController::mount(backend, source, options, PlayerSettings::default())
}
