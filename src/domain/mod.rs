// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core playback rules with no I/O.
//!
//! This module contains pure domain types, value objects, and business rules.
//!
//! # Modules
//!
//! - [`error`]: Domain error types ([`PlaybackError`](error::PlaybackError))
//! - [`video`]: Video playback types ([`PlaybackPhase`](video::PlaybackPhase),
//!   [`Volume`](video::Volume), [`PlaybackRate`](video::PlaybackRate),
//!   [`VisualFilter`](video::VisualFilter), [`AudioState`](video::AudioState))

pub mod error;
pub mod video;
