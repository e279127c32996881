// SPDX-License-Identifier: MPL-2.0
//! `pawnet_player` is the playback controller behind PawNet's video player.
//!
//! It keeps the player's observable state (play/pause, position, volume,
//! rate, preview filter, fullscreen, controls visibility) consistent with
//! what the underlying media resource reports, and ships an interactive
//! host driving an in-memory media element.

#![doc(html_root_url = "https://docs.rs/pawnet_player/0.1.0")]

pub mod app;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod video_player;
