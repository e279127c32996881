// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the playback controller
//! remains independent of any concrete media element.
//!
//! # Available Ports
//!
//! - [`media`]: Playable media resource and its notification channel
//!
//! # Example
//!
//! ```
//! use pawnet_player::application::port::{MediaEvent, MediaSource, MountOptions};
//! use pawnet_player::infrastructure::SimulatedMedia;
//! use pawnet_player::video_player::mount_player;
//!
//! let media = SimulatedMedia::new(125.0);
//! let mut player = mount_player(media, MediaSource::new("clip.mp4"), MountOptions::default());
//! player.handle_media_event(MediaEvent::LoadedMetadata { duration_secs: 125.0 });
//! assert_eq!(player.snapshot().duration, 125.0);
//! ```

pub mod media;

// Re-export main types for convenience
pub use media::{
    CommandRejection, MediaBackend, MediaEvent, MediaEventSink, MediaNotification, MediaSource,
    MountOptions, SourceId,
};
