// SPDX-License-Identifier: MPL-2.0
//! Media resource port definition.
//!
//! This module defines the [`MediaBackend`] trait: the capability set the
//! playback controller needs from a playable media element, plus the
//! notification channel the element uses to report what actually happened.
//!
//! # Design Notes
//!
//! - Commands are fire-and-forget. Their outcome arrives later as a
//!   [`MediaEvent`] through the [`MediaEventSink`] handed over in
//!   [`MediaBackend::attach`].
//! - Only `play` and the fullscreen requests can be refused by the platform
//!   (autoplay policy, user gesture requirements). They return a
//!   [`CommandRejection`] so the controller can log it; nothing is retried.
//! - Methods are not `async`: the controller runs on the UI thread and must
//!   never block on the resource.

use serde::Serialize;
use std::fmt;
use tokio::sync::mpsc;

// =============================================================================
// MediaSource / MountOptions
// =============================================================================

/// Reference to the media being played (URL, data URI or path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaSource(String);

impl MediaSource {
    /// Wraps a source reference.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Returns the reference string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Options supplied by the host when mounting a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountOptions {
    /// Restart from the beginning when the end is reached.
    pub loop_enabled: bool,
    /// Start muted (feed autoplay) regardless of the volume preference.
    pub muted_by_default: bool,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            loop_enabled: true,
            muted_by_default: false,
        }
    }
}

// =============================================================================
// Notifications
// =============================================================================

/// Identifies one attachment of a source to a backend.
///
/// Each mount or source change gets a fresh id so late notifications from a
/// replaced source can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(u64);

impl SourceId {
    pub(crate) fn first() -> Self {
        Self(1)
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Discrete notification emitted by a media resource or the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// Metadata loaded; total duration is now known.
    LoadedMetadata { duration_secs: f64 },
    /// Playback position changed.
    TimeUpdate { position_secs: f64 },
    /// Playback actually started.
    Played,
    /// Playback actually paused (includes reaching the end without loop).
    Paused,
    /// The platform entered or left fullscreen, whatever triggered it.
    FullscreenChanged { is_fullscreen: bool },
}

/// A [`MediaEvent`] tagged with the attachment it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaNotification {
    pub source: SourceId,
    pub event: MediaEvent,
}

/// Sending half of the notification channel, bound to one attachment.
///
/// Cloneable so that both the media element and platform listeners
/// (e.g. a document-level fullscreen observer) can report through it.
#[derive(Debug, Clone)]
pub struct MediaEventSink {
    source: SourceId,
    tx: mpsc::UnboundedSender<MediaNotification>,
}

impl MediaEventSink {
    pub(crate) fn new(source: SourceId, tx: mpsc::UnboundedSender<MediaNotification>) -> Self {
        Self { source, tx }
    }

    /// Attachment this sink reports for.
    #[must_use]
    pub fn source(&self) -> SourceId {
        self.source
    }

    /// Queues a notification for the controller.
    ///
    /// Returns false if the controller is gone. Callers usually ignore this:
    /// a notification nobody listens to is simply irrelevant.
    pub fn emit(&self, event: MediaEvent) -> bool {
        self.tx
            .send(MediaNotification {
                source: self.source,
                event,
            })
            .is_ok()
    }
}

// =============================================================================
// CommandRejection
// =============================================================================

/// Why the platform refused a play or fullscreen request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandRejection {
    /// Policy refused it (autoplay blocked, no user gesture).
    NotAllowed(String),
    /// The platform cannot perform it at all.
    Unsupported,
    /// Superseded before it completed (e.g. pause during a pending play).
    Aborted,
}

impl fmt::Display for CommandRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandRejection::NotAllowed(reason) => write!(f, "Not allowed: {reason}"),
            CommandRejection::Unsupported => write!(f, "Not supported by the platform"),
            CommandRejection::Aborted => write!(f, "Aborted"),
        }
    }
}

impl std::error::Error for CommandRejection {}

// =============================================================================
// MediaBackend Trait
// =============================================================================

/// Port for a single playable media resource.
///
/// # Lifecycle
///
/// 1. `attach()` binds a source and the notification sink
/// 2. commands are issued while attached
/// 3. `detach()` removes all listeners; no notification may be emitted
///    for that attachment afterwards
pub trait MediaBackend {
    /// Loads `source` and starts reporting through `events`.
    fn attach(&mut self, source: &MediaSource, options: &MountOptions, events: MediaEventSink);

    /// Stops reporting and releases the source.
    fn detach(&mut self);

    /// Requests playback. Success only means the request was accepted;
    /// [`MediaEvent::Played`] confirms it.
    fn play(&mut self) -> Result<(), CommandRejection>;

    /// Requests a pause, confirmed by [`MediaEvent::Paused`].
    fn pause(&mut self);

    /// Jumps to `position_secs`.
    fn set_current_time(&mut self, position_secs: f64);

    /// Sets output volume (0.0–1.0).
    fn set_volume(&mut self, volume: f32);

    /// Sets the mute flag.
    fn set_muted(&mut self, muted: bool);

    /// Sets the playback rate multiplier.
    fn set_playback_rate(&mut self, rate: f64);

    /// Asks the platform to show the player container fullscreen.
    fn request_fullscreen(&mut self) -> Result<(), CommandRejection>;

    /// Asks the platform to leave fullscreen.
    fn exit_fullscreen(&mut self) -> Result<(), CommandRejection>;
}

/// Creates a notification channel.
pub(crate) fn notification_channel() -> (
    mpsc::UnboundedSender<MediaNotification>,
    mpsc::UnboundedReceiver<MediaNotification>,
) {
    mpsc::unbounded_channel()
}
