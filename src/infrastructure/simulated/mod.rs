// SPDX-License-Identifier: MPL-2.0
//! In-memory media element implementing the [`MediaBackend`] port.
//!
//! [`SimulatedMedia`] behaves like a browser `<video>` element closely
//! enough to drive the controller without decoding anything: play and
//! fullscreen requests can be refused by a configurable policy, accepted
//! requests are confirmed through the notification sink, and
//! [`SimulatedMedia::advance`] moves the playhead, looping or pausing at the
//! end.
//!
//! Every command received is recorded, so tests can assert exactly what the
//! controller asked of the resource.
//!
//! [`MediaBackend`]: crate::application::port::MediaBackend

use crate::application::port::media::{
    CommandRejection, MediaBackend, MediaEvent, MediaEventSink, MediaSource, MountOptions,
};
use std::time::Duration;

/// A command received from the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCommand {
    Attach(String),
    Detach,
    Play,
    Pause,
    SetCurrentTime(f64),
    SetVolume(f32),
    SetMuted(bool),
    SetPlaybackRate(f64),
    RequestFullscreen,
    ExitFullscreen,
}

/// Simulated media element.
#[derive(Debug)]
pub struct SimulatedMedia {
    /// Duration reported by [`SimulatedMedia::load_metadata`].
    duration_secs: f64,
    autoplay_blocked: bool,
    fullscreen_denied: bool,

    events: Option<MediaEventSink>,
    source: Option<MediaSource>,
    loop_enabled: bool,

    position_secs: f64,
    paused: bool,
    volume: f32,
    muted: bool,
    playback_rate: f64,
    fullscreen: bool,

    commands: Vec<MediaCommand>,
}

impl SimulatedMedia {
    /// Creates an element whose sources all last `duration_secs`.
    pub fn new(duration_secs: f64) -> Self {
        Self {
            duration_secs,
            autoplay_blocked: false,
            fullscreen_denied: false,
            events: None,
            source: None,
            loop_enabled: false,
            position_secs: 0.0,
            paused: true,
            volume: 1.0,
            muted: false,
            playback_rate: 1.0,
            fullscreen: false,
            commands: Vec::new(),
        }
    }

    /// Refuse play requests, as an autoplay policy would.
    #[must_use]
    pub fn with_autoplay_blocked(mut self, blocked: bool) -> Self {
        self.autoplay_blocked = blocked;
        self
    }

    /// Refuse fullscreen requests.
    #[must_use]
    pub fn with_fullscreen_denied(mut self, denied: bool) -> Self {
        self.fullscreen_denied = denied;
        self
    }

    /// Changes the play policy at runtime (e.g. after a user gesture).
    pub fn set_autoplay_blocked(&mut self, blocked: bool) {
        self.autoplay_blocked = blocked;
    }

    // =========================================================================
    // Element-side behaviour
    // =========================================================================

    /// Reports metadata for the attached source.
    pub fn load_metadata(&mut self) {
        self.emit(MediaEvent::LoadedMetadata {
            duration_secs: self.duration_secs,
        });
    }

    /// Reports a re-buffered stream with a different duration.
    pub fn reload_metadata(&mut self, duration_secs: f64) {
        self.duration_secs = duration_secs;
        self.load_metadata();
    }

    /// Moves the playhead by `elapsed` wall time at the current rate.
    ///
    /// At the end the element either wraps around (loop) or parks on the last
    /// position and pauses.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.paused || self.events.is_none() {
            return;
        }

        let next = self.position_secs + elapsed.as_secs_f64() * self.playback_rate;
        if self.duration_secs > 0.0 && next >= self.duration_secs {
            if self.loop_enabled {
                self.position_secs = next % self.duration_secs;
                self.emit_position();
            } else {
                self.position_secs = self.duration_secs;
                self.emit_position();
                self.paused = true;
                self.emit(MediaEvent::Paused);
            }
        } else {
            self.position_secs = next;
            self.emit_position();
        }
    }

    /// The user pressed Escape: the platform leaves fullscreen on its own.
    pub fn press_escape(&mut self) {
        if self.fullscreen {
            self.fullscreen = false;
            self.emit(MediaEvent::FullscreenChanged {
                is_fullscreen: false,
            });
        }
    }

    fn emit_position(&self) {
        self.emit(MediaEvent::TimeUpdate {
            position_secs: self.position_secs,
        });
    }

    fn emit(&self, event: MediaEvent) {
        if let Some(events) = &self.events {
            events.emit(event);
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Commands received so far, oldest first.
    pub fn commands(&self) -> &[MediaCommand] {
        &self.commands
    }

    /// Returns and clears the recorded commands.
    pub fn take_commands(&mut self) -> Vec<MediaCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn is_attached(&self) -> bool {
        self.events.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    /// Volume the element outputs right now.
    pub fn audible_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn source(&self) -> Option<&MediaSource> {
        self.source.as_ref()
    }
}

impl MediaBackend for SimulatedMedia {
    fn attach(&mut self, source: &MediaSource, options: &MountOptions, events: MediaEventSink) {
        self.commands.push(MediaCommand::Attach(source.to_string()));
        self.source = Some(source.clone());
        self.loop_enabled = options.loop_enabled;
        self.events = Some(events);
        self.position_secs = 0.0;
        self.paused = true;
    }

    fn detach(&mut self) {
        self.commands.push(MediaCommand::Detach);
        self.events = None;
        self.source = None;
        self.paused = true;
    }

    fn play(&mut self) -> Result<(), CommandRejection> {
        self.commands.push(MediaCommand::Play);
        if self.events.is_none() {
            return Err(CommandRejection::Aborted);
        }
        if self.autoplay_blocked {
            return Err(CommandRejection::NotAllowed(
                "play() requires a user gesture".to_string(),
            ));
        }
        if self.paused {
            if self.duration_secs > 0.0 && self.position_secs >= self.duration_secs {
                self.position_secs = 0.0;
                self.emit_position();
            }
            self.paused = false;
            self.emit(MediaEvent::Played);
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.commands.push(MediaCommand::Pause);
        if !self.paused {
            self.paused = true;
            self.emit(MediaEvent::Paused);
        }
    }

    fn set_current_time(&mut self, position_secs: f64) {
        self.commands.push(MediaCommand::SetCurrentTime(position_secs));
        self.position_secs = position_secs.clamp(0.0, self.duration_secs.max(0.0));
        self.emit_position();
    }

    fn set_volume(&mut self, volume: f32) {
        self.commands.push(MediaCommand::SetVolume(volume));
        self.volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.commands.push(MediaCommand::SetMuted(muted));
        self.muted = muted;
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.commands.push(MediaCommand::SetPlaybackRate(rate));
        self.playback_rate = rate;
    }

    fn request_fullscreen(&mut self) -> Result<(), CommandRejection> {
        self.commands.push(MediaCommand::RequestFullscreen);
        if self.fullscreen_denied {
            return Err(CommandRejection::NotAllowed(
                "fullscreen is not permitted here".to_string(),
            ));
        }
        if !self.fullscreen {
            self.fullscreen = true;
            self.emit(MediaEvent::FullscreenChanged {
                is_fullscreen: true,
            });
        }
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), CommandRejection> {
        self.commands.push(MediaCommand::ExitFullscreen);
        if !self.fullscreen {
            return Err(CommandRejection::NotAllowed(
                "document is not fullscreen".to_string(),
            ));
        }
        self.fullscreen = false;
        self.emit(MediaEvent::FullscreenChanged {
            is_fullscreen: false,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::media::{notification_channel, MediaNotification, SourceId};
    use tokio::sync::mpsc::UnboundedReceiver;

    fn attached(duration_secs: f64, loop_enabled: bool) -> (SimulatedMedia, UnboundedReceiver<MediaNotification>) {
        let (tx, rx) = notification_channel();
        let mut media = SimulatedMedia::new(duration_secs);
        let options = MountOptions {
            loop_enabled,
            muted_by_default: false,
        };
        media.attach(
            &MediaSource::new("clip.mp4"),
            &options,
            MediaEventSink::new(SourceId::first(), tx),
        );
        (media, rx)
    }

    fn events(rx: &mut UnboundedReceiver<MediaNotification>) -> Vec<MediaEvent> {
        std::iter::from_fn(|| rx.try_recv().ok())
            .map(|notification| notification.event)
            .collect()
    }

    #[test]
    fn play_is_confirmed_by_notification() {
        let (mut media, mut rx) = attached(10.0, false);
        media.play().expect("play accepted");
        assert_eq!(events(&mut rx), vec![MediaEvent::Played]);

        // Already playing: no second notification.
        media.play().expect("play accepted");
        assert!(events(&mut rx).is_empty());
    }

    #[test]
    fn blocked_play_emits_nothing() {
        let (mut media, mut rx) = attached(10.0, false);
        media.set_autoplay_blocked(true);
        assert!(matches!(media.play(), Err(CommandRejection::NotAllowed(_))));
        assert!(events(&mut rx).is_empty());
        assert!(media.is_paused());
    }

    #[test]
    fn reaching_the_end_pauses_without_loop() {
        let (mut media, mut rx) = attached(2.0, false);
        media.play().unwrap();
        media.advance(Duration::from_secs(3));

        assert_eq!(
            events(&mut rx),
            vec![
                MediaEvent::Played,
                MediaEvent::TimeUpdate { position_secs: 2.0 },
                MediaEvent::Paused,
            ]
        );
    }

    #[test]
    fn reaching_the_end_wraps_with_loop() {
        let (mut media, mut rx) = attached(2.0, true);
        media.play().unwrap();
        media.advance(Duration::from_millis(2_500));

        assert_eq!(
            events(&mut rx),
            vec![
                MediaEvent::Played,
                MediaEvent::TimeUpdate { position_secs: 0.5 },
            ]
        );
        assert!(!media.is_paused());
    }

    #[test]
    fn advance_honours_playback_rate() {
        let (mut media, _rx) = attached(100.0, false);
        media.set_playback_rate(2.0);
        media.play().unwrap();
        media.advance(Duration::from_secs(5));
        assert_eq!(media.position_secs(), 10.0);
    }

    #[test]
    fn detached_element_is_silent() {
        let (mut media, mut rx) = attached(10.0, false);
        media.detach();
        assert_eq!(media.play(), Err(CommandRejection::Aborted));
        media.load_metadata();
        assert!(events(&mut rx).is_empty());
    }

    #[test]
    fn escape_leaves_fullscreen() {
        let (mut media, mut rx) = attached(10.0, false);
        media.request_fullscreen().unwrap();
        media.press_escape();
        assert_eq!(
            events(&mut rx),
            vec![
                MediaEvent::FullscreenChanged { is_fullscreen: true },
                MediaEvent::FullscreenChanged { is_fullscreen: false },
            ]
        );
        assert!(media.exit_fullscreen().is_err());
    }
}
