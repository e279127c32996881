// SPDX-License-Identifier: MPL-2.0
//! Playback controller for a single mounted media source.
//!
//! Mediates between user intents (play, seek, volume, rate, filter,
//! fullscreen) and one [`MediaBackend`], keeping the exposed state in line
//! with what the resource actually reports:
//! - Unloaded: nothing attached; terminal after teardown
//! - Loading: source attached, waiting for metadata
//! - Paused: metadata known or the media reported a pause
//! - Playing: the media confirmed playback
//!
//! Play/pause and fullscreen are never flipped optimistically. Requests can
//! be refused by the platform, so only the resource's own notifications move
//! those flags. Seek, volume and rate are direct commands and update state
//! immediately.

use super::controls::{ControlsTimeout, ControlsVisibility};
use super::snapshot::PlaybackSnapshot;
use crate::application::port::media::{
    notification_channel, MediaBackend, MediaEvent, MediaEventSink, MediaNotification,
    MediaSource, MountOptions, SourceId,
};
use crate::domain::error::PlaybackError;
use crate::domain::video::{
    AudioState, ControlsHideDelay, PlaybackPhase, PlaybackRate, VisualFilter, Volume,
};
use tokio::sync::mpsc;

/// Event queued for the controller, in emission order per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerEvent {
    /// Notification from the media resource or the platform.
    Media(MediaNotification),
    /// The controls hide timer expired.
    ControlsTimeout(ControlsTimeout),
}

/// User preferences applied when a player is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerSettings {
    /// Volume preference; the mount option may still start muted.
    pub volume: Volume,
    /// Rate the first source starts at.
    pub playback_rate: PlaybackRate,
    /// Idle time before controls hide during playback.
    pub hide_delay: ControlsHideDelay,
}

/// Playback controller owning exactly one media backend.
pub struct MediaController<B: MediaBackend> {
    backend: B,
    options: MountOptions,

    /// Attached source; `None` once torn down.
    source: Option<MediaSource>,
    source_id: SourceId,

    phase: PlaybackPhase,
    position_secs: f64,
    /// 0 until metadata loads.
    duration_secs: f64,

    // Preferences, carried across source changes.
    audio: AudioState,
    playback_rate: PlaybackRate,

    filter: VisualFilter,
    is_fullscreen: bool,
    controls: ControlsVisibility,

    media_tx: mpsc::UnboundedSender<MediaNotification>,
    media_rx: mpsc::UnboundedReceiver<MediaNotification>,
    timeout_rx: mpsc::UnboundedReceiver<ControlsTimeout>,
}

impl<B: MediaBackend> MediaController<B> {
    /// Mounts `source` on `backend` and returns the controller in `Loading`.
    ///
    /// The backend receives the source, then the initial volume, mute flag
    /// and playback rate.
    pub fn mount(
        backend: B,
        source: MediaSource,
        options: MountOptions,
        settings: PlayerSettings,
    ) -> Self {
        let (media_tx, media_rx) = notification_channel();
        let (timeout_tx, timeout_rx) = mpsc::unbounded_channel();

        let mut controller = Self {
            backend,
            options,
            source: None,
            source_id: SourceId::first(),
            phase: PlaybackPhase::Unloaded,
            position_secs: 0.0,
            duration_secs: 0.0,
            audio: AudioState::new(settings.volume, options.muted_by_default),
            playback_rate: settings.playback_rate,
            filter: VisualFilter::None,
            is_fullscreen: false,
            controls: ControlsVisibility::new(settings.hide_delay, timeout_tx),
            media_tx,
            media_rx,
            timeout_rx,
        };
        controller.attach(source);
        controller
    }

    fn attach(&mut self, source: MediaSource) {
        self.phase = PlaybackPhase::Loading;
        self.position_secs = 0.0;
        self.duration_secs = 0.0;
        self.filter = VisualFilter::None;
        self.controls.reset();

        let sink = MediaEventSink::new(self.source_id, self.media_tx.clone());
        self.backend.attach(&source, &self.options, sink);
        self.push_audio();
        self.backend.set_playback_rate(self.playback_rate.value());

        log::debug!("Attached {} as {:?}", source, self.source_id);
        self.source = Some(source);
    }

    /// Replaces the current source.
    ///
    /// Position, duration, filter and the effects menu reset; volume, mute
    /// and rate carry over. Notifications still queued for the old source
    /// are dropped when they are dispatched.
    pub fn change_source(&mut self, source: MediaSource) -> Result<(), PlaybackError> {
        self.ensure_attached()?;

        self.controls.cancel();
        self.backend.detach();
        self.source_id = self.source_id.next();
        self.attach(source);
        Ok(())
    }

    /// Cancels the hide timer, detaches the backend and enters the terminal
    /// `Unloaded` phase. Later calls are no-ops.
    pub fn teardown(&mut self) {
        if self.phase.is_unloaded() {
            return;
        }
        self.controls.cancel();
        self.backend.detach();
        self.phase = PlaybackPhase::Unloaded;
        if let Some(source) = self.source.take() {
            log::debug!("Tore down player for {}", source);
        }
    }

    fn ensure_attached(&self) -> Result<(), PlaybackError> {
        if self.phase.is_unloaded() {
            Err(PlaybackError::Detached)
        } else {
            Ok(())
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the current playback phase.
    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    /// Returns the attachment notifications must be tagged with.
    pub fn source_id(&self) -> SourceId {
        self.source_id
    }

    /// Returns a sink for the current attachment.
    ///
    /// Hosts hand this to platform listeners that live outside the backend,
    /// such as a document-level fullscreen observer. Media events sent
    /// through it are dropped once the source changes; fullscreen changes
    /// are applied whatever attachment they were tagged with.
    pub fn event_sink(&self) -> MediaEventSink {
        MediaEventSink::new(self.source_id, self.media_tx.clone())
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the backend mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Returns true while the hide timer is pending.
    pub fn is_hide_timer_armed(&self) -> bool {
        self.controls.is_timer_armed()
    }

    /// Takes a copy of the observable state.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            source: self
                .source
                .as_ref()
                .map(|source| source.as_str().to_string())
                .unwrap_or_default(),
            phase: self.phase,
            is_playing: self.phase.is_playing(),
            current_time: self.position_secs,
            duration: self.duration_secs,
            volume: self.audio.volume().value(),
            is_muted: self.audio.is_muted(),
            effective_volume: self.audio.effective_volume().value(),
            playback_rate: self.playback_rate.value(),
            active_filter: self.filter,
            controls_visible: self.controls.is_visible(),
            effects_menu_open: self.controls.is_menu_open(),
            is_fullscreen: self.is_fullscreen,
            loop_enabled: self.options.loop_enabled,
        }
    }

    // =========================================================================
    // Event pump
    // =========================================================================

    /// Waits for the next queued event.
    ///
    /// Media notifications are preferred over timer expiries when both are
    /// ready. Returns `None` only if every sender is gone, which cannot
    /// happen while the controller is alive.
    pub async fn next_event(&mut self) -> Option<PlayerEvent> {
        tokio::select! {
            biased;
            Some(notification) = self.media_rx.recv() => Some(PlayerEvent::Media(notification)),
            Some(timeout) = self.timeout_rx.recv() => Some(PlayerEvent::ControlsTimeout(timeout)),
            else => None,
        }
    }

    /// Applies one event.
    pub fn dispatch(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::Media(notification) => self.on_notification(notification),
            PlayerEvent::ControlsTimeout(timeout) => self.on_controls_timeout(timeout),
        }
    }

    /// Applies every event already queued, without waiting.
    ///
    /// Returns the number of events handled.
    pub fn drain_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(notification) = self.media_rx.try_recv() {
            self.on_notification(notification);
            handled += 1;
        }
        while let Ok(timeout) = self.timeout_rx.try_recv() {
            self.on_controls_timeout(timeout);
            handled += 1;
        }
        handled
    }

    fn on_notification(&mut self, notification: MediaNotification) {
        // Fullscreen belongs to the container, not to one attachment, so a
        // platform observer registered before a source change still counts.
        let container_event = matches!(notification.event, MediaEvent::FullscreenChanged { .. });
        if notification.source != self.source_id && !container_event {
            log::trace!(
                "Dropping {:?} from replaced source {:?}",
                notification.event,
                notification.source
            );
            return;
        }
        self.handle_media_event(notification.event);
    }

    fn on_controls_timeout(&mut self, timeout: ControlsTimeout) {
        if self.controls.on_timeout(timeout, self.phase.is_playing()) {
            log::trace!("Controls hidden after inactivity");
        }
    }

    // =========================================================================
    // Media notifications
    // =========================================================================

    /// Applies a notification for the current source.
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::LoadedMetadata { duration_secs } => self.on_metadata_loaded(duration_secs),
            MediaEvent::TimeUpdate { position_secs } => self.on_time_update(position_secs),
            MediaEvent::Played => self.on_played(),
            MediaEvent::Paused => self.on_paused(),
            MediaEvent::FullscreenChanged { is_fullscreen } => {
                self.on_fullscreen_changed(is_fullscreen)
            }
        }
    }

    /// Records the media duration. A later call (re-buffered stream)
    /// overwrites it.
    pub fn on_metadata_loaded(&mut self, duration_secs: f64) {
        if self.phase.is_unloaded() {
            return;
        }
        if !duration_secs.is_finite() || duration_secs < 0.0 {
            log::warn!("Ignoring invalid media duration {}", duration_secs);
            return;
        }

        self.duration_secs = duration_secs;
        if duration_secs > 0.0 && self.position_secs > duration_secs {
            self.position_secs = duration_secs;
        }
        if self.phase.is_loading() {
            self.phase = PlaybackPhase::Paused;
        }
    }

    /// Records the latest reported position (last write wins).
    pub fn on_time_update(&mut self, position_secs: f64) {
        if self.phase.is_unloaded() {
            return;
        }
        if !position_secs.is_finite() || position_secs < 0.0 {
            log::warn!("Ignoring invalid playback position {}", position_secs);
            return;
        }

        self.position_secs = if self.duration_secs > 0.0 {
            position_secs.min(self.duration_secs)
        } else {
            position_secs
        };
    }

    /// The media confirmed that playback started.
    pub fn on_played(&mut self) {
        if self.phase.is_unloaded() {
            return;
        }
        self.phase = PlaybackPhase::Playing;
        self.controls.on_playback_started();
    }

    /// The media confirmed a pause.
    pub fn on_paused(&mut self) {
        if self.phase.is_unloaded() {
            return;
        }
        if self.phase.is_playing() {
            self.phase = PlaybackPhase::Paused;
        }
        self.controls.on_playback_paused();
    }

    /// The platform entered or left fullscreen, whoever asked for it.
    pub fn on_fullscreen_changed(&mut self, is_fullscreen: bool) {
        if self.phase.is_unloaded() {
            return;
        }
        self.is_fullscreen = is_fullscreen;
    }

    // =========================================================================
    // User intents
    // =========================================================================

    /// Requests play when paused and pause when playing.
    ///
    /// The playing flag only changes once the media confirms. A refused
    /// play request is logged and dropped; the user has to ask again.
    pub fn toggle_play_pause(&mut self) {
        match self.phase {
            PlaybackPhase::Unloaded => {
                log::debug!("Play/pause ignored: player torn down");
            }
            PlaybackPhase::Playing => self.backend.pause(),
            PlaybackPhase::Loading | PlaybackPhase::Paused => {
                if let Err(rejection) = self.backend.play() {
                    log::warn!("Play request rejected: {}", rejection);
                }
            }
        }
    }

    /// Jumps to `target_secs`, which must lie within `0..=duration`.
    ///
    /// Before metadata loads only a seek to 0 is accepted.
    pub fn seek(&mut self, target_secs: f64) -> Result<(), PlaybackError> {
        self.ensure_attached()?;

        let out_of_range = PlaybackError::SeekOutOfRange {
            target_secs,
            duration_secs: self.duration_secs,
        };
        if !target_secs.is_finite() || target_secs < 0.0 {
            return Err(out_of_range);
        }
        if self.duration_secs == 0.0 {
            if target_secs > 0.0 {
                return Err(PlaybackError::DurationUnknown);
            }
        } else if target_secs > self.duration_secs {
            return Err(out_of_range);
        }

        self.backend.set_current_time(target_secs);
        self.position_secs = target_secs;
        Ok(())
    }

    /// Seeks by `delta_secs` from the current position, clamped to the media.
    pub fn seek_relative(&mut self, delta_secs: f64) -> Result<(), PlaybackError> {
        self.ensure_attached()?;
        if self.duration_secs == 0.0 {
            return Err(PlaybackError::DurationUnknown);
        }
        if !delta_secs.is_finite() {
            return Err(PlaybackError::SeekOutOfRange {
                target_secs: delta_secs,
                duration_secs: self.duration_secs,
            });
        }

        let target = (self.position_secs + delta_secs).clamp(0.0, self.duration_secs);
        self.seek(target)
    }

    /// Sets the volume; 0 mutes and anything else unmutes.
    pub fn set_volume(&mut self, volume: f32) -> Result<(), PlaybackError> {
        self.ensure_attached()?;
        let volume = Volume::try_new(volume)?;

        self.audio.set_volume(volume);
        self.push_audio();
        Ok(())
    }

    /// Mutes, or unmutes back to the last audible volume.
    pub fn toggle_mute(&mut self) {
        if self.phase.is_unloaded() {
            return;
        }
        self.audio.toggle_mute();
        self.push_audio();
    }

    /// Sends volume and mute flag to the resource together.
    fn push_audio(&mut self) {
        self.backend.set_volume(self.audio.effective_volume().value());
        self.backend.set_muted(self.audio.is_muted());
    }

    /// Sets the rate; only presets are accepted.
    pub fn set_playback_rate(&mut self, rate: f64) -> Result<(), PlaybackError> {
        self.ensure_attached()?;
        let rate = PlaybackRate::from_preset(rate)?;
        self.apply_rate(rate);
        Ok(())
    }

    /// Moves to the next faster preset and returns it.
    pub fn increase_playback_rate(&mut self) -> Result<PlaybackRate, PlaybackError> {
        self.ensure_attached()?;
        let rate = self.playback_rate.faster();
        self.apply_rate(rate);
        Ok(rate)
    }

    /// Moves to the next slower preset and returns it.
    pub fn decrease_playback_rate(&mut self) -> Result<PlaybackRate, PlaybackError> {
        self.ensure_attached()?;
        let rate = self.playback_rate.slower();
        self.apply_rate(rate);
        Ok(rate)
    }

    fn apply_rate(&mut self, rate: PlaybackRate) {
        self.playback_rate = rate;
        self.backend.set_playback_rate(rate.value());
    }

    /// Selects the preview filter. Local state only.
    pub fn set_filter(&mut self, filter: VisualFilter) {
        if self.phase.is_unloaded() {
            return;
        }
        self.filter = filter;
    }

    /// Asks the platform to enter or leave fullscreen.
    ///
    /// The fullscreen flag follows the platform's change notification, not
    /// this request.
    pub fn toggle_fullscreen(&mut self) {
        if self.phase.is_unloaded() {
            return;
        }
        let request = if self.is_fullscreen {
            self.backend.exit_fullscreen()
        } else {
            self.backend.request_fullscreen()
        };
        if let Err(rejection) = request {
            log::warn!("Fullscreen request rejected: {}", rejection);
        }
    }

    /// Pointer activity over the player: show controls and restart the
    /// idle window.
    pub fn note_user_activity(&mut self) {
        if self.phase.is_unloaded() {
            return;
        }
        self.controls.note_activity();
    }

    /// Pointer left the player: hide controls now if playing and the
    /// effects menu is closed.
    pub fn note_pointer_left(&mut self) {
        if self.phase.is_unloaded() {
            return;
        }
        self.controls.note_pointer_left(self.phase.is_playing());
    }

    /// Opens the filter/speed menu, pinning the controls open.
    pub fn open_effects_menu(&mut self) {
        if self.phase.is_unloaded() {
            return;
        }
        self.controls.open_menu();
    }

    /// Closes the filter/speed menu and restarts the idle window.
    pub fn close_effects_menu(&mut self) {
        if self.phase.is_unloaded() {
            return;
        }
        self.controls.close_menu();
    }

    /// Opens the effects menu if closed, closes it if open.
    pub fn toggle_effects_menu(&mut self) {
        if self.controls.is_menu_open() {
            self.close_effects_menu();
        } else {
            self.open_effects_menu();
        }
    }
}

impl<B: MediaBackend> Drop for MediaController<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<B: MediaBackend> std::fmt::Debug for MediaController<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaController")
            .field("source", &self.source)
            .field("source_id", &self.source_id)
            .field("phase", &self.phase)
            .field("position_secs", &self.position_secs)
            .field("duration_secs", &self.duration_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::SimulatedMedia;

    fn controller() -> MediaController<SimulatedMedia> {
        MediaController::mount(
            SimulatedMedia::new(60.0),
            MediaSource::new("clip.mp4"),
            MountOptions::default(),
            PlayerSettings::default(),
        )
    }

    #[test]
    fn pause_during_loading_stays_loading() {
        let mut controller = controller();
        controller.on_paused();
        assert_eq!(controller.phase(), PlaybackPhase::Loading);
    }

    #[test]
    fn play_confirmed_during_loading_enters_playing() {
        let mut controller = controller();
        controller.on_played();
        assert_eq!(controller.phase(), PlaybackPhase::Playing);

        controller.on_metadata_loaded(60.0);
        assert_eq!(controller.phase(), PlaybackPhase::Playing);
    }

    #[test]
    fn shorter_metadata_clamps_position() {
        let mut controller = controller();
        controller.on_metadata_loaded(60.0);
        controller.on_time_update(45.0);

        controller.on_metadata_loaded(30.0);

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.duration, 30.0);
        assert_eq!(snapshot.current_time, 30.0);
    }

    #[test]
    fn time_before_metadata_is_accepted_unclamped() {
        let mut controller = controller();
        controller.on_time_update(12.5);
        assert_eq!(controller.snapshot().current_time, 12.5);
    }

    #[test]
    fn toggle_play_pause_after_teardown_sends_nothing() {
        let mut controller = controller();
        controller.teardown();
        controller.backend_mut().take_commands();

        controller.toggle_play_pause();
        controller.toggle_fullscreen();
        controller.toggle_mute();

        assert!(controller.backend().commands().is_empty());
    }

    #[test]
    fn toggle_effects_menu_flips_state() {
        let mut controller = controller();
        controller.toggle_effects_menu();
        assert!(controller.snapshot().effects_menu_open);
        controller.toggle_effects_menu();
        assert!(!controller.snapshot().effects_menu_open);
    }
}
