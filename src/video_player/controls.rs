// SPDX-License-Identifier: MPL-2.0
//! Transport controls visibility.
//!
//! Controls show on any pointer activity and hide after an idle window, but
//! only while playing with the effects menu closed. The idle window is a
//! debounced Tokio sleep: every activity ping aborts the pending timer and
//! arms a new one.
//!
//! Each arming carries a generation number. An expiry that was already
//! queued when its timer got replaced still reaches the controller, so the
//! generation is what guarantees a superseded timer never hides anything.

use crate::domain::video::ControlsHideDelay;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Expiry message sent by an armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsTimeout {
    pub generation: u64,
}

/// The single pending hide timer of a controller.
#[derive(Debug)]
struct HideTimer {
    generation: u64,
    task: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<ControlsTimeout>,
}

impl HideTimer {
    fn new(tx: mpsc::UnboundedSender<ControlsTimeout>) -> Self {
        Self {
            generation: 0,
            task: None,
            tx,
        }
    }

    /// Replaces any pending timer with a fresh one.
    fn arm(&mut self, delay: ControlsHideDelay) {
        self.cancel();

        let Ok(runtime) = Handle::try_current() else {
            log::warn!("No async runtime available; controls will not auto-hide");
            return;
        };

        let generation = self.generation;
        let tx = self.tx.clone();
        let delay = delay.as_duration();
        self.task = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(ControlsTimeout { generation });
        }));
    }

    /// Aborts the pending timer, if any, and invalidates its expiry.
    fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn is_current(&self, timeout: ControlsTimeout) -> bool {
        self.task.is_some() && timeout.generation == self.generation
    }

    fn is_armed(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn settle(&mut self) {
        self.task = None;
    }
}

impl Drop for HideTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Visibility of the transport controls and the effects menu.
#[derive(Debug)]
pub(crate) struct ControlsVisibility {
    visible: bool,
    menu_open: bool,
    delay: ControlsHideDelay,
    timer: HideTimer,
}

impl ControlsVisibility {
    pub(crate) fn new(delay: ControlsHideDelay, tx: mpsc::UnboundedSender<ControlsTimeout>) -> Self {
        Self {
            visible: true,
            menu_open: false,
            delay,
            timer: HideTimer::new(tx),
        }
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub(crate) fn is_timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// Pointer moved over the player: show now, hide after the idle window.
    pub(crate) fn note_activity(&mut self) {
        self.visible = true;
        if self.menu_open {
            self.timer.cancel();
        } else {
            self.timer.arm(self.delay);
        }
    }

    /// Pointer left the player.
    pub(crate) fn note_pointer_left(&mut self, is_playing: bool) {
        if is_playing && !self.menu_open {
            self.timer.cancel();
            self.visible = false;
        }
    }

    /// Playback confirmed: start the idle window without waiting for a
    /// pointer move.
    pub(crate) fn on_playback_started(&mut self) {
        if self.visible && !self.menu_open {
            self.timer.arm(self.delay);
        }
    }

    /// Playback paused: controls stay up until playback resumes.
    pub(crate) fn on_playback_paused(&mut self) {
        self.timer.cancel();
        self.visible = true;
    }

    pub(crate) fn open_menu(&mut self) {
        self.menu_open = true;
        self.visible = true;
        self.timer.cancel();
    }

    pub(crate) fn close_menu(&mut self) {
        if self.menu_open {
            self.menu_open = false;
            self.note_activity();
        }
    }

    /// Applies an expired timer. Returns true if the controls were hidden.
    pub(crate) fn on_timeout(&mut self, timeout: ControlsTimeout, is_playing: bool) -> bool {
        if !self.timer.is_current(timeout) {
            log::trace!("Ignoring stale controls timeout #{}", timeout.generation);
            return false;
        }
        self.timer.settle();

        if is_playing && !self.menu_open {
            self.visible = false;
            true
        } else {
            false
        }
    }

    /// Resets to the state of a freshly attached source.
    pub(crate) fn reset(&mut self) {
        self.timer.cancel();
        self.menu_open = false;
        self.visible = true;
    }

    pub(crate) fn cancel(&mut self) {
        self.timer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn visibility() -> (ControlsVisibility, mpsc::UnboundedReceiver<ControlsTimeout>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ControlsVisibility::new(ControlsHideDelay::default(), tx), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn timer_fires_after_delay() {
        let (mut controls, mut rx) = visibility();
        let started = tokio::time::Instant::now();

        controls.note_activity();
        let timeout = rx.recv().await.expect("timer fired");

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(2_500), "fired early: {elapsed:?}");
        assert!(elapsed < Duration::from_millis(2_510), "fired late: {elapsed:?}");
        assert!(controls.on_timeout(timeout, true));
        assert!(!controls.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_invalidates_previous_generation() {
        let (mut controls, _rx) = visibility();
        controls.note_activity();
        let stale = ControlsTimeout {
            generation: controls.timer.generation,
        };

        controls.note_activity();

        assert!(!controls.on_timeout(stale, true));
        assert!(controls.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_while_paused_keeps_controls() {
        let (mut controls, mut rx) = visibility();
        controls.note_activity();
        let timeout = rx.recv().await.expect("timer fired");

        assert!(!controls.on_timeout(timeout, false));
        assert!(controls.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn open_menu_pins_controls() {
        let (mut controls, _rx) = visibility();
        controls.note_activity();
        controls.open_menu();

        assert!(!controls.is_timer_armed());
        controls.note_pointer_left(true);
        assert!(controls.is_visible());

        controls.close_menu();
        assert!(!controls.is_menu_open());
        assert!(controls.is_timer_armed());
    }

    #[test]
    fn arming_without_runtime_keeps_controls_visible() {
        let (mut controls, _rx) = visibility();
        controls.note_activity();
        assert!(controls.is_visible());
        assert!(!controls.is_timer_armed());
    }

    #[test]
    fn pointer_leave_hides_only_while_playing() {
        let (mut controls, _rx) = visibility();
        controls.note_pointer_left(false);
        assert!(controls.is_visible());
        controls.note_pointer_left(true);
        assert!(!controls.is_visible());
    }
}
