// SPDX-License-Identifier: MPL-2.0
//! Interactive host for the playback controller.
//!
//! Mounts one source on a [`SimulatedMedia`] element, then multiplexes two
//! inputs on the current task: command lines from stdin and the
//! controller's own event queue. After every command the current
//! [`PlaybackSnapshot`](crate::video_player::PlaybackSnapshot) is printed to
//! stdout as one line of JSON. A snapshot is also printed when the controls
//! hide on their own.

pub mod command;
pub mod config;
pub mod paths;

use crate::application::port::media::MediaSource;
use crate::error::Result;
use crate::infrastructure::SimulatedMedia;
use crate::video_player::{MediaController, PlaybackSnapshot};
use command::PlayerCommand;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Duration reported for sources when none is given.
pub const DEFAULT_SOURCE_DURATION_SECS: f64 = 60.0;

/// Startup options for the host, usually parsed from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Media source to mount.
    pub source: String,
    /// Config directory override (`--config-dir`).
    pub config_dir: Option<String>,
    /// Start muted regardless of the config file.
    pub muted: bool,
    /// Disable looping regardless of the config file.
    pub no_loop: bool,
    /// Duration the simulated element reports, in seconds.
    pub duration_secs: Option<f64>,
    /// Simulate an autoplay policy that refuses play requests.
    pub autoplay_blocked: bool,
    /// Simulate a platform that refuses fullscreen.
    pub fullscreen_denied: bool,
}

/// Runs the host until stdin closes or `quit` is read.
pub async fn run(flags: Flags) -> Result<()> {
    paths::init_cli_overrides(flags.config_dir.clone());

    let (config, warning) = config::load();
    if let Some(warning) = warning {
        log::warn!("{}", warning);
    }

    let mut options = config.mount_options();
    options.muted_by_default |= flags.muted;
    if flags.no_loop {
        options.loop_enabled = false;
    }

    let duration_secs = flags.duration_secs.unwrap_or(DEFAULT_SOURCE_DURATION_SECS);
    let backend = SimulatedMedia::new(duration_secs)
        .with_autoplay_blocked(flags.autoplay_blocked)
        .with_fullscreen_denied(flags.fullscreen_denied);

    let mut controller = MediaController::mount(
        backend,
        MediaSource::new(flags.source),
        options,
        config.player_settings(),
    );
    controller.backend_mut().load_metadata();
    controller.drain_pending();
    log::info!("Mounted {}", controller.snapshot().source);
    print_snapshot(&controller.snapshot())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<PlayerCommand>() {
                    Ok(PlayerCommand::Quit) => break,
                    Ok(command) => {
                        if let Err(err) = execute(&mut controller, command) {
                            log::warn!("{}", err);
                        }
                        controller.drain_pending();
                        print_snapshot(&controller.snapshot())?;
                    }
                    Err(err) => log::warn!("{}", err),
                }
            }
            Some(event) = controller.next_event() => {
                let was_visible = controller.snapshot().controls_visible;
                controller.dispatch(event);
                let snapshot = controller.snapshot();
                if snapshot.controls_visible != was_visible {
                    print_snapshot(&snapshot)?;
                }
            }
        }
    }

    controller.teardown();
    log::info!("Player torn down");
    Ok(())
}

/// Applies one command to the controller.
pub fn execute(controller: &mut MediaController<SimulatedMedia>, command: PlayerCommand) -> Result<()> {
    match command {
        PlayerCommand::TogglePlay => controller.toggle_play_pause(),
        PlayerCommand::Seek(secs) => controller.seek(secs)?,
        PlayerCommand::Skip(delta) => controller.seek_relative(delta)?,
        PlayerCommand::Volume(level) => controller.set_volume(level)?,
        PlayerCommand::ToggleMute => controller.toggle_mute(),
        PlayerCommand::Rate(rate) => controller.set_playback_rate(rate)?,
        PlayerCommand::Faster => {
            let rate = controller.increase_playback_rate()?;
            log::info!("Playback rate {}", rate);
        }
        PlayerCommand::Slower => {
            let rate = controller.decrease_playback_rate()?;
            log::info!("Playback rate {}", rate);
        }
        PlayerCommand::Filter(filter) => controller.set_filter(filter),
        PlayerCommand::ToggleEffects => controller.toggle_effects_menu(),
        PlayerCommand::ToggleFullscreen => controller.toggle_fullscreen(),
        PlayerCommand::Escape => controller.backend_mut().press_escape(),
        PlayerCommand::PointerMoved => controller.note_user_activity(),
        PlayerCommand::PointerLeft => controller.note_pointer_left(),
        PlayerCommand::Tick(elapsed) => controller.backend_mut().advance(elapsed),
        PlayerCommand::Load {
            source,
            duration_secs,
        } => {
            controller.change_source(MediaSource::new(source))?;
            match duration_secs {
                Some(duration_secs) => controller.backend_mut().reload_metadata(duration_secs),
                None => controller.backend_mut().load_metadata(),
            }
        }
        PlayerCommand::Status | PlayerCommand::Quit => {}
    }
    Ok(())
}

fn print_snapshot(snapshot: &PlaybackSnapshot) -> Result<()> {
    let json = serde_json::to_string(snapshot)?;
    println!("{}", json);
    Ok(())
}
