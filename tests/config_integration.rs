// SPDX-License-Identifier: MPL-2.0
//! Integration tests for settings.toml driving a mounted player.

use pawnet_player::app::config::{self, Config, ControlsConfig, VideoConfig};
use pawnet_player::application::port::MediaSource;
use pawnet_player::infrastructure::SimulatedMedia;
use pawnet_player::video_player::MediaController;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

fn mount_with(config: &Config) -> MediaController<SimulatedMedia> {
    MediaController::mount(
        SimulatedMedia::new(30.0),
        MediaSource::new("clip.mp4"),
        config.mount_options(),
        config.player_settings(),
    )
}

#[test]
fn saved_preferences_apply_on_mount() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let saved = Config {
        video: VideoConfig {
            volume: Some(0.25),
            muted: Some(false),
            loop_enabled: Some(false),
            playback_rate: Some(0.75),
        },
        controls: ControlsConfig {
            hide_delay_ms: Some(1_000),
        },
    };
    config::save_with_override(&saved, Some(temp_dir.path().to_path_buf()))
        .expect("failed to save config");

    let (loaded, warning) = config::load_with_override(Some(temp_dir.path().to_path_buf()));
    assert!(warning.is_none());

    let player = mount_with(&loaded);
    let snapshot = player.snapshot();
    assert_eq!(snapshot.volume, 0.25);
    assert_eq!(snapshot.playback_rate, 0.75);
    assert!(!snapshot.loop_enabled);
    assert_eq!(player.backend().playback_rate(), 0.75);
    assert_eq!(player.backend().audible_volume(), 0.25);
}

#[test]
fn corrupt_file_falls_back_to_defaults() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    fs::write(temp_dir.path().join("settings.toml"), "[controls]\nhide_delay_ms = \"soon\"\n")
        .expect("failed to write config");

    let (loaded, warning) = config::load_with_override(Some(temp_dir.path().to_path_buf()));

    assert_eq!(loaded, Config::default());
    assert!(warning.is_some());

    let snapshot = mount_with(&loaded).snapshot();
    assert_eq!(snapshot.volume, 1.0);
    assert!(!snapshot.is_muted);
    assert!(snapshot.loop_enabled);
}

#[tokio::test(start_paused = true)]
async fn configured_hide_delay_drives_controls() {
    let loaded = Config {
        controls: ControlsConfig {
            hide_delay_ms: Some(1_000),
        },
        ..Config::default()
    };
    let mut player = mount_with(&loaded);
    player.backend_mut().load_metadata();
    player.toggle_play_pause();
    player.drain_pending();

    tokio::time::sleep(Duration::from_millis(900)).await;
    player.drain_pending();
    assert!(player.snapshot().controls_visible);

    tokio::time::sleep(Duration::from_millis(200)).await;
    player.drain_pending();
    assert!(!player.snapshot().controls_visible);
}
