// SPDX-License-Identifier: MPL-2.0
use pawnet_player::app::{self, Flags};
use std::process::ExitCode;

const USAGE: &str = "\
Usage: pawnet-player [OPTIONS] <SOURCE>

Options:
  --config-dir DIR      Read settings.toml from DIR
  --muted               Start muted
  --no-loop             Pause at the end instead of looping
  --duration SECS       Duration the simulated media reports
  --autoplay-blocked    Refuse play requests like an autoplay policy
  --fullscreen-denied   Refuse fullscreen requests
  -h, --help            Print this help";

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let config_dir = args.opt_value_from_str("--config-dir")?;
    let duration_secs = args.opt_value_from_str("--duration")?;
    let muted = args.contains("--muted");
    let no_loop = args.contains("--no-loop");
    let autoplay_blocked = args.contains("--autoplay-blocked");
    let fullscreen_denied = args.contains("--fullscreen-denied");
    let source: String = args.free_from_str()?;

    let remaining = args.finish();
    if !remaining.is_empty() {
        log::warn!("Ignoring extra arguments: {:?}", remaining);
    }

    Ok(Some(Flags {
        source,
        config_dir,
        muted,
        no_loop,
        duration_secs,
        autoplay_blocked,
        fullscreen_denied,
    }))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{}\n\n{}", err, USAGE);
            return ExitCode::FAILURE;
        }
    };

    match app::run(flags).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
