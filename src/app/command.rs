// SPDX-License-Identifier: MPL-2.0
//! Line-based commands understood by the interactive host.
//!
//! One command per line, arguments separated by whitespace:
//!
//! | Command             | Effect                                        |
//! |---------------------|-----------------------------------------------|
//! | `play`              | Toggle play/pause                             |
//! | `seek SECS`         | Jump to an absolute position                  |
//! | `skip SECS`         | Jump relative to the current position         |
//! | `volume LEVEL`      | Set volume (0.0 to 1.0)                       |
//! | `mute`              | Toggle mute                                   |
//! | `rate X`            | Set playback rate to a preset                 |
//! | `faster`/`slower`   | Step through the rate presets                 |
//! | `filter NAME`       | Select the preview filter                     |
//! | `fx`                | Toggle the effects menu                       |
//! | `fullscreen`        | Toggle fullscreen                             |
//! | `escape`            | Platform leaves fullscreen                    |
//! | `move` / `leave`    | Pointer moved over / left the player          |
//! | `tick SECS`         | Let the media play for SECS                   |
//! | `load SRC [SECS]`   | Replace the source                            |
//! | `status`            | Print the current state                       |
//! | `quit`              | Tear down and exit                            |

use crate::domain::video::VisualFilter;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// A parsed host command.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    TogglePlay,
    Seek(f64),
    Skip(f64),
    Volume(f32),
    ToggleMute,
    Rate(f64),
    Faster,
    Slower,
    Filter(VisualFilter),
    ToggleEffects,
    ToggleFullscreen,
    Escape,
    PointerMoved,
    PointerLeft,
    Tick(Duration),
    Load {
        source: String,
        duration_secs: Option<f64>,
    },
    Status,
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    InvalidArgument {
        command: &'static str,
        value: String,
    },
    UnexpectedArgument(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "Empty command"),
            CommandError::Unknown(name) => write!(f, "Unknown command: {}", name),
            CommandError::MissingArgument { command, argument } => {
                write!(f, "`{}` expects {}", command, argument)
            }
            CommandError::InvalidArgument { command, value } => {
                write!(f, "`{}` cannot use '{}'", command, value)
            }
            CommandError::UnexpectedArgument(arg) => write!(f, "Unexpected argument: {}", arg),
        }
    }
}

impl std::error::Error for CommandError {}

impl FromStr for PlayerCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;

        let command = match name.to_ascii_lowercase().as_str() {
            "play" | "pause" => PlayerCommand::TogglePlay,
            "seek" => PlayerCommand::Seek(number(words.next(), "seek", "a position in seconds")?),
            "skip" => PlayerCommand::Skip(number(words.next(), "skip", "an offset in seconds")?),
            "volume" => PlayerCommand::Volume(number(words.next(), "volume", "a level")?),
            "mute" => PlayerCommand::ToggleMute,
            "rate" => PlayerCommand::Rate(number(words.next(), "rate", "a rate")?),
            "faster" => PlayerCommand::Faster,
            "slower" => PlayerCommand::Slower,
            "filter" => {
                let value = words.next().ok_or(CommandError::MissingArgument {
                    command: "filter",
                    argument: "a filter name",
                })?;
                let filter = value
                    .parse::<VisualFilter>()
                    .map_err(|_| CommandError::InvalidArgument {
                        command: "filter",
                        value: value.to_string(),
                    })?;
                PlayerCommand::Filter(filter)
            }
            "fx" | "effects" => PlayerCommand::ToggleEffects,
            "fullscreen" | "fs" => PlayerCommand::ToggleFullscreen,
            "escape" | "esc" => PlayerCommand::Escape,
            "move" => PlayerCommand::PointerMoved,
            "leave" => PlayerCommand::PointerLeft,
            "tick" => {
                let secs: f64 = number(words.next(), "tick", "a duration in seconds")?;
                // Rejects negatives, NaN and values past Duration::MAX.
                let elapsed = Duration::try_from_secs_f64(secs).map_err(|_| {
                    CommandError::InvalidArgument {
                        command: "tick",
                        value: secs.to_string(),
                    }
                })?;
                PlayerCommand::Tick(elapsed)
            }
            "load" => {
                let source = words.next().ok_or(CommandError::MissingArgument {
                    command: "load",
                    argument: "a source",
                })?;
                let duration_secs = match words.next() {
                    Some(value) => Some(number(Some(value), "load", "a duration in seconds")?),
                    None => None,
                };
                PlayerCommand::Load {
                    source: source.to_string(),
                    duration_secs,
                }
            }
            "status" => PlayerCommand::Status,
            "quit" | "exit" => PlayerCommand::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        match words.next() {
            Some(extra) => Err(CommandError::UnexpectedArgument(extra.to_string())),
            None => Ok(command),
        }
    }
}

fn number<T: FromStr>(
    value: Option<&str>,
    command: &'static str,
    argument: &'static str,
) -> Result<T, CommandError> {
    let value = value.ok_or(CommandError::MissingArgument { command, argument })?;
    value.parse().map_err(|_| CommandError::InvalidArgument {
        command,
        value: value.to_string(),
    })
}
