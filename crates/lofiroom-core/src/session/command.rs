use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::selection::{Background, Genre};
use crate::timer::TimerMode;

/// A listener action routed to the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "snake_case")]
pub enum Command {
    PlayPause,
    Next,
    Previous,
    SetVolume(f32),
    SelectGenre(Genre),
    SelectBackground(Background),
    ToggleAppearance,
    TimerMode(TimerMode),
    TimerToggle,
    TimerReset,
    Status,
    Quit,
}

/// Parses the line protocol used on an interactive terminal, e.g.
/// `play`, `vol 0.4`, `genre rain`, `mode short-break`.
impl FromStr for Command {
    type Err = ValidationError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let verb = parts
            .next()
            .ok_or_else(|| ValidationError::invalid("command", "empty command"))?
            .to_ascii_lowercase();
        let arg = parts.next();

        let needs_arg = |what: &str| {
            arg.ok_or_else(|| ValidationError::invalid("command", format!("'{verb}' needs a {what}")))
        };

        let bare = |command: Command| match arg {
            Some(_) => Err(ValidationError::invalid("command", format!("'{verb}' takes no arguments"))),
            None => Ok(command),
        };

        let command = match verb.as_str() {
            "play" | "pause" | "p" => bare(Command::PlayPause)?,
            "next" | "n" => bare(Command::Next)?,
            "prev" | "previous" | "b" => bare(Command::Previous)?,
            "vol" | "volume" => {
                let raw = needs_arg("value between 0 and 1")?;
                let volume = raw
                    .parse::<f32>()
                    .map_err(|_| ValidationError::invalid("volume", format!("'{raw}' is not a number")))?;
                Command::SetVolume(volume)
            }
            "genre" => Command::SelectGenre(needs_arg("genre")?.parse()?),
            "bg" | "background" => Command::SelectBackground(needs_arg("background")?.parse()?),
            "theme" => bare(Command::ToggleAppearance)?,
            "mode" => Command::TimerMode(needs_arg("timer mode")?.parse()?),
            "timer" | "toggle" => bare(Command::TimerToggle)?,
            "reset" => bare(Command::TimerReset)?,
            "status" | "s" => bare(Command::Status)?,
            "quit" | "exit" | "q" => bare(Command::Quit)?,
            other => {
                return Err(ValidationError::invalid("command", format!("unknown command '{other}'")));
            }
        };

        if parts.next().is_some() {
            return Err(ValidationError::invalid("command", format!("too many arguments for '{verb}'")));
        }
        Ok(command)
    }
}
