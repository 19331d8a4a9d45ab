/// Line-oriented input for the terminal host
///
/// Each line maps to one command. `reset` is returned as a request for
/// confirmation; the host asks the user and only then builds the command.
use std::path::PathBuf;

use thiserror::Error;

use crate::messaging::Command;
use crate::teams::TeamId;

pub const HELP: &str = "\
Commands:
  add [name]            add a team
  remove <id>           remove a team
  rename <id> [name]    rename a team (blank restores the default)
  + <id> [n]            add points (default 1)
  - <id> [n]            remove points (default 1)
  join <id> <name>      add a participant
  leave <id> <name>     remove a participant
  reset                 clear all scores and participants
  export                write a JSON export
  drop <path>           import a JSON export
  show                  print the board
  help                  show this help
  quit                  exit";

pub const RESET_PROMPT: &str = "Reset all teams? All data will be lost. [y/N] ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    ConfirmReset,
    Show,
    Help,
    Empty,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command: {0} (type 'help')")]
    UnknownCommand(String),

    #[error("Missing {0}")]
    MissingArgument(&'static str),

    #[error("Not a number: {0}")]
    InvalidNumber(String),
}

pub fn parse_line(line: &str) -> Result<Input, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Empty);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let input = match word.to_ascii_lowercase().as_str() {
        "add" => Input::Command(Command::AddTeam {
            name: (!rest.is_empty()).then(|| rest.to_string()),
        }),
        "remove" | "rm" => Input::Command(Command::RemoveTeam {
            id: parse_id(rest)?,
        }),
        "rename" => {
            let (id, name) = split_id(rest)?;
            Input::Command(Command::RenameTeam {
                id,
                name: name.to_string(),
            })
        }
        "+" | "-" => {
            let (id, amount) = split_id(rest)?;
            let amount = if amount.is_empty() {
                1
            } else {
                amount
                    .parse::<i64>()
                    .map_err(|_| ParseError::InvalidNumber(amount.to_string()))?
            };
            let delta = if word == "-" {
                amount
                    .checked_neg()
                    .ok_or_else(|| ParseError::InvalidNumber(amount.to_string()))?
            } else {
                amount
            };
            Input::Command(Command::AdjustScore { id, delta })
        }
        "join" => {
            let (id, name) = split_id(rest)?;
            Input::Command(Command::AddParticipant {
                id,
                name: name.to_string(),
            })
        }
        "leave" => {
            let (id, name) = split_id(rest)?;
            if name.is_empty() {
                return Err(ParseError::MissingArgument("participant name"));
            }
            Input::Command(Command::RemoveParticipant {
                id,
                name: name.to_string(),
            })
        }
        "reset" => Input::ConfirmReset,
        "export" => Input::Command(Command::Export),
        "drop" | "import" => {
            if rest.is_empty() {
                return Err(ParseError::MissingArgument("file path"));
            }
            Input::Command(Command::Import {
                path: PathBuf::from(rest),
            })
        }
        "show" => Input::Show,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Command(Command::Quit),
        _ => return Err(ParseError::UnknownCommand(word.to_string())),
    };

    Ok(input)
}

fn parse_id(text: &str) -> Result<TeamId, ParseError> {
    if text.is_empty() {
        return Err(ParseError::MissingArgument("team id"));
    }
    text.parse()
        .map_err(|_| ParseError::InvalidNumber(text.to_string()))
}

/// Split "<id> rest of line"
fn split_id(text: &str) -> Result<(TeamId, &str), ParseError> {
    match text.split_once(char::is_whitespace) {
        Some((id, rest)) => Ok((parse_id(id)?, rest.trim())),
        None => Ok((parse_id(text)?, "")),
    }
}
