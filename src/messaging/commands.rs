/// Command types for the scoreboard
///
/// Commands represent requests to perform actions (imperative).
/// They are the whole UI action surface and are executed by the command executor.
use std::path::PathBuf;

use crate::teams::TeamId;

/// Proof that the user agreed to a destructive action.
///
/// Only the calling interface can produce one, by asking the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmed(());

impl Confirmed {
    /// Interpret a yes/no answer; only "y" and "yes" confirm
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Some(Confirmed(())),
            _ => None,
        }
    }

    /// For hosts that confirm through their own dialog
    pub fn from_dialog(accepted: bool) -> Option<Self> {
        accepted.then_some(Confirmed(()))
    }
}

/// Scoreboard commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append a team, optionally named
    AddTeam { name: Option<String> },

    RemoveTeam { id: TeamId },

    RenameTeam { id: TeamId, name: String },

    AdjustScore { id: TeamId, delta: i64 },

    AddParticipant { id: TeamId, name: String },

    RemoveParticipant { id: TeamId, name: String },

    /// Zero scores and clear rosters, once the user confirmed
    ResetAll(Confirmed),

    /// Write an export file
    Export,

    /// Import a dropped file
    Import { path: PathBuf },

    /// Leave the host loop
    Quit,
}

/// Result of command execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Command executed successfully
    Success,

    /// Command executed with a specific result
    SuccessWithValue(String),

    /// Command refused; state unchanged
    Rejected(String),

    /// Command failed with an error
    Error(String),
}

impl Command {
    /// Get a human-readable description of the command
    pub fn description(&self) -> String {
        match self {
            Command::AddTeam { name: Some(name) } => format!("Add team: {}", name),
            Command::AddTeam { name: None } => "Add team".to_string(),
            Command::RemoveTeam { id } => format!("Remove team {}", id),
            Command::RenameTeam { id, name } => format!("Rename team {} to {:?}", id, name),
            Command::AdjustScore { id, delta } => format!("Adjust score of team {} by {:+}", id, delta),
            Command::AddParticipant { id, name } => {
                format!("Add participant {:?} to team {}", name, id)
            }
            Command::RemoveParticipant { id, name } => {
                format!("Remove participant {:?} from team {}", name, id)
            }
            Command::ResetAll(_) => "Reset all teams".to_string(),
            Command::Export => "Export data".to_string(),
            Command::Import { path } => format!("Import data from {}", path.display()),
            Command::Quit => "Quit".to_string(),
        }
    }
}
