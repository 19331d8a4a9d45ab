/// Serialized forms of the board
///
/// `StoredState` is the record kept in the key-value store, `ExportSnapshot`
/// is the downloadable file, and `ImportSnapshot` is what a dropped file must
/// at least contain.
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::state::AppState;
use crate::teams::{validate_teams, Team, TeamId};

/// Record persisted under the storage key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredState {
    #[serde(default)]
    pub teams: Vec<Team>,

    #[serde(rename = "nextTeamId", default, skip_serializing_if = "Option::is_none")]
    pub next_team_id: Option<TeamId>,
}

impl StoredState {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            teams: state.teams().to_vec(),
            next_team_id: Some(state.next_team_id()),
        }
    }

    pub fn into_state(self) -> AppState {
        AppState::from_parts(self.teams, self.next_team_id)
    }
}

/// Export file contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSnapshot {
    pub teams: Vec<Team>,

    #[serde(rename = "exportDate")]
    pub export_date: String,
}

impl ExportSnapshot {
    pub fn new(state: &AppState, now: DateTime<Utc>) -> Self {
        Self {
            teams: state.teams().to_vec(),
            export_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Accepts any object with a `teams` field; everything else is ignored
#[derive(Debug, Deserialize)]
struct ImportSnapshot {
    teams: Option<Vec<Team>>,
}

/// Parse and check the contents of an import file
pub fn parse_import(contents: &str) -> Result<Vec<Team>, SnapshotError> {
    let snapshot: ImportSnapshot =
        serde_json::from_str(contents).map_err(SnapshotError::Parse)?;
    let teams = snapshot.teams.ok_or(SnapshotError::MissingTeams)?;
    validate_teams(&teams)?;
    Ok(teams)
}

/// A named, ready-to-write export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

impl ExportFile {
    /// Build the export for `state`, named after the current date
    pub fn build(state: &AppState, now: DateTime<Utc>) -> Result<Self, SnapshotError> {
        let snapshot = ExportSnapshot::new(state, now);
        let contents = serde_json::to_string_pretty(&snapshot).map_err(SnapshotError::Encode)?;
        Ok(Self {
            file_name: format!("teams_{}.json", now.format("%Y-%m-%d")),
            contents,
        })
    }

    /// Write into `dir`, returning the full path
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.contents)?;
        Ok(path)
    }
}
