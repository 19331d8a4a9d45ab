use thiserror::Error;

use crate::teams::TeamId;

/// Board-level errors using thiserror for structured error handling.
///
/// These errors represent the ways a user action can be refused. None of them
/// are fatal: the board stays open and the state is left unchanged.

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TeamError {
    #[error("There must be at least one team")]
    LastTeam,

    #[error("Team not found: {0}")]
    NotFound(TeamId),

    #[error("Participant name is blank")]
    BlankParticipant,

    #[error("Participant {name} already exists in team {team}")]
    DuplicateParticipant { team: TeamId, name: String },

    #[error("No team ids left to assign")]
    IdsExhausted,
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to parse snapshot")]
    Parse(#[source] serde_json::Error),

    #[error("Snapshot has no teams field")]
    MissingTeams,

    #[error("Snapshot contains no teams")]
    Empty,

    #[error("Snapshot contains team id {0} more than once")]
    DuplicateTeamId(TeamId),

    #[error("Snapshot team id {0} is out of range")]
    IdOutOfRange(TeamId),

    #[error("Snapshot team {team} lists participant {name} more than once")]
    DuplicateParticipant { team: TeamId, name: String },

    #[error("Failed to encode snapshot")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to write export file: {path}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read snapshot file: {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read key {key}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write key {key}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove key {key}")]
    Remove {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode board state")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to create storage directory: {path}")]
    DirectoryCreationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine user data directory")]
    NoDataDir,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to create config directory: {path}")]
    DirectoryCreationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine user config directory")]
    NoConfigDir,
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;
