//! Team scoreboard: teams, scores and participants with local persistence,
//! JSON export/import and a patch-driven view.

pub mod config;
pub mod console;
pub mod error;
pub mod messaging;
pub mod notifier;
pub mod persistence;
pub mod scoreboard;
pub mod state;
pub mod teams;
pub mod view;

pub use error::{AppResult, ConfigError, SnapshotError, StorageError, TeamError};
pub use scoreboard::{BoardSettings, Scoreboard};
