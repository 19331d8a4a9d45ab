/// Command executor
///
/// Owns the scoreboard and runs every command to completion, one at a time.
use std::path::PathBuf;
use std::time::Instant;

use super::commands::{Command, CommandResult};
use crate::persistence::KeyValueStore;
use crate::scoreboard::Scoreboard;
use crate::view::View;

pub struct CommandExecutor<S: KeyValueStore, V: View> {
    board: Scoreboard<S, V>,
    export_dir: PathBuf,
}

impl<S: KeyValueStore, V: View> CommandExecutor<S, V> {
    /// Exports are written into `export_dir`
    pub fn new(board: Scoreboard<S, V>, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            board,
            export_dir: export_dir.into(),
        }
    }

    pub fn board(&self) -> &Scoreboard<S, V> {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Scoreboard<S, V> {
        &mut self.board
    }

    pub fn into_board(self) -> Scoreboard<S, V> {
        self.board
    }

    /// Execute a command immediately
    pub fn execute_sync(&mut self, command: Command) -> CommandResult {
        tracing::info!("Executing command: {}", command.description());

        let result = match command {
            Command::AddTeam { name } => match self.board.add_team(name.as_deref()) {
                Ok(team) => CommandResult::SuccessWithValue(team.name),
                Err(e) => CommandResult::Rejected(e.to_string()),
            },
            Command::RemoveTeam { id } => match self.board.remove_team(id) {
                Ok(_) => CommandResult::Success,
                Err(e) => CommandResult::Rejected(e.to_string()),
            },
            Command::RenameTeam { id, name } => match self.board.rename_team(id, &name) {
                Ok(()) => CommandResult::Success,
                Err(e) => CommandResult::Rejected(e.to_string()),
            },
            Command::AdjustScore { id, delta } => match self.board.adjust_score(id, delta) {
                Ok(score) => CommandResult::SuccessWithValue(score.to_string()),
                Err(e) => CommandResult::Rejected(e.to_string()),
            },
            Command::AddParticipant { id, name } => match self.board.add_participant(id, &name) {
                Ok(name) => CommandResult::SuccessWithValue(name),
                Err(e) => CommandResult::Rejected(e.to_string()),
            },
            Command::RemoveParticipant { id, name } => {
                match self.board.remove_participant(id, &name) {
                    Ok(true) => CommandResult::Success,
                    Ok(false) => {
                        CommandResult::Rejected(format!("{} is not in team {}", name, id))
                    }
                    Err(e) => CommandResult::Rejected(e.to_string()),
                }
            }
            Command::ResetAll(confirmed) => {
                self.board.reset_all(confirmed);
                CommandResult::Success
            }
            Command::Export => match self.board.export_to(&self.export_dir) {
                Ok(path) => CommandResult::SuccessWithValue(path.display().to_string()),
                Err(e) => CommandResult::Error(e.to_string()),
            },
            Command::Import { path } => match self.board.import_file(&path) {
                Ok(Some(count)) => {
                    CommandResult::SuccessWithValue(format!("{} teams imported", count))
                }
                Ok(None) => {
                    CommandResult::Rejected(format!("{} is not a JSON file", path.display()))
                }
                Err(e) => CommandResult::Error(e.to_string()),
            },
            Command::Quit => CommandResult::Success,
        };

        match &result {
            CommandResult::Error(message) => tracing::warn!("Command failed: {}", message),
            CommandResult::Rejected(reason) => tracing::debug!("Command rejected: {}", reason),
            CommandResult::Success | CommandResult::SuccessWithValue(_) => {}
        }
        result
    }

    /// Advance timed view effects (toasts, score highlight)
    pub fn tick(&mut self, now: Instant) {
        self.board.tick(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::{Confirmed, EventBus};
    use crate::persistence::MemoryStore;
    use crate::scoreboard::BoardSettings;
    use crate::view::ViewPatch;

    fn executor(export_dir: PathBuf) -> CommandExecutor<MemoryStore, Vec<ViewPatch>> {
        let board = Scoreboard::open(
            MemoryStore::new(),
            Vec::new(),
            BoardSettings::default(),
            EventBus::new(),
        );
        CommandExecutor::new(board, export_dir)
    }

    #[test]
    fn test_execute_sync_add_and_score() {
        let mut executor = executor(PathBuf::from("."));

        let result = executor.execute_sync(Command::AddTeam {
            name: Some("Blues".to_string()),
        });
        assert_eq!(result, CommandResult::SuccessWithValue("Blues".to_string()));

        let result = executor.execute_sync(Command::AdjustScore { id: 3, delta: 2 });
        assert_eq!(result, CommandResult::SuccessWithValue("2".to_string()));
    }

    #[test]
    fn test_execute_sync_rejections() {
        let mut executor = executor(PathBuf::from("."));
        executor.execute_sync(Command::RemoveTeam { id: 1 });

        let result = executor.execute_sync(Command::RemoveTeam { id: 2 });
        assert_eq!(
            result,
            CommandResult::Rejected("There must be at least one team".to_string())
        );

        let result = executor.execute_sync(Command::RemoveParticipant {
            id: 2,
            name: "Ghost".to_string(),
        });
        assert!(matches!(result, CommandResult::Rejected(_)));
    }

    #[test]
    fn test_reset_requires_confirmation_token() {
        let mut executor = executor(PathBuf::from("."));
        executor.execute_sync(Command::AdjustScore { id: 1, delta: 5 });

        let confirmed = Confirmed::from_answer("yes").unwrap();
        assert_eq!(
            executor.execute_sync(Command::ResetAll(confirmed)),
            CommandResult::Success
        );
        assert_eq!(executor.board().state().find(1).unwrap().score, 0);
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut executor = executor(dir.path().to_path_buf());

        match executor.execute_sync(Command::Export) {
            CommandResult::SuccessWithValue(path) => {
                assert!(std::path::Path::new(&path).exists());
            }
            other => panic!("Expected export path, got {:?}", other),
        }
    }

    #[test]
    fn test_import_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut executor = executor(dir.path().to_path_buf());

        let result = executor.execute_sync(Command::Import {
            path: dir.path().join("missing.json"),
        });
        assert!(matches!(result, CommandResult::Error(_)));
        assert_eq!(executor.board().state().len(), 2);
    }
}
