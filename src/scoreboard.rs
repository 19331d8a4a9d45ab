use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::error::{SnapshotError, TeamError};
use crate::messaging::{Confirmed, Event, EventBus};
use crate::notifier::{Notifier, Severity, Toast, ToastTiming};
use crate::persistence::{parse_import, ExportFile, KeyValueStore, Persistence};
use crate::state::AppState;
use crate::teams::{validate_teams, Team, TeamId};
use crate::view::{render, render_card, render_roster, render_stats, View, ViewPatch};

/// Tunables the board needs at runtime, usually derived from `Config`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSettings {
    pub team_prefix: String,
    pub seed_team_count: usize,
    pub toast_timing: ToastTiming,
    /// How long a score stays highlighted after a gain
    pub score_emphasis: Duration,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            team_prefix: "Team".to_string(),
            seed_team_count: 2,
            toast_timing: ToastTiming::default(),
            score_emphasis: Duration::from_millis(200),
        }
    }
}

/// The state store.
///
/// Owns the board state and drives every mutation through the same steps:
/// mutate, save, patch the view, notify, publish an event.
///
/// Mutations stamp toasts and score highlights with `Instant::now()`. Expiry
/// only happens in `tick`, which takes the time from the caller.
pub struct Scoreboard<S: KeyValueStore, V: View> {
    state: AppState,
    persistence: Persistence<S>,
    view: V,
    notifier: Notifier,
    events: EventBus,
    settings: BoardSettings,
    /// Highlighted scores and when the highlight ends
    emphasized: Vec<(TeamId, Instant)>,
}

impl<S: KeyValueStore, V: View> Scoreboard<S, V> {
    /// Restore the board from `store`, seeding default teams when nothing
    /// usable is stored, and render the whole grid.
    pub fn open(store: S, view: V, settings: BoardSettings, events: EventBus) -> Self {
        let persistence = Persistence::new(store);
        let state = persistence.load().unwrap_or_default();

        let mut board = Self {
            state,
            persistence,
            view,
            notifier: Notifier::new(settings.toast_timing),
            events,
            settings,
            emphasized: Vec::new(),
        };

        if board.state.is_empty() {
            board
                .state
                .seed_defaults(board.settings.seed_team_count, &board.settings.team_prefix);
            info!("Seeded {} default teams", board.state.len());
            board.persist();
        } else {
            info!("Restored {} teams", board.state.len());
        }

        board.view.apply(ViewPatch::ReplaceGrid(render(&board.state)));
        board
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn store(&self) -> &S {
        self.persistence.store()
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    pub fn add_team(&mut self, name: Option<&str>) -> Result<Team, TeamError> {
        let team = self
            .state
            .add_team(name, &self.settings.team_prefix)
            .map(Team::clone)
            .map_err(|e| self.refuse(e))?;
        info!("Added team {} ({})", team.id, team.name);

        let saved = self.persist();
        self.view.apply(ViewPatch::InsertCard(render_card(&team)));
        self.refresh_stats();
        self.finish(saved, Some(Toast::new("Team added", Severity::Success)));
        self.events.publish(Event::TeamAdded {
            id: team.id,
            name: team.name.clone(),
        });
        Ok(team)
    }

    pub fn remove_team(&mut self, id: TeamId) -> Result<Team, TeamError> {
        let team = self.state.remove_team(id).map_err(|e| self.refuse(e))?;
        info!("Removed team {} ({})", team.id, team.name);

        let saved = self.persist();
        self.view.apply(ViewPatch::RemoveCard(id));
        self.refresh_stats();
        self.finish(saved, Some(Toast::new("Team removed", Severity::Info)));
        self.events.publish(Event::TeamRemoved {
            id,
            name: team.name.clone(),
        });
        Ok(team)
    }

    pub fn rename_team(&mut self, id: TeamId, new_name: &str) -> Result<(), TeamError> {
        let name = self
            .state
            .rename_team(id, new_name, &self.settings.team_prefix)
            .map(|team| team.name.clone())
            .map_err(|e| self.refuse(e))?;

        let saved = self.persist();
        self.view.apply(ViewPatch::UpdateName {
            id,
            name: name.clone(),
        });
        self.finish(saved, None);
        self.events.publish(Event::TeamRenamed { id, name });
        Ok(())
    }

    /// Returns the new score
    pub fn adjust_score(&mut self, id: TeamId, delta: i64) -> Result<u32, TeamError> {
        let (old, new) = self
            .state
            .adjust_score(id, delta)
            .map_err(|e| self.refuse(e))?;

        let saved = self.persist();
        let emphasize = delta > 0;
        if emphasize {
            let until = Instant::now() + self.settings.score_emphasis;
            self.emphasized.retain(|(team, _)| *team != id);
            self.emphasized.push((id, until));
        }
        self.view.apply(ViewPatch::UpdateScore {
            id,
            score: new,
            emphasize,
        });
        self.refresh_stats();
        self.finish(saved, None);
        self.events.publish(Event::ScoreChanged { id, old, new });
        Ok(new)
    }

    /// Returns the stored (trimmed) name
    pub fn add_participant(&mut self, id: TeamId, name: &str) -> Result<String, TeamError> {
        let name = self
            .state
            .add_participant(id, name)
            .map_err(|e| self.refuse(e))?;

        let saved = self.persist();
        self.patch_roster(id);
        self.refresh_stats();
        self.finish(saved, Some(Toast::new("Participant added", Severity::Success)));
        self.events.publish(Event::ParticipantAdded {
            id,
            name: name.clone(),
        });
        Ok(name)
    }

    /// Returns whether the participant was on the roster
    pub fn remove_participant(&mut self, id: TeamId, name: &str) -> Result<bool, TeamError> {
        let removed = self
            .state
            .remove_participant(id, name)
            .map_err(|e| self.refuse(e))?;
        if !removed {
            debug!("Participant {:?} not in team {}", name, id);
            return Ok(false);
        }

        let saved = self.persist();
        self.patch_roster(id);
        self.refresh_stats();
        self.finish(saved, None);
        self.events.publish(Event::ParticipantRemoved {
            id,
            name: name.to_string(),
        });
        Ok(true)
    }

    /// Zero every score and clear every roster. The caller must have asked
    /// the user first.
    pub fn reset_all(&mut self, _confirmed: Confirmed) {
        self.state.reset_all();
        info!("Reset all {} teams", self.state.len());

        let saved = self.persist();
        self.view.apply(ViewPatch::ReplaceGrid(render(&self.state)));
        self.finish(
            saved,
            Some(Toast::new("All teams have been reset", Severity::Success)),
        );
        self.events.publish(Event::BoardReset);
    }

    /// Replace the whole team list. The list must satisfy the same checks as
    /// an import.
    pub fn replace_all(&mut self, teams: Vec<Team>) -> Result<(), SnapshotError> {
        validate_teams(&teams)?;
        self.install(teams, None);
        Ok(())
    }

    /// Import the contents of a snapshot file. On failure the state is left
    /// untouched and an error toast is shown.
    pub fn import_snapshot(&mut self, contents: &str) -> Result<usize, SnapshotError> {
        let teams = match parse_import(contents) {
            Ok(teams) => teams,
            Err(e) => return Err(self.import_failed(e)),
        };

        let count = teams.len();
        self.install(teams, Some(Toast::new("Data imported", Severity::Success)));
        Ok(count)
    }

    /// Import a dropped file. Files without a `.json` extension are ignored
    /// and yield `Ok(None)`.
    pub fn import_file(&mut self, path: &Path) -> Result<Option<usize>, SnapshotError> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if !is_json {
            info!("Ignoring dropped file {}: not JSON", path.display());
            return Ok(None);
        }

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(source) => {
                return Err(self.import_failed(SnapshotError::Read {
                    path: path.display().to_string(),
                    source,
                }))
            }
        };

        self.import_snapshot(&contents).map(Some)
    }

    /// Build the export file without delivering it
    pub fn export_snapshot(&self, now: DateTime<Utc>) -> Result<ExportFile, SnapshotError> {
        ExportFile::build(&self.state, now)
    }

    /// Build the export and write it into `dir`
    pub fn export_to(&mut self, dir: &Path) -> Result<PathBuf, SnapshotError> {
        let file = self.export_snapshot(Utc::now())?;
        let path = file
            .write_to(dir)
            .map_err(|source| SnapshotError::Write {
                path: dir.join(&file.file_name).display().to_string(),
                source,
            });

        match path {
            Ok(path) => {
                info!("Exported {} teams to {}", self.state.len(), path.display());
                self.notify(Toast::new("Data exported", Severity::Success));
                self.events.publish(Event::Exported {
                    file_name: file.file_name,
                });
                Ok(path)
            }
            Err(e) => {
                error!("Export failed: {}", e);
                self.notify(Toast::new("Could not export the data", Severity::Error));
                Err(e)
            }
        }
    }

    /// Advance toast and score highlight timing to `now`
    pub fn tick(&mut self, now: Instant) {
        let (expired, pending): (Vec<_>, Vec<_>) = self
            .emphasized
            .drain(..)
            .partition(|(_, until)| *until <= now);
        self.emphasized = pending;

        for (id, _) in expired {
            if let Some(team) = self.state.find(id) {
                let score = team.score;
                self.view.apply(ViewPatch::UpdateScore {
                    id,
                    score,
                    emphasize: false,
                });
            }
        }

        if let Some(patch) = self.notifier.tick(now) {
            self.view.apply(patch);
        }
    }

    fn install(&mut self, teams: Vec<Team>, toast: Option<Toast>) {
        self.state.replace_all(teams);
        info!(
            "Replaced board with {} teams (next id {})",
            self.state.len(),
            self.state.next_team_id()
        );

        let saved = self.persist();
        self.view.apply(ViewPatch::ReplaceGrid(render(&self.state)));
        self.finish(saved, toast);
        self.events.publish(Event::BoardReplaced {
            team_count: self.state.len(),
        });
    }

    fn import_failed(&mut self, e: SnapshotError) -> SnapshotError {
        warn!("Import rejected: {}", e);
        self.notify(Toast::new("Could not import the file", Severity::Error));
        e
    }

    fn patch_roster(&mut self, id: TeamId) {
        if let Some(team) = self.state.find(id) {
            let roster = render_roster(team);
            self.view.apply(ViewPatch::UpdateRoster { id, roster });
        }
    }

    fn refresh_stats(&mut self) {
        self.view
            .apply(ViewPatch::UpdateStats(render_stats(&self.state)));
    }

    /// Save the state; a failure is reported but the in-memory change stands.
    fn persist(&mut self) -> bool {
        match self.persistence.save(&self.state) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to save board: {}", e);
                false
            }
        }
    }

    fn finish(&mut self, saved: bool, toast: Option<Toast>) {
        if !saved {
            self.notify(Toast::new("Could not save data", Severity::Error));
        } else if let Some(toast) = toast {
            self.notify(toast);
        }
    }

    fn refuse(&mut self, e: TeamError) -> TeamError {
        match &e {
            TeamError::LastTeam => {
                warn!("Refused to remove the last team");
                self.notify(Toast::new("There must be at least one team", Severity::Warning));
            }
            TeamError::DuplicateParticipant { team, name } => {
                warn!("Participant {:?} already in team {}", name, team);
                self.notify(Toast::new(
                    "This participant already exists",
                    Severity::Warning,
                ));
            }
            TeamError::IdsExhausted => {
                error!("Team id counter exhausted");
                self.notify(Toast::new("No more teams can be added", Severity::Error));
            }
            TeamError::NotFound(_) | TeamError::BlankParticipant => {
                debug!("Ignored: {}", e);
            }
        }
        e
    }

    fn notify(&mut self, toast: Toast) {
        for patch in self.notifier.notify(toast, Instant::now()) {
            self.view.apply(patch);
        }
    }
}
