/// Board state with the mutation rules
///
/// Holds the ordered team list and the id counter. Every method here is pure
/// in-memory work; persistence and rendering are driven by the `Scoreboard`.
use crate::error::TeamError;
use crate::teams::{next_free_id, Team, TeamId};

/// Aggregate figures shown above the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub team_count: usize,
    pub total_points: u64,
    pub total_participants: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppState {
    teams: Vec<Team>,
    next_team_id: TeamId,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            teams: Vec::new(),
            next_team_id: 1,
        }
    }
}

impl AppState {
    /// Rebuild a state from persisted parts.
    ///
    /// The counter is raised past every existing id, so a stale or missing
    /// persisted value can never hand out an id that is already taken.
    /// A counter at `TeamId::MAX` means no id is left.
    pub fn from_parts(teams: Vec<Team>, persisted_next_id: Option<TeamId>) -> Self {
        let derived = next_free_id(&teams).unwrap_or(TeamId::MAX);
        let next_team_id = persisted_next_id.map_or(derived, |n| n.max(derived));
        Self {
            teams,
            next_team_id,
        }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn next_team_id(&self) -> TeamId {
        self.next_team_id
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn find(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    fn find_mut(&mut self, id: TeamId) -> Result<&mut Team, TeamError> {
        self.teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TeamError::NotFound(id))
    }

    /// Append a team. A blank or missing name becomes "<prefix> N" where N is
    /// the team count including the new one.
    ///
    /// `TeamId::MAX` is never handed out; once the counter reaches it every
    /// add is refused.
    pub fn add_team(&mut self, name: Option<&str>, prefix: &str) -> Result<&Team, TeamError> {
        let id = self.next_team_id;
        self.next_team_id = id.checked_add(1).ok_or(TeamError::IdsExhausted)?;

        let name = match name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => Team::placeholder_name(prefix, self.teams.len() + 1),
        };

        self.teams.push(Team::new(id, name));
        Ok(&self.teams[self.teams.len() - 1])
    }

    /// Add placeholder teams until `count` exist. Only used on an empty board.
    pub fn seed_defaults(&mut self, count: usize, prefix: &str) {
        while self.teams.len() < count.max(1) {
            if self.add_team(None, prefix).is_err() {
                break;
            }
        }
    }

    /// Remove a team. Refused while one team or fewer remains, before the id is
    /// even looked up.
    pub fn remove_team(&mut self, id: TeamId) -> Result<Team, TeamError> {
        if self.teams.len() <= 1 {
            return Err(TeamError::LastTeam);
        }

        let index = self
            .teams
            .iter()
            .position(|t| t.id == id)
            .ok_or(TeamError::NotFound(id))?;
        Ok(self.teams.remove(index))
    }

    /// Rename a team, falling back to "<prefix> <id>" for blank input.
    pub fn rename_team(
        &mut self,
        id: TeamId,
        new_name: &str,
        prefix: &str,
    ) -> Result<&Team, TeamError> {
        let team = self.find_mut(id)?;
        let trimmed = new_name.trim();
        team.name = if trimmed.is_empty() {
            Team::placeholder_name(prefix, id as usize)
        } else {
            new_name.to_string()
        };
        Ok(&*team)
    }

    /// Returns `(old, new)` scores.
    pub fn adjust_score(&mut self, id: TeamId, delta: i64) -> Result<(u32, u32), TeamError> {
        let team = self.find_mut(id)?;
        let old = team.score;
        let new = team.adjust_score(delta);
        Ok((old, new))
    }

    pub fn add_participant(&mut self, id: TeamId, name: &str) -> Result<String, TeamError> {
        self.find_mut(id)?.add_participant(name)
    }

    pub fn remove_participant(&mut self, id: TeamId, name: &str) -> Result<bool, TeamError> {
        Ok(self.find_mut(id)?.remove_participant(name))
    }

    /// Zero every score and empty every roster. Ids and names survive.
    pub fn reset_all(&mut self) {
        for team in &mut self.teams {
            team.reset();
        }
    }

    /// Replace the whole list and recompute the counter from the new ids.
    pub fn replace_all(&mut self, teams: Vec<Team>) {
        self.next_team_id = next_free_id(&teams).unwrap_or(TeamId::MAX);
        self.teams = teams;
    }

    pub fn stats(&self) -> Stats {
        Stats {
            team_count: self.teams.len(),
            total_points: self.teams.iter().map(|t| u64::from(t.score)).sum(),
            total_participants: self.teams.iter().map(|t| t.participants.len()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_teams() -> AppState {
        let mut state = AppState::default();
        state.add_team(Some("Team A"), "Team").unwrap();
        state.add_team(Some("Team B"), "Team").unwrap();
        state
    }

    #[test]
    fn test_add_team_assigns_increasing_ids() {
        let mut state = AppState::default();
        assert_eq!(state.add_team(None, "Team").unwrap().id, 1);
        assert_eq!(state.add_team(Some("Reds"), "Team").unwrap().id, 2);
        assert_eq!(state.next_team_id(), 3);
        assert_eq!(state.teams()[0].name, "Team 1");
        assert_eq!(state.teams()[1].name, "Reds");
    }

    #[test]
    fn test_add_team_blank_name_uses_placeholder() {
        let mut state = two_teams();
        let team = state.add_team(Some("   "), "Team").unwrap();
        assert_eq!(team.name, "Team 3");
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut state = two_teams();
        state.remove_team(2).unwrap();
        assert_eq!(state.add_team(None, "Team").unwrap().id, 3);
    }

    #[test]
    fn test_remove_last_team_refused() {
        let mut state = two_teams();
        assert!(state.remove_team(1).is_ok());
        assert_eq!(state.remove_team(2), Err(TeamError::LastTeam));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_remove_unknown_team() {
        let mut state = two_teams();
        assert_eq!(state.remove_team(42), Err(TeamError::NotFound(42)));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_rename_team() {
        let mut state = two_teams();
        assert_eq!(state.rename_team(1, "Blues", "Team").unwrap().name, "Blues");
        assert_eq!(state.rename_team(2, "  ", "Team").unwrap().name, "Team 2");
        assert_eq!(
            state.rename_team(9, "X", "Team").unwrap_err(),
            TeamError::NotFound(9)
        );
    }

    #[test]
    fn test_score_scenario() {
        let mut state = two_teams();
        for _ in 0..3 {
            state.adjust_score(1, 1).unwrap();
        }
        assert_eq!(state.find(1).unwrap().score, 3);
        assert_eq!(state.adjust_score(1, -5).unwrap(), (3, 0));
        assert_eq!(state.find(1).unwrap().score, 0);
    }

    #[test]
    fn test_reset_all_keeps_identity() {
        let mut state = two_teams();
        state.adjust_score(1, 4).unwrap();
        state.add_participant(2, "Ana").unwrap();

        state.reset_all();

        assert_eq!(state.teams()[0].id, 1);
        assert_eq!(state.teams()[0].name, "Team A");
        assert!(state.teams().iter().all(|t| t.score == 0));
        assert!(state.teams().iter().all(|t| t.participants.is_empty()));
    }

    #[test]
    fn test_replace_all_recomputes_counter() {
        let mut state = two_teams();
        state.replace_all(vec![Team::new(10, "X"), Team::new(4, "Y")]);
        assert_eq!(state.next_team_id(), 11);

        state.replace_all(Vec::new());
        assert_eq!(state.next_team_id(), 1);
    }

    #[test]
    fn test_from_parts_never_trusts_stale_counter() {
        let teams = vec![Team::new(1, "A"), Team::new(5, "B")];

        assert_eq!(AppState::from_parts(teams.clone(), None).next_team_id(), 6);
        assert_eq!(AppState::from_parts(teams.clone(), Some(2)).next_team_id(), 6);
        assert_eq!(AppState::from_parts(teams, Some(9)).next_team_id(), 9);
    }

    #[test]
    fn test_add_team_refused_when_ids_run_out() {
        let mut state = AppState::from_parts(vec![Team::new(1, "A")], Some(TeamId::MAX - 1));

        assert_eq!(state.add_team(None, "Team").unwrap().id, TeamId::MAX - 1);
        assert_eq!(state.add_team(None, "Team"), Err(TeamError::IdsExhausted));
        assert_eq!(state.len(), 2);
        assert_eq!(state.next_team_id(), TeamId::MAX);
    }

    #[test]
    fn test_from_parts_with_max_id_hands_out_nothing() {
        let mut state = AppState::from_parts(vec![Team::new(TeamId::MAX, "A")], None);
        assert_eq!(state.add_team(None, "Team"), Err(TeamError::IdsExhausted));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_seed_defaults() {
        let mut state = AppState::default();
        state.seed_defaults(2, "Team");
        let names: Vec<_> = state.teams().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Team 1", "Team 2"]);
    }

    #[test]
    fn test_stats() {
        let mut state = two_teams();
        state.adjust_score(1, 3).unwrap();
        state.adjust_score(2, 2).unwrap();
        state.add_participant(1, "Ana").unwrap();
        state.add_participant(2, "Bo").unwrap();
        state.add_participant(2, "Cy").unwrap();

        assert_eq!(
            state.stats(),
            Stats {
                team_count: 2,
                total_points: 5,
                total_participants: 3,
            }
        );
    }
}
