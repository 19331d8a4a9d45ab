use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{SnapshotError, TeamError};

/// Identifier assigned to a team when it is created. Never reused.
pub type TeamId = u32;

/// A named, scored team with its participant roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Team {
    /// Create an empty team with a zero score
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
            participants: Vec::new(),
        }
    }

    /// Placeholder used when a team name is left blank, e.g. "Team 3"
    pub fn placeholder_name(prefix: &str, number: usize) -> String {
        format!("{} {}", prefix, number)
    }

    pub fn has_participant(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p == name)
    }

    /// Apply a signed delta, clamping the result to `0..=u32::MAX`.
    pub fn adjust_score(&mut self, delta: i64) -> u32 {
        let next = i64::from(self.score).saturating_add(delta);
        self.score = next.clamp(0, i64::from(u32::MAX)) as u32;
        self.score
    }

    /// Trim and append a participant.
    ///
    /// Returns the stored name on success.
    pub fn add_participant(&mut self, name: &str) -> Result<String, TeamError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TeamError::BlankParticipant);
        }
        if self.has_participant(trimmed) {
            return Err(TeamError::DuplicateParticipant {
                team: self.id,
                name: trimmed.to_string(),
            });
        }

        let name = trimmed.to_string();
        self.participants.push(name.clone());
        Ok(name)
    }

    /// Remove an exact-match participant. Returns whether anything was removed.
    pub fn remove_participant(&mut self, name: &str) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p != name);
        self.participants.len() != before
    }

    /// Zero the score and clear the roster, keeping id and name
    pub fn reset(&mut self) {
        self.score = 0;
        self.participants.clear();
    }
}

/// Check a team list coming from outside the board (import) before it
/// replaces the current state.
pub fn validate_teams(teams: &[Team]) -> Result<(), SnapshotError> {
    if teams.is_empty() {
        return Err(SnapshotError::Empty);
    }

    let mut ids = HashSet::new();
    for team in teams {
        // The largest id would leave no successor for the counter
        if team.id == TeamId::MAX {
            return Err(SnapshotError::IdOutOfRange(team.id));
        }
        if !ids.insert(team.id) {
            return Err(SnapshotError::DuplicateTeamId(team.id));
        }

        let mut names = HashSet::new();
        for participant in &team.participants {
            if !names.insert(participant.as_str()) {
                return Err(SnapshotError::DuplicateParticipant {
                    team: team.id,
                    name: participant.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Next identifier that cannot collide with any of `teams`.
///
/// `None` when the largest id is `TeamId::MAX`.
pub fn next_free_id(teams: &[Team]) -> Option<TeamId> {
    match teams.iter().map(|t| t.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_name() {
        assert_eq!(Team::placeholder_name("Team", 3), "Team 3");
    }

    #[test]
    fn test_adjust_score_clamps_at_zero() {
        let mut team = Team::new(1, "Team A");
        assert_eq!(team.adjust_score(2), 2);
        assert_eq!(team.adjust_score(-5), 0);
        assert_eq!(team.adjust_score(i64::MIN), 0);
    }

    #[test]
    fn test_adjust_score_clamps_at_max() {
        let mut team = Team::new(1, "Team A");
        team.score = u32::MAX - 1;
        assert_eq!(team.adjust_score(10), u32::MAX);
    }

    #[test]
    fn test_add_participant_trims() {
        let mut team = Team::new(1, "Team A");
        assert_eq!(team.add_participant("  Ana  ").unwrap(), "Ana");
        assert_eq!(team.participants, vec!["Ana"]);
    }

    #[test]
    fn test_add_participant_rejects_blank_and_duplicate() {
        let mut team = Team::new(1, "Team A");
        assert_eq!(team.add_participant("   "), Err(TeamError::BlankParticipant));

        team.add_participant("Ana").unwrap();
        assert_eq!(
            team.add_participant(" Ana"),
            Err(TeamError::DuplicateParticipant {
                team: 1,
                name: "Ana".to_string()
            })
        );
        assert_eq!(team.participants, vec!["Ana"]);
    }

    #[test]
    fn test_remove_participant_exact_match() {
        let mut team = Team::new(1, "Team A");
        team.add_participant("Ana").unwrap();
        assert!(!team.remove_participant("ana"));
        assert!(team.remove_participant("Ana"));
        assert!(team.participants.is_empty());
    }

    #[test]
    fn test_validate_teams() {
        assert!(matches!(validate_teams(&[]), Err(SnapshotError::Empty)));

        let teams = vec![Team::new(1, "A"), Team::new(1, "B")];
        assert!(matches!(
            validate_teams(&teams),
            Err(SnapshotError::DuplicateTeamId(1))
        ));

        let mut team = Team::new(1, "A");
        team.participants = vec!["Ana".to_string(), "Ana".to_string()];
        assert!(matches!(
            validate_teams(&[team]),
            Err(SnapshotError::DuplicateParticipant { team: 1, .. })
        ));

        assert!(matches!(
            validate_teams(&[Team::new(TeamId::MAX, "A")]),
            Err(SnapshotError::IdOutOfRange(TeamId::MAX))
        ));

        assert!(validate_teams(&[Team::new(4, "A"), Team::new(2, "B")]).is_ok());
    }

    #[test]
    fn test_next_free_id() {
        assert_eq!(next_free_id(&[]), Some(1));
        assert_eq!(
            next_free_id(&[Team::new(7, "A"), Team::new(3, "B")]),
            Some(8)
        );
        assert_eq!(next_free_id(&[Team::new(TeamId::MAX, "A")]), None);
    }

    #[test]
    fn test_deserialize_defaults() {
        let team: Team = serde_json::from_str(r#"{"id": 3, "name": "X"}"#).unwrap();
        assert_eq!(team.score, 0);
        assert!(team.participants.is_empty());
    }
}
