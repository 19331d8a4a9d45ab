/// Event types for the scoreboard
///
/// Events represent things that have happened (past tense).
/// They are broadcast to all subscribers after the state was saved.
use crate::teams::TeamId;

/// Scoreboard events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    TeamAdded { id: TeamId, name: String },

    TeamRemoved { id: TeamId, name: String },

    TeamRenamed { id: TeamId, name: String },

    ScoreChanged { id: TeamId, old: u32, new: u32 },

    ParticipantAdded { id: TeamId, name: String },

    ParticipantRemoved { id: TeamId, name: String },

    /// All scores zeroed and rosters cleared
    BoardReset,

    /// Team list replaced by an import
    BoardReplaced { team_count: usize },

    Exported { file_name: String },
}

impl Event {
    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            Event::TeamAdded { id, name } => format!("Team {} added: {}", id, name),
            Event::TeamRemoved { id, name } => format!("Team {} removed: {}", id, name),
            Event::TeamRenamed { id, name } => format!("Team {} renamed to {}", id, name),
            Event::ScoreChanged { id, old, new } => {
                format!("Team {} score {} -> {}", id, old, new)
            }
            Event::ParticipantAdded { id, name } => {
                format!("{} joined team {}", name, id)
            }
            Event::ParticipantRemoved { id, name } => {
                format!("{} left team {}", name, id)
            }
            Event::BoardReset => "All teams reset".to_string(),
            Event::BoardReplaced { team_count } => {
                format!("Board replaced with {} teams", team_count)
            }
            Event::Exported { file_name } => format!("Exported {}", file_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_description() {
        let event = Event::ScoreChanged {
            id: 1,
            old: 3,
            new: 0,
        };
        assert_eq!(event.description(), "Team 1 score 3 -> 0");

        assert_eq!(Event::BoardReset.description(), "All teams reset");
    }
}
