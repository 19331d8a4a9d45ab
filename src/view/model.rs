/// View tree for the scoreboard
///
/// Plain data describing what the host draws. Every interactive element
/// carries the command it triggers, so the host only forwards user input.
use crate::messaging::Command;
use crate::state::Stats;
use crate::teams::TeamId;

/// Whole board: aggregate stats above a grid of cards
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    pub stats: Stats,
    pub cards: Vec<TeamCard>,
}

impl Board {
    pub fn card(&self, id: TeamId) -> Option<&TeamCard> {
        self.cards.iter().find(|c| c.team_id == id)
    }

    pub fn card_mut(&mut self, id: TeamId) -> Option<&mut TeamCard> {
        self.cards.iter_mut().find(|c| c.team_id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamCard {
    pub key: String,
    pub team_id: TeamId,
    pub name: NameInput,
    pub score: ScoreDisplay,
    pub controls: [ScoreControl; 2],
    pub roster: RosterSection,
    pub add_participant: ParticipantInput,
    pub on_remove: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameInput {
    pub value: String,
    pub placeholder: &'static str,
    pub binding: TextBinding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreDisplay {
    pub key: String,
    pub label: &'static str,
    pub value: u32,
    /// Momentary highlight after a gain; the host decides how long it lasts
    pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreControl {
    pub label: &'static str,
    pub on_press: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterSection {
    pub key: String,
    pub title: String,
    pub count: usize,
    pub items: Vec<ParticipantItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantItem {
    pub name: String,
    pub on_remove: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantInput {
    pub key: String,
    pub placeholder: &'static str,
    pub button_label: &'static str,
    pub submit_on_enter: bool,
    pub binding: TextBinding,
}

/// Turns text typed into an input into a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBinding {
    RenameTeam(TeamId),
    AddParticipant(TeamId),
}

impl TextBinding {
    pub fn command(self, text: &str) -> Command {
        match self {
            TextBinding::RenameTeam(id) => Command::RenameTeam {
                id,
                name: text.to_string(),
            },
            TextBinding::AddParticipant(id) => Command::AddParticipant {
                id,
                name: text.to_string(),
            },
        }
    }
}
