/// View layer
///
/// `render` projects the state into a `Board`. After that the scoreboard only
/// sends `ViewPatch` values, sized to what changed:
///
/// ```text
/// load / import / reset     -> ReplaceGrid
/// add / remove team         -> InsertCard / RemoveCard
/// rename, score, roster     -> UpdateName / UpdateScore / UpdateRoster
/// every mutation            -> UpdateStats
/// notifier                  -> ShowToast / FadeToast / DismissToast
/// ```
pub mod console;
pub mod model;
pub mod render;

pub use console::ConsoleView;
pub use model::{
    Board, NameInput, ParticipantInput, ParticipantItem, RosterSection, ScoreControl,
    ScoreDisplay, TeamCard, TextBinding,
};
pub use render::{render, render_card, render_roster, render_stats};

use crate::notifier::Toast;
use crate::state::Stats;
use crate::teams::TeamId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPatch {
    ReplaceGrid(Board),
    InsertCard(TeamCard),
    RemoveCard(TeamId),
    UpdateName {
        id: TeamId,
        name: String,
    },
    UpdateScore {
        id: TeamId,
        score: u32,
        emphasize: bool,
    },
    UpdateRoster {
        id: TeamId,
        roster: RosterSection,
    },
    UpdateStats(Stats),
    ShowToast(Toast),
    FadeToast,
    DismissToast,
}

/// Anything that can display the board
pub trait View {
    fn apply(&mut self, patch: ViewPatch);
}

/// Recording view: keeps every patch in order
impl View for Vec<ViewPatch> {
    fn apply(&mut self, patch: ViewPatch) {
        self.push(patch);
    }
}

impl Board {
    /// Apply a patch to a retained board. Toast patches are ignored here.
    pub fn patch(&mut self, patch: &ViewPatch) {
        match patch {
            ViewPatch::ReplaceGrid(board) => *self = board.clone(),
            ViewPatch::InsertCard(card) => self.cards.push(card.clone()),
            ViewPatch::RemoveCard(id) => self.cards.retain(|c| c.team_id != *id),
            ViewPatch::UpdateName { id, name } => {
                if let Some(card) = self.card_mut(*id) {
                    card.name.value = name.clone();
                }
            }
            ViewPatch::UpdateScore {
                id,
                score,
                emphasize,
            } => {
                if let Some(card) = self.card_mut(*id) {
                    card.score.value = *score;
                    card.score.emphasized = *emphasize;
                }
            }
            ViewPatch::UpdateRoster { id, roster } => {
                if let Some(card) = self.card_mut(*id) {
                    card.roster = roster.clone();
                }
            }
            ViewPatch::UpdateStats(stats) => self.stats = *stats,
            ViewPatch::ShowToast(_) | ViewPatch::FadeToast | ViewPatch::DismissToast => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    #[test]
    fn test_patches_match_full_render() {
        let mut state = AppState::default();
        state.add_team(Some("Team A"), "Team").unwrap();
        let mut retained = render(&state);

        let added = state.add_team(Some("Team B"), "Team").unwrap().clone();
        retained.patch(&ViewPatch::InsertCard(render_card(&added)));

        state.adjust_score(2, 5).unwrap();
        retained.patch(&ViewPatch::UpdateScore {
            id: 2,
            score: 5,
            emphasize: false,
        });

        state.add_participant(1, "Ana").unwrap();
        let team = state.find(1).unwrap();
        retained.patch(&ViewPatch::UpdateRoster {
            id: 1,
            roster: render_roster(team),
        });

        state.rename_team(1, "Reds", "Team").unwrap();
        retained.patch(&ViewPatch::UpdateName {
            id: 1,
            name: "Reds".to_string(),
        });

        state.remove_team(2).unwrap();
        retained.patch(&ViewPatch::RemoveCard(2));
        retained.patch(&ViewPatch::UpdateStats(render_stats(&state)));

        assert_eq!(retained, render(&state));
    }
}
