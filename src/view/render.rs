/// Pure projection from state to view tree
use crate::messaging::Command;
use crate::state::{AppState, Stats};
use crate::teams::Team;

use super::model::{
    Board, NameInput, ParticipantInput, ParticipantItem, RosterSection, ScoreControl,
    ScoreDisplay, TeamCard, TextBinding,
};

pub fn render(state: &AppState) -> Board {
    Board {
        stats: render_stats(state),
        cards: state.teams().iter().map(render_card).collect(),
    }
}

pub fn render_stats(state: &AppState) -> Stats {
    state.stats()
}

pub fn render_card(team: &Team) -> TeamCard {
    let id = team.id;
    TeamCard {
        key: format!("team-{}", id),
        team_id: id,
        name: NameInput {
            value: team.name.clone(),
            placeholder: "Team name",
            binding: TextBinding::RenameTeam(id),
        },
        score: ScoreDisplay {
            key: format!("score-{}", id),
            label: "POINTS",
            value: team.score,
            emphasized: false,
        },
        controls: [
            ScoreControl {
                label: "+1 Point",
                on_press: Command::AdjustScore { id, delta: 1 },
            },
            ScoreControl {
                label: "-1 Point",
                on_press: Command::AdjustScore { id, delta: -1 },
            },
        ],
        roster: render_roster(team),
        add_participant: ParticipantInput {
            key: format!("participant-input-{}", id),
            placeholder: "Participant name",
            button_label: "Add",
            submit_on_enter: true,
            binding: TextBinding::AddParticipant(id),
        },
        on_remove: Command::RemoveTeam { id },
    }
}

pub fn render_roster(team: &Team) -> RosterSection {
    RosterSection {
        key: format!("participants-{}", team.id),
        title: format!("Participants ({})", team.participants.len()),
        count: team.participants.len(),
        items: team
            .participants
            .iter()
            .map(|name| ParticipantItem {
                name: name.clone(),
                on_remove: Command::RemoveParticipant {
                    id: team.id,
                    name: name.clone(),
                },
            })
            .collect(),
    }
}
