/// Text rendering of the board for terminal hosts
use std::io::Write;

use crate::notifier::Toast;
use crate::state::Stats;
use crate::teams::TeamId;

use super::model::{Board, TeamCard};
use super::{View, ViewPatch};

/// Keeps a retained board and prints the fragment each patch touches
pub struct ConsoleView<W: Write> {
    out: W,
    board: Board,
    toast: Option<Toast>,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            board: Board::default(),
            toast: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print the whole retained board
    pub fn print_board(&mut self) {
        let text = format_board(&self.board);
        let _ = write!(self.out, "{}", text);
        let _ = self.out.flush();
    }

    fn print_card(&mut self, id: TeamId) {
        if let Some(card) = self.board.card(id) {
            let text = format_card(card);
            let _ = write!(self.out, "{}", text);
        }
    }
}

impl<W: Write> View for ConsoleView<W> {
    fn apply(&mut self, patch: ViewPatch) {
        self.board.patch(&patch);

        match &patch {
            ViewPatch::ReplaceGrid(_) => self.print_board(),
            ViewPatch::InsertCard(card) => self.print_card(card.team_id),
            ViewPatch::RemoveCard(id) => {
                let _ = writeln!(self.out, "- team {} removed", id);
            }
            ViewPatch::UpdateName { id, .. }
            | ViewPatch::UpdateScore { id, .. }
            | ViewPatch::UpdateRoster { id, .. } => self.print_card(*id),
            ViewPatch::UpdateStats(stats) => {
                let _ = writeln!(self.out, "{}", format_stats(stats));
            }
            ViewPatch::ShowToast(toast) => {
                let _ = writeln!(
                    self.out,
                    "[{}] {}",
                    toast.severity.icon(),
                    toast.message
                );
                self.toast = Some(toast.clone());
            }
            ViewPatch::FadeToast => {}
            ViewPatch::DismissToast => self.toast = None,
        }

        let _ = self.out.flush();
    }
}

pub fn format_stats(stats: &Stats) -> String {
    format!(
        "Teams: {} | Points: {} | Participants: {}",
        stats.team_count, stats.total_points, stats.total_participants
    )
}

pub fn format_card(card: &TeamCard) -> String {
    let marker = if card.score.emphasized { " *" } else { "" };
    let mut text = format!(
        "[{}] {}  {} {}{}\n",
        card.team_id, card.name.value, card.score.label, card.score.value, marker
    );

    let names: Vec<&str> = card.roster.items.iter().map(|i| i.name.as_str()).collect();
    if names.is_empty() {
        text.push_str(&format!("    {}\n", card.roster.title));
    } else {
        text.push_str(&format!("    {}: {}\n", card.roster.title, names.join(", ")));
    }
    text
}

pub fn format_board(board: &Board) -> String {
    let mut text = format!("{}\n", format_stats(&board.stats));
    for card in &board.cards {
        text.push_str(&format_card(card));
    }
    text
}
