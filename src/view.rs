use itertools::Itertools;
use owo_colors::OwoColorize;

use crate::cards::CardToken;
use crate::decision::Verdict;
use crate::history::{Player, Street};
use crate::stats::StatsSnapshot;

/// The rendering collaborator. The engine issues these commands as
/// side-effecting calls and expects no acknowledgment; board accumulation
/// across streets is the view's concern.
pub trait TableView {
    fn clear_table(&mut self);
    fn seat_players(&mut self, players: &[Player], hero_id: &str);
    fn reveal_hero_hand(&mut self, cards: &[CardToken]);
    fn reveal_board(&mut self, street: Street, cards: &[CardToken]);
    fn show_action_badge(&mut self, player: &str, text: &str);
    fn clear_action_badges(&mut self);
    fn update_pot(&mut self, pot_bb: f64);
    fn append_log(&mut self, line: &str);
    fn show_decision_prompt(&mut self, moves: &[String]);
    fn show_verdict(&mut self, verdict: &Verdict);
    fn clear_feedback(&mut self);
    fn show_error(&mut self, message: &str);
    fn update_stats(&mut self, stats: &StatsSnapshot);
}

/// Terminal rendering of the table, one line per command.
#[derive(Debug, Default)]
pub struct ConsoleView {
    no_color: bool,
    board: Vec<CardToken>,
}

impl ConsoleView {
    pub fn new(no_color: bool) -> Self {
        Self {
            no_color,
            board: Vec::new(),
        }
    }

    fn format_card(&self, card: &CardToken) -> String {
        let face = format!("{}{}", card.rank(), card.suit().symbol());
        if self.no_color {
            face
        } else if card.suit().is_red() {
            face.red().to_string()
        } else {
            face.bold().to_string()
        }
    }

    fn format_cards(&self, cards: &[CardToken]) -> String {
        cards.iter().map(|c| self.format_card(c)).join(" ")
    }
}

impl TableView for ConsoleView {
    fn clear_table(&mut self) {
        self.board.clear();
        println!();
        println!("{}", "─".repeat(48));
    }

    fn seat_players(&mut self, players: &[Player], hero_id: &str) {
        let seats = players
            .iter()
            .map(|p| {
                if p.id == hero_id {
                    format!("{} (hero)", p.name)
                } else {
                    p.name.clone()
                }
            })
            .join(", ");
        if self.no_color {
            println!("Seats: {seats}");
        } else {
            println!("{} {}", "Seats".bold().white(), seats);
        }
    }

    fn reveal_hero_hand(&mut self, cards: &[CardToken]) {
        let formatted = self.format_cards(cards);
        if self.no_color {
            println!("Hero hand: {formatted}");
        } else {
            println!("{} {formatted}", "Hero hand".bold().yellow());
        }
    }

    fn reveal_board(&mut self, _street: Street, cards: &[CardToken]) {
        self.board.extend_from_slice(cards);
        let formatted = self.format_cards(&self.board);
        if self.no_color {
            println!("Board: {formatted}");
        } else {
            println!("{} {formatted}", "Board".bold().blue());
        }
    }

    fn show_action_badge(&mut self, player: &str, text: &str) {
        if self.no_color {
            println!("  [{player}] {text}");
        } else {
            println!("  [{}] {}", player.bold().cyan(), text.green());
        }
    }

    fn clear_action_badges(&mut self) {
        // Badges scroll away on a terminal; nothing to erase.
    }

    fn update_pot(&mut self, pot_bb: f64) {
        if self.no_color {
            println!("Pot: {pot_bb}bb");
        } else {
            println!("{} {pot_bb}bb", "Pot".bold().white());
        }
    }

    fn append_log(&mut self, line: &str) {
        println!("{line}");
    }

    fn show_decision_prompt(&mut self, moves: &[String]) {
        let listing = moves
            .iter()
            .enumerate()
            .map(|(idx, label)| format!("{}. {label}", idx + 1))
            .join("  ");
        if self.no_color {
            println!("Your turn. What is your decision?  {listing}");
        } else {
            println!(
                "{}  {}",
                "Your turn. What is your decision?".bold().magenta(),
                listing
            );
        }
    }

    fn show_verdict(&mut self, verdict: &Verdict) {
        if self.no_color {
            let word = if verdict.is_correct {
                "Correct!"
            } else {
                "Incorrect."
            };
            println!("{word} The best move is to {}.", verdict.correct_decision);
        } else if verdict.is_correct {
            println!(
                "{} The best move is to {}.",
                "Correct!".bold().green(),
                verdict.correct_decision
            );
        } else {
            println!(
                "{} The best move is to {}.",
                "Incorrect.".bold().red(),
                verdict.correct_decision
            );
        }
    }

    fn clear_feedback(&mut self) {
        // Feedback lines scroll away; nothing to erase.
    }

    fn show_error(&mut self, message: &str) {
        if self.no_color {
            eprintln!("Could not load hand data: {message}");
        } else {
            eprintln!(
                "{} {message}",
                "Could not load hand data:".bold().red()
            );
        }
    }

    fn update_stats(&mut self, stats: &StatsSnapshot) {
        if self.no_color {
            println!(
                "Score: {}/{} ({}%)",
                stats.correct, stats.total, stats.percentage
            );
        } else {
            println!(
                "{} {}/{} ({}%)",
                "Score".bold().white(),
                stats.correct,
                stats.total,
                stats.percentage
            );
        }
    }
}
