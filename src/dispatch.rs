use itertools::Itertools;

use crate::cards::CardToken;
use crate::history::{Action, PlayerAction, Street, StreetAction};
use crate::view::TableView;

/// Presentation variants observed across the original replayers, folded into
/// one engine: whether the running pot is shown and whether per-seat action
/// badges are shown.
#[derive(Debug, Clone, Copy)]
pub struct DispatchConfig {
    pub show_pot_size: bool,
    pub show_per_seat_action: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            show_pot_size: true,
            show_per_seat_action: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    RevealBoard {
        street: Street,
        cards: Vec<CardToken>,
    },
    ActionBadge {
        player: String,
        text: String,
    },
}

/// What one action record renders to: at most one table command, an optional
/// pot update, and always a log line.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchedStep {
    pub command: Option<RenderCommand>,
    pub pot_update: Option<f64>,
    pub log_line: String,
}

/// Classifies action records and relays them to the table view. Stateless
/// across calls; board accumulation belongs to the view.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher {
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(config: DispatchConfig) -> Self {
        Self { config }
    }

    /// Pure mapping from one action record to its render effects. Unknown or
    /// malformed records never raise, they degrade to a diagnostic log line
    /// with no command, and playback continues.
    pub fn classify(&self, action: &Action) -> DispatchedStep {
        let pot_update = action.pot_size().filter(|_| self.config.show_pot_size);
        match action {
            Action::Street(street) => DispatchedStep {
                command: Some(RenderCommand::RevealBoard {
                    street: street.street,
                    cards: street.board.clone(),
                }),
                pot_update,
                log_line: street_log_line(street),
            },
            Action::Player(player) => DispatchedStep {
                command: self
                    .config
                    .show_per_seat_action
                    .then(|| RenderCommand::ActionBadge {
                        player: player.player.clone(),
                        text: badge_text(player),
                    }),
                pot_update,
                log_line: player_log_line(player),
            },
            Action::Unknown(raw) => DispatchedStep {
                command: None,
                pot_update,
                log_line: format!("Unrecognized action record: {raw}"),
            },
        }
    }

    /// One render pass for one step: log line, pot, transient badges, then
    /// the command itself.
    pub fn apply(&self, step: &DispatchedStep, view: &mut dyn TableView) {
        view.append_log(&step.log_line);
        if let Some(pot) = step.pot_update {
            view.update_pot(pot);
        }
        if self.config.show_per_seat_action {
            view.clear_action_badges();
        }
        match &step.command {
            Some(RenderCommand::RevealBoard { street, cards }) => {
                view.reveal_board(*street, cards);
            }
            Some(RenderCommand::ActionBadge { player, text }) => {
                view.show_action_badge(player, text);
            }
            None => {}
        }
    }
}

fn street_log_line(street: &StreetAction) -> String {
    format!(
        "{}: {}",
        street.street,
        street.board.iter().map(CardToken::to_string).join(" ")
    )
}

fn player_log_line(player: &PlayerAction) -> String {
    match player.amount {
        Some(amount) => format!("{}: {} {amount}bb", player.player, player.action),
        None => format!("{}: {}", player.player, player.action),
    }
}

fn badge_text(player: &PlayerAction) -> String {
    match player.amount {
        Some(amount) => format!("{} {amount}bb", player.action),
        None => player.action.clone(),
    }
}
