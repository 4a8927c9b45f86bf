use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::dispatch::DispatchConfig;
use crate::sequencer::SequencerConfig;
use crate::session::{HandOutcome, SessionConfig, SessionController, first_move};
use crate::stats::StatsSnapshot;
use crate::store::{LocalSource, ScenarioStore};
use crate::view::ConsoleView;

#[derive(Debug, Clone)]
pub struct ReplayerConfig {
    pub hands: u32,
    pub step_delay_ms: u64,
    pub seed: Option<u64>,
    pub no_color: bool,
    pub data: Option<PathBuf>,
    pub show_pot_size: bool,
    pub show_per_seat_action: bool,
    pub feedback_auto_hide_ms: Option<u64>,
}

impl Default for ReplayerConfig {
    fn default() -> Self {
        Self {
            hands: 1,
            step_delay_ms: 800,
            seed: None,
            no_color: false,
            data: None,
            show_pot_size: true,
            show_per_seat_action: true,
            feedback_auto_hide_ms: Some(3000),
        }
    }
}

/// Terminal front end: replays hands with timed output, prompts for the
/// decision on stdin, and keeps the running score on screen.
pub struct Replayer {
    config: ReplayerConfig,
    controller: SessionController<LocalSource, ConsoleView>,
}

impl Replayer {
    pub fn new(config: ReplayerConfig) -> Self {
        let store = Arc::new(ScenarioStore::load_or_sample(config.data.as_deref()));
        let source = LocalSource::new(store, config.seed);
        let view = ConsoleView::new(config.no_color);
        let session_config = SessionConfig {
            sequencer: SequencerConfig {
                // The cadence must stay positive; clamp rather than allow a
                // zero-delay busy loop.
                step_delay: Duration::from_millis(config.step_delay_ms.max(1)),
                dispatch: DispatchConfig {
                    show_pot_size: config.show_pot_size,
                    show_per_seat_action: config.show_per_seat_action,
                },
            },
            feedback_auto_hide: config.feedback_auto_hide_ms.map(Duration::from_millis),
        };
        Self {
            config,
            controller: SessionController::new(source, view, session_config),
        }
    }

    /// Interactive session: one hand per cycle until the requested count is
    /// played or the user quits at a prompt.
    pub async fn run(&mut self) -> Result<()> {
        let mut chooser = stdin_choose;
        for _ in 0..self.config.hands {
            if self.controller.request_new_hand(&mut chooser).await? == HandOutcome::Abandoned {
                break;
            }
        }
        self.print_summary();
        Ok(())
    }

    /// Plays every hand answering with the first offered move. Smoke-test
    /// mode; no stdin involved.
    pub async fn autoplay(&mut self) -> Result<StatsSnapshot> {
        let mut chooser = first_move;
        for _ in 0..self.config.hands {
            self.controller.request_new_hand(&mut chooser).await?;
        }
        Ok(self.controller.stats())
    }

    pub fn print_summary(&self) {
        let stats = self.controller.stats();
        if self.config.no_color {
            println!(
                "Summary: hands={}, correct={}, accuracy={}%",
                stats.total, stats.correct, stats.percentage
            );
        } else {
            println!(
                "{} {} {} {} {} {}%",
                "Summary".bold().magenta(),
                stats.total,
                "Correct".bold().white(),
                stats.correct,
                "Accuracy".bold().white(),
                stats.percentage
            );
        }
    }
}

/// Prompts on stdin until a move number, a move label, or `q` arrives. EOF
/// quits like `q` does.
fn stdin_choose(moves: &[String]) -> Option<String> {
    let mut input = String::new();
    loop {
        input.clear();
        print!(
            "Select move [1-{}] (label also accepted, q=quit): ",
            moves.len()
        );
        if io::stdout().flush().is_err() {
            return None;
        }
        match io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {}
        }
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("q") {
            return None;
        }
        if let Ok(index) = trimmed.parse::<usize>() {
            if (1..=moves.len()).contains(&index) {
                return Some(moves[index - 1].clone());
            }
        } else if let Some(label) = moves.iter().find(|m| m.eq_ignore_ascii_case(trimmed)) {
            return Some(label.clone());
        }
        println!("Invalid selection. Try again or press 'q' to quit.");
    }
}
