use std::path::Path;
use std::sync::Arc;

use futures::future::BoxFuture;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::history::{Action, HandHistory, Player, PlayerAction, Street, StreetAction};
use crate::source::{AcquisitionError, HandSource};

/// A flat collection of recorded hands, one of which is served per request.
/// Loads from a JSON array on disk; falls back to built-in samples when the
/// file is missing or unusable, the way the original trainer fell back to
/// sample data when its CSVs were absent.
#[derive(Debug, Clone)]
pub struct ScenarioStore {
    hands: Vec<HandHistory>,
}

impl ScenarioStore {
    pub fn from_file(path: &Path) -> Result<Self, AcquisitionError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| AcquisitionError::Unavailable(format!("{}: {err}", path.display())))?;
        let parsed: Vec<HandHistory> = serde_json::from_str(&raw)
            .map_err(|err| AcquisitionError::Unavailable(format!("{}: {err}", path.display())))?;

        // Invalid records are skipped, not fatal; an empty store is.
        let hands: Vec<HandHistory> = parsed
            .into_iter()
            .filter(|hand| match hand.validate() {
                Ok(()) => true,
                Err(err) => {
                    warn!(%err, "skipping invalid hand history");
                    false
                }
            })
            .collect();

        if hands.is_empty() {
            return Err(AcquisitionError::Unavailable(format!(
                "{}: no valid hand histories",
                path.display()
            )));
        }
        info!(count = hands.len(), path = %path.display(), "loaded hand histories");
        Ok(Self { hands })
    }

    pub fn load_or_sample(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::from_file(path).unwrap_or_else(|err| {
                warn!(%err, "falling back to built-in sample hands");
                Self::sample()
            }),
            None => Self::sample(),
        }
    }

    pub fn sample() -> Self {
        Self {
            hands: sample_hands(),
        }
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    pub fn random_hand<R: Rng>(&self, rng: &mut R) -> Option<&HandHistory> {
        self.hands.choose(rng)
    }
}

/// In-process [`HandSource`] backed by a shared store. Seedable for
/// reproducible hand selection.
pub struct LocalSource {
    store: Arc<ScenarioStore>,
    rng: StdRng,
}

impl LocalSource {
    pub fn new(store: Arc<ScenarioStore>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { store, rng }
    }
}

impl HandSource for LocalSource {
    fn fetch_hand(&mut self) -> BoxFuture<'_, Result<HandHistory, AcquisitionError>> {
        Box::pin(async move {
            self.store
                .random_hand(&mut self.rng)
                .cloned()
                .ok_or_else(|| AcquisitionError::Unavailable("scenario store is empty".into()))
        })
    }
}

fn player(id: &str) -> Player {
    Player {
        id: id.to_string(),
        name: id.to_string(),
    }
}

fn street(street: Street, board: &str, pot_size: f64) -> Action {
    Action::Street(StreetAction {
        street,
        board: crate::cards::parse_token_string(board).unwrap_or_default(),
        pot_size: Some(pot_size),
    })
}

fn acted(id: &str, action: &str, amount: Option<f64>, pot_size: f64) -> Action {
    Action::Player(PlayerAction {
        player: id.to_string(),
        action: action.to_string(),
        amount,
        pot_size: Some(pot_size),
    })
}

/// Built-in demonstration hands, used whenever no data file is supplied.
pub fn sample_hands() -> Vec<HandHistory> {
    vec![
        HandHistory {
            players: ["UTG", "HJ", "CO", "BTN", "SB", "BB"]
                .iter()
                .map(|id| player(id))
                .collect(),
            hero_id: "BTN".to_string(),
            hand: "AhKs".to_string(),
            actions: vec![
                acted("UTG", "raise", Some(2.5), 4.0),
                acted("BTN", "call", Some(2.5), 6.5),
                street(Street::Flop, "Qh7d2s", 6.5),
                acted("UTG", "check", None, 6.5),
            ],
            available_moves: vec!["Check".to_string(), "Bet".to_string()],
            correct_decision: "bet".to_string(),
        },
        HandHistory {
            players: vec![player("SB"), player("BB")],
            hero_id: "BB".to_string(),
            hand: "8h8c".to_string(),
            actions: vec![
                acted("SB", "raise", Some(3.0), 4.0),
                street(Street::Flop, "Ks7h2d", 6.0),
                acted("SB", "bet", Some(3.0), 9.0),
            ],
            available_moves: vec!["Fold".to_string(), "Call".to_string(), "Raise".to_string()],
            correct_decision: "call".to_string(),
        },
    ]
}
