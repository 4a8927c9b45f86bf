use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use serde_with::{DisplayFromStr, serde_as};

use crate::cards::{CardToken, ParseCardError, parse_token_string};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub fn label(self) -> &'static str {
        match self {
            Street::Preflop => "Preflop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
        }
    }
}

impl Display for Street {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: String,
    pub name: String,
}

/// Community cards coming in for a street. Board cards accumulate across
/// streets: the renderer appends, it never replaces.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreetAction {
    pub street: Street,
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub board: Vec<CardToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pot_size: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerAction {
    /// Seat id or display name; the renderer resolves either.
    pub player: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pot_size: Option<f64>,
}

/// One record of the chronological action log.
///
/// The wire format tags records with a `type` field (`"street"` or
/// `"action"`). Decoding is fail-soft per record: an unrecognized tag, or a
/// recognized tag whose fields do not decode, lands in [`Action::Unknown`]
/// carrying the raw value, so a single malformed record never rejects the
/// hand.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Street(StreetAction),
    Player(PlayerAction),
    Unknown(Value),
}

impl Action {
    fn classify(raw: Value) -> Self {
        match raw.get("type").and_then(Value::as_str) {
            Some("street") => serde_json::from_value(raw.clone())
                .map(Action::Street)
                .unwrap_or(Action::Unknown(raw)),
            Some("action") => serde_json::from_value(raw.clone())
                .map(Action::Player)
                .unwrap_or(Action::Unknown(raw)),
            _ => Action::Unknown(raw),
        }
    }

    pub fn pot_size(&self) -> Option<f64> {
        match self {
            Action::Street(street) => street.pot_size,
            Action::Player(player) => player.pot_size,
            Action::Unknown(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Action::classify(Value::deserialize(deserializer)?))
    }
}

impl Serialize for Action {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Tagged<'a, T> {
            r#type: &'static str,
            #[serde(flatten)]
            body: &'a T,
        }

        match self {
            Action::Street(street) => Tagged {
                r#type: "street",
                body: street,
            }
            .serialize(serializer),
            Action::Player(player) => Tagged {
                r#type: "action",
                body: player,
            }
            .serialize(serializer),
            Action::Unknown(raw) => raw.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HistoryError {
    #[error("hand history seats no players")]
    NoPlayers,
    #[error("duplicate player id '{0}'")]
    DuplicatePlayer(String),
    #[error("hero id '{0}' does not match any seated player")]
    UnknownHero(String),
    #[error("hand history offers no available moves")]
    NoMoves,
    #[error("duplicate move label '{0}'")]
    DuplicateMove(String),
    #[error(transparent)]
    BadCard(#[from] ParseCardError),
}

/// A single recorded hand: seats, hero hole cards, the chronological action
/// log, the moves offered at the decision point, and the ground-truth best
/// move. Immutable once acquired; one playback run owns it for its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandHistory {
    pub players: Vec<Player>,
    #[serde(rename = "heroId")]
    pub hero_id: String,
    /// Hero hole cards as a concatenated token string, e.g. `"AhKs"`.
    pub hand: String,
    pub actions: Vec<Action>,
    pub available_moves: Vec<String>,
    pub correct_decision: String,
}

impl HandHistory {
    /// Checks the payload invariants once, at acquisition time. Playback
    /// assumes a validated history.
    pub fn validate(&self) -> Result<(), HistoryError> {
        if self.players.is_empty() {
            return Err(HistoryError::NoPlayers);
        }
        let mut ids = HashSet::new();
        for player in &self.players {
            if !ids.insert(player.id.as_str()) {
                return Err(HistoryError::DuplicatePlayer(player.id.clone()));
            }
        }
        if !ids.contains(self.hero_id.as_str()) {
            return Err(HistoryError::UnknownHero(self.hero_id.clone()));
        }
        if self.available_moves.is_empty() {
            return Err(HistoryError::NoMoves);
        }
        let mut moves = HashSet::new();
        for label in &self.available_moves {
            if !moves.insert(label.as_str()) {
                return Err(HistoryError::DuplicateMove(label.clone()));
            }
        }
        self.hero_cards()?;
        Ok(())
    }

    pub fn hero_cards(&self) -> Result<Vec<CardToken>, ParseCardError> {
        parse_token_string(&self.hand)
    }

    pub fn hero(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.id == self.hero_id)
    }
}
