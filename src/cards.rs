use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Hearts => "♥",
            Suit::Spades => "♠",
        }
    }

    pub fn letter(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    /// Hearts and diamonds render red, clubs and spades dark.
    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

impl Display for Suit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Suit {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "c" | "♣" => Ok(Suit::Clubs),
            "d" | "♦" => Ok(Suit::Diamonds),
            "h" | "♥" => Ok(Suit::Hearts),
            "s" | "♠" => Ok(Suit::Spades),
            _ => Err(ParseCardError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid card token '{0}'")]
pub struct ParseCardError(pub String);

/// One card as it appears on the wire: a two-character `<rank><suit>` token.
/// The rank is opaque: the data source decides what counts as a rank and the
/// replayer forwards it untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardToken {
    rank: char,
    suit: Suit,
}

impl CardToken {
    pub fn new(rank: char, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn rank(&self) -> char {
        self.rank
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }
}

impl Display for CardToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit.letter())
    }
}

impl FromStr for CardToken {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(rank), Some(suit), None) => {
                let suit = suit
                    .to_string()
                    .parse()
                    .map_err(|_| ParseCardError(s.to_string()))?;
                Ok(CardToken { rank, suit })
            }
            _ => Err(ParseCardError(s.to_string())),
        }
    }
}

/// Splits a concatenated token string such as `"AhKs"` into cards.
/// An odd-length string or an unknown suit letter rejects the whole string.
pub fn parse_token_string(hand: &str) -> Result<Vec<CardToken>, ParseCardError> {
    let chars: Vec<char> = hand.chars().collect();
    if chars.len() % 2 != 0 {
        return Err(ParseCardError(hand.to_string()));
    }
    chars
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>().parse())
        .collect()
}
