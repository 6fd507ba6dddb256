use std::fmt;
use std::str::FromStr;

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GameError;

pub const DECK_SIZE: usize = 52;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn symbol(&self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }

    fn from_symbol(symbol: char) -> Option<Suit> {
        match symbol {
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'H' => Some(Suit::Hearts),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const NUMERIC: [Rank; 9] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
    ];
    pub const FACES: [Rank; 4] = [Rank::Ace, Rank::Jack, Rank::Queen, Rank::King];

    pub fn label(&self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

impl FromStr for Rank {
    type Err = GameError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Rank::NUMERIC
            .iter()
            .chain(Rank::FACES.iter())
            .copied()
            .find(|rank| rank.label() == label)
            .ok_or_else(|| GameError::InvalidCard(label.to_string()))
    }
}

/// A card token such as `10C` or `AH`: rank label followed by the suit letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

impl FromStr for Card {
    type Err = GameError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || GameError::InvalidCard(token.to_string());
        let (split, symbol) = token.char_indices().last().ok_or_else(invalid)?;
        let suit = Suit::from_symbol(symbol).ok_or_else(invalid)?;
        let rank = token[..split].parse::<Rank>().map_err(|_| invalid())?;
        Ok(Card::new(rank, suit))
    }
}

impl From<Card> for String {
    fn from(card: Card) -> String {
        card.to_string()
    }
}

impl TryFrom<String> for Card {
    type Error = GameError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        token.parse()
    }
}

/// Stack of cards; draws come off the end.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Numeric ranks suit by suit, then the aces and face cards.
    pub fn ordered() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for rank in Rank::NUMERIC {
            for suit in Suit::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        for suit in Suit::ALL {
            for rank in Rank::FACES {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Deck::ordered();
        deck.cards.shuffle(rng);
        deck
    }

    /// Stacked deck. The last card is drawn first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Deck { cards }
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        let card = self.cards.pop().ok_or(GameError::EmptyDeck)?;
        debug!(%card, remaining = self.cards.len(), "card drawn");
        Ok(card)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
