use crate::{
    deck::{Card, Rank},
    error::GameError,
};

/// Points for one card. Aces always count 11.
pub fn card_value(card: &Card) -> u32 {
    match card.rank {
        Rank::Ace => 11,
        Rank::Jack | Rank::Queen | Rank::King | Rank::Ten => 10,
        Rank::Two => 2,
        Rank::Three => 3,
        Rank::Four => 4,
        Rank::Five => 5,
        Rank::Six => 6,
        Rank::Seven => 7,
        Rank::Eight => 8,
        Rank::Nine => 9,
    }
}

/// Points for a card token such as `10C` or `AH`.
pub fn value_of(token: &str) -> Result<u32, GameError> {
    let card: Card = token.parse()?;
    Ok(card_value(&card))
}

pub fn hand_total(cards: &[Card]) -> u32 {
    cards.iter().map(card_value).sum()
}
