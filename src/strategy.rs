use crate::{
    deck::{Card, Deck},
    error::GameError,
    hand::card_value,
    outcome::BLACKJACK,
};

/// Whether the computer keeps drawing after reaching `score` against the
/// player's final `target`.
pub fn keep_drawing(score: u32, target: u32) -> bool {
    if target > BLACKJACK {
        return false;
    }
    score < target && score <= BLACKJACK
}

/// Plays the computer's hand and returns its score. At least one card is
/// always drawn, even when the player has already busted or holds nothing.
pub fn computer_turn<F>(deck: &mut Deck, target: u32, mut on_draw: F) -> Result<u32, GameError>
where
    F: FnMut(Card, u32),
{
    let mut score = 0;
    loop {
        let card = deck.draw()?;
        score += card_value(&card);
        on_draw(card, score);
        if !keep_drawing(score, target) {
            break;
        }
    }
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// First token is drawn first.
    fn stacked(tokens: &[&str]) -> Deck {
        let cards = tokens.iter().rev().map(|t| t.parse().unwrap()).collect();
        Deck::from_cards(cards)
    }

    fn play(tokens: &[&str], target: u32) -> (u32, Vec<String>) {
        let mut deck = stacked(tokens);
        let mut drawn = Vec::new();
        let score = computer_turn(&mut deck, target, |card, _| drawn.push(card.to_string())).unwrap();
        (score, drawn)
    }

    #[test]
    fn draws_once_against_zero_target() {
        assert_eq!(play(&["2C", "3C"], 0), (2, vec!["2C".to_string()]));
    }

    #[test]
    fn draws_once_when_player_busted() {
        let (score, drawn) = play(&["2C", "3C", "4C"], 25);
        assert_eq!(score, 2);
        assert_eq!(drawn.len(), 1);
    }

    #[test]
    fn draws_until_target_reached() {
        let (score, drawn) = play(&["5C", "6D", "4H", "9S"], 15);
        assert_eq!(score, 15);
        assert_eq!(drawn, vec!["5C", "6D", "4H"]);
    }

    #[test]
    fn stops_on_bust() {
        let (score, drawn) = play(&["10C", "5D", "KH", "2S"], 20);
        assert_eq!(score, 25);
        assert_eq!(drawn.len(), 3);
    }

    #[test]
    fn reports_running_score() {
        let mut deck = stacked(&["AH", "4D", "3C"]);
        let mut scores = Vec::new();
        computer_turn(&mut deck, 18, |_, score| scores.push(score)).unwrap();
        assert_eq!(scores, vec![11, 15, 18]);
    }

    #[test]
    fn empty_deck_surfaces() {
        let mut deck = stacked(&["2C"]);
        let result = computer_turn(&mut deck, 21, |_, _| {});
        assert_eq!(result, Err(GameError::EmptyDeck));
    }

    #[test]
    fn keep_drawing_rules() {
        assert!(keep_drawing(10, 18));
        assert!(!keep_drawing(18, 18));
        assert!(!keep_drawing(5, 22));
        assert!(!keep_drawing(2, 0));
        assert!(keep_drawing(20, 21));
    }
}
