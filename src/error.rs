use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("No cards in the deck.")]
    EmptyDeck,

    #[error("Invalid card `{0}`")]
    InvalidCard(String),

    #[error("0 points, get at least one card!")]
    MustDrawFirst,

    #[error("No round in progress, start a new game.")]
    RoundNotInProgress,
}

impl GameError {
    /// Fatal errors end the round; the others are rejected actions that
    /// leave the table untouched.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::EmptyDeck | GameError::InvalidCard(_))
    }
}
