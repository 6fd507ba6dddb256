use rand::{rngs::SmallRng, SeedableRng};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    deck::{Card, Deck},
    error::GameError,
    hand::{card_value, hand_total},
    outcome::{evaluate, Outcome, BLACKJACK},
    strategy,
};

/// Face-down cards shown for the computer until its turn starts.
pub const COMPUTER_CARD_BACKS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    Idle,
    PlayerTurn,
    ComputerTurn,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Participant {
    Player,
    Computer,
}

/// Everything the page needs to draw the table. Emitted in order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TableEvent {
    RoundStarted,
    CardBack {
        participant: Participant,
    },
    CardDealt {
        participant: Participant,
        card: Card,
        score: u32,
    },
    CardsCleared {
        participant: Participant,
    },
    #[serde(rename_all = "camelCase")]
    RoundFinished {
        player_score: u32,
        computer_score: u32,
        outcome: Outcome,
        message: String,
    },
    RoundAborted {
        reason: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSnapshot {
    pub stage: Stage,
    pub player_score: u32,
    pub computer_score: u32,
    pub player_cards: Vec<Card>,
    pub computer_cards: Vec<Card>,
    pub cards_remaining: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

pub struct GameSession {
    rng: SmallRng,
    deck: Deck,
    stage: Stage,
    player_score: u32,
    computer_score: u32,
    player_cards: Vec<Card>,
    computer_cards: Vec<Card>,
    outcome: Option<Outcome>,
}

impl GameSession {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        GameSession {
            rng,
            deck: Deck::from_cards(Vec::new()),
            stage: Stage::Idle,
            player_score: 0,
            computer_score: 0,
            player_cards: Vec::new(),
            computer_cards: Vec::new(),
            outcome: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    pub fn computer_score(&self) -> u32 {
        self.computer_score
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn can_act(&self) -> bool {
        self.stage == Stage::PlayerTurn
    }

    pub fn new_game<F>(&mut self, on_event: F)
    where
        F: FnMut(&TableEvent),
    {
        let deck = Deck::shuffled(&mut self.rng);
        self.start_with_deck(deck, on_event);
    }

    /// Starts a round on a prepared deck instead of a fresh shuffle.
    pub fn start_with_deck<F>(&mut self, deck: Deck, mut on_event: F)
    where
        F: FnMut(&TableEvent),
    {
        self.deck = deck;
        self.stage = Stage::PlayerTurn;
        self.player_score = 0;
        self.computer_score = 0;
        self.player_cards.clear();
        self.computer_cards.clear();
        self.outcome = None;
        info!(cards = self.deck.remaining(), "round started");

        on_event(&TableEvent::RoundStarted);
        for _ in 0..COMPUTER_CARD_BACKS {
            on_event(&TableEvent::CardBack {
                participant: Participant::Computer,
            });
        }
    }

    pub fn hit<F>(&mut self, mut on_event: F) -> Result<Stage, GameError>
    where
        F: FnMut(&TableEvent),
    {
        self.ensure_player_turn()?;
        let card = match self.deck.draw() {
            Ok(card) => card,
            Err(err) => return Err(self.abort_round(err, &mut on_event)),
        };
        self.player_score += card_value(&card);
        self.player_cards.push(card);
        on_event(&TableEvent::CardDealt {
            participant: Participant::Player,
            card,
            score: self.player_score,
        });

        if self.player_score >= BLACKJACK {
            self.play_computer(&mut on_event)?;
        }
        Ok(self.stage)
    }

    pub fn stand<F>(&mut self, mut on_event: F) -> Result<Stage, GameError>
    where
        F: FnMut(&TableEvent),
    {
        self.ensure_player_turn()?;
        if self.player_score == 0 {
            warn!("stand rejected with no cards drawn");
            return Err(GameError::MustDrawFirst);
        }
        self.play_computer(&mut on_event)?;
        Ok(self.stage)
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            stage: self.stage,
            player_score: self.player_score,
            computer_score: self.computer_score,
            player_cards: self.player_cards.clone(),
            computer_cards: self.computer_cards.clone(),
            cards_remaining: self.deck.remaining(),
            outcome: self.outcome,
        }
    }

    fn ensure_player_turn(&self) -> Result<(), GameError> {
        if self.stage != Stage::PlayerTurn {
            warn!(stage = ?self.stage, "action outside the player's turn");
            return Err(GameError::RoundNotInProgress);
        }
        Ok(())
    }

    fn play_computer<F>(&mut self, on_event: &mut F) -> Result<(), GameError>
    where
        F: FnMut(&TableEvent),
    {
        self.stage = Stage::ComputerTurn;
        on_event(&TableEvent::CardsCleared {
            participant: Participant::Computer,
        });

        let target = self.player_score;
        let computer_cards = &mut self.computer_cards;
        let result = strategy::computer_turn(&mut self.deck, target, |card, score| {
            computer_cards.push(card);
            on_event(&TableEvent::CardDealt {
                participant: Participant::Computer,
                card,
                score,
            });
        });

        match result {
            Ok(score) => {
                self.computer_score = score;
                self.finish_round(on_event);
                Ok(())
            }
            Err(err) => {
                self.computer_score = hand_total(&self.computer_cards);
                Err(self.abort_round(err, on_event))
            }
        }
    }

    fn finish_round<F>(&mut self, on_event: &mut F)
    where
        F: FnMut(&TableEvent),
    {
        let outcome = evaluate(self.player_score, self.computer_score);
        self.stage = Stage::Finished;
        self.outcome = Some(outcome);
        info!(
            player = self.player_score,
            computer = self.computer_score,
            ?outcome,
            "round finished"
        );
        on_event(&TableEvent::RoundFinished {
            player_score: self.player_score,
            computer_score: self.computer_score,
            outcome,
            message: outcome.announcement(self.player_score).to_string(),
        });
    }

    fn abort_round<F>(&mut self, err: GameError, on_event: &mut F) -> GameError
    where
        F: FnMut(&TableEvent),
    {
        warn!(%err, "round aborted");
        self.stage = Stage::Finished;
        self.outcome = None;
        on_event(&TableEvent::RoundAborted {
            reason: err.to_string(),
        });
        err
    }
}
