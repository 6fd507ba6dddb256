use serde::Serialize;

pub const BLACKJACK: u32 = 21;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    PlayerWins,
    ComputerWins,
    Tie,
}

impl Outcome {
    pub fn announcement(&self, player_score: u32) -> &'static str {
        match self {
            Outcome::PlayerWins if player_score == BLACKJACK => "21, Congratulations! Player wins!",
            Outcome::PlayerWins => "Congratulations! Player wins!",
            Outcome::ComputerWins => "Computer wins!",
            Outcome::Tie => "Game tied, nobody wins!",
        }
    }
}

/// Rules are checked in order and the first match decides. A player holding
/// exactly 21 wins even when the computer also reached 21.
pub fn evaluate(player_score: u32, computer_score: u32) -> Outcome {
    if player_score == BLACKJACK {
        Outcome::PlayerWins
    } else if player_score == computer_score {
        Outcome::Tie
    } else if player_score > BLACKJACK {
        Outcome::ComputerWins
    } else if computer_score > BLACKJACK {
        Outcome::PlayerWins
    } else if computer_score > player_score {
        Outcome::ComputerWins
    } else {
        Outcome::PlayerWins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scored_rounds() {
        assert_eq!(evaluate(21, 18), Outcome::PlayerWins);
        assert_eq!(evaluate(19, 19), Outcome::Tie);
        assert_eq!(evaluate(23, 20), Outcome::ComputerWins);
        assert_eq!(evaluate(18, 24), Outcome::PlayerWins);
        assert_eq!(evaluate(17, 20), Outcome::ComputerWins);
        assert_eq!(evaluate(19, 17), Outcome::PlayerWins);
    }

    #[test]
    fn rule_order() {
        assert_eq!(evaluate(21, 21), Outcome::PlayerWins);
        assert_eq!(evaluate(25, 25), Outcome::Tie);
        assert_eq!(evaluate(23, 26), Outcome::ComputerWins);
        assert_eq!(evaluate(22, 3), Outcome::ComputerWins);
    }

    #[test]
    fn announcements() {
        assert_eq!(
            Outcome::PlayerWins.announcement(21),
            "21, Congratulations! Player wins!"
        );
        assert_eq!(Outcome::PlayerWins.announcement(19), "Congratulations! Player wins!");
        assert_eq!(Outcome::Tie.announcement(19), "Game tied, nobody wins!");
        assert_eq!(Outcome::ComputerWins.announcement(23), "Computer wins!");
    }

    #[test]
    fn serializes_camel_case() {
        assert_eq!(
            serde_json::to_string(&Outcome::ComputerWins).unwrap(),
            "\"computerWins\""
        );
    }
}
