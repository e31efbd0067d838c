use crate::eval;
use belote_core::model::deal::BidRound;
use belote_core::model::hand::Hand;
use belote_core::model::suit::Suit;

/// Minimum hand score to declare a trump suit.
pub const TAKE_THRESHOLD: i32 = 85;
/// Threshold applied instead once the team is past `LATE_GAME_SCORE`.
pub const LATE_TAKE_THRESHOLD: i32 = 115;
pub const LATE_GAME_SCORE: u32 = 800;

/// Hand strength per candidate trump suit, evaluated once per auction
/// and reused across both tours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrumpScores {
    scores: [i32; 4],
}

impl TrumpScores {
    pub fn evaluate(hand: &Hand) -> Self {
        let mut scores = [0; 4];
        for suit in Suit::ALL {
            scores[suit.index()] = eval::score_hand(hand, suit);
        }
        Self { scores }
    }

    pub fn get(self, suit: Suit) -> i32 {
        self.scores[suit.index()]
    }

    /// Strongest suit other than `middle`. Ties keep the earlier suit
    /// in deck order.
    fn best_other(self, middle: Suit) -> Option<(Suit, i32)> {
        let mut best = None;
        for suit in Suit::ALL {
            if suit == middle {
                continue;
            }
            let score = self.get(suit);
            if best.map_or(score > 0, |(_, top)| score > top) {
                best = Some((suit, score));
            }
        }
        best
    }
}

/// Suit to declare as trump, or `None` to pass. The first tour may
/// only take the middle card's suit; the second may take any other.
pub fn choose_trump_bid(
    scores: TrumpScores,
    middle_suit: Suit,
    round: BidRound,
    team_score: u32,
) -> Option<Suit> {
    let threshold = if team_score > LATE_GAME_SCORE {
        LATE_TAKE_THRESHOLD
    } else {
        TAKE_THRESHOLD
    };
    match round {
        BidRound::First => {
            if scores.get(middle_suit) >= threshold {
                Some(middle_suit)
            } else {
                None
            }
        }
        BidRound::Second => match scores.best_other(middle_suit) {
            Some((suit, score)) if score >= threshold => Some(suit),
            _ => None,
        },
    }
}
