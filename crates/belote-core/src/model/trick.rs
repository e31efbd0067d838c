use crate::model::card::Card;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Trick {
    leader: Seat,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    TrickComplete,
    OutOfTurn { expected: Seat, actual: Seat },
    AlreadyPlayed(Seat),
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::TrickComplete => write!(f, "trick already complete"),
            TrickError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
            TrickError::AlreadyPlayed(seat) => {
                write!(f, "{seat} has already played this trick")
            }
        }
    }
}

impl std::error::Error for TrickError {}

impl Trick {
    pub fn new(leader: Seat) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    pub fn play(&mut self, seat: Seat, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        if self.plays.iter().any(|play| play.seat == seat) {
            return Err(TrickError::AlreadyPlayed(seat));
        }

        let expected = self.expected_seat();
        if expected != seat {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        self.plays.push(Play { seat, card });
        Ok(())
    }

    /// Play currently holding the trick. Trumps beat the led suit, the
    /// strongest trump beats weaker trumps.
    pub fn winning_play(&self, trump: Suit) -> Option<Play> {
        let lead_suit = self.lead_suit()?;
        let best_trump = self
            .plays
            .iter()
            .filter(|play| play.card.is_trump(trump))
            .max_by_key(|play| play.card.strength(trump));
        if let Some(play) = best_trump {
            return Some(*play);
        }
        self.plays
            .iter()
            .filter(|play| play.card.suit == lead_suit)
            .max_by_key(|play| play.card.strength(trump))
            .copied()
    }

    pub fn winner(&self, trump: Suit) -> Option<Seat> {
        if !self.is_complete() {
            return None;
        }
        self.winning_play(trump).map(|play| play.seat)
    }

    pub fn highest_trump(&self, trump: Suit) -> Option<Card> {
        self.plays
            .iter()
            .map(|play| play.card)
            .filter(|card| card.is_trump(trump))
            .max_by_key(|card| card.strength(trump))
    }

    pub fn points(&self, trump: Suit) -> u8 {
        self.plays.iter().map(|play| play.card.points(trump)).sum()
    }

    fn expected_seat(&self) -> Seat {
        self.plays
            .last()
            .map(|play| play.seat.next())
            .unwrap_or(self.leader)
    }
}

#[cfg(test)]
mod tests {
    use super::{Trick, TrickError};
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::seat::Seat;
    use crate::model::suit::Suit;

    #[test]
    fn plays_follow_turn_order() {
        let mut trick = Trick::new(Seat::North);
        assert!(
            trick
                .play(Seat::North, Card::new(Rank::Seven, Suit::Clubs))
                .is_ok()
        );
        assert!(matches!(
            trick.play(Seat::South, Card::new(Rank::Eight, Suit::Clubs)),
            Err(TrickError::OutOfTurn { .. })
        ));
    }

    #[test]
    fn highest_led_card_wins_without_trumps() {
        let mut trick = Trick::new(Seat::North);
        trick
            .play(Seat::North, Card::new(Rank::King, Suit::Clubs))
            .unwrap();
        trick
            .play(Seat::East, Card::new(Rank::Ten, Suit::Clubs))
            .unwrap();
        trick
            .play(Seat::South, Card::new(Rank::Nine, Suit::Clubs))
            .unwrap();
        trick
            .play(Seat::West, Card::new(Rank::Ace, Suit::Spades))
            .unwrap();

        assert_eq!(trick.winner(Suit::Hearts), Some(Seat::East));
        assert_eq!(trick.points(Suit::Hearts), 25);
    }

    #[test]
    fn any_trump_beats_the_led_suit() {
        let mut trick = Trick::new(Seat::North);
        trick
            .play(Seat::North, Card::new(Rank::Ace, Suit::Clubs))
            .unwrap();
        trick
            .play(Seat::East, Card::new(Rank::Seven, Suit::Hearts))
            .unwrap();
        trick
            .play(Seat::South, Card::new(Rank::Ten, Suit::Clubs))
            .unwrap();
        trick
            .play(Seat::West, Card::new(Rank::King, Suit::Clubs))
            .unwrap();

        assert_eq!(trick.winner(Suit::Hearts), Some(Seat::East));
    }

    #[test]
    fn strongest_trump_holds_a_trumped_trick() {
        let mut trick = Trick::new(Seat::North);
        trick
            .play(Seat::North, Card::new(Rank::Ace, Suit::Hearts))
            .unwrap();
        trick
            .play(Seat::East, Card::new(Rank::Nine, Suit::Hearts))
            .unwrap();
        assert_eq!(
            trick.winning_play(Suit::Hearts).map(|play| play.seat),
            Some(Seat::East)
        );
        assert_eq!(
            trick.highest_trump(Suit::Hearts),
            Some(Card::new(Rank::Nine, Suit::Hearts))
        );

        trick
            .play(Seat::South, Card::new(Rank::Jack, Suit::Hearts))
            .unwrap();
        assert_eq!(
            trick.winning_play(Suit::Hearts).map(|play| play.seat),
            Some(Seat::South)
        );
    }
}
