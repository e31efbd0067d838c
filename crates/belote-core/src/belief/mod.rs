//! Probabilistic card-location beliefs over the three hidden hands.
//!
//! Each entry `probs[seat][card]` is the believed probability that `seat`
//! holds `card`, maintained from one player's perspective. Updates are
//! rule deductions only: a player who shows out of a suit has none of it,
//! an undercut reveals no stronger trump, a refused cut reveals no trump.

use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::rank::Rank;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use crate::model::trick::Trick;

const DECK_SIZE: usize = 32;

#[derive(Debug, Clone)]
pub struct BeliefState {
    perspective: Seat,
    probs: [[f32; DECK_SIZE]; 4],
}

impl BeliefState {
    pub fn new(perspective: Seat) -> Self {
        Self {
            perspective,
            probs: [[0.0; DECK_SIZE]; 4],
        }
    }

    pub fn from_hand(perspective: Seat, hand: &Hand) -> Self {
        let mut belief = Self::new(perspective);
        belief.reset_for_deal(hand);
        belief
    }

    pub fn perspective(&self) -> Seat {
        self.perspective
    }

    /// Reseeds the model for a fresh deal: own cards are certain, every
    /// unseen card is equally likely to sit with each opponent.
    pub fn reset_for_deal(&mut self, hand: &Hand) {
        self.probs = [[0.0; DECK_SIZE]; 4];
        for suit in Suit::ALL {
            for rank in Rank::ORDERED {
                let card = Card::new(rank, suit);
                let id = card.to_id() as usize;
                if hand.contains(card) {
                    self.probs[self.perspective.index()][id] = 1.0;
                } else {
                    for seat in Seat::LOOP {
                        if seat != self.perspective {
                            self.probs[seat.index()][id] = 1.0 / 3.0;
                        }
                    }
                }
            }
        }
    }

    /// Returns the probability that `card` belongs to `seat`.
    pub fn probability(&self, seat: Seat, card: Card) -> f32 {
        self.probs[seat.index()][card.to_id() as usize]
    }

    /// Cards `seat` is still believed to possibly hold.
    pub fn possible_cards(&self, seat: Seat) -> impl Iterator<Item = Card> + '_ {
        let row = &self.probs[seat.index()];
        (0..DECK_SIZE as u8).filter_map(move |id| {
            if row[id as usize] > 0.0 {
                Card::from_id(id)
            } else {
                None
            }
        })
    }

    /// Total believed mass for `card` across all seats.
    pub fn column_mass(&self, card: Card) -> f32 {
        let id = card.to_id() as usize;
        self.probs.iter().map(|row| row[id]).sum()
    }

    /// Applies the rule deductions for one observed play. `trick_before`
    /// is the trick as it stood when `seat` chose `card`.
    pub fn observe_play(&mut self, trick_before: &Trick, card: Card, seat: Seat, trump: Suit) {
        if let Some(led) = trick_before.lead_suit() {
            if led != card.suit {
                self.void_suit(seat, led);

                if card.is_trump(trump) {
                    let undercut = trick_before
                        .winning_play(trump)
                        .filter(|best| best.card.is_trump(trump))
                        .filter(|best| best.card.strength(trump) > card.strength(trump));
                    if let Some(best) = undercut {
                        self.remove_trumps_above(seat, trump, best.card.strength(trump));
                    }
                } else if !Self::team_holds(trick_before, seat, trump) {
                    self.void_suit(seat, trump);
                }
            }
        }

        self.zero_everywhere(card);
    }

    /// Pins a publicly known card to its holder.
    pub fn set_forced_holder(&mut self, card: Card, holder: Seat) {
        let id = card.to_id() as usize;
        for seat in Seat::LOOP {
            self.probs[seat.index()][id] = if seat == holder { 1.0 } else { 0.0 };
        }
    }

    fn team_holds(trick: &Trick, seat: Seat, trump: Suit) -> bool {
        trick
            .winning_play(trump)
            .map(|play| play.seat.team() == seat.team())
            .unwrap_or(false)
    }

    fn void_suit(&mut self, seat: Seat, suit: Suit) {
        for rank in Rank::ORDERED {
            self.redistribute(seat, Card::new(rank, suit));
        }
    }

    fn remove_trumps_above(&mut self, seat: Seat, trump: Suit, strength: u8) {
        for rank in Rank::ORDERED {
            let card = Card::new(rank, trump);
            if card.strength(trump) > strength {
                self.redistribute(seat, card);
            }
        }
    }

    /// Moves `seat`'s mass for `card` equally onto the other opponents who
    /// still have a nonzero entry for it. With no such opponent the mass is
    /// dropped: the card's location is then determined by the known hand.
    fn redistribute(&mut self, seat: Seat, card: Card) {
        let id = card.to_id() as usize;
        let mass = self.probs[seat.index()][id].max(0.0);
        if mass <= 0.0 {
            self.probs[seat.index()][id] = 0.0;
            return;
        }
        self.probs[seat.index()][id] = 0.0;

        let recipients: Vec<Seat> = Seat::LOOP
            .iter()
            .copied()
            .filter(|&other| {
                other != seat && other != self.perspective && self.probs[other.index()][id] > 0.0
            })
            .collect();
        if recipients.is_empty() {
            return;
        }

        let share = mass / recipients.len() as f32;
        for other in recipients {
            self.probs[other.index()][id] += share;
        }
    }

    fn zero_everywhere(&mut self, card: Card) {
        let id = card.to_id() as usize;
        for row in &mut self.probs {
            row[id] = 0.0;
        }
    }
}
