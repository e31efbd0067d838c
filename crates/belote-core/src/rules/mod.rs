//! Follow, cut and overcut obligations shared by live play and search.

use crate::belief::BeliefState;
use crate::model::card::{Card, CardSet};
use crate::model::hand::Hand;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use crate::model::trick::Trick;

/// Cards from `hand` that `seat` may legally play on `trick`.
pub fn legal_plays(hand: &Hand, trick: &Trick, trump: Suit, seat: Seat) -> Vec<Card> {
    constrain(hand.cards(), trick, trump, seat)
}

/// Cards an unseen opponent could legally play, drawn from the belief
/// model and filtered by `played` (cards consumed in a simulated line).
/// Falls back to every believed-possible card rather than return an
/// empty list while candidates exist.
pub fn successors(
    belief: &BeliefState,
    seat: Seat,
    trick: &Trick,
    trump: Suit,
    played: CardSet,
) -> Vec<Card> {
    let candidates: Vec<Card> = belief
        .possible_cards(seat)
        .filter(|card| !played.contains(*card))
        .collect();
    let restricted = constrain(&candidates, trick, trump, seat);
    if restricted.is_empty() {
        candidates
    } else {
        restricted
    }
}

fn constrain(cards: &[Card], trick: &Trick, trump: Suit, seat: Seat) -> Vec<Card> {
    let led = match trick.lead_suit() {
        Some(suit) => suit,
        None => return cards.to_vec(),
    };

    if led == trump {
        let trumps = of_suit(cards, trump);
        if trumps.is_empty() {
            return cards.to_vec();
        }
        return prefer_overcut(trumps, trick, trump);
    }

    // A side already holding the trick owes its partner nothing.
    if let Some(winning) = trick.winning_play(trump) {
        if winning.seat.team() == seat.team() {
            return cards.to_vec();
        }
    }

    let follows = of_suit(cards, led);
    if !follows.is_empty() {
        return follows;
    }

    let trumps = of_suit(cards, trump);
    if trumps.is_empty() {
        return cards.to_vec();
    }
    if trick.highest_trump(trump).is_some() {
        prefer_overcut(trumps, trick, trump)
    } else {
        trumps
    }
}

fn of_suit(cards: &[Card], suit: Suit) -> Vec<Card> {
    cards.iter().copied().filter(|c| c.suit == suit).collect()
}

fn prefer_overcut(trumps: Vec<Card>, trick: &Trick, trump: Suit) -> Vec<Card> {
    let best = match trick.highest_trump(trump) {
        Some(card) => card,
        None => return trumps,
    };
    let overcuts: Vec<Card> = trumps
        .iter()
        .copied()
        .filter(|c| c.strength(trump) > best.strength(trump))
        .collect();
    if overcuts.is_empty() {
        trumps
    } else {
        overcuts
    }
}
