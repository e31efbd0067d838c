use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn is_trump(self, trump: Suit) -> bool {
        self.suit as u8 == trump as u8
    }

    /// Point value of the card given the deal's trump suit.
    pub const fn points(self, trump: Suit) -> u8 {
        if self.is_trump(trump) {
            self.rank.trump_points()
        } else {
            self.rank.plain_points()
        }
    }

    /// Position of the card within its own suit's strength order.
    /// Only meaningful when comparing two cards of the same suit.
    pub const fn strength(self, trump: Suit) -> u8 {
        if self.is_trump(trump) {
            self.rank.trump_strength()
        } else {
            self.rank.plain_strength()
        }
    }

    pub const fn to_id(self) -> u8 {
        self.suit as u8 * 8 + (self.rank.value() - 7)
    }

    pub fn from_id(id: u8) -> Option<Self> {
        if id >= 32 {
            return None;
        }
        let suit = Suit::from_index((id / 8) as usize)?;
        let rank = Rank::from_value(id % 8 + 7)?;
        Some(Card::new(rank, suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Bit-mask over the 32 card ids, used to track played cards cheaply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardSet(u32);

impl CardSet {
    pub const EMPTY: Self = Self(0);

    pub fn contains(self, card: Card) -> bool {
        self.0 & (1 << card.to_id()) != 0
    }

    pub fn insert(&mut self, card: Card) {
        self.0 |= 1 << card.to_id();
    }

    pub fn with(mut self, card: Card) -> Self {
        self.insert(card);
        self
    }

    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Card> {
        (0..32u8).filter_map(move |id| {
            if self.0 & (1 << id) != 0 {
                Card::from_id(id)
            } else {
                None
            }
        })
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut set = CardSet::EMPTY;
        for card in iter {
            set.insert(card);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, CardSet, Rank, Suit};

    #[test]
    fn jack_of_trump_is_strongest() {
        let trump = Suit::Hearts;
        let jack = Card::new(Rank::Jack, Suit::Hearts);
        let nine = Card::new(Rank::Nine, Suit::Hearts);
        let ace = Card::new(Rank::Ace, Suit::Hearts);
        assert!(jack.strength(trump) > nine.strength(trump));
        assert!(nine.strength(trump) > ace.strength(trump));
        assert_eq!(jack.points(trump), 20);
        assert_eq!(nine.points(trump), 14);
    }

    #[test]
    fn plain_ten_outranks_king() {
        let trump = Suit::Hearts;
        let ten = Card::new(Rank::Ten, Suit::Spades);
        let king = Card::new(Rank::King, Suit::Spades);
        assert!(ten.strength(trump) > king.strength(trump));
        assert_eq!(ten.points(trump), 10);
        assert_eq!(king.points(trump), 4);
    }

    #[test]
    fn id_roundtrip_covers_deck() {
        for id in 0..32u8 {
            let card = Card::from_id(id).expect("valid id");
            assert_eq!(card.to_id(), id);
        }
        assert_eq!(Card::from_id(32), None);
    }

    #[test]
    fn display_concatenates_rank_and_suit() {
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).to_string(), "AS");
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "10H");
    }

    #[test]
    fn card_set_tracks_membership() {
        let mut set = CardSet::EMPTY;
        let card = Card::new(Rank::Queen, Suit::Diamonds);
        assert!(!set.contains(card));
        set.insert(card);
        assert!(set.contains(card));
        assert_eq!(set.len(), 1);
        let cards: Vec<_> = set.iter().collect();
        assert_eq!(cards, vec![card]);
    }
}
