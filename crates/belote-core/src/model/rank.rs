use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub const ORDERED: [Rank; 8] = [
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Strength order in a plain (non-trump) suit, weakest first.
    pub const PLAIN_ORDER: [Rank; 8] = [
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ten,
        Rank::Ace,
    ];

    /// Strength order in the trump suit, weakest first.
    pub const TRUMP_ORDER: [Rank; 8] = [
        Rank::Seven,
        Rank::Eight,
        Rank::Queen,
        Rank::King,
        Rank::Ten,
        Rank::Ace,
        Rank::Nine,
        Rank::Jack,
    ];

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            14 => Some(Rank::Ace),
            _ => None,
        }
    }

    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn plain_strength(self) -> u8 {
        match self {
            Rank::Seven => 0,
            Rank::Eight => 1,
            Rank::Nine => 2,
            Rank::Jack => 3,
            Rank::Queen => 4,
            Rank::King => 5,
            Rank::Ten => 6,
            Rank::Ace => 7,
        }
    }

    pub const fn trump_strength(self) -> u8 {
        match self {
            Rank::Seven => 0,
            Rank::Eight => 1,
            Rank::Queen => 2,
            Rank::King => 3,
            Rank::Ten => 4,
            Rank::Ace => 5,
            Rank::Nine => 6,
            Rank::Jack => 7,
        }
    }

    pub const fn plain_points(self) -> u8 {
        match self {
            Rank::Seven | Rank::Eight | Rank::Nine => 0,
            Rank::Jack => 2,
            Rank::Queen => 3,
            Rank::King => 4,
            Rank::Ten => 10,
            Rank::Ace => 11,
        }
    }

    pub const fn trump_points(self) -> u8 {
        match self {
            Rank::Seven | Rank::Eight => 0,
            Rank::Queen => 3,
            Rank::King => 4,
            Rank::Ten => 10,
            Rank::Ace => 11,
            Rank::Nine => 14,
            Rank::Jack => 20,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::Rank;

    #[test]
    fn from_value_maps() {
        assert_eq!(Rank::from_value(11), Some(Rank::Jack));
        assert_eq!(Rank::from_value(2), None);
    }

    #[test]
    fn display_matches_symbols() {
        assert_eq!(Rank::Queen.to_string(), "Q");
        assert_eq!(Rank::Ten.to_string(), "10");
    }

    #[test]
    fn plain_order_puts_ten_between_king_and_ace() {
        assert!(Rank::Ten.plain_strength() > Rank::King.plain_strength());
        assert!(Rank::Ace.plain_strength() > Rank::Ten.plain_strength());
        assert!(Rank::Jack.plain_strength() < Rank::Queen.plain_strength());
    }

    #[test]
    fn trump_order_puts_jack_and_nine_on_top() {
        assert!(Rank::Jack.trump_strength() > Rank::Nine.trump_strength());
        assert!(Rank::Nine.trump_strength() > Rank::Ace.trump_strength());
        assert!(Rank::Ace.trump_strength() > Rank::Ten.trump_strength());
    }

    #[test]
    fn strength_tables_are_permutations() {
        for order in [Rank::PLAIN_ORDER, Rank::TRUMP_ORDER] {
            let mut seen = [false; 8];
            for rank in order {
                let idx = Rank::ORDERED.iter().position(|r| *r == rank).unwrap();
                assert!(!seen[idx]);
                seen[idx] = true;
            }
        }
        for (i, rank) in Rank::PLAIN_ORDER.iter().enumerate() {
            assert_eq!(rank.plain_strength() as usize, i);
        }
        for (i, rank) in Rank::TRUMP_ORDER.iter().enumerate() {
            assert_eq!(rank.trump_strength() as usize, i);
        }
    }

    #[test]
    fn point_tables_sum_to_deck_totals() {
        let plain: u32 = Rank::ORDERED.iter().map(|r| r.plain_points() as u32).sum();
        let trump: u32 = Rank::ORDERED.iter().map(|r| r.trump_points() as u32).sum();
        assert_eq!(plain, 30);
        assert_eq!(trump, 62);
    }
}
