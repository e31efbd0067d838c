use belote_core::model::card::Card;
use belote_core::model::hand::Hand;
use belote_core::model::rank::Rank;
use belote_core::model::suit::Suit;

const TRUMP_COUNT_WEIGHT: i32 = 5;
const TRUMP_POWER_WEIGHT: f32 = 1.66;
const MASTER_WEIGHT: i32 = 3;
const MASTER_POWER_WEIGHT: i32 = 1;
const BELOTE_BONUS: i32 = 20;
const CUT_BONUS: i32 = 10;
const RUN_BASE_BONUS: i32 = 20;
const RUN_EXTRA_BONUS: i32 = 10;
const RUN_THRESHOLD: usize = 2;

/// Static strength of `hand` with `trump` as the hypothetical trump
/// suit. Pure in both arguments, so candidate suits can be compared
/// back to back during an auction.
pub fn score_hand(hand: &Hand, trump: Suit) -> i32 {
    trump_strength(hand, trump)
        + masters(hand, trump)
        + belote_bonus(hand, trump)
        + length_and_cut(hand)
}

fn trump_strength(hand: &Hand, trump: Suit) -> i32 {
    let count = hand.count_suit(trump) as i32;
    let power: i32 = hand
        .in_suit(trump)
        .map(|card| i32::from(card.rank.plain_points()))
        .sum();
    TRUMP_COUNT_WEIGHT * count + (TRUMP_POWER_WEIGHT * power as f32).round() as i32
}

/// Length of the unbroken run of top cards held in `suit`, walking the
/// plain strength order down from the ace.
fn top_run(hand: &Hand, suit: Suit) -> usize {
    Rank::PLAIN_ORDER
        .iter()
        .rev()
        .take_while(|rank| hand.contains(Card::new(**rank, suit)))
        .count()
}

fn masters(hand: &Hand, trump: Suit) -> i32 {
    let mut total = 0;
    for suit in Suit::ALL {
        if suit == trump {
            continue;
        }
        let run = top_run(hand, suit);
        for rank in Rank::PLAIN_ORDER.iter().rev().take(run) {
            total += MASTER_WEIGHT + MASTER_POWER_WEIGHT * i32::from(rank.plain_points());
        }
    }
    total
}

fn belote_bonus(hand: &Hand, trump: Suit) -> i32 {
    let king = Card::new(Rank::King, trump);
    let queen = Card::new(Rank::Queen, trump);
    if hand.contains(king) && hand.contains(queen) {
        BELOTE_BONUS
    } else {
        0
    }
}

fn length_and_cut(hand: &Hand) -> i32 {
    let mut total = 0;
    for suit in Suit::ALL {
        if hand.count_suit(suit) == 0 {
            total += CUT_BONUS;
            continue;
        }
        let run = top_run(hand, suit);
        if run >= RUN_THRESHOLD {
            total += RUN_BASE_BONUS + (run - RUN_THRESHOLD) as i32 * RUN_EXTRA_BONUS;
        }
    }
    total
}
