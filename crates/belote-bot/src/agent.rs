use crate::bid::{self, TrumpScores};
use crate::search::{SearchTier, Searcher};
use belote_core::belief::BeliefState;
use belote_core::model::card::{Card, CardSet};
use belote_core::model::deal::BidRound;
use belote_core::model::hand::Hand;
use belote_core::model::seat::Seat;
use belote_core::model::suit::Suit;
use belote_core::model::trick::Trick;
use tracing::{Level, event};

/// One seat's decision state across a deal: the belief model, the
/// resolved trump context and every card seen so far.
pub struct BeloteAgent {
    seat: Seat,
    belief: BeliefState,
    trump: Option<Suit>,
    seen: CardSet,
    trump_scores: Option<TrumpScores>,
}

impl BeloteAgent {
    pub fn new(seat: Seat) -> Self {
        Self {
            seat,
            belief: BeliefState::new(seat),
            trump: None,
            seen: CardSet::EMPTY,
            trump_scores: None,
        }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn trump(&self) -> Option<Suit> {
        self.trump
    }

    pub fn belief(&self) -> &BeliefState {
        &self.belief
    }

    /// Forgets the previous deal entirely and seeds the belief model
    /// from the freshly dealt hand.
    pub fn reset_beliefs(&mut self, hand: &Hand) {
        self.belief.reset_for_deal(hand);
        self.trump = None;
        self.seen = CardSet::EMPTY;
        self.trump_scores = None;
    }

    /// Bid decision for one auction turn. Hand strength per suit is
    /// evaluated once and cached until the auction resolves.
    pub fn choose_trump_bid(
        &mut self,
        hand: &Hand,
        middle: Card,
        round: BidRound,
        team_score: u32,
    ) -> Option<Suit> {
        let scores = *self
            .trump_scores
            .get_or_insert_with(|| TrumpScores::evaluate(hand));
        let choice = bid::choose_trump_bid(scores, middle.suit, round, team_score);
        log_bid_decision(self.seat, scores, middle, round, team_score, choice);
        choice
    }

    /// Records the resolved contract. The middle card is now known to
    /// sit in the taker's hand.
    pub fn on_trump_determined(&mut self, middle: Card, taker: Seat) {
        self.belief.set_forced_holder(middle, taker);
        self.trump = Some(middle.suit);
        self.trump_scores = None;
    }

    /// Folds one real play into the belief model. `trick_before` is
    /// the trick as it stood when the card was chosen.
    pub fn on_card_played(&mut self, trick_before: &Trick, card: Card, seat: Seat) {
        if let Some(trump) = self.trump {
            self.belief.observe_play(trick_before, card, seat, trump);
        }
        self.seen.insert(card);
    }

    /// Card to play on `trick`, or `None` when no trump has been
    /// determined or the hand has no legal card.
    pub fn choose_play(&self, trick: &Trick, hand: &Hand, tier: SearchTier) -> Option<Card> {
        let trump = self.trump?;
        let searcher = Searcher::new(&self.belief, hand, self.seat, trump, tier.config());
        let choice = searcher.choose(trick, self.seen);
        if let Some(card) = choice {
            log_play_decision(self.seat, tier, trump, hand, card);
        }
        choice
    }
}

fn log_play_decision(seat: Seat, tier: SearchTier, trump: Suit, hand: &Hand, chosen: Card) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }
    event!(
        target: "belote_bot::play",
        Level::INFO,
        seat = %seat,
        tier = ?tier,
        trump = %trump,
        hand_size = hand.len(),
        chosen = %chosen
    );
}

fn log_bid_decision(
    seat: Seat,
    scores: TrumpScores,
    middle: Card,
    round: BidRound,
    team_score: u32,
    choice: Option<Suit>,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }
    let choice_label = choice.map_or_else(|| "pass".to_string(), |suit| suit.to_string());
    event!(
        target: "belote_bot::bid",
        Level::INFO,
        seat = %seat,
        middle = %middle,
        round = ?round,
        team_score,
        middle_score = scores.get(middle.suit),
        choice = %choice_label
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use belote_core::model::rank::Rank;
    use belote_core::rules;

    fn c(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn strong_spades() -> Hand {
        Hand::with_cards(vec![
            c(Rank::Ace, Suit::Spades),
            c(Rank::Jack, Suit::Spades),
            c(Rank::Nine, Suit::Spades),
            c(Rank::King, Suit::Spades),
            c(Rank::Queen, Suit::Spades),
            c(Rank::Seven, Suit::Hearts),
            c(Rank::Eight, Suit::Hearts),
            c(Rank::Seven, Suit::Diamonds),
        ])
    }

    #[test]
    fn resolution_pins_the_middle_card_on_the_taker() {
        let hand = strong_spades();
        let mut agent = BeloteAgent::new(Seat::North);
        agent.reset_beliefs(&hand);

        let middle = c(Rank::Ten, Suit::Spades);
        let bid = agent.choose_trump_bid(&hand, middle, BidRound::First, 0);
        assert_eq!(bid, Some(Suit::Spades));

        agent.on_trump_determined(middle, Seat::East);
        assert_eq!(agent.trump(), Some(Suit::Spades));
        assert!((agent.belief().probability(Seat::East, middle) - 1.0).abs() < f32::EPSILON);
        assert_eq!(agent.belief().probability(Seat::West, middle), 0.0);
    }

    #[test]
    fn a_flat_hand_passes_both_tours() {
        let hand = Hand::with_cards(vec![
            c(Rank::Seven, Suit::Spades),
            c(Rank::Eight, Suit::Spades),
            c(Rank::Seven, Suit::Hearts),
            c(Rank::Eight, Suit::Hearts),
            c(Rank::Seven, Suit::Diamonds),
            c(Rank::Eight, Suit::Diamonds),
            c(Rank::Seven, Suit::Clubs),
            c(Rank::Eight, Suit::Clubs),
        ]);
        let mut agent = BeloteAgent::new(Seat::South);
        agent.reset_beliefs(&hand);

        let middle = c(Rank::Ace, Suit::Spades);
        assert_eq!(agent.choose_trump_bid(&hand, middle, BidRound::First, 0), None);
        assert_eq!(agent.choose_trump_bid(&hand, middle, BidRound::Second, 0), None);
    }

    #[test]
    fn no_play_is_offered_before_trump_is_determined() {
        let hand = strong_spades();
        let mut agent = BeloteAgent::new(Seat::North);
        agent.reset_beliefs(&hand);
        assert_eq!(
            agent.choose_play(&Trick::new(Seat::North), &hand, SearchTier::Shallow),
            None
        );
    }

    #[test]
    fn chosen_play_is_legal_for_the_trick() {
        let hand = strong_spades();
        let mut agent = BeloteAgent::new(Seat::North);
        agent.reset_beliefs(&hand);
        agent.on_trump_determined(c(Rank::Ten, Suit::Spades), Seat::East);

        let trick = Trick::new(Seat::North);
        let chosen = agent.choose_play(&trick, &hand, SearchTier::Shallow);
        let legal = rules::legal_plays(&hand, &trick, Suit::Spades, Seat::North);
        assert!(chosen.is_some_and(|card| legal.contains(&card)));
    }

    #[test]
    fn reset_clears_the_trump_context() {
        let hand = strong_spades();
        let mut agent = BeloteAgent::new(Seat::North);
        agent.reset_beliefs(&hand);
        agent.on_trump_determined(c(Rank::Ten, Suit::Spades), Seat::East);
        assert_eq!(agent.trump(), Some(Suit::Spades));

        agent.reset_beliefs(&hand);
        assert_eq!(agent.trump(), None);
        assert_eq!(
            agent.choose_play(&Trick::new(Seat::North), &hand, SearchTier::Shallow),
            None
        );
    }

    #[test]
    fn observed_plays_leave_the_belief_model() {
        let hand = strong_spades();
        let mut agent = BeloteAgent::new(Seat::North);
        agent.reset_beliefs(&hand);
        agent.on_trump_determined(c(Rank::Ten, Suit::Spades), Seat::East);

        let trick = Trick::new(Seat::East);
        let played = c(Rank::Ace, Suit::Hearts);
        agent.on_card_played(&trick, played, Seat::East);
        for seat in [Seat::East, Seat::South, Seat::West] {
            assert_eq!(agent.belief().probability(seat, played), 0.0);
        }
    }
}
