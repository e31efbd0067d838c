use crate::model::deal::{DealPhase, DealState};
use crate::model::deck::Deck;
use crate::model::score::{DealScore, ScoreBoard};
use crate::model::seat::Seat;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub const MATCH_TARGET: u32 = 1000;

#[derive(Debug, Clone)]
pub struct MatchState {
    scores: ScoreBoard,
    deal_number: u32,
    dealer: Seat,
    current_deal: DealState,
    rng: StdRng,
    seed: u64,
}

impl MatchState {
    pub fn new(dealer: Seat) -> Self {
        let seed: u64 = rand::random();
        Self::with_seed_and_deal(seed, 1, dealer)
    }

    pub fn with_seed(dealer: Seat, seed: u64) -> Self {
        Self::with_seed_and_deal(seed, 1, dealer)
    }

    pub fn with_seed_and_deal(seed: u64, deal_number: u32, dealer: Seat) -> Self {
        let normalized_deal = deal_number.max(1);
        let mut rng = StdRng::seed_from_u64(seed);

        // Replay the shuffles of earlier deals so a restored match
        // continues the same card sequence.
        for _ in 1..normalized_deal {
            let _ = Deck::shuffled(&mut rng);
        }

        let deck = Deck::shuffled(&mut rng);
        let current_deal = DealState::initial_deal(&deck, dealer);

        Self {
            scores: ScoreBoard::new(),
            deal_number: normalized_deal,
            dealer,
            current_deal,
            rng,
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn scores_mut(&mut self) -> &mut ScoreBoard {
        &mut self.scores
    }

    pub fn deal(&self) -> &DealState {
        &self.current_deal
    }

    pub fn deal_mut(&mut self) -> &mut DealState {
        &mut self.current_deal
    }

    pub fn deal_number(&self) -> u32 {
        self.deal_number
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn is_deal_ready_for_scoring(&self) -> bool {
        matches!(self.current_deal.phase(), DealPhase::Playing { .. })
            && self.current_deal.is_complete()
    }

    /// Settled score of the current deal, once all eight tricks are in.
    pub fn settle_current_deal(&self) -> Option<DealScore> {
        if !self.is_deal_ready_for_scoring() {
            return None;
        }
        let taker = self.current_deal.taker()?;
        let last_winner = self.current_deal.last_trick_winner()?;
        Some(DealScore::settle(
            self.current_deal.team_trick_points(),
            last_winner.team(),
            self.current_deal.belote_team(),
            taker.team(),
        ))
    }

    /// Banks the finished deal (if any) and deals the next one with the
    /// deal passing to the left. A thrown-in auction moves on unscored.
    pub fn finish_deal_and_start_next(&mut self) {
        if let Some(score) = self.settle_current_deal() {
            self.scores.apply_deal(&score);
        }

        self.deal_number += 1;
        self.dealer = self.dealer.next();

        let deck = Deck::shuffled(&mut self.rng);
        self.current_deal = DealState::initial_deal(&deck, self.dealer);
    }

    pub fn is_over(&self, target: u32) -> bool {
        self.scores.target_reached(target)
    }
}

#[cfg(test)]
mod tests {
    use super::{MATCH_TARGET, MatchState};
    use crate::model::seat::{Seat, Team};

    #[test]
    fn new_match_starts_with_the_first_deal() {
        let state = MatchState::with_seed(Seat::West, 0);
        assert_eq!(state.deal_number(), 1);
        assert_eq!(state.dealer(), Seat::West);
        assert_eq!(state.scores().totals(), &[0, 0]);
        assert!(!state.is_over(MATCH_TARGET));
    }

    #[test]
    fn seeded_matches_deal_identical_cards() {
        let a = MatchState::with_seed(Seat::West, 7);
        let b = MatchState::with_seed(Seat::West, 7);
        assert_eq!(a.deal().middle_card(), b.deal().middle_card());
        for seat in Seat::LOOP {
            assert_eq!(a.deal().hand(seat).cards(), b.deal().hand(seat).cards());
        }
    }

    #[test]
    fn finish_deal_advances_the_dealer_without_scoring_a_thrown_deal() {
        let mut state = MatchState::with_seed(Seat::West, 0);
        state.finish_deal_and_start_next();
        assert_eq!(state.deal_number(), 2);
        assert_eq!(state.dealer(), Seat::North);
        assert_eq!(state.scores().score(Team::NorthSouth), 0);
        assert_eq!(state.scores().score(Team::EastWest), 0);
    }

    #[test]
    fn replayed_deal_number_restores_the_same_deck() {
        let mut first = MatchState::with_seed(Seat::West, 42);
        first.finish_deal_and_start_next();
        first.finish_deal_and_start_next();

        let replayed = MatchState::with_seed_and_deal(42, 3, first.dealer());
        assert_eq!(
            first.deal().middle_card(),
            replayed.deal().middle_card()
        );
    }

    #[test]
    fn match_seed_is_exposed() {
        let state = MatchState::with_seed(Seat::North, 1234);
        assert_eq!(state.seed(), 1234);
    }
}
