use crate::eval;
use belote_core::belief::BeliefState;
use belote_core::model::card::{Card, CardSet};
use belote_core::model::hand::Hand;
use belote_core::model::seat::Seat;
use belote_core::model::suit::Suit;
use belote_core::model::trick::Trick;
use belote_core::rules;

/// Upper bound on any node value, used to close partial expectation
/// intervals when pruning.
const UTILITY_CEILING: f32 = 400.0;

/// Lookahead strength tiers exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTier {
    Shallow,
    Medium,
    Deep,
}

impl SearchTier {
    pub const ALL: [SearchTier; 3] = [SearchTier::Shallow, SearchTier::Medium, SearchTier::Deep];

    pub const fn config(self) -> SearchConfig {
        match self {
            SearchTier::Shallow => SearchConfig {
                max_depth: 2,
                prune: false,
            },
            SearchTier::Medium => SearchConfig {
                max_depth: 5,
                prune: true,
            },
            SearchTier::Deep => SearchConfig {
                max_depth: 8,
                prune: true,
            },
        }
    }
}

/// Depth and pruning knobs for one decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub prune: bool,
}

#[derive(Clone, Copy)]
struct Window {
    alpha: f32,
    beta: f32,
}

/// Probability weighted lookahead from one seat's perspective. The
/// belief state is read-only for the lifetime of the search; every
/// simulated trick is a per-branch clone.
pub struct Searcher<'a> {
    belief: &'a BeliefState,
    hand: &'a Hand,
    seat: Seat,
    trump: Suit,
    config: SearchConfig,
}

impl<'a> Searcher<'a> {
    pub fn new(
        belief: &'a BeliefState,
        hand: &'a Hand,
        seat: Seat,
        trump: Suit,
        config: SearchConfig,
    ) -> Self {
        Self {
            belief,
            hand,
            seat,
            trump,
            config,
        }
    }

    /// Best card for the current trick, or `None` when the hand offers
    /// no legal play. `observed` holds every card already played for
    /// real this deal.
    pub fn choose(&self, trick: &Trick, observed: CardSet) -> Option<Card> {
        let legal = rules::legal_plays(self.hand, trick, self.trump, self.seat);
        let mut best: Option<(Card, f32)> = None;
        for card in legal {
            let mut line = trick.clone();
            if line.play(self.seat, card).is_err() {
                continue;
            }
            let window = if self.config.prune {
                Some(Window {
                    alpha: best.map_or(f32::NEG_INFINITY, |(_, value)| value),
                    beta: f32::INFINITY,
                })
            } else {
                None
            };
            let value =
                self.node_value(&line, self.seat.next(), 0, 0.0, observed.with(card), window);
            if best.map_or(true, |(_, top)| value > top) {
                best = Some((card, value));
            }
        }
        best.map(|(card, _)| card)
    }

    fn node_value(
        &self,
        trick: &Trick,
        actor: Seat,
        depth: u8,
        running: f32,
        played: CardSet,
        window: Option<Window>,
    ) -> f32 {
        let mut running = running;
        let fresh;
        let trick = if trick.is_complete() {
            if let Some(winner) = trick.winner(self.trump) {
                if winner.team() == self.seat.team() {
                    running += f32::from(trick.points(self.trump));
                }
            }
            fresh = Trick::new(actor);
            &fresh
        } else {
            trick
        };

        if played.len() == 32 || depth == self.config.max_depth {
            return running + self.remaining_strength(played);
        }

        if actor == self.seat {
            self.own_turn(trick, depth, running, played, window)
        } else {
            self.expected_turn(trick, actor, depth, running, played, window)
        }
    }

    /// The searcher's own turn: maximize over legal plays from the
    /// cards not yet committed to the simulated line.
    fn own_turn(
        &self,
        trick: &Trick,
        depth: u8,
        running: f32,
        played: CardSet,
        mut window: Option<Window>,
    ) -> f32 {
        let remaining = self.remaining_hand(played);
        let legal = rules::legal_plays(&remaining, trick, self.trump, self.seat);
        if legal.is_empty() {
            return running + eval::score_hand(&remaining, self.trump) as f32;
        }
        let mut best = f32::NEG_INFINITY;
        for card in legal {
            let mut line = trick.clone();
            if line.play(self.seat, card).is_err() {
                continue;
            }
            let value = self.node_value(
                &line,
                self.seat.next(),
                depth + 1,
                running,
                played.with(card),
                window,
            );
            best = best.max(value);
            if let Some(w) = window.as_mut() {
                if best >= w.beta {
                    return best;
                }
                w.alpha = w.alpha.max(best);
            }
        }
        best
    }

    /// Any other seat: expectation over the belief-restricted
    /// successors, normalized by the probability mass actually used.
    fn expected_turn(
        &self,
        trick: &Trick,
        actor: Seat,
        depth: u8,
        running: f32,
        played: CardSet,
        window: Option<Window>,
    ) -> f32 {
        let candidates = rules::successors(self.belief, actor, trick, self.trump, played);
        let total: f32 = candidates
            .iter()
            .map(|card| self.belief.probability(actor, *card))
            .sum();
        if total <= 0.0 {
            return 0.0;
        }
        let mut weighted = 0.0;
        let mut used = 0.0;
        for card in candidates {
            let probability = self.belief.probability(actor, card);
            if probability <= 0.0 {
                continue;
            }
            let mut line = trick.clone();
            if line.play(actor, card).is_err() {
                continue;
            }
            let value = self.node_value(
                &line,
                actor.next(),
                depth + 1,
                running,
                played.with(card),
                window,
            );
            weighted += probability * value;
            used += probability;
            if let Some(w) = window {
                let optimistic = (weighted + (total - used) * UTILITY_CEILING) / total;
                if optimistic <= w.alpha {
                    return optimistic;
                }
                let pessimistic = weighted / total;
                if pessimistic >= w.beta {
                    return pessimistic;
                }
            }
        }
        if used > 0.0 {
            weighted / used
        } else {
            0.0
        }
    }

    fn remaining_hand(&self, played: CardSet) -> Hand {
        Hand::with_cards(
            self.hand
                .iter()
                .filter(|card| !played.contains(**card))
                .copied()
                .collect(),
        )
    }

    fn remaining_strength(&self, played: CardSet) -> f32 {
        eval::score_hand(&self.remaining_hand(played), self.trump) as f32
    }
}
