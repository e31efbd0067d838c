use belote_bot::{BeloteAgent, SearchTier};
use belote_core::game::match_state::MatchState;
use belote_core::model::deal::{BidError, BidOutcome, Contract, DealPhase, PlayError};
use belote_core::model::seat::{Seat, Team};
use belote_core::model::suit::Suit;
use belote_core::model::trick::Trick;
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::RunConfig;

/// Errors surfaced while driving a match.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("bid rejected: {0}")]
    Bid(#[from] BidError),
    #[error("play rejected: {0}")]
    Play(#[from] PlayError),
    #[error("seat {seat} produced no card in deal {deal}")]
    NoCard { seat: Seat, deal: u32 },
}

/// One deal in the report, thrown in or settled.
#[derive(Debug, Clone, Serialize)]
pub struct DealRecord {
    pub deal: u32,
    pub dealer: Seat,
    pub trump: Option<Suit>,
    pub taker: Option<Seat>,
    pub thrown: bool,
    pub awarded: [u32; 2],
    pub litige: bool,
}

/// Outcome of a run, serialized to the summary file.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub seed: u64,
    pub target: u32,
    pub tiers: [String; 2],
    pub deals_played: usize,
    pub totals: [u32; 2],
    pub winner: Option<Team>,
    pub deals: Vec<DealRecord>,
}

/// Plays a seeded self-play match between four search agents.
pub struct MatchRunner {
    config: RunConfig,
}

impl MatchRunner {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Drive one match up to the target score or the deal cap.
    pub fn run(&self) -> Result<MatchReport, HarnessError> {
        let mut state = match self.config.seed {
            Some(seed) => MatchState::with_seed(Seat::West, seed),
            None => MatchState::new(Seat::West),
        };
        let mut agents = Seat::LOOP.map(BeloteAgent::new);
        let mut deals = Vec::new();

        while deals.len() < self.config.deals && !state.is_over(self.config.target) {
            let record = self.play_deal(&mut state, &mut agents)?;
            let [north_south, east_west] = record.awarded;
            event!(
                target: "belote_bench::deal",
                Level::INFO,
                deal = record.deal,
                dealer = %record.dealer,
                thrown = record.thrown,
                north_south,
                east_west
            );
            deals.push(record);
            state.finish_deal_and_start_next();
        }

        let winner = if state.is_over(self.config.target) {
            state.scores().leading_team()
        } else {
            None
        };

        Ok(MatchReport {
            seed: state.seed(),
            target: self.config.target,
            tiers: [
                tier_label(self.config.north_south),
                tier_label(self.config.east_west),
            ],
            deals_played: deals.len(),
            totals: *state.scores().totals(),
            winner,
            deals,
        })
    }

    fn play_deal(
        &self,
        state: &mut MatchState,
        agents: &mut [BeloteAgent; 4],
    ) -> Result<DealRecord, HarnessError> {
        let deal_number = state.deal_number();
        let dealer = state.dealer();
        let middle = state.deal().middle_card();

        for seat in Seat::LOOP {
            let hand = state.deal().hand(seat).clone();
            agents[seat.index()].reset_beliefs(&hand);
        }

        let Some(contract) = self.run_auction(state, agents)? else {
            return Ok(DealRecord {
                deal: deal_number,
                dealer,
                trump: None,
                taker: None,
                thrown: true,
                awarded: [0, 0],
                litige: false,
            });
        };

        // Hands grew to eight cards at resolution, so beliefs are
        // reseeded before the middle card is pinned on the taker.
        for seat in Seat::LOOP {
            let hand = state.deal().hand(seat).clone();
            let agent = &mut agents[seat.index()];
            agent.reset_beliefs(&hand);
            agent.on_trump_determined(middle, contract.taker);
        }

        while !state.deal().is_complete() {
            let trick_before = state.deal().current_trick().clone();
            let seat = next_to_play(&trick_before);
            let tier = self.tier_for(seat.team());
            let hand = state.deal().hand(seat).clone();
            let card = agents[seat.index()]
                .choose_play(&trick_before, &hand, tier)
                .ok_or(HarnessError::NoCard {
                    seat,
                    deal: deal_number,
                })?;
            state.deal_mut().play_card(seat, card)?;
            for agent in agents.iter_mut() {
                agent.on_card_played(&trick_before, card, seat);
            }
        }

        let score = state.settle_current_deal();
        Ok(DealRecord {
            deal: deal_number,
            dealer,
            trump: Some(contract.trump),
            taker: Some(contract.taker),
            thrown: false,
            awarded: score.map_or([0, 0], |settled| settled.totals()),
            litige: score.is_some_and(|settled| settled.is_litige()),
        })
    }

    fn run_auction(
        &self,
        state: &mut MatchState,
        agents: &mut [BeloteAgent; 4],
    ) -> Result<Option<Contract>, HarnessError> {
        let middle = state.deal().middle_card();
        loop {
            let (turn, round) = match state.deal().phase() {
                DealPhase::Bidding(auction) => (auction.turn(), auction.round()),
                DealPhase::Playing { contract, .. } => return Ok(Some(*contract)),
            };
            let team_score = state.scores().score(turn.team());
            let hand = state.deal().hand(turn).clone();
            let bid = agents[turn.index()].choose_trump_bid(&hand, middle, round, team_score);
            match state.deal_mut().submit_bid(turn, bid)? {
                BidOutcome::TrumpSet { taker, trump } => {
                    return Ok(Some(Contract { trump, taker }));
                }
                BidOutcome::Thrown => return Ok(None),
                BidOutcome::Continue { .. } => {}
            }
        }
    }

    fn tier_for(&self, team: Team) -> SearchTier {
        match team {
            Team::NorthSouth => self.config.north_south,
            Team::EastWest => self.config.east_west,
        }
    }
}

fn next_to_play(trick: &Trick) -> Seat {
    let mut seat = trick.leader();
    for _ in 0..trick.plays().len() {
        seat = seat.next();
    }
    seat
}

fn tier_label(tier: SearchTier) -> String {
    format!("{tier:?}").to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{MatchRunner, next_to_play};
    use crate::config::RunConfig;
    use belote_bot::SearchTier;
    use belote_core::model::card::Card;
    use belote_core::model::rank::Rank;
    use belote_core::model::seat::Seat;
    use belote_core::model::suit::Suit;
    use belote_core::model::trick::Trick;

    fn shallow_config(seed: u64, deals: usize) -> RunConfig {
        RunConfig {
            deals,
            seed: Some(seed),
            north_south: SearchTier::Shallow,
            east_west: SearchTier::Shallow,
            ..RunConfig::default()
        }
    }

    #[test]
    fn the_leader_plays_first_and_turns_rotate() {
        let mut trick = Trick::new(Seat::South);
        assert_eq!(next_to_play(&trick), Seat::South);
        trick
            .play(Seat::South, Card::new(Rank::Ace, Suit::Hearts))
            .expect("lead accepted");
        assert_eq!(next_to_play(&trick), Seat::West);
    }

    #[test]
    fn totals_accumulate_the_deal_records() {
        let report = MatchRunner::new(shallow_config(11, 2))
            .run()
            .expect("match runs");
        assert_eq!(report.deals_played, 2);

        let mut summed = [0u32; 2];
        for deal in &report.deals {
            summed[0] += deal.awarded[0];
            summed[1] += deal.awarded[1];
        }
        assert_eq!(report.totals, summed);
    }

    #[test]
    fn records_carry_the_contract_or_the_throw_in() {
        let report = MatchRunner::new(shallow_config(23, 3))
            .run()
            .expect("match runs");
        for deal in &report.deals {
            if deal.thrown {
                assert_eq!(deal.trump, None);
                assert_eq!(deal.taker, None);
                assert_eq!(deal.awarded, [0, 0]);
            } else {
                assert!(deal.trump.is_some());
                assert!(deal.taker.is_some());
                assert!(deal.awarded[0] + deal.awarded[1] > 0);
            }
        }
    }
}
