use super::match_state::MatchState;
use crate::model::seat::Seat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchSnapshot {
    pub seed: u64,
    pub deal_number: u32,
    pub dealer: Seat,
    pub scores: [u32; 2],
}

impl MatchSnapshot {
    pub fn capture(state: &MatchState) -> Self {
        MatchSnapshot {
            seed: state.seed(),
            deal_number: state.deal_number(),
            dealer: state.dealer(),
            scores: *state.scores().totals(),
        }
    }

    pub fn restore(self) -> MatchState {
        let mut state = MatchState::with_seed_and_deal(self.seed, self.deal_number, self.dealer);
        state.scores_mut().set_totals(self.scores);
        state
    }

    pub fn to_json(state: &MatchState) -> serde_json::Result<String> {
        let snapshot = Self::capture(state);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
