pub mod agent;
pub mod bid;
pub mod eval;
pub mod search;

pub use agent::BeloteAgent;
pub use bid::TrumpScores;
pub use eval::score_hand;
pub use search::{SearchConfig, SearchTier, Searcher};
