use std::path::PathBuf;

use belote_bot::SearchTier;
use belote_core::game::match_state::MATCH_TARGET;
use clap::ValueEnum;
use thiserror::Error;

pub const DEFAULT_DEALS: usize = 32;

/// Search tier as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TierChoice {
    Shallow,
    Medium,
    Deep,
}

impl TierChoice {
    pub const fn tier(self) -> SearchTier {
        match self {
            TierChoice::Shallow => SearchTier::Shallow,
            TierChoice::Medium => SearchTier::Medium,
            TierChoice::Deep => SearchTier::Deep,
        }
    }
}

/// Runner settings assembled from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub deals: usize,
    pub seed: Option<u64>,
    pub north_south: SearchTier,
    pub east_west: SearchTier,
    pub target: u32,
    pub summary: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl RunConfig {
    /// Validate the configuration without performing I/O.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.deals == 0 {
            return Err(ValidationError::InvalidField {
                field: "deals".to_string(),
                message: "number of deals must be greater than zero".to_string(),
            });
        }

        if self.target == 0 {
            return Err(ValidationError::InvalidField {
                field: "target".to_string(),
                message: "target score must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            deals: DEFAULT_DEALS,
            seed: None,
            north_south: SearchTier::Medium,
            east_west: SearchTier::Medium,
            target: MATCH_TARGET,
            summary: None,
            log_file: None,
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = RunConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.deals, DEFAULT_DEALS);
        assert_eq!(config.target, MATCH_TARGET);
    }

    #[test]
    fn zero_deals_are_rejected() {
        let config = RunConfig {
            deals: 0,
            ..RunConfig::default()
        };
        let err = config.validate().expect_err("zero deals must fail");
        assert!(err.to_string().contains("deals"));
    }

    #[test]
    fn zero_target_is_rejected() {
        let config = RunConfig {
            target: 0,
            ..RunConfig::default()
        };
        let err = config.validate().expect_err("zero target must fail");
        assert!(err.to_string().contains("target"));
    }

    #[test]
    fn tier_choices_map_onto_search_tiers() {
        assert_eq!(TierChoice::Shallow.tier(), SearchTier::Shallow);
        assert_eq!(TierChoice::Medium.tier(), SearchTier::Medium);
        assert_eq!(TierChoice::Deep.tier(), SearchTier::Deep);
    }
}
