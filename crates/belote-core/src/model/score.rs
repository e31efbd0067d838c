use crate::model::seat::Team;

pub const BELOTE_BONUS: u16 = 20;
pub const DIX_DE_DER: u16 = 10;
pub const LITIGE_TOTAL: u16 = 81;

/// Settled result of one deal after the litige and rounding rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealScore {
    awarded: [u32; 2],
    litige: bool,
}

impl DealScore {
    /// Applies dix de der and the belote bonus to the raw trick points,
    /// then settles each team. At exactly 81 the defending team scores 80
    /// and the taking team nothing, with the deal flagged. Otherwise a
    /// team scores its total rounded to the nearest ten, except a taking
    /// team under 81, which scores nothing.
    pub fn settle(
        trick_points: [u16; 2],
        last_trick_winner: Team,
        belote_team: Option<Team>,
        taking_team: Team,
    ) -> Self {
        let mut raw = trick_points;
        raw[last_trick_winner.index()] += DIX_DE_DER;
        if let Some(team) = belote_team {
            raw[team.index()] += BELOTE_BONUS;
        }

        let mut awarded = [0u32; 2];
        let mut litige = false;
        for team in Team::BOTH {
            let total = raw[team.index()];
            let taking = team == taking_team;
            if total == LITIGE_TOTAL {
                if taking {
                    litige = true;
                } else {
                    awarded[team.index()] = 80;
                }
            } else if total > LITIGE_TOTAL || !taking {
                awarded[team.index()] = u32::from(round_to_ten(total));
            }
        }

        Self { awarded, litige }
    }

    pub fn awarded(&self, team: Team) -> u32 {
        self.awarded[team.index()]
    }

    pub fn totals(&self) -> [u32; 2] {
        self.awarded
    }

    pub fn is_litige(&self) -> bool {
        self.litige
    }
}

fn round_to_ten(total: u16) -> u16 {
    let unit = total % 10;
    if unit > 5 {
        total + (10 - unit)
    } else {
        total - unit
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBoard {
    totals: [u32; 2],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self { totals: [0; 2] }
    }

    pub fn score(&self, team: Team) -> u32 {
        self.totals[team.index()]
    }

    pub fn totals(&self) -> &[u32; 2] {
        &self.totals
    }

    pub fn set_totals(&mut self, totals: [u32; 2]) {
        self.totals = totals;
    }

    pub fn apply_deal(&mut self, deal: &DealScore) {
        for team in Team::BOTH {
            self.totals[team.index()] += deal.awarded(team);
        }
    }

    pub fn target_reached(&self, target: u32) -> bool {
        self.totals.iter().any(|&total| total >= target)
    }

    pub fn leading_team(&self) -> Option<Team> {
        use std::cmp::Ordering;
        match self.totals[0].cmp(&self.totals[1]) {
            Ordering::Greater => Some(Team::NorthSouth),
            Ordering::Less => Some(Team::EastWest),
            Ordering::Equal => None,
        }
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}
