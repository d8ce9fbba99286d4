//! Stage Taxonomy — Enums shared by stages and the engine
//!
//! Jackpot tiers, feature kinds and spin funding sources shared between the
//! engine and anything listening to its stages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Progressive jackpot tier
///
/// Each tier is tied to a five-of-a-kind on one symbol:
/// - Mini: Radiation
/// - Major: Gem
/// - Grand: Seven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JackpotTier {
    Mini,
    Major,
    Grand,
}

impl JackpotTier {
    /// All tiers in award priority order
    pub const ALL: [JackpotTier; 3] = [JackpotTier::Mini, JackpotTier::Major, JackpotTier::Grand];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Mini => "MINI",
            Self::Major => "MAJOR",
            Self::Grand => "GRAND",
        }
    }

    /// Numeric level (1 = Mini)
    pub fn level(&self) -> u8 {
        match self {
            Self::Mini => 1,
            Self::Major => 2,
            Self::Grand => 3,
        }
    }

    /// Index into per-tier arrays
    pub fn index(&self) -> usize {
        self.level() as usize - 1
    }
}

impl fmt::Display for JackpotTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Feature type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    /// Scatter-awarded free spins
    FreeSpins,
    /// Energy-core bonus mode
    Frenzy,
    /// Reward-choice boxes
    BonusBox,
}

impl FeatureType {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FreeSpins => "Free Spins",
            Self::Frenzy => "Frenzy",
            Self::BonusBox => "Bonus Box",
        }
    }
}

/// What paid for a spin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingSource {
    /// Charged to the wallet; feeds the jackpot pools
    #[default]
    Cash,
    /// Consumed from the free-spin backlog
    FreeSpin,
    /// Consumed from the frenzy allotment
    FrenzySpin,
}

impl FundingSource {
    pub fn is_cash(&self) -> bool {
        matches!(self, Self::Cash)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::FreeSpin => "free spin",
            Self::FrenzySpin => "frenzy spin",
        }
    }
}
