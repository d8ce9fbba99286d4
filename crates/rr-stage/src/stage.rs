//! Stage — The enum defining every moment a spin can announce
//!
//! A Stage is the MEANING of a moment, not its rendering. Text produced by
//! `Display` is a default English description for log sinks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::taxonomy::{FeatureType, FundingSource, JackpotTier};

/// A discrete moment in the life of a spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stage {
    // ═══════════════════════════════════════════════════════════════════════
    // SPIN LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Spin accepted and funded
    SpinStart {
        funded_by: FundingSource,
        bet: i64,
    },

    /// A reel (column) came to rest
    ReelStop {
        /// Which reel stopped (0-indexed)
        reel_index: u8,
        /// Symbols on this reel (top to bottom)
        #[serde(default)]
        symbols: Vec<String>,
    },

    /// Outcome applied, ready for the next spin
    SpinEnd,

    // ═══════════════════════════════════════════════════════════════════════
    // ANTICIPATION
    // ═══════════════════════════════════════════════════════════════════════
    /// Two or more scatters landed early; the final reel is held back
    TeaserOn {
        reel_index: u8,
    },

    TeaserOff {
        reel_index: u8,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // WIN LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Paying spin
    WinPresent {
        /// Total award including any jackpot
        win_amount: i64,
        /// Number of winning lines
        #[serde(default)]
        line_count: u8,
    },

    /// Nothing paid
    NoWin,

    // ═══════════════════════════════════════════════════════════════════════
    // FEATURES
    // ═══════════════════════════════════════════════════════════════════════
    FreeSpinsAwarded {
        count: u32,
        scatter_count: u8,
    },

    /// Energy core full, frenzy spins granted
    FrenzyTriggered {
        spins: u32,
    },

    /// Last frenzy spin played
    FrenzyEnd,

    // ═══════════════════════════════════════════════════════════════════════
    // JACKPOT
    // ═══════════════════════════════════════════════════════════════════════
    JackpotWon {
        tier: JackpotTier,
        amount: i64,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // BONUS
    // ═══════════════════════════════════════════════════════════════════════
    /// Reward boxes put in front of the player
    BonusOffered {
        box_count: u8,
    },

    BonusPicked {
        box_index: u8,
        prize: i64,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // PLAYER
    // ═══════════════════════════════════════════════════════════════════════
    MoraleChange {
        delta: i32,
    },

    /// Cash spin refused for lack of funds
    InsufficientFunds {
        balance: i64,
        bet: i64,
    },

    /// Bet amount was not positive
    BetRejected {
        bet: i64,
    },
}

impl Stage {
    /// Get the stage category for grouping
    pub fn category(&self) -> StageCategory {
        match self {
            Stage::SpinStart { .. } | Stage::ReelStop { .. } | Stage::SpinEnd => {
                StageCategory::SpinLifecycle
            }

            Stage::TeaserOn { .. } | Stage::TeaserOff { .. } => StageCategory::Anticipation,

            Stage::WinPresent { .. } | Stage::NoWin => StageCategory::WinLifecycle,

            Stage::FreeSpinsAwarded { .. } | Stage::FrenzyTriggered { .. } | Stage::FrenzyEnd => {
                StageCategory::Feature
            }

            Stage::JackpotWon { .. } => StageCategory::Jackpot,

            Stage::BonusOffered { .. } | Stage::BonusPicked { .. } => StageCategory::Bonus,

            Stage::MoraleChange { .. }
            | Stage::InsufficientFunds { .. }
            | Stage::BetRejected { .. } => StageCategory::Player,
        }
    }

    /// Get a simple string name for this stage type
    pub fn type_name(&self) -> &'static str {
        match self {
            Stage::SpinStart { .. } => "spin_start",
            Stage::ReelStop { .. } => "reel_stop",
            Stage::SpinEnd => "spin_end",
            Stage::TeaserOn { .. } => "teaser_on",
            Stage::TeaserOff { .. } => "teaser_off",
            Stage::WinPresent { .. } => "win_present",
            Stage::NoWin => "no_win",
            Stage::FreeSpinsAwarded { .. } => "free_spins_awarded",
            Stage::FrenzyTriggered { .. } => "frenzy_triggered",
            Stage::FrenzyEnd => "frenzy_end",
            Stage::JackpotWon { .. } => "jackpot_won",
            Stage::BonusOffered { .. } => "bonus_offered",
            Stage::BonusPicked { .. } => "bonus_picked",
            Stage::MoraleChange { .. } => "morale_change",
            Stage::InsufficientFunds { .. } => "insufficient_funds",
            Stage::BetRejected { .. } => "bet_rejected",
        }
    }

    /// Stages whose triggering condition is part of the engine contract:
    /// jackpot won, free spins awarded, frenzy triggered, teaser active,
    /// insufficient funds.
    pub fn is_advisory(&self) -> bool {
        matches!(
            self,
            Stage::JackpotWon { .. }
                | Stage::FreeSpinsAwarded { .. }
                | Stage::FrenzyTriggered { .. }
                | Stage::TeaserOn { .. }
                | Stage::InsufficientFunds { .. }
        )
    }

    /// Feature this stage belongs to, if any
    pub fn feature(&self) -> Option<FeatureType> {
        match self {
            Stage::FreeSpinsAwarded { .. } => Some(FeatureType::FreeSpins),
            Stage::FrenzyTriggered { .. } | Stage::FrenzyEnd => Some(FeatureType::Frenzy),
            Stage::BonusOffered { .. } | Stage::BonusPicked { .. } => Some(FeatureType::BonusBox),
            _ => None,
        }
    }

    /// Check if a string is a valid stage type name
    pub fn is_valid_type_name(name: &str) -> bool {
        Self::all_type_names().contains(&name)
    }

    pub fn all_type_names() -> &'static [&'static str] {
        &[
            "spin_start",
            "reel_stop",
            "spin_end",
            "teaser_on",
            "teaser_off",
            "win_present",
            "no_win",
            "free_spins_awarded",
            "frenzy_triggered",
            "frenzy_end",
            "jackpot_won",
            "bonus_offered",
            "bonus_picked",
            "morale_change",
            "insufficient_funds",
            "bet_rejected",
        ]
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::SpinStart { funded_by, bet } => {
                write!(f, "Spin started ({}, bet {})", funded_by.display_name(), bet)
            }
            Stage::ReelStop { reel_index, symbols } => {
                write!(f, "Reel {} stopped: {}", reel_index + 1, symbols.join(" "))
            }
            Stage::SpinEnd => f.write_str("Spin complete"),
            Stage::TeaserOn { .. } => f.write_str("Scatter teaser! Holding the last reel..."),
            Stage::TeaserOff { .. } => f.write_str("Teaser resolved"),
            Stage::WinPresent { win_amount, line_count } => {
                write!(f, "Won {} caps on {} line(s)", win_amount, line_count)
            }
            Stage::NoWin => f.write_str("No win"),
            Stage::FreeSpinsAwarded { count, scatter_count } => {
                write!(f, "{} scatters! +{} free spins", scatter_count, count)
            }
            Stage::FrenzyTriggered { spins } => {
                write!(f, "Energy core overloaded! {} frenzy spins", spins)
            }
            Stage::FrenzyEnd => f.write_str("Frenzy over"),
            Stage::JackpotWon { tier, amount } => {
                write!(f, "{} JACKPOT! +{} caps", tier, amount)
            }
            Stage::BonusOffered { box_count } => {
                write!(f, "Supply drop! Choose one of {} boxes", box_count)
            }
            Stage::BonusPicked { box_index, prize } => {
                write!(f, "Box {} opened: +{} caps", box_index + 1, prize)
            }
            Stage::MoraleChange { delta } => write!(f, "Morale {:+}", delta),
            Stage::InsufficientFunds { balance, bet } => {
                write!(f, "Insufficient funds: need {} caps, have {}", bet, balance)
            }
            Stage::BetRejected { bet } => write!(f, "Bet rejected: {}", bet),
        }
    }
}

/// Stage category for grouping and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageCategory {
    SpinLifecycle,
    Anticipation,
    WinLifecycle,
    Feature,
    Jackpot,
    Bonus,
    Player,
}

impl StageCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SpinLifecycle => "Spin Lifecycle",
            Self::Anticipation => "Anticipation",
            Self::WinLifecycle => "Win Lifecycle",
            Self::Feature => "Features",
            Self::Jackpot => "Jackpot",
            Self::Bonus => "Bonus",
            Self::Player => "Player",
        }
    }
}
