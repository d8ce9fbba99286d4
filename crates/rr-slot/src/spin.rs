//! Spin context and the immutable spin outcome

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use rr_stage::{FundingSource, JackpotTier, Stage};

use crate::grid::{Cell, Grid};
use crate::paytable::LineWin;

/// What a spin is played with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinContext {
    pub bet_amount: i64,
    pub vip_mode: bool,
    pub funded_by: FundingSource,
}

impl SpinContext {
    pub fn new(bet_amount: i64, vip_mode: bool, funded_by: FundingSource) -> Self {
        Self {
            bet_amount,
            vip_mode,
            funded_by,
        }
    }

    /// Per-line stake: a tenth of the bet
    pub fn line_bet(&self) -> f64 {
        self.bet_amount as f64 / 10.0
    }
}

/// Jackpot win info
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JackpotWin {
    pub tier: JackpotTier,
    pub amount: i64,
}

/// Everything a spin produced
///
/// Computed in full before the reveal starts and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub spin_id: String,
    pub context: SpinContext,
    pub grid: Grid,
    pub line_wins: Vec<LineWin>,
    pub winning_cells: BTreeSet<Cell>,
    /// Sum of line multipliers
    pub total_multiplier: u32,
    pub frenzy_multiplier: f64,
    /// Payline part of the award
    pub line_award: i64,
    /// Line award plus any jackpot
    pub currency_award: i64,
    pub jackpot_awarded: Option<JackpotWin>,
    pub scatter_count: u8,
    pub free_spins_granted: u32,
    /// Energy added to the meter by this spin (0 in frenzy)
    pub energy_delta: u32,
    pub frenzy_triggered: bool,
    /// Frenzy spins granted when it triggered
    #[serde(default)]
    pub frenzy_spins_granted: u32,
    /// This spin used the last frenzy spin
    #[serde(default)]
    pub frenzy_ended: bool,
    pub teaser_signal: bool,
    pub morale_delta: i32,
    /// A bonus-box round follows the reveal
    #[serde(default)]
    pub bonus_offered: bool,
}

impl SpinOutcome {
    pub fn is_win(&self) -> bool {
        self.currency_award > 0
    }

    pub fn winning_line_count(&self) -> usize {
        self.line_wins.len()
    }

    pub fn jackpot_tier(&self) -> Option<JackpotTier> {
        self.jackpot_awarded.map(|j| j.tier)
    }

    /// Stages announced when the outcome is settled, in order
    pub fn settlement_stages(&self) -> Vec<Stage> {
        let mut stages = Vec::new();

        if self.is_win() {
            stages.push(Stage::WinPresent {
                win_amount: self.currency_award,
                line_count: self.line_wins.len() as u8,
            });
        } else {
            stages.push(Stage::NoWin);
        }

        if let Some(jackpot) = self.jackpot_awarded {
            stages.push(Stage::JackpotWon {
                tier: jackpot.tier,
                amount: jackpot.amount,
            });
        }

        if self.free_spins_granted > 0 {
            stages.push(Stage::FreeSpinsAwarded {
                count: self.free_spins_granted,
                scatter_count: self.scatter_count,
            });
        }

        if self.frenzy_triggered {
            stages.push(Stage::FrenzyTriggered {
                spins: self.frenzy_spins_granted,
            });
        }

        if self.frenzy_ended {
            stages.push(Stage::FrenzyEnd);
        }

        if self.morale_delta != 0 {
            stages.push(Stage::MoraleChange {
                delta: self.morale_delta,
            });
        }

        stages
    }
}
