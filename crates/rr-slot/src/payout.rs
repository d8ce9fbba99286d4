//! Payout calculation
//!
//! Turns scored lines, the grid's scatters and the frenzy state into the
//! currency, free-spin and morale deltas of one spin.

use serde::{Deserialize, Serialize};

use crate::features::JackpotPool;
use crate::grid::Grid;
use crate::paytable::EvaluationResult;
use crate::spin::{JackpotWin, SpinContext};
use crate::symbols::Symbol;

/// Scatters needed in columns 0–3 for the teaser
pub const TEASER_MIN_SCATTERS: usize = 2;

/// Winning lines above which frenzy pays double
pub const FRENZY_DOUBLE_LINES: usize = 5;

/// Free spins granted for a scatter count: 3→5, 4→10, 5 or more→20
pub fn free_spins_for(scatters: usize) -> u32 {
    match scatters {
        0..=2 => 0,
        3 => 5,
        4 => 10,
        _ => 20,
    }
}

/// 1.0 outside frenzy; in frenzy 2.0 above five winning lines, else 1.5
pub fn frenzy_multiplier(frenzy: bool, winning_lines: usize) -> f64 {
    if !frenzy {
        1.0
    } else if winning_lines > FRENZY_DOUBLE_LINES {
        2.0
    } else {
        1.5
    }
}

/// Advisory: two or more scatters already showing before the last reel
pub fn teaser_signal(grid: &Grid) -> bool {
    grid.count_in_columns(Symbol::Scatter, 0..=3) >= TEASER_MIN_SCATTERS
}

/// Morale tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoraleConfig {
    /// Applied when the spin pays
    pub win_delta: i32,
    /// Applied when it does not
    pub loss_delta: i32,
}

impl Default for MoraleConfig {
    fn default() -> Self {
        Self {
            win_delta: 5,
            loss_delta: -2,
        }
    }
}

/// Currency and side effects of one spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub frenzy_multiplier: f64,
    pub line_award: i64,
    pub currency_award: i64,
    pub jackpot: Option<JackpotWin>,
    pub scatter_count: u8,
    pub free_spins_granted: u32,
    pub teaser_signal: bool,
    pub morale_delta: i32,
}

#[derive(Debug, Clone, Default)]
pub struct PayoutCalculator {
    morale: MoraleConfig,
}

impl PayoutCalculator {
    pub fn new(morale: MoraleConfig) -> Self {
        Self { morale }
    }

    /// `floor(total_multiplier × bet/10 × frenzy_multiplier)`
    pub fn line_award(total_multiplier: u32, ctx: &SpinContext, frenzy_multiplier: f64) -> i64 {
        (total_multiplier as f64 * ctx.line_bet() * frenzy_multiplier).floor() as i64
    }

    /// Compute the payout. Awards the eligible jackpot, resetting its pot.
    pub fn calculate(
        &self,
        eval: &EvaluationResult,
        grid: &Grid,
        ctx: &SpinContext,
        frenzy: bool,
        jackpots: &mut JackpotPool,
    ) -> Payout {
        let frenzy_multiplier = frenzy_multiplier(frenzy, eval.winning_line_count());
        let line_award = Self::line_award(eval.total_multiplier, ctx, frenzy_multiplier);

        let jackpot = eval.jackpot_eligible.map(|tier| jackpots.award(tier));
        let currency_award = line_award + jackpot.map(|j| j.amount).unwrap_or(0);

        let scatters = grid.count(Symbol::Scatter);

        let morale_delta = if currency_award > 0 {
            self.morale.win_delta
        } else {
            self.morale.loss_delta
        };

        Payout {
            frenzy_multiplier,
            line_award,
            currency_award,
            jackpot,
            scatter_count: scatters as u8,
            free_spins_granted: free_spins_for(scatters),
            teaser_signal: teaser_signal(grid),
            morale_delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paytable::PaylineEvaluator;
    use rr_stage::{FundingSource, JackpotTier};

    use crate::symbols::Symbol::*;

    fn ctx(bet: i64) -> SpinContext {
        SpinContext::new(bet, false, FundingSource::Cash)
    }

    #[test]
    fn test_free_spin_table() {
        assert_eq!(free_spins_for(2), 0);
        assert_eq!(free_spins_for(3), 5);
        assert_eq!(free_spins_for(4), 10);
        assert_eq!(free_spins_for(5), 20);
        assert_eq!(free_spins_for(9), 20);
    }

    #[test]
    fn test_frenzy_multiplier() {
        assert_eq!(frenzy_multiplier(false, 10), 1.0);
        assert_eq!(frenzy_multiplier(true, 5), 1.5);
        assert_eq!(frenzy_multiplier(true, 6), 2.0);
    }

    #[test]
    fn test_line_award_floors() {
        // 5 × 1.5 × 1.5 = 11.25
        assert_eq!(PayoutCalculator::line_award(5, &ctx(15), 1.5), 11);
        assert_eq!(PayoutCalculator::line_award(200, &ctx(50), 1.0), 1000);
        assert_eq!(PayoutCalculator::line_award(0, &ctx(500), 2.0), 0);
    }

    #[test]
    fn test_radiation_line_pays_and_awards_mini() {
        let grid = Grid::filled(Skull)
            .with_cell(1, 0, Radiation)
            .with_cell(1, 1, Radiation)
            .with_cell(1, 2, Radiation)
            .with_cell(1, 3, Radiation)
            .with_cell(1, 4, Radiation);
        let c = ctx(50);
        let eval = PaylineEvaluator::evaluate(&grid, &c);
        let mut jackpots = JackpotPool::new();
        jackpots.accrue(500);

        let payout = PayoutCalculator::default().calculate(&eval, &grid, &c, false, &mut jackpots);
        assert_eq!(payout.line_award, 1000);
        assert_eq!(payout.jackpot.map(|j| j.tier), Some(JackpotTier::Mini));
        assert_eq!(payout.currency_award, 1000 + 2025);
        assert_eq!(jackpots.value(JackpotTier::Mini), 2000);
        assert_eq!(payout.morale_delta, 5);
    }

    #[test]
    fn test_scatters_grant_free_spins_without_lines() {
        let grid = Grid::filled(Skull)
            .with_cell(0, 0, Scatter)
            .with_cell(2, 2, Scatter)
            .with_cell(1, 4, Scatter);
        let c = ctx(100);
        let eval = PaylineEvaluator::evaluate(&grid, &c);
        let payout = PayoutCalculator::default().calculate(&eval, &grid, &c, false, &mut JackpotPool::new());
        assert_eq!(payout.currency_award, 0);
        assert_eq!(payout.free_spins_granted, 5);
        assert_eq!(payout.scatter_count, 3);
        assert_eq!(payout.morale_delta, -2);
        assert!(payout.teaser_signal);
    }

    #[test]
    fn test_teaser_ignores_last_column() {
        let grid = Grid::filled(Skull)
            .with_cell(0, 0, Scatter)
            .with_cell(0, 4, Scatter)
            .with_cell(2, 4, Scatter);
        assert!(!teaser_signal(&grid));
        let grid = grid.with_cell(1, 3, Scatter);
        assert!(teaser_signal(&grid));
    }
}
