//! Paylines, bet gating and line evaluation

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use rr_stage::JackpotTier;

use crate::grid::{COLS, Cell, Grid};
use crate::spin::SpinContext;
use crate::symbols::Symbol;

/// Shortest run that pays
pub const MIN_RUN: u8 = 3;

/// Bet at which Wild, Food and Radiation unlock outside VIP mode
pub const MID_TIER_BET: i64 = 50;

/// Bet at which Gem and Seven unlock outside VIP mode
pub const HIGH_TIER_BET: i64 = 100;

/// A payline definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payline {
    /// Payline index (0-based)
    pub index: u8,
    /// Row for each column
    pub rows: [u8; COLS],
}

impl Payline {
    pub const fn new(index: u8, rows: [u8; COLS]) -> Self {
        Self { index, rows }
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(col, &row)| Cell::new(row, col as u8))
    }
}

/// The ten fixed paylines
pub const PAYLINES: [Payline; 10] = [
    // Straight lines
    Payline::new(0, [0, 0, 0, 0, 0]),
    Payline::new(1, [1, 1, 1, 1, 1]),
    Payline::new(2, [2, 2, 2, 2, 2]),
    // V shapes
    Payline::new(3, [0, 1, 2, 1, 0]),
    Payline::new(4, [2, 1, 0, 1, 2]),
    // Steps
    Payline::new(5, [0, 0, 1, 2, 2]),
    Payline::new(6, [2, 2, 1, 0, 0]),
    // Zigzag
    Payline::new(7, [1, 0, 1, 2, 1]),
    Payline::new(8, [1, 2, 1, 0, 1]),
    // Diagonal
    Payline::new(9, [0, 1, 1, 1, 2]),
];

/// Wild substitution is on in VIP mode or from a bet of 50
pub fn wild_enabled(ctx: &SpinContext) -> bool {
    ctx.vip_mode || ctx.bet_amount >= MID_TIER_BET
}

/// Whether a symbol may anchor a paying line at this bet
pub fn is_allowed(symbol: Symbol, ctx: &SpinContext) -> bool {
    match symbol {
        Symbol::Wrench => true,
        Symbol::Food | Symbol::Radiation => ctx.vip_mode || ctx.bet_amount >= MID_TIER_BET,
        Symbol::Gem | Symbol::Seven => ctx.vip_mode || ctx.bet_amount >= HIGH_TIER_BET,
        _ => false,
    }
}

/// Jackpot tier unlocked by a five-symbol run
pub fn jackpot_tier_for(symbol: Symbol) -> Option<JackpotTier> {
    match symbol {
        Symbol::Radiation => Some(JackpotTier::Mini),
        Symbol::Gem => Some(JackpotTier::Major),
        Symbol::Seven => Some(JackpotTier::Grand),
        _ => None,
    }
}

/// Energy contributed by one winning line: 1, 2 or 3 for runs of 3, 4, 5
pub fn energy_for_run(run_length: u8) -> u32 {
    if run_length < MIN_RUN {
        0
    } else {
        (run_length - MIN_RUN + 1) as u32
    }
}

/// Win on a single payline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineWin {
    pub line_index: u8,
    /// Base symbol of the run
    pub symbol: Symbol,
    pub run_length: u8,
    pub multiplier: u32,
    /// Every cell of the run, left to right
    pub cells: Vec<Cell>,
    /// Run cells that were wild substitutions
    pub wild_cells: Vec<Cell>,
}

impl LineWin {
    pub fn energy(&self) -> u32 {
        energy_for_run(self.run_length)
    }
}

/// Result of evaluating every payline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub line_wins: Vec<LineWin>,
    pub winning_cells: BTreeSet<Cell>,
    /// Sum of line multipliers
    pub total_multiplier: u32,
    /// Sum of per-line energy
    pub energy_gain: u32,
    /// Highest-priority jackpot unlocked by a five-run
    pub jackpot_eligible: Option<JackpotTier>,
}

impl EvaluationResult {
    pub fn is_win(&self) -> bool {
        !self.line_wins.is_empty()
    }

    pub fn winning_line_count(&self) -> usize {
        self.line_wins.len()
    }
}

/// Scores the fixed paylines against a grid
#[derive(Debug, Clone, Copy, Default)]
pub struct PaylineEvaluator;

impl PaylineEvaluator {
    pub fn evaluate(grid: &Grid, ctx: &SpinContext) -> EvaluationResult {
        let mut result = EvaluationResult::default();

        for payline in &PAYLINES {
            let Some(win) = Self::evaluate_line(grid, payline, ctx) else {
                continue;
            };

            result.total_multiplier += win.multiplier;
            result.energy_gain += win.energy();
            result.winning_cells.extend(win.cells.iter().copied());

            if win.run_length as usize == COLS {
                if let Some(tier) = jackpot_tier_for(win.symbol) {
                    // Mini outranks Major outranks Grand
                    result.jackpot_eligible = Some(match result.jackpot_eligible {
                        Some(current) => current.min(tier),
                        None => tier,
                    });
                }
            }

            result.line_wins.push(win);
        }

        result
    }

    /// Evaluate one payline; `None` when it pays nothing
    pub fn evaluate_line(grid: &Grid, payline: &Payline, ctx: &SpinContext) -> Option<LineWin> {
        let cells: Vec<Cell> = payline.cells().collect();
        let symbols: Vec<Symbol> = cells.iter().map(|c| grid.at(*c)).collect();

        let base = symbols.iter().copied().find(Symbol::can_anchor)?;
        if base.pays().is_none() || !is_allowed(base, ctx) {
            return None;
        }

        let wilds = wild_enabled(ctx);
        let mut run = Vec::with_capacity(COLS);
        let mut wild_cells = Vec::new();

        for (cell, symbol) in cells.iter().zip(&symbols) {
            if symbol.breaks_run() {
                break;
            }
            if *symbol == base {
                run.push(*cell);
            } else if wilds && *symbol == Symbol::Wild {
                run.push(*cell);
                wild_cells.push(*cell);
            } else {
                break;
            }
        }

        let run_length = run.len() as u8;
        if run_length < MIN_RUN {
            return None;
        }

        Some(LineWin {
            line_index: payline.index,
            symbol: base,
            run_length,
            multiplier: base.get_pay(run_length),
            cells: run,
            wild_cells,
        })
    }
}
