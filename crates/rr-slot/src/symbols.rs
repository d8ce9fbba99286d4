//! Symbol definitions and the weighted symbol pool

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::spin::SpinContext;

/// Symbol type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SymbolType {
    /// Has a paytable entry
    Regular = 0,
    /// Substitutes for regular symbols when enabled
    Wild = 1,
    /// Counted anywhere on the grid, never part of a line
    Scatter = 2,
    /// Dead symbol that terminates a run
    Blocker = 3,
}

/// A reel symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    Skull,
    Wrench,
    Food,
    Radiation,
    Gem,
    Seven,
    Wild,
    Scatter,
}

impl Symbol {
    pub const ALL: [Symbol; 8] = [
        Symbol::Skull,
        Symbol::Wrench,
        Symbol::Food,
        Symbol::Radiation,
        Symbol::Gem,
        Symbol::Seven,
        Symbol::Wild,
        Symbol::Scatter,
    ];

    pub fn symbol_type(&self) -> SymbolType {
        match self {
            Symbol::Skull => SymbolType::Blocker,
            Symbol::Wild => SymbolType::Wild,
            Symbol::Scatter => SymbolType::Scatter,
            _ => SymbolType::Regular,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Symbol::Skull => "Skull",
            Symbol::Wrench => "Wrench",
            Symbol::Food => "Food",
            Symbol::Radiation => "Radiation",
            Symbol::Gem => "Gem",
            Symbol::Seven => "Seven",
            Symbol::Wild => "Wild",
            Symbol::Scatter => "Scatter",
        }
    }

    /// Three-letter code for compact grid dumps
    pub fn code(&self) -> &'static str {
        match self {
            Symbol::Skull => "SKL",
            Symbol::Wrench => "WRN",
            Symbol::Food => "FOD",
            Symbol::Radiation => "RAD",
            Symbol::Gem => "GEM",
            Symbol::Seven => "SVN",
            Symbol::Wild => "WLD",
            Symbol::Scatter => "SCT",
        }
    }

    /// Multipliers for 3, 4 and 5 of a kind
    pub fn pays(&self) -> Option<[u32; 3]> {
        match self {
            Symbol::Seven => Some([80, 250, 1000]),
            Symbol::Gem => Some([40, 100, 500]),
            Symbol::Radiation => Some([20, 50, 200]),
            Symbol::Food => Some([10, 30, 100]),
            Symbol::Wrench => Some([5, 15, 50]),
            _ => None,
        }
    }

    /// Get pay multiplier for a run length (0 below 3)
    pub fn get_pay(&self, run_length: u8) -> u32 {
        if !(3..=5).contains(&run_length) {
            return 0;
        }
        self.pays()
            .map(|p| p[(run_length - 3) as usize])
            .unwrap_or(0)
    }

    /// Skull and Scatter stop a payline run
    pub fn breaks_run(&self) -> bool {
        matches!(self.symbol_type(), SymbolType::Blocker | SymbolType::Scatter)
    }

    /// Can this symbol be the base of a payline
    pub fn can_anchor(&self) -> bool {
        self.symbol_type() == SymbolType::Regular
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of a weight table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolWeight {
    pub symbol: Symbol,
    pub weight: u32,
}

const fn w(symbol: Symbol, weight: u32) -> SymbolWeight {
    SymbolWeight { symbol, weight }
}

/// Base table for normal mode
pub const NORMAL_WEIGHTS: [SymbolWeight; 8] = [
    w(Symbol::Skull, 20),
    w(Symbol::Wrench, 25),
    w(Symbol::Food, 20),
    w(Symbol::Radiation, 15),
    w(Symbol::Gem, 10),
    w(Symbol::Seven, 4),
    w(Symbol::Wild, 4),
    w(Symbol::Scatter, 2),
];

/// Base table for VIP mode
pub const VIP_WEIGHTS: [SymbolWeight; 8] = [
    w(Symbol::Skull, 35),
    w(Symbol::Wrench, 10),
    w(Symbol::Food, 10),
    w(Symbol::Radiation, 15),
    w(Symbol::Gem, 15),
    w(Symbol::Seven, 8),
    w(Symbol::Wild, 4),
    w(Symbol::Scatter, 3),
];

/// Pool used when every symbol was excluded
pub const FALLBACK_POOL: SymbolWeight = w(Symbol::Wrench, 100);

/// Below this bet, non-VIP spins draw no scatters
pub const SCATTER_MIN_BET: i64 = 100;

/// The legal symbol-weight table for one spin
///
/// Always non-empty; entries keep base-table order, which the cumulative
/// draw depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedSymbolPool {
    entries: Vec<SymbolWeight>,
}

impl WeightedSymbolPool {
    /// Build the pool for a spin context
    ///
    /// 1. base table by VIP mode
    /// 2. non-VIP with bet below 100 drops Scatter
    /// 3. frenzy drops Skull and Wrench
    pub fn build(ctx: &SpinContext, frenzy: bool) -> Self {
        let base: &[SymbolWeight] = if ctx.vip_mode {
            &VIP_WEIGHTS
        } else {
            &NORMAL_WEIGHTS
        };

        let entries: Vec<SymbolWeight> = base
            .iter()
            .copied()
            .filter(|e| ctx.vip_mode || ctx.bet_amount >= SCATTER_MIN_BET || e.symbol != Symbol::Scatter)
            .filter(|e| !frenzy || !matches!(e.symbol, Symbol::Skull | Symbol::Wrench))
            .filter(|e| e.weight > 0)
            .collect();

        Self::from_entries(entries)
    }

    /// Pool from explicit entries, falling back to `{Wrench: 100}` when empty
    pub fn from_entries(entries: Vec<SymbolWeight>) -> Self {
        let entries: Vec<SymbolWeight> = entries.into_iter().filter(|e| e.weight > 0).collect();
        if entries.is_empty() {
            Self {
                entries: vec![FALLBACK_POOL],
            }
        } else {
            Self { entries }
        }
    }

    pub fn entries(&self) -> &[SymbolWeight] {
        &self.entries
    }

    pub fn total_weight(&self) -> u32 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    pub fn weight_of(&self, symbol: Symbol) -> u32 {
        self.entries
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| e.weight)
            .unwrap_or(0)
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.weight_of(symbol) > 0
    }

    /// Expected draw probability of a symbol
    pub fn probability(&self, symbol: Symbol) -> f64 {
        self.weight_of(symbol) as f64 / self.total_weight() as f64
    }

    /// Draw one symbol
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Symbol {
        let total = self.total_weight() as f64;
        self.pick(rng.random_range(0.0..total))
    }

    /// Resolve a draw `r` in `[0, total)` by cumulative subtraction
    pub fn pick(&self, r: f64) -> Symbol {
        let mut remainder = r;
        for entry in &self.entries {
            remainder -= entry.weight as f64;
            if remainder <= 0.0 {
                return entry.symbol;
            }
        }
        // rounding can leave a positive remainder
        self.entries
            .last()
            .map(|e| e.symbol)
            .unwrap_or(FALLBACK_POOL.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rr_stage::FundingSource;

    fn ctx(bet: i64, vip: bool) -> SpinContext {
        SpinContext::new(bet, vip, FundingSource::Cash)
    }

    #[test]
    fn test_symbol_pays() {
        assert_eq!(Symbol::Seven.get_pay(5), 1000);
        assert_eq!(Symbol::Wrench.get_pay(3), 5);
        assert_eq!(Symbol::Gem.get_pay(2), 0);
        assert_eq!(Symbol::Wild.get_pay(5), 0);
        assert!(Symbol::Skull.pays().is_none());
        assert!(Symbol::Scatter.breaks_run());
        assert!(!Symbol::Wild.breaks_run());
    }

    #[test]
    fn test_normal_pool_low_bet_drops_scatter() {
        let pool = WeightedSymbolPool::build(&ctx(50, false), false);
        assert!(!pool.contains(Symbol::Scatter));
        assert_eq!(pool.total_weight(), 98);
        assert_eq!(pool.entries()[0].symbol, Symbol::Skull);
    }

    #[test]
    fn test_normal_pool_high_bet_keeps_scatter() {
        let pool = WeightedSymbolPool::build(&ctx(100, false), false);
        assert_eq!(pool.weight_of(Symbol::Scatter), 2);
        assert_eq!(pool.total_weight(), 100);
    }

    #[test]
    fn test_vip_pool_keeps_scatter_at_any_bet() {
        let pool = WeightedSymbolPool::build(&ctx(10, true), false);
        assert_eq!(pool.weight_of(Symbol::Scatter), 3);
        assert_eq!(pool.weight_of(Symbol::Skull), 35);
    }

    #[test]
    fn test_frenzy_pool_drops_skull_and_wrench() {
        let pool = WeightedSymbolPool::build(&ctx(50, false), true);
        assert!(!pool.contains(Symbol::Skull));
        assert!(!pool.contains(Symbol::Wrench));
        assert_eq!(pool.entries()[0].symbol, Symbol::Food);
        assert_eq!(pool.total_weight(), 20 + 15 + 10 + 4 + 4);
    }

    #[test]
    fn test_empty_pool_falls_back() {
        let pool = WeightedSymbolPool::from_entries(vec![]);
        assert_eq!(pool.entries(), &[FALLBACK_POOL]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(pool.sample(&mut rng), Symbol::Wrench);
        }
    }

    #[test]
    fn test_pick_boundaries() {
        let pool = WeightedSymbolPool::build(&ctx(100, false), false);
        assert_eq!(pool.pick(0.0), Symbol::Skull);
        assert_eq!(pool.pick(20.0), Symbol::Skull);
        assert_eq!(pool.pick(20.5), Symbol::Wrench);
        assert_eq!(pool.pick(99.9), Symbol::Scatter);
        // past the end resolves to the last entry
        assert_eq!(pool.pick(1000.0), Symbol::Scatter);
    }

    #[test]
    fn test_sample_frequencies_converge() {
        let pool = WeightedSymbolPool::build(&ctx(100, true), false);
        let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);
        let draws = 200_000;
        let mut counts = std::collections::HashMap::new();
        for _ in 0..draws {
            *counts.entry(pool.sample(&mut rng)).or_insert(0u32) += 1;
        }
        for entry in pool.entries() {
            let observed = counts.get(&entry.symbol).copied().unwrap_or(0) as f64 / draws as f64;
            let expected = pool.probability(entry.symbol);
            assert!(
                (observed - expected).abs() < 0.01,
                "{}: observed {observed}, expected {expected}",
                entry.symbol
            );
        }
    }
}
