//! Progressive jackpot pools
//!
//! Three pots fed by cash wagers. A pot never drops below its base value and
//! returns to exactly that base when it is won.

use serde::{Deserialize, Serialize};

use rr_stage::JackpotTier;

use crate::spin::JackpotWin;

/// Jackpot tier configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JackpotTierConfig {
    /// Value the pot starts at and resets to
    pub base: i64,
    /// Share of each cash bet added to the pot (floored)
    pub contribution_rate: f64,
}

impl JackpotTierConfig {
    pub fn mini() -> Self {
        Self {
            base: 2000,
            contribution_rate: 0.05,
        }
    }

    pub fn major() -> Self {
        Self {
            base: 8000,
            contribution_rate: 0.03,
        }
    }

    pub fn grand() -> Self {
        Self {
            base: 20000,
            contribution_rate: 0.02,
        }
    }
}

/// Jackpot system configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JackpotConfig {
    pub mini: JackpotTierConfig,
    pub major: JackpotTierConfig,
    pub grand: JackpotTierConfig,
}

impl Default for JackpotConfig {
    fn default() -> Self {
        Self {
            mini: JackpotTierConfig::mini(),
            major: JackpotTierConfig::major(),
            grand: JackpotTierConfig::grand(),
        }
    }
}

impl JackpotConfig {
    pub fn tier(&self, tier: JackpotTier) -> &JackpotTierConfig {
        match tier {
            JackpotTier::Mini => &self.mini,
            JackpotTier::Major => &self.major,
            JackpotTier::Grand => &self.grand,
        }
    }
}

/// The three progressive pots of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JackpotPool {
    /// Supplied by the engine config, never saved
    #[serde(skip)]
    config: JackpotConfig,
    values: [i64; 3],
    #[serde(default)]
    total_contributions: i64,
}

impl JackpotPool {
    pub fn new() -> Self {
        Self::with_config(JackpotConfig::default())
    }

    pub fn with_config(config: JackpotConfig) -> Self {
        let values = JackpotTier::ALL.map(|t| config.tier(t).base);
        Self {
            config,
            values,
            total_contributions: 0,
        }
    }

    pub fn config(&self) -> &JackpotConfig {
        &self.config
    }

    /// Same pot values under another tier configuration
    pub fn reconfigured(mut self, config: JackpotConfig) -> Self {
        self.config = config;
        self
    }

    /// Current value of a pot
    pub fn value(&self, tier: JackpotTier) -> i64 {
        self.values[tier.index()]
    }

    pub fn base(&self, tier: JackpotTier) -> i64 {
        self.config.tier(tier).base
    }

    pub fn total_contributions(&self) -> i64 {
        self.total_contributions
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ACCRUAL / AWARD
    // ═══════════════════════════════════════════════════════════════════════

    /// Feed every pot from a cash bet; returns the amount added
    pub fn accrue(&mut self, bet: i64) -> i64 {
        let mut added = 0;
        for tier in JackpotTier::ALL {
            let rate = self.config.tier(tier).contribution_rate;
            let contribution = (bet as f64 * rate).floor().max(0.0) as i64;
            self.values[tier.index()] += contribution;
            added += contribution;
        }
        self.total_contributions += added;
        added
    }

    /// Pay out a pot and reset it to its base
    pub fn award(&mut self, tier: JackpotTier) -> JackpotWin {
        let amount = self.values[tier.index()];
        self.values[tier.index()] = self.base(tier);
        log::info!("{} jackpot awarded: {}", tier, amount);
        JackpotWin { tier, amount }
    }

    /// Raise any pot below its base back to the base
    pub fn sanitized(mut self) -> Self {
        for tier in JackpotTier::ALL {
            let base = self.base(tier);
            let value = &mut self.values[tier.index()];
            if *value < base {
                log::warn!("{} jackpot below base ({} < {}), clamped", tier, *value, base);
                *value = base;
            }
        }
        self
    }
}

impl Default for JackpotPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pools_start_at_base() {
        let pool = JackpotPool::new();
        assert_eq!(pool.value(JackpotTier::Mini), 2000);
        assert_eq!(pool.value(JackpotTier::Major), 8000);
        assert_eq!(pool.value(JackpotTier::Grand), 20000);
    }

    #[test]
    fn test_accrue_floors_each_share() {
        let mut pool = JackpotPool::new();
        let added = pool.accrue(50);
        // 2.5 → 2, 1.5 → 1, 1.0 → 1
        assert_eq!(added, 4);
        assert_eq!(pool.value(JackpotTier::Mini), 2002);
        assert_eq!(pool.value(JackpotTier::Major), 8001);
        assert_eq!(pool.value(JackpotTier::Grand), 20001);

        pool.accrue(10);
        assert_eq!(pool.value(JackpotTier::Major), 8001);
        assert_eq!(pool.total_contributions(), 4);
    }

    #[test]
    fn test_award_resets_to_base() {
        let mut pool = JackpotPool::new();
        for _ in 0..10 {
            pool.accrue(500);
        }
        assert_eq!(pool.value(JackpotTier::Mini), 2250);
        let win = pool.award(JackpotTier::Mini);
        assert_eq!(win.amount, 2250);
        assert_eq!(win.tier, JackpotTier::Mini);
        assert_eq!(pool.value(JackpotTier::Mini), 2000);
        // others untouched
        assert_eq!(pool.value(JackpotTier::Grand), 20100);
    }

    #[test]
    fn test_values_never_below_base() {
        let mut pool = JackpotPool::new();
        for bet in [0, 1, 7, 10, 55, 5000] {
            pool.accrue(bet);
            for tier in JackpotTier::ALL {
                assert!(pool.value(tier) >= pool.base(tier));
            }
        }
        for tier in JackpotTier::ALL {
            pool.award(tier);
            assert_eq!(pool.value(tier), pool.base(tier));
        }
    }

    #[test]
    fn test_sanitized_restores_invariant() {
        let json = r#"{"values":[10,9000,0]}"#;
        let pool: JackpotPool = serde_json::from_str(json).unwrap();
        let pool = pool.sanitized();
        assert_eq!(pool.value(JackpotTier::Mini), 2000);
        assert_eq!(pool.value(JackpotTier::Major), 9000);
        assert_eq!(pool.value(JackpotTier::Grand), 20000);
    }

    #[test]
    fn test_config_not_saved() {
        let mut config = JackpotConfig::default();
        config.mini.base = 5000;
        let pool = JackpotPool::with_config(config);
        let json = serde_json::to_string(&pool).unwrap();
        assert!(!json.contains("contribution_rate"));

        let restored: JackpotPool = serde_json::from_str(&json).unwrap();
        let restored = restored.reconfigured(config).sanitized();
        assert_eq!(restored.base(JackpotTier::Mini), 5000);
        assert_eq!(restored, pool);
    }
}
