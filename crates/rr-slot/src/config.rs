//! Engine configuration
//!
//! Paytable, paylines and weight tables are fixed; everything tunable lives
//! here and loads from JSON or YAML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::features::{BonusBoxConfig, JackpotConfig, ProgressionConfig};
use crate::payout::MoraleConfig;
use crate::timing::RevealTiming;

/// Allowed bets for one mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetRange {
    pub min: i64,
    pub max: i64,
    pub step: i64,
    /// Bet selected when switching into this mode
    pub default: i64,
}

impl BetRange {
    pub fn contains(&self, bet: i64) -> bool {
        (self.min..=self.max).contains(&bet)
    }
}

/// Caller-side bet bounds for normal and VIP mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BetLimits {
    pub normal: BetRange,
    pub vip: BetRange,
}

impl Default for BetLimits {
    fn default() -> Self {
        Self {
            normal: BetRange {
                min: 10,
                max: 500,
                step: 10,
                default: 50,
            },
            vip: BetRange {
                min: 500,
                max: 5000,
                step: 100,
                default: 500,
            },
        }
    }
}

impl BetLimits {
    pub fn range(&self, vip: bool) -> &BetRange {
        if vip { &self.vip } else { &self.normal }
    }

    pub fn default_bet(&self, vip: bool) -> i64 {
        self.range(vip).default
    }

    pub fn clamp(&self, bet: i64, vip: bool) -> i64 {
        let range = self.range(vip);
        bet.clamp(range.min, range.max)
    }

    /// Largest bet the mode and balance allow
    pub fn max_bet(&self, vip: bool, balance: i64) -> i64 {
        let range = self.range(vip);
        range.max.min(balance).max(range.min)
    }

    pub fn step_up(&self, bet: i64, vip: bool, balance: i64) -> i64 {
        let range = self.range(vip);
        (bet + range.step).min(self.max_bet(vip, balance))
    }

    pub fn step_down(&self, bet: i64, vip: bool) -> i64 {
        let range = self.range(vip);
        (bet - range.step).max(range.min)
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    /// Game name
    pub name: String,
    pub progression: ProgressionConfig,
    pub jackpot: JackpotConfig,
    pub timing: RevealTiming,
    pub morale: MoraleConfig,
    pub bonus_box: BonusBoxConfig,
    pub bet_limits: BetLimits,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            name: "RadReels".into(),
            progression: ProgressionConfig::default(),
            jackpot: JackpotConfig::default(),
            timing: RevealTiming::default(),
            morale: MoraleConfig::default(),
            bonus_box: BonusBoxConfig::default(),
            bet_limits: BetLimits::default(),
        }
    }
}

impl SlotConfig {
    /// Config for simulation: no reveal delays
    pub fn simulation() -> Self {
        Self {
            name: "RadReels Simulation".into(),
            timing: RevealTiming::instant(),
            ..Default::default()
        }
    }

    /// Enable the bonus-box round
    pub fn with_bonus_box(mut self, enabled: bool) -> Self {
        self.bonus_box.enabled = enabled;
        self
    }

    pub fn with_timing(mut self, timing: RevealTiming) -> Self {
        self.timing = timing;
        self
    }

    // ═══════════════════════════════════════════════════════════════════════
    // LOAD / SAVE
    // ═══════════════════════════════════════════════════════════════════════

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yml::to_string(self)?)
    }

    /// Load by file extension (`.json`, `.yaml`, `.yml`)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let config = match ext.as_str() {
            "json" => Self::from_json(&text)?,
            "yaml" | "yml" => Self::from_yaml(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        log::info!("Loaded config '{}' from {}", config.name, path.display());
        Ok(config)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.progression.energy_cap == 0 {
            return Err(ConfigError::InvalidValue("energy_cap must be positive".into()));
        }

        for (name, tier) in [
            ("mini", &self.jackpot.mini),
            ("major", &self.jackpot.major),
            ("grand", &self.jackpot.grand),
        ] {
            if tier.base < 0 {
                return Err(ConfigError::InvalidValue(format!("{name} jackpot base is negative")));
            }
            if !(tier.contribution_rate >= 0.0 && tier.contribution_rate.is_finite()) {
                return Err(ConfigError::InvalidValue(format!(
                    "{name} contribution_rate must be a non-negative number"
                )));
            }
        }

        let t = &self.timing;
        if [t.first_reel_ms, t.reel_interval_ms, t.teaser_reel_ms]
            .iter()
            .any(|ms| !(ms.is_finite() && *ms >= 0.0))
        {
            return Err(ConfigError::InvalidValue("reveal delays must be non-negative".into()));
        }

        if self.bonus_box.enabled {
            if self.bonus_box.box_count == 0 {
                return Err(ConfigError::InvalidValue("bonus box_count must be positive".into()));
            }
            if self.bonus_box.prize_multipliers.is_empty() {
                return Err(ConfigError::InvalidValue("bonus prize table is empty".into()));
            }
        }

        for (name, range) in [("normal", &self.bet_limits.normal), ("vip", &self.bet_limits.vip)] {
            if range.min <= 0 || range.max < range.min || range.step <= 0 {
                return Err(ConfigError::InvalidValue(format!("{name} bet range is invalid")));
            }
        }

        Ok(())
    }
}
