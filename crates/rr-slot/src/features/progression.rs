//! Energy meter, frenzy mode and the free-spin backlog
//!
//! ```text
//!            energy ≥ cap (non-frenzy spin)
//!   Normal ──────────────────────────────────▶ Frenzy
//!     ▲                                          │
//!     └──────── last frenzy spin consumed ───────┘
//! ```
//!
//! The free-spin backlog is orthogonal and can be non-zero in either state.

use serde::{Deserialize, Serialize};

use rr_stage::FundingSource;

/// Progression tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Energy at which frenzy triggers
    pub energy_cap: u32,
    /// Frenzy spins granted per trigger
    pub frenzy_spins_per_trigger: u32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            energy_cap: 42,
            frenzy_spins_per_trigger: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionMode {
    Normal,
    Frenzy,
}

/// What applying a spin's energy did to the meter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnergyUpdate {
    /// Energy actually added (0 for frenzy spins)
    pub delta: u32,
    /// Frenzy spins granted, non-zero only when the meter filled
    pub frenzy_spins_granted: u32,
}

impl EnergyUpdate {
    pub fn triggered(&self) -> bool {
        self.frenzy_spins_granted > 0
    }
}

/// Session-scoped progression state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    pub energy: u32,
    pub frenzy_active: bool,
    pub frenzy_spins_remaining: u32,
    pub free_spins_remaining: u32,
    /// Supplied by the engine config, never saved
    #[serde(skip)]
    config: ProgressionConfig,
}

impl ProgressionState {
    pub fn new() -> Self {
        Self::with_config(ProgressionConfig::default())
    }

    pub fn with_config(config: ProgressionConfig) -> Self {
        Self {
            energy: 0,
            frenzy_active: false,
            frenzy_spins_remaining: 0,
            free_spins_remaining: 0,
            config,
        }
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    /// Same meters under another cap and frenzy allotment
    pub fn reconfigured(mut self, config: ProgressionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn mode(&self) -> ProgressionMode {
        if self.frenzy_active {
            ProgressionMode::Frenzy
        } else {
            ProgressionMode::Normal
        }
    }

    /// Any free spin, frenzy spin or frenzy flag outstanding
    pub fn has_pending_feature(&self) -> bool {
        self.frenzy_active || self.frenzy_spins_remaining > 0 || self.free_spins_remaining > 0
    }

    // ═══════════════════════════════════════════════════════════════════════
    // FUNDING
    // ═══════════════════════════════════════════════════════════════════════

    /// Funding the next spin would use: free spins first, then frenzy, then cash
    pub fn next_funding(&self) -> FundingSource {
        if self.free_spins_remaining > 0 {
            FundingSource::FreeSpin
        } else if self.frenzy_spins_remaining > 0 {
            FundingSource::FrenzySpin
        } else {
            FundingSource::Cash
        }
    }

    /// Use up one spin of the given kind
    pub fn consume(&mut self, funding: FundingSource) {
        match funding {
            FundingSource::FreeSpin => {
                self.free_spins_remaining = self.free_spins_remaining.saturating_sub(1)
            }
            FundingSource::FrenzySpin => {
                self.frenzy_spins_remaining = self.frenzy_spins_remaining.saturating_sub(1)
            }
            FundingSource::Cash => {}
        }
    }

    /// A spin counts as frenzy when frenzy is active or it was frenzy-funded
    pub fn is_frenzy_spin(&self, funding: FundingSource) -> bool {
        self.frenzy_active || funding == FundingSource::FrenzySpin
    }

    // ═══════════════════════════════════════════════════════════════════════
    // TRANSITIONS
    // ═══════════════════════════════════════════════════════════════════════

    /// Add line energy from a non-frenzy spin, triggering frenzy at the cap
    pub fn apply_energy(&mut self, gain: u32, frenzy_spin: bool) -> EnergyUpdate {
        if frenzy_spin {
            return EnergyUpdate::default();
        }

        let total = self.energy + gain;
        if total >= self.config.energy_cap {
            self.energy = 0;
            self.frenzy_active = true;
            self.frenzy_spins_remaining += self.config.frenzy_spins_per_trigger;
            log::info!(
                "Energy core full ({}), frenzy for {} spins",
                total,
                self.config.frenzy_spins_per_trigger
            );
            EnergyUpdate {
                delta: gain,
                frenzy_spins_granted: self.config.frenzy_spins_per_trigger,
            }
        } else {
            self.energy = total;
            EnergyUpdate {
                delta: gain,
                frenzy_spins_granted: 0,
            }
        }
    }

    /// Close frenzy once a frenzy-funded spin used the last allotment.
    /// Returns true when frenzy ended.
    pub fn finish_spin(&mut self, funding: FundingSource) -> bool {
        if funding == FundingSource::FrenzySpin
            && self.frenzy_spins_remaining == 0
            && self.frenzy_active
        {
            self.frenzy_active = false;
            return true;
        }
        false
    }

    pub fn grant_free_spins(&mut self, count: u32) {
        self.free_spins_remaining += count;
    }

    /// Restore invariants after loading: energy below cap, frenzy flag
    /// consistent with the frenzy allotment
    pub fn sanitized(mut self) -> Self {
        if self.energy >= self.config.energy_cap {
            log::warn!(
                "Energy {} at or above cap {}, reset",
                self.energy,
                self.config.energy_cap
            );
            self.energy = 0;
        }
        if self.frenzy_active && self.frenzy_spins_remaining == 0 {
            self.frenzy_active = false;
        }
        self
    }
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self::new()
    }
}
