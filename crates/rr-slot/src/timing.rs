//! Reveal timing profiles

use serde::{Deserialize, Serialize};

use crate::grid::COLS;

/// Index of the reel that waits longer when the teaser is on
pub const TEASER_REEL: usize = COLS - 1;

/// Timing profile for the column reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingProfile {
    /// Normal gameplay timing
    Normal,
    /// Fast mode
    Turbo,
    /// No delays (simulation and tests)
    Instant,
    /// Hand-tuned values
    Custom,
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self::Normal
    }
}

/// Per-column reveal delays
///
/// When deserialized, `profile` picks the default delays and any `*_ms`
/// field present overrides its value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RevealTimingDef")]
pub struct RevealTiming {
    pub profile: TimingProfile,

    /// Delay before the first reel stops (ms)
    pub first_reel_ms: f64,

    /// Delay between later reel stops (ms)
    pub reel_interval_ms: f64,

    /// Delay before the last reel stops while the teaser is on (ms)
    pub teaser_reel_ms: f64,
}

/// Wire form of [`RevealTiming`]
#[derive(Deserialize)]
struct RevealTimingDef {
    #[serde(default)]
    profile: TimingProfile,
    first_reel_ms: Option<f64>,
    reel_interval_ms: Option<f64>,
    teaser_reel_ms: Option<f64>,
}

impl From<RevealTimingDef> for RevealTiming {
    fn from(def: RevealTimingDef) -> Self {
        let base = Self::from_profile(def.profile);
        Self {
            profile: def.profile,
            first_reel_ms: def.first_reel_ms.unwrap_or(base.first_reel_ms),
            reel_interval_ms: def.reel_interval_ms.unwrap_or(base.reel_interval_ms),
            teaser_reel_ms: def.teaser_reel_ms.unwrap_or(base.teaser_reel_ms),
        }
    }
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self::normal()
    }
}

impl RevealTiming {
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            first_reel_ms: 500.0,
            reel_interval_ms: 300.0,
            teaser_reel_ms: 2000.0,
        }
    }

    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            first_reel_ms: 250.0,
            reel_interval_ms: 150.0,
            teaser_reel_ms: 1000.0,
        }
    }

    pub fn instant() -> Self {
        Self {
            profile: TimingProfile::Instant,
            first_reel_ms: 0.0,
            reel_interval_ms: 0.0,
            teaser_reel_ms: 0.0,
        }
    }

    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal | TimingProfile::Custom => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Instant => Self::instant(),
        }
    }

    /// Scale all delays
    pub fn scaled(&self, factor: f64) -> Self {
        let factor = factor.max(0.0);
        Self {
            profile: TimingProfile::Custom,
            first_reel_ms: self.first_reel_ms * factor,
            reel_interval_ms: self.reel_interval_ms * factor,
            teaser_reel_ms: self.teaser_reel_ms * factor,
        }
    }

    /// Wait before `reel` stops, counted from the previous stop
    pub fn delay_for(&self, reel: usize, teaser: bool) -> f64 {
        if reel == 0 {
            self.first_reel_ms
        } else if reel == TEASER_REEL && teaser {
            self.teaser_reel_ms
        } else {
            self.reel_interval_ms
        }
    }

    /// Stop times of every reel, relative to the spin start
    pub fn schedule(&self, teaser: bool) -> [f64; COLS] {
        let mut generator = TimestampGenerator::new(*self);
        let mut times = [0.0; COLS];
        for (reel, time) in times.iter_mut().enumerate() {
            *time = generator.reel_stop(reel, teaser);
        }
        times
    }

    pub fn total_duration(&self, teaser: bool) -> f64 {
        self.schedule(teaser)[COLS - 1]
    }
}

/// Accumulates reel stop timestamps
#[derive(Debug, Clone)]
pub struct TimestampGenerator {
    current_ms: f64,
    timing: RevealTiming,
}

impl TimestampGenerator {
    pub fn new(timing: RevealTiming) -> Self {
        Self {
            current_ms: 0.0,
            timing,
        }
    }

    /// Advance by duration and return new timestamp
    pub fn advance(&mut self, duration_ms: f64) -> f64 {
        self.current_ms += duration_ms.max(0.0);
        self.current_ms
    }

    /// Advance for reel stop
    pub fn reel_stop(&mut self, reel: usize, teaser: bool) -> f64 {
        self.advance(self.timing.delay_for(reel, teaser))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_schedule() {
        let timing = RevealTiming::normal();
        assert_eq!(timing.schedule(false), [500.0, 800.0, 1100.0, 1400.0, 1700.0]);
        assert_eq!(timing.schedule(true), [500.0, 800.0, 1100.0, 1400.0, 3400.0]);
    }

    #[test]
    fn test_instant_schedule_is_zero() {
        let timing = RevealTiming::from_profile(TimingProfile::Instant);
        assert_eq!(timing.total_duration(true), 0.0);
    }

    #[test]
    fn test_scaled() {
        let timing = RevealTiming::normal().scaled(0.5);
        assert_eq!(timing.profile, TimingProfile::Custom);
        assert!((timing.teaser_reel_ms - 1000.0).abs() < 1e-9);
        assert!((timing.delay_for(2, true) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_profile_selects_delays() {
        let timing: RevealTiming = serde_json::from_str(r#"{"profile":"instant"}"#).unwrap();
        assert_eq!(timing.total_duration(true), 0.0);

        let timing: RevealTiming = serde_json::from_str(r#"{"profile":"turbo"}"#).unwrap();
        assert_eq!(timing, RevealTiming::turbo());

        let timing: RevealTiming =
            serde_json::from_str(r#"{"profile":"turbo","teaser_reel_ms":1800.0}"#).unwrap();
        assert_eq!(timing.first_reel_ms, 250.0);
        assert_eq!(timing.teaser_reel_ms, 1800.0);

        let timing: RevealTiming = serde_json::from_str("{}").unwrap();
        assert_eq!(timing, RevealTiming::normal());
    }

    #[test]
    fn test_timestamp_generator() {
        let mut ts = TimestampGenerator::new(RevealTiming::turbo());
        let t0 = ts.reel_stop(0, false);
        let t1 = ts.reel_stop(1, false);
        assert_eq!(t0, 250.0);
        assert_eq!(t1, 400.0);
        assert_eq!(ts.advance(-5.0), 400.0);
    }
}
