//! Slot machine — session state, funding, outcome resolution and settlement
//!
//! ```text
//! request_spin ─▶ fund (free → frenzy → cash) ─▶ SpinResolver ─▶ SpinSequencer
//!                                                                    │ tick / skip
//!                                                                    ▼
//!                                                 settle: Ledger + stats + stages
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use rr_stage::{FundingSource, JackpotTier, Stage, StageCategory, StageEvent, StageTrace};

use crate::config::SlotConfig;
use crate::error::{ConfigError, SlotError, SlotResult};
use crate::features::{BonusBoxRound, BonusPick, JackpotPool, ProgressionState};
use crate::grid::{Grid, GridGenerator};
use crate::ledger::Ledger;
use crate::paytable::PaylineEvaluator;
use crate::payout::PayoutCalculator;
use crate::sequencer::{Clock, SequencerState, SpinSequencer, SystemClock};
use crate::spin::{SpinContext, SpinOutcome};
use crate::symbols::WeightedSymbolPool;

// ═══════════════════════════════════════════════════════════════════════════
// SESSION STATE
// ═══════════════════════════════════════════════════════════════════════════

/// Jackpots and progression that survive across spins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub jackpots: JackpotPool,
    pub progression: ProgressionState,
}

impl SessionState {
    pub fn new(config: &SlotConfig) -> Self {
        Self {
            jackpots: JackpotPool::with_config(config.jackpot),
            progression: ProgressionState::with_config(config.progression),
        }
    }

    /// Attach the engine's tier and progression settings to restored values
    pub fn reconfigured(self, config: &SlotConfig) -> Self {
        Self {
            jackpots: self.jackpots.reconfigured(config.jackpot),
            progression: self.progression.reconfigured(config.progression),
        }
    }

    /// Clamp restored values back into their invariants
    pub fn sanitized(self) -> Self {
        Self {
            jackpots: self.jackpots.sanitized(),
            progression: self.progression.sanitized(),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(&SlotConfig::default())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// RESOLVER
// ═══════════════════════════════════════════════════════════════════════════

/// Computes a complete outcome and applies it to the session state
#[derive(Debug, Clone, Default)]
pub struct SpinResolver {
    payout: PayoutCalculator,
}

impl SpinResolver {
    pub fn new(config: &SlotConfig) -> Self {
        Self {
            payout: PayoutCalculator::new(config.morale),
        }
    }

    /// Draw a grid for an already funded spin and resolve it
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        session: &mut SessionState,
        spin_id: impl Into<String>,
        ctx: SpinContext,
        rng: &mut R,
    ) -> SpinOutcome {
        let frenzy = session.progression.is_frenzy_spin(ctx.funded_by);
        let pool = WeightedSymbolPool::build(&ctx, frenzy);
        let grid = GridGenerator::generate(&pool, rng);
        self.resolve_with_grid(session, spin_id, ctx, grid)
    }

    /// Resolve a known grid: score lines, pay out, award jackpot, grant free
    /// spins, move the energy meter
    pub fn resolve_with_grid(
        &self,
        session: &mut SessionState,
        spin_id: impl Into<String>,
        ctx: SpinContext,
        grid: Grid,
    ) -> SpinOutcome {
        let frenzy = session.progression.is_frenzy_spin(ctx.funded_by);
        let eval = PaylineEvaluator::evaluate(&grid, &ctx);
        let payout = self
            .payout
            .calculate(&eval, &grid, &ctx, frenzy, &mut session.jackpots);

        session.progression.grant_free_spins(payout.free_spins_granted);
        let energy = session.progression.apply_energy(eval.energy_gain, frenzy);
        let frenzy_ended = session.progression.finish_spin(ctx.funded_by);

        SpinOutcome {
            spin_id: spin_id.into(),
            context: ctx,
            grid,
            line_wins: eval.line_wins,
            winning_cells: eval.winning_cells,
            total_multiplier: eval.total_multiplier,
            frenzy_multiplier: payout.frenzy_multiplier,
            line_award: payout.line_award,
            currency_award: payout.currency_award,
            jackpot_awarded: payout.jackpot,
            scatter_count: payout.scatter_count,
            free_spins_granted: payout.free_spins_granted,
            energy_delta: energy.delta,
            frenzy_triggered: energy.triggered(),
            frenzy_spins_granted: energy.frenzy_spins_granted,
            frenzy_ended,
            teaser_signal: payout.teaser_signal,
            morale_delta: payout.morale_delta,
            bonus_offered: false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// STATS
// ═══════════════════════════════════════════════════════════════════════════

/// Session statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub cash_spins: u64,
    pub free_spins_played: u64,
    pub frenzy_spins_played: u64,
    /// Cash charged for spins
    pub total_wagered: i64,
    /// Currency credited, bonus boxes included
    pub total_won: i64,
    pub wins: u64,
    pub losses: u64,
    /// Mini, Major, Grand
    pub jackpots_won: [u64; 3],
    pub frenzies_triggered: u64,
    pub free_spins_awarded: u64,
    pub bonus_boxes_opened: u64,
    pub biggest_award: i64,
}

impl SessionStats {
    /// Return to player, percent
    pub fn rtp(&self) -> f64 {
        if self.total_wagered > 0 {
            (self.total_won as f64 / self.total_wagered as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            (self.wins as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn jackpots(&self, tier: JackpotTier) -> u64 {
        self.jackpots_won[tier.index()]
    }

    fn record_funding(&mut self, ctx: &SpinContext) {
        self.total_spins += 1;
        match ctx.funded_by {
            FundingSource::Cash => {
                self.cash_spins += 1;
                self.total_wagered += ctx.bet_amount;
            }
            FundingSource::FreeSpin => self.free_spins_played += 1,
            FundingSource::FrenzySpin => self.frenzy_spins_played += 1,
        }
    }

    fn record_outcome(&mut self, outcome: &SpinOutcome) {
        if outcome.is_win() {
            self.wins += 1;
            self.total_won += outcome.currency_award;
            self.biggest_award = self.biggest_award.max(outcome.currency_award);
        } else {
            self.losses += 1;
        }
        if let Some(tier) = outcome.jackpot_tier() {
            self.jackpots_won[tier.index()] += 1;
        }
        if outcome.frenzy_triggered {
            self.frenzies_triggered += 1;
        }
        self.free_spins_awarded += outcome.free_spins_granted as u64;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// MACHINE
// ═══════════════════════════════════════════════════════════════════════════

/// Answer to a spin request
#[derive(Debug, Clone, PartialEq)]
pub enum SpinResponse {
    /// Funded and resolved; the reveal is under way
    Accepted(SpinOutcome),
    /// A spin or bonus is still in progress
    Ignored,
}

impl SpinResponse {
    pub fn outcome(&self) -> Option<&SpinOutcome> {
        match self {
            Self::Accepted(outcome) => Some(outcome),
            Self::Ignored => None,
        }
    }
}

/// The reward engine bound to a player ledger
pub struct SlotMachine<L: Ledger> {
    config: SlotConfig,
    resolver: SpinResolver,
    session: SessionState,
    sequencer: SpinSequencer,
    ledger: L,
    clock: Box<dyn Clock>,
    rng: ChaCha8Rng,
    spin_count: u64,
    stats: SessionStats,
    trace: Option<StageTrace>,
    pending_bonus: Option<BonusBoxRound>,
    bet: i64,
    vip_mode: bool,
}

impl<L: Ledger> SlotMachine<L> {
    pub fn new(config: SlotConfig, ledger: L) -> Self {
        let session = SessionState::new(&config);
        let bet = config.bet_limits.default_bet(false);
        Self {
            resolver: SpinResolver::new(&config),
            session,
            sequencer: SpinSequencer::new(),
            ledger,
            clock: Box::new(SystemClock::new()),
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
            spin_count: 0,
            stats: SessionStats::default(),
            trace: None,
            pending_bonus: None,
            bet,
            vip_mode: false,
            config,
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed(seed);
        self
    }

    /// Resume a saved session
    pub fn with_session(mut self, session: SessionState) -> Self {
        self.session = session.reconfigured(&self.config).sanitized();
        self
    }

    /// Seed RNG for reproducibility
    pub fn seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn jackpots(&self) -> &JackpotPool {
        &self.session.jackpots
    }

    pub fn progression(&self) -> &ProgressionState {
        &self.session.progression
    }

    pub fn state(&self) -> SequencerState {
        self.sequencer.state()
    }

    pub fn is_idle(&self) -> bool {
        self.sequencer.is_idle()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SessionStats::default();
    }

    /// Stage trace of the current or most recent spin
    pub fn trace(&self) -> Option<&StageTrace> {
        self.trace.as_ref()
    }

    /// Outcome currently being revealed
    pub fn revealing(&self) -> Option<&SpinOutcome> {
        self.sequencer.outcome()
    }

    pub fn revealed_columns(&self) -> usize {
        self.sequencer.revealed_columns()
    }

    pub fn pending_bonus(&self) -> Option<&BonusBoxRound> {
        self.pending_bonus.as_ref()
    }

    pub fn bet(&self) -> i64 {
        self.bet
    }

    pub fn vip_mode(&self) -> bool {
        self.vip_mode
    }

    // ═══════════════════════════════════════════════════════════════════════
    // WAGER
    // ═══════════════════════════════════════════════════════════════════════

    /// Bet and mode can change only between spins with no feature outstanding
    pub fn can_change_wager(&self) -> bool {
        self.sequencer.is_idle() && !self.session.progression.has_pending_feature()
    }

    /// Switch mode; the bet resets to the mode default
    pub fn set_vip_mode(&mut self, vip: bool) -> SlotResult<()> {
        if !self.can_change_wager() {
            return Err(SlotError::WagerLocked);
        }
        self.vip_mode = vip;
        self.bet = self.config.bet_limits.default_bet(vip);
        Ok(())
    }

    /// Set the bet, clamped to the current mode's range
    pub fn set_bet(&mut self, bet: i64) -> SlotResult<i64> {
        if !self.can_change_wager() {
            return Err(SlotError::WagerLocked);
        }
        self.bet = self.config.bet_limits.clamp(bet, self.vip_mode);
        Ok(self.bet)
    }

    pub fn max_bet(&mut self) -> SlotResult<i64> {
        let max = self
            .config
            .bet_limits
            .max_bet(self.vip_mode, self.ledger.balance());
        self.set_bet(max)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SPIN
    // ═══════════════════════════════════════════════════════════════════════

    /// Spin with the current wager
    pub fn spin(&mut self) -> SlotResult<SpinResponse> {
        self.request_spin(self.bet, self.vip_mode)
    }

    /// Fund, resolve and start revealing a spin
    ///
    /// Ignored while a spin or bonus is in progress. Funding order is free
    /// spin, then frenzy spin, then cash; a cash spin needs `bet <= balance`
    /// and feeds the jackpot pools before the outcome is drawn.
    pub fn request_spin(&mut self, bet: i64, vip_mode: bool) -> SlotResult<SpinResponse> {
        if !self.sequencer.is_idle() {
            log::debug!("Spin request ignored ({:?})", self.sequencer.state());
            return Ok(SpinResponse::Ignored);
        }

        if bet <= 0 {
            log::warn!("Rejected spin with bet {}", bet);
            self.ledger.record(&Stage::BetRejected { bet }.to_string());
            return Err(SlotError::InvalidBet(bet));
        }

        let funded_by = self.session.progression.next_funding();
        if funded_by.is_cash() {
            let balance = self.ledger.balance();
            if bet > balance {
                log::warn!("Insufficient funds: balance {}, bet {}", balance, bet);
                self.ledger
                    .record(&Stage::InsufficientFunds { balance, bet }.to_string());
                return Err(SlotError::InsufficientFunds { balance, bet });
            }
            self.ledger.apply_currency(-bet);
            self.session.jackpots.accrue(bet);
        } else {
            self.session.progression.consume(funded_by);
        }

        self.spin_count += 1;
        let spin_id = format!("spin-{:06}", self.spin_count);
        let ctx = SpinContext::new(bet, vip_mode, funded_by);
        self.stats.record_funding(&ctx);

        let mut outcome = self
            .resolver
            .resolve(&mut self.session, spin_id.as_str(), ctx, &mut self.rng);

        if self.config.bonus_box.enabled && outcome.frenzy_triggered {
            self.pending_bonus = Some(BonusBoxRound::offer(
                &self.config.bonus_box,
                spin_id.as_str(),
                bet,
                &mut self.rng,
            ));
            outcome.bonus_offered = true;
        }

        log::debug!(
            "{} ({}, bet {}): award {}, lines {}\n{}",
            spin_id,
            funded_by.display_name(),
            bet,
            outcome.currency_award,
            outcome.winning_line_count(),
            outcome.grid
        );

        let now = self.clock.now_ms();
        let mut trace = StageTrace::new(spin_id.as_str())
            .with_metadata("vip_mode", serde_json::Value::Bool(vip_mode))
            .with_metadata("timing", serde_json::json!(self.config.timing.profile));
        if let Some(event) = self
            .sequencer
            .begin(outcome.clone(), now, &self.config.timing)
        {
            trace.push(event);
        }
        self.trace = Some(trace);

        // zero-delay timing resolves on the spot
        self.tick();

        Ok(SpinResponse::Accepted(outcome))
    }

    /// Reveal whatever is due; settles and returns the outcome once the
    /// last column is shown
    pub fn tick(&mut self) -> Option<SpinOutcome> {
        let now = self.clock.now_ms();
        let events = self.sequencer.poll(now);
        self.publish(events);
        self.settle_if_resolved(now)
    }

    /// Show every remaining column now. Repeated calls are no-ops.
    pub fn skip(&mut self) -> Option<SpinOutcome> {
        if self.sequencer.state() != SequencerState::Spinning {
            return None;
        }
        let now = self.clock.now_ms();
        let events: Vec<StageEvent> = self
            .sequencer
            .skip(now)
            .into_iter()
            .map(|event| event.with_tag("skipped"))
            .collect();
        if let Some(trace) = self.trace.as_mut() {
            trace.skipped = true;
        }
        self.publish(events);
        self.settle_if_resolved(now)
    }

    /// Request a spin and skip straight to its settlement
    pub fn spin_to_completion(&mut self, bet: i64, vip_mode: bool) -> SlotResult<Option<SpinOutcome>> {
        match self.request_spin(bet, vip_mode)? {
            SpinResponse::Ignored => Ok(None),
            SpinResponse::Accepted(outcome) => {
                self.skip();
                Ok(Some(outcome))
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // BONUS
    // ═══════════════════════════════════════════════════════════════════════

    /// Open one of the offered boxes and return to idle
    pub fn pick_bonus_box(&mut self, index: usize) -> SlotResult<BonusPick> {
        if self.sequencer.state() != SequencerState::BonusPending {
            return Err(SlotError::NoBonusPending);
        }
        let round = self.pending_bonus.as_mut().ok_or(SlotError::NoBonusPending)?;
        let pick = round.pick(index)?;

        if pick.prize > 0 {
            self.ledger.apply_currency(pick.prize);
        }
        self.stats.bonus_boxes_opened += 1;
        self.stats.total_won += pick.prize;
        log::info!("Bonus box {} opened: {}", pick.box_index, pick.prize);

        let offset = (self.clock.now_ms() - self.sequencer.started_at_ms()).max(0.0);
        let event = StageEvent::new(
            Stage::BonusPicked {
                box_index: pick.box_index,
                prize: pick.prize,
            },
            offset,
        )
        .with_spin(round.spin_id.clone());
        self.publish(vec![event]);

        self.pending_bonus = None;
        self.sequencer.finish_bonus();
        Ok(pick)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // EXPORT / IMPORT
    // ═══════════════════════════════════════════════════════════════════════

    /// Serialize jackpots and progression
    pub fn export_session(&self) -> SlotResult<String> {
        serde_json::to_string_pretty(&self.session).map_err(|e| ConfigError::from(e).into())
    }

    /// Restore jackpots and progression. Only allowed between spins.
    pub fn import_session(&mut self, json: &str) -> SlotResult<()> {
        if !self.sequencer.is_idle() {
            return Err(SlotError::WagerLocked);
        }
        let session: SessionState = serde_json::from_str(json).map_err(ConfigError::from)?;
        self.session = session.reconfigured(&self.config).sanitized();
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // INTERNALS
    // ═══════════════════════════════════════════════════════════════════════

    fn publish(&mut self, events: Vec<StageEvent>) {
        for event in events {
            if let Some(feature) = event.stage.feature() {
                log::info!("[{}] {}", feature.display_name(), event.describe());
            }
            if event.stage.category() != StageCategory::SpinLifecycle {
                self.ledger.record(&event.describe());
            }
            if let Some(trace) = self.trace.as_mut() {
                trace.push(event);
            }
        }
    }

    /// Apply a resolved outcome to the ledger exactly once
    fn settle_if_resolved(&mut self, now_ms: f64) -> Option<SpinOutcome> {
        let outcome = self.sequencer.take_resolved()?;
        let offset = (now_ms - self.sequencer.started_at_ms()).max(0.0);

        if outcome.currency_award > 0 {
            self.ledger.apply_currency(outcome.currency_award);
        }
        self.ledger.apply_morale(outcome.morale_delta);

        let mut stages = outcome.settlement_stages();
        if outcome.bonus_offered {
            if let Some(round) = self.pending_bonus.as_ref() {
                stages.push(Stage::BonusOffered {
                    box_count: round.box_count() as u8,
                });
            }
        }
        stages.push(Stage::SpinEnd);

        let events = stages
            .into_iter()
            .map(|stage| StageEvent::new(stage, offset).with_spin(outcome.spin_id.clone()))
            .collect();
        self.publish(events);
        self.stats.record_outcome(&outcome);

        if outcome.bonus_offered && self.pending_bonus.is_some() {
            self.sequencer.enter_bonus();
        }

        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::PlayerLedger;
    use crate::sequencer::ManualClock;

    fn machine(money: i64) -> (SlotMachine<PlayerLedger>, ManualClock) {
        let clock = ManualClock::new();
        let machine = SlotMachine::new(SlotConfig::default(), PlayerLedger::new(money))
            .with_clock(clock.clone())
            .with_seed(42);
        (machine, clock)
    }

    #[test]
    fn test_machine_creation() {
        let (machine, _) = machine(1000);
        assert!(machine.is_idle());
        assert_eq!(machine.bet(), 50);
        assert!(!machine.vip_mode());
        assert_eq!(machine.jackpots().value(JackpotTier::Mini), 2000);
    }

    #[test]
    fn test_cash_spin_charges_and_accrues() {
        let (mut machine, _) = machine(1000);
        let response = machine.request_spin(100, false).unwrap();
        let outcome = response.outcome().unwrap();
        assert_eq!(machine.state(), SequencerState::Spinning);
        assert_eq!(machine.ledger().balance(), 900);
        assert_eq!(machine.jackpots().total_contributions(), 10);
        if outcome.jackpot_awarded.is_none() {
            assert_eq!(machine.jackpots().value(JackpotTier::Mini), 2005);
            assert_eq!(machine.jackpots().value(JackpotTier::Grand), 20002);
        }
    }

    #[test]
    fn test_request_ignored_while_spinning() {
        let (mut machine, _) = machine(1000);
        machine.request_spin(50, false).unwrap();
        let again = machine.request_spin(50, false).unwrap();
        assert_eq!(again, SpinResponse::Ignored);
        assert_eq!(machine.ledger().balance(), 950);
        assert_eq!(machine.stats().total_spins, 1);
    }

    #[test]
    fn test_invalid_bet_rejected() {
        let (mut machine, _) = machine(1000);
        assert!(matches!(machine.request_spin(0, false), Err(SlotError::InvalidBet(0))));
        assert!(matches!(machine.request_spin(-5, true), Err(SlotError::InvalidBet(-5))));
        assert!(machine.is_idle());
        assert_eq!(machine.ledger().balance(), 1000);
    }

    #[test]
    fn test_settles_after_paced_reveal() {
        let (mut machine, clock) = machine(1000);
        let outcome = machine.request_spin(50, false).unwrap().outcome().cloned().unwrap();

        clock.advance(1000.0);
        assert!(machine.tick().is_none());
        assert_eq!(machine.ledger().balance(), 950);

        clock.advance(5000.0);
        let settled = machine.tick().unwrap();
        assert_eq!(settled, outcome);
        assert!(machine.is_idle());
        assert_eq!(machine.ledger().balance(), 950 + outcome.currency_award);
        assert!(machine.trace().unwrap().has_stage("spin_end"));
    }

    #[test]
    fn test_skip_settles_once() {
        let (mut machine, _) = machine(1000);
        let outcome = machine.request_spin(50, false).unwrap().outcome().cloned().unwrap();
        assert!(machine.skip().is_some());
        let balance = machine.ledger().balance();
        assert!(machine.skip().is_none());
        assert!(machine.tick().is_none());
        assert_eq!(machine.ledger().balance(), balance);
        assert_eq!(balance, 950 + outcome.currency_award);
        let trace = machine.trace().unwrap();
        assert!(trace.skipped);
        assert_eq!(trace.metadata.get("timing"), Some(&serde_json::json!("normal")));
        let tagged = trace
            .reel_stops()
            .iter()
            .filter(|e| e.tags.iter().any(|t| t == "skipped"))
            .count();
        assert_eq!(tagged, 5);
        assert!(trace.events_by_type("spin_start")[0].tags.is_empty());
    }

    #[test]
    fn test_wager_lock() {
        let (mut machine, _) = machine(10_000);
        machine.set_vip_mode(true).unwrap();
        assert_eq!(machine.bet(), 500);
        assert_eq!(machine.set_bet(100).unwrap(), 500);

        machine.spin().unwrap();
        assert!(matches!(machine.set_vip_mode(false), Err(SlotError::WagerLocked)));
        machine.skip();
        if !machine.progression().has_pending_feature() {
            assert!(machine.set_vip_mode(false).is_ok());
            assert_eq!(machine.bet(), 50);
        }
    }

    #[test]
    fn test_session_stats() {
        let (mut machine, _) = machine(100_000);
        for _ in 0..50 {
            machine.spin_to_completion(100, false).unwrap();
        }
        let stats = machine.stats();
        assert_eq!(stats.total_spins, 50);
        assert_eq!(stats.wins + stats.losses, 50);
        assert_eq!(
            stats.cash_spins + stats.free_spins_played + stats.frenzy_spins_played,
            50
        );
        assert_eq!(stats.total_wagered, stats.cash_spins as i64 * 100);
        assert!(stats.hit_rate() >= 0.0 && stats.hit_rate() <= 100.0);

        machine.reset_stats();
        assert_eq!(machine.stats().total_spins, 0);
    }

    #[test]
    fn test_export_import_session() {
        let (mut machine, _) = machine(100_000);
        for _ in 0..10 {
            machine.spin_to_completion(200, false).unwrap();
        }
        let json = machine.export_session().unwrap();

        let (mut other, _) = self::machine(0);
        other.import_session(&json).unwrap();
        assert_eq!(other.session(), machine.session());
    }

    #[test]
    fn test_import_uses_machine_config() {
        let mut config = SlotConfig::default();
        config.progression.energy_cap = 10;
        config.jackpot.mini.base = 3000;
        let mut machine = SlotMachine::new(config, PlayerLedger::new(0));

        let json = r#"{
            "jackpots": {"values": [2500, 8000, 20000]},
            "progression": {"energy": 12, "frenzy_active": false,
                            "frenzy_spins_remaining": 0, "free_spins_remaining": 1}
        }"#;
        machine.import_session(json).unwrap();

        let progression = machine.progression();
        assert_eq!(progression.config().energy_cap, 10);
        assert_eq!(progression.energy, 0);
        assert_eq!(progression.free_spins_remaining, 1);
        assert_eq!(machine.jackpots().base(JackpotTier::Mini), 3000);
        assert_eq!(machine.jackpots().value(JackpotTier::Mini), 3000);
        assert!(!machine.export_session().unwrap().contains("energy_cap"));
    }

    #[test]
    fn test_no_bonus_without_offer() {
        let (mut machine, _) = machine(1000);
        assert!(matches!(machine.pick_bonus_box(0), Err(SlotError::NoBonusPending)));
    }
}
