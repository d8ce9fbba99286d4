//! External collaborators: wallet, morale and the event log sink
//!
//! The engine only talks to the rest of the game through [`Ledger`].

use serde::{Deserialize, Serialize};

/// Wallet, morale stat and human-readable log, as seen by the engine
pub trait Ledger {
    /// Spendable currency
    fn balance(&self) -> i64;

    /// Apply a signed currency delta
    fn apply_currency(&mut self, delta: i64);

    /// Apply a signed morale delta; implementors clamp to their range
    fn apply_morale(&mut self, delta: i32);

    /// Accept one human-readable event line
    fn record(&mut self, line: &str) {
        log::info!("{}", line);
    }
}

/// In-memory player ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLedger {
    pub money: i64,
    pub morale: i32,
    pub max_morale: i32,
    #[serde(default)]
    pub events: Vec<String>,
}

impl PlayerLedger {
    pub fn new(money: i64) -> Self {
        Self {
            money,
            morale: 50,
            max_morale: 100,
            events: Vec::new(),
        }
    }

    pub fn with_morale(mut self, morale: i32, max_morale: i32) -> Self {
        self.max_morale = max_morale.max(0);
        self.morale = morale.clamp(0, self.max_morale);
        self
    }

    /// Most recent lines first
    pub fn recent_events(&self, count: usize) -> impl Iterator<Item = &String> {
        self.events.iter().rev().take(count)
    }
}

impl Default for PlayerLedger {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Ledger for PlayerLedger {
    fn balance(&self) -> i64 {
        self.money
    }

    fn apply_currency(&mut self, delta: i64) {
        self.money += delta;
    }

    fn apply_morale(&mut self, delta: i32) {
        self.morale = (self.morale + delta).clamp(0, self.max_morale);
    }

    fn record(&mut self, line: &str) {
        log::debug!("{}", line);
        self.events.push(line.to_string());
    }
}
