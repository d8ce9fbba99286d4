//! Bonus Box — "pick one of N boxes" reward choice
//!
//! Offered after the spin that fills the energy core, when enabled. Each box
//! hides a multiple of the triggering bet; one pick reveals its prize and the
//! remaining boxes stay closed.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SlotError, SlotResult};

/// Bonus box configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusBoxConfig {
    pub enabled: bool,
    pub box_count: u8,
    /// Prize table as multiples of the bet
    pub prize_multipliers: Vec<u32>,
}

impl Default for BonusBoxConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            box_count: 3,
            prize_multipliers: vec![5, 10, 20],
        }
    }
}

/// A single box
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusBox {
    pub index: u8,
    pub prize: i64,
    pub revealed: bool,
}

/// Result of opening a box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusPick {
    pub box_index: u8,
    pub prize: i64,
}

/// An offered round of boxes awaiting one pick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusBoxRound {
    pub spin_id: String,
    pub bet: i64,
    boxes: Vec<BonusBox>,
    picked: Option<BonusPick>,
}

impl BonusBoxRound {
    /// Fill boxes with prizes drawn uniformly from the table
    pub fn offer<R: Rng + ?Sized>(
        config: &BonusBoxConfig,
        spin_id: impl Into<String>,
        bet: i64,
        rng: &mut R,
    ) -> Self {
        let boxes = (0..config.box_count)
            .map(|index| {
                let multiplier = if config.prize_multipliers.is_empty() {
                    0
                } else {
                    config.prize_multipliers[rng.random_range(0..config.prize_multipliers.len())]
                };
                BonusBox {
                    index,
                    prize: bet * multiplier as i64,
                    revealed: false,
                }
            })
            .collect();

        Self {
            spin_id: spin_id.into(),
            bet,
            boxes,
            picked: None,
        }
    }

    /// Round with fixed prizes
    pub fn with_prizes(spin_id: impl Into<String>, bet: i64, prizes: &[i64]) -> Self {
        Self {
            spin_id: spin_id.into(),
            bet,
            boxes: prizes
                .iter()
                .enumerate()
                .map(|(i, &prize)| BonusBox {
                    index: i as u8,
                    prize,
                    revealed: false,
                })
                .collect(),
            picked: None,
        }
    }

    /// Get boxes (for UI)
    pub fn boxes(&self) -> &[BonusBox] {
        &self.boxes
    }

    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    pub fn picked(&self) -> Option<BonusPick> {
        self.picked
    }

    pub fn is_complete(&self) -> bool {
        self.picked.is_some()
    }

    /// Open one box. Only the first pick counts.
    pub fn pick(&mut self, index: usize) -> SlotResult<BonusPick> {
        if let Some(picked) = self.picked {
            return Err(SlotError::BonusAlreadyPicked {
                box_index: picked.box_index,
            });
        }
        let boxes = self.boxes.len();
        let item = self
            .boxes
            .get_mut(index)
            .ok_or(SlotError::InvalidBonusPick { index, boxes })?;

        item.revealed = true;
        let pick = BonusPick {
            box_index: item.index,
            prize: item.prize,
        };
        self.picked = Some(pick);
        Ok(pick)
    }
}
