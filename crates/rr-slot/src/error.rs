//! Error types for the reward engine
//!
//! Every spin-level failure is a recoverable refusal; nothing here is fatal.

use thiserror::Error;

/// Engine error type
#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid bet: {0}")]
    InvalidBet(i64),

    #[error("Insufficient funds: balance {balance}, bet {bet}")]
    InsufficientFunds { balance: i64, bet: i64 },

    #[error("No bonus round pending")]
    NoBonusPending,

    #[error("Bonus box {box_index} already opened")]
    BonusAlreadyPicked { box_index: u8 },

    #[error("Invalid bonus pick {index} ({boxes} boxes offered)")]
    InvalidBonusPick { index: usize, boxes: usize },

    #[error("Wager locked while a spin or feature is in progress")]
    WagerLocked,

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter value: {0}")]
    InvalidValue(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias
pub type SlotResult<T> = Result<T, SlotError>;
