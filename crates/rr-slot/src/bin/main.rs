//! RadReels session simulator
//!
//! Usage:
//!   radreels-sim --spins 10000 --bet 100           - Instant session, skipping every reveal
//!   radreels-sim --vip --bet 1000 --seed 7         - Reproducible VIP session
//!   radreels-sim --config radreels.yaml --paced    - Real-time reveal with a custom config

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use rr_slot::{PlayerLedger, SequencerState, SlotConfig, SlotError, SlotMachine};

#[derive(Parser)]
#[command(name = "radreels-sim", about = "Run a RadReels session and print its statistics")]
struct Cli {
    /// Number of spins to request
    #[arg(short = 'n', long, default_value_t = 1000)]
    spins: u64,

    /// Bet per spin
    #[arg(short, long)]
    bet: Option<i64>,

    /// Use the VIP weight table
    #[arg(long)]
    vip: bool,

    /// RNG seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Config file (.json, .yaml, .yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Starting balance
    #[arg(long, default_value_t = 100_000)]
    balance: i64,

    /// Reveal columns in real time instead of skipping
    #[arg(long)]
    paced: bool,

    /// Enable the bonus-box round (boxes are picked at random)
    #[arg(long)]
    bonus: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SlotConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SlotConfig::default(),
    };
    if cli.bonus {
        config.bonus_box.enabled = true;
        config.validate()?;
    }

    log::info!(
        "Starting {} session: {} spins, balance {}, seed {}",
        config.name,
        cli.spins,
        cli.balance,
        cli.seed
    );

    let mut machine = SlotMachine::new(config, PlayerLedger::new(cli.balance)).with_seed(cli.seed);
    machine.set_vip_mode(cli.vip)?;
    let bet = cli.bet.unwrap_or_else(|| machine.bet());
    let mut picker = ChaCha8Rng::seed_from_u64(cli.seed.wrapping_add(1));

    for _ in 0..cli.spins {
        match machine.request_spin(bet, cli.vip) {
            Ok(_) => {}
            Err(SlotError::InsufficientFunds { balance, bet }) => {
                log::info!("Session over: balance {} cannot cover bet {}", balance, bet);
                break;
            }
            Err(e) => return Err(e.into()),
        }

        if cli.paced {
            while machine.state() == SequencerState::Spinning {
                thread::sleep(Duration::from_millis(10));
                machine.tick();
            }
        } else {
            machine.skip();
        }

        if let Some(round) = machine.pending_bonus() {
            let index = picker.random_range(0..round.box_count());
            machine.pick_bonus_box(index)?;
        }
    }

    let stats = machine.stats();
    let report = serde_json::json!({
        "stats": stats,
        "rtp_percent": stats.rtp(),
        "hit_rate_percent": stats.hit_rate(),
        "balance": machine.ledger().money,
        "morale": machine.ledger().morale,
        "session": machine.session(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
