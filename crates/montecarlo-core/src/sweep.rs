//! Sweep runner for Monte Carlo repetition across seeds.
//!
//! Plays the same game once per seed, analyzes each play, and aggregates
//! jackpot statistics. Any seed can be replayed to recover its full table.

use std::ops::Range;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analyzer::Analyzer;
use crate::game::Game;
use crate::rng::seeded_rng;

/// Which seeds to run and how many rolls each play makes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Range of seeds to execute, e.g., `0..100`.
    pub seed_range: Range<u64>,
    /// Rolls per seed.
    pub rolls: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            seed_range: 0..100,
            rolls: 100,
        }
    }
}

impl SweepConfig {
    /// Validate configuration before running.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed range is empty or `rolls` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.seed_range.is_empty() {
            bail!("seed_range must not be empty");
        }
        if self.rolls == 0 {
            bail!("rolls must be > 0");
        }
        Ok(())
    }
}

/// Statistics for a single seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedOutcome {
    pub seed: u64,
    pub jackpots: usize,
    pub distinct_combos: usize,
    pub distinct_perms: usize,
}

/// Aggregate report produced by a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub seeds_run: usize,
    pub rolls_per_seed: usize,
    pub total_rolls: usize,
    pub total_jackpots: usize,
    /// Observed jackpots per roll.
    pub jackpot_rate: f64,
    /// Jackpot probability implied by the dice weights.
    pub expected_jackpot_rate: f64,
    /// First seed with the most jackpots.
    pub best_seed: Option<u64>,
    pub outcomes: Vec<SeedOutcome>,
}

/// Full detail for one replayed seed.
#[derive(Debug, Clone)]
pub struct SeedTrace {
    pub seed: u64,
    pub analyzer: Analyzer,
}

/// Probability that one roll of `game` is a jackpot: the sum over faces of
/// the product of each die's probability of showing that face.
#[must_use]
pub fn expected_jackpot_rate(game: &Game) -> f64 {
    let dice = game.dice();
    let Some(first) = dice.first() else {
        return 0.0;
    };

    first
        .faces()
        .iter()
        .map(|face| {
            dice.iter()
                .map(|die| {
                    let total = die.total_weight();
                    match die.weight(face) {
                        Some(w) if total > 0.0 => w / total,
                        _ => 0.0,
                    }
                })
                .product::<f64>()
        })
        .sum()
}

/// Run a full sweep across all seeds in the config.
///
/// # Errors
///
/// Returns an error if config validation fails or a play fails.
pub fn run_sweep(game: &Game, config: &SweepConfig) -> Result<SweepReport> {
    config.validate()?;

    let mut outcomes = Vec::new();
    let mut total_jackpots = 0_usize;
    let mut best: Option<(u64, usize)> = None;

    for seed in config.seed_range.clone() {
        let trace = replay_seed(game, config, seed)?;
        let jackpots = trace.analyzer.jackpot();
        total_jackpots += jackpots;
        if best.is_none_or(|(_, most)| jackpots > most) {
            best = Some((seed, jackpots));
        }

        outcomes.push(SeedOutcome {
            seed,
            jackpots,
            distinct_combos: trace.analyzer.combo_count().len(),
            distinct_perms: trace.analyzer.perm_count().len(),
        });
    }

    let seeds_run = outcomes.len();
    let total_rolls = seeds_run * config.rolls;
    #[allow(clippy::cast_precision_loss)]
    let jackpot_rate = total_jackpots as f64 / total_rolls as f64;

    info!(
        seeds_run,
        total_rolls, total_jackpots, jackpot_rate, "sweep complete"
    );

    Ok(SweepReport {
        seeds_run,
        rolls_per_seed: config.rolls,
        total_rolls,
        total_jackpots,
        jackpot_rate,
        expected_jackpot_rate: expected_jackpot_rate(game),
        best_seed: best.map(|(seed, _)| seed),
        outcomes,
    })
}

/// Replay a single seed and keep its analyzer for inspection.
///
/// # Errors
///
/// Returns an error when `rolls` is zero or a die cannot roll.
pub fn replay_seed(game: &Game, config: &SweepConfig, seed: u64) -> Result<SeedTrace> {
    if config.rolls == 0 {
        bail!("rolls must be > 0");
    }

    let mut game = game.clone();
    let mut rng = seeded_rng(seed);
    game.play(&mut rng, config.rolls)
        .with_context(|| format!("seed {seed} failed to play"))?;
    let analyzer = Analyzer::new(&game)?;

    Ok(SeedTrace { seed, analyzer })
}
