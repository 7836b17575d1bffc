//! `mc sweep`: play the same game across a range of seeds and compare
//! the observed jackpot rate with the rate the weights imply.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use montecarlo_core::config::UserConfig;
use montecarlo_core::sweep::{SweepConfig, SweepReport, run_sweep};

use crate::cmd::game_args::GameArgs;
use crate::output::{OutputMode, pretty_kv, pretty_section, pretty_table, render_mode};

/// Samples shown by pretty/text output unless `--outcomes` is passed.
const SAMPLE_LIMIT: usize = 5;

/// Arguments for `mc sweep`.
#[derive(Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Number of seeds to run.
    #[arg(long, default_value = "100")]
    pub seeds: u64,

    /// First seed. Defaults to `--seed`, the game file's seed, or 0.
    #[arg(long)]
    pub seed_start: Option<u64>,

    /// List every seed's outcome instead of a short sample.
    #[arg(long)]
    pub outcomes: bool,
}

/// Execute `mc sweep`.
pub fn run_sweep_cmd(args: &SweepArgs, user: &UserConfig, output: OutputMode) -> Result<()> {
    let loaded = args.game.load(user)?;
    let start = args.seed_start.or(loaded.seed).unwrap_or(0);
    let config = SweepConfig {
        seed_range: start..start.saturating_add(args.seeds),
        rolls: loaded.rolls,
    };

    let report = run_sweep(&loaded.game, &config)?;
    let limit = if args.outcomes {
        report.outcomes.len()
    } else {
        SAMPLE_LIMIT
    };

    render_mode(
        output,
        &report,
        |r, w| {
            writeln!(
                w,
                "sweep seeds_run={} rolls_per_seed={} total_rolls={}",
                r.seeds_run, r.rolls_per_seed, r.total_rolls
            )?;
            writeln!(
                w,
                "results jackpots={} jackpot_rate={:.6} expected_rate={:.6} best_seed={}",
                r.total_jackpots,
                r.jackpot_rate,
                r.expected_jackpot_rate,
                r.best_seed.map_or_else(|| "-".to_string(), |s| s.to_string())
            )?;
            for o in r.outcomes.iter().take(limit) {
                writeln!(
                    w,
                    "seed={} jackpots={} combos={} perms={}",
                    o.seed, o.jackpots, o.distinct_combos, o.distinct_perms
                )?;
            }
            Ok(())
        },
        |r, w| render_pretty(r, limit, w),
    )
}

fn render_pretty(r: &SweepReport, limit: usize, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Sweep")?;
    pretty_kv(w, "Seeds", r.seeds_run.to_string())?;
    pretty_kv(w, "Rolls/seed", r.rolls_per_seed.to_string())?;
    pretty_kv(w, "Total rolls", r.total_rolls.to_string())?;
    pretty_kv(w, "Jackpots", r.total_jackpots.to_string())?;
    pretty_kv(
        w,
        "Rate",
        format!(
            "{:.4}% observed / {:.4}% expected",
            r.jackpot_rate * 100.0,
            r.expected_jackpot_rate * 100.0
        ),
    )?;
    if let Some(seed) = r.best_seed {
        pretty_kv(w, "Best seed", seed.to_string())?;
    }

    writeln!(w)?;
    pretty_section(w, "Seed Outcomes")?;
    let headers = ["seed", "jackpots", "combos", "perms"].map(String::from);
    let rows: Vec<Vec<String>> = r
        .outcomes
        .iter()
        .take(limit)
        .map(|o| {
            vec![
                o.seed.to_string(),
                o.jackpots.to_string(),
                o.distinct_combos.to_string(),
                o.distinct_perms.to_string(),
            ]
        })
        .collect();
    pretty_table(w, &headers, &rows)?;
    if r.outcomes.len() > limit {
        writeln!(w, "... and {} more seeds", r.outcomes.len() - limit)?;
    }
    Ok(())
}
