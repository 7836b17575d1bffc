//! `mc play`: roll every die in a game and print the outcome table.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use montecarlo_core::config::UserConfig;
use montecarlo_core::rng::rng_for;
use montecarlo_core::{Form, PlayResults};

use crate::cmd::game_args::GameArgs;
use crate::output::{OutputMode, pretty_kv, pretty_section, pretty_table, render_mode};

/// Arguments for `mc play`.
#[derive(Args, Debug)]
pub struct PlayArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Table shape: `wide` (row per roll) or `narrow` (row per die per roll).
    #[arg(long, default_value = "wide")]
    pub form: Form,
}

/// Execute `mc play`.
pub fn run_play(args: &PlayArgs, user: &UserConfig, output: OutputMode) -> Result<()> {
    let mut loaded = args.game.load(user)?;
    let mut rng = rng_for(loaded.seed);
    loaded.game.play(&mut rng, loaded.rolls)?;
    let results = loaded.game.results(args.form)?;

    render_mode(output, &results, render_text, render_pretty)
}

fn render_text(results: &PlayResults, w: &mut dyn Write) -> std::io::Result<()> {
    match results {
        PlayResults::Wide(table) => {
            for (i, row) in table.rows.iter().enumerate() {
                let cells: Vec<String> = table
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(die, face)| format!("{die}={face}"))
                    .collect();
                writeln!(w, "roll={} {}", i + 1, cells.join(" "))?;
            }
        }
        PlayResults::Narrow(records) => {
            for rec in records {
                writeln!(w, "roll={} die={} face={}", rec.roll, rec.die, rec.face)?;
            }
        }
    }
    Ok(())
}

fn render_pretty(results: &PlayResults, w: &mut dyn Write) -> std::io::Result<()> {
    match results {
        PlayResults::Wide(table) => {
            pretty_section(w, "Play Results")?;
            pretty_kv(w, "Rolls", table.rolls().to_string())?;
            pretty_kv(w, "Dice", table.dice_count().to_string())?;
            writeln!(w)?;
            let headers: Vec<String> = std::iter::once("roll #".to_string())
                .chain(table.columns.iter().cloned())
                .collect();
            let rows: Vec<Vec<String>> = table
                .rows
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    std::iter::once((i + 1).to_string())
                        .chain(row.iter().map(ToString::to_string))
                        .collect()
                })
                .collect();
            pretty_table(w, &headers, &rows)
        }
        PlayResults::Narrow(records) => {
            pretty_section(w, "Play Results (narrow)")?;
            let headers = ["roll #", "die", "face"].map(String::from);
            let rows: Vec<Vec<String>> = records
                .iter()
                .map(|rec| vec![rec.roll.to_string(), rec.die.clone(), rec.face.to_string()])
                .collect();
            pretty_table(w, &headers, &rows)
        }
    }
}
