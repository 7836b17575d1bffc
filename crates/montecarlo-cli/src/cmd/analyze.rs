//! `mc analyze`: play a game and report jackpots, face counts, combos,
//! and permutations.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use montecarlo_core::config::UserConfig;
use montecarlo_core::rng::rng_for;
use montecarlo_core::{Analyzer, Face, FaceCounts, OutcomeCount};
use serde::Serialize;

use crate::cmd::die::join_faces;
use crate::cmd::game_args::GameArgs;
use crate::output::{OutputMode, pretty_kv, pretty_section, pretty_table, render_mode};

/// Arguments for `mc analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Show only the N most frequent combos and permutations.
    #[arg(long)]
    pub top: Option<usize>,

    /// Include the per-roll face count table.
    #[arg(long)]
    pub per_roll: bool,
}

/// JSON output for `mc analyze`.
#[derive(Debug, Serialize)]
struct AnalyzeOutput {
    rolls: usize,
    dice: usize,
    seed: Option<u64>,
    jackpots: usize,
    faces: Vec<Face>,
    face_totals: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    face_counts: Option<FaceCounts>,
    combos: Vec<OutcomeCount>,
    perms: Vec<OutcomeCount>,
}

/// Keep the `top` most frequent entries, still least frequent first.
fn most_frequent(mut counts: Vec<OutcomeCount>, top: Option<usize>) -> Vec<OutcomeCount> {
    if let Some(n) = top {
        let skip = counts.len().saturating_sub(n);
        counts.drain(..skip);
    }
    counts
}

/// Execute `mc analyze`.
pub fn run_analyze(args: &AnalyzeArgs, user: &UserConfig, output: OutputMode) -> Result<()> {
    let mut loaded = args.game.load(user)?;
    let mut rng = rng_for(loaded.seed);
    loaded.game.play(&mut rng, loaded.rolls)?;
    let analyzer = Analyzer::new(&loaded.game)?;

    let counts = analyzer.face_count();
    let out = AnalyzeOutput {
        rolls: analyzer.rolls(),
        dice: analyzer.dice_count(),
        seed: loaded.seed,
        jackpots: analyzer.jackpot(),
        faces: counts.faces.clone(),
        face_totals: counts.totals(),
        face_counts: args.per_roll.then_some(counts),
        combos: most_frequent(analyzer.combo_count(), args.top),
        perms: most_frequent(analyzer.perm_count(), args.top),
    };

    render_mode(output, &out, render_text, render_pretty)
}

fn render_text(out: &AnalyzeOutput, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "analysis rolls={} dice={} jackpots={}",
        out.rolls, out.dice, out.jackpots
    )?;
    for (face, total) in out.faces.iter().zip(&out.face_totals) {
        writeln!(w, "face={face} total={total}")?;
    }
    if let Some(counts) = &out.face_counts {
        for (i, row) in counts.rows.iter().enumerate() {
            let cells: Vec<String> = counts
                .faces
                .iter()
                .zip(row)
                .map(|(face, n)| format!("{face}={n}"))
                .collect();
            writeln!(w, "roll={} {}", i + 1, cells.join(" "))?;
        }
    }
    for combo in &out.combos {
        writeln!(w, "combo={} count={}", join_faces(&combo.faces), combo.count)?;
    }
    for perm in &out.perms {
        writeln!(w, "perm={} count={}", join_faces(&perm.faces), perm.count)?;
    }
    Ok(())
}

fn jackpot_summary(jackpots: usize) -> String {
    match jackpots {
        0 => "0 jackpots".to_string(),
        1 => "1 jackpot!".to_string(),
        n => format!("{n} jackpots!"),
    }
}

fn render_pretty(out: &AnalyzeOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Analysis")?;
    pretty_kv(w, "Rolls", out.rolls.to_string())?;
    pretty_kv(w, "Dice", out.dice.to_string())?;
    if let Some(seed) = out.seed {
        pretty_kv(w, "Seed", seed.to_string())?;
    }
    pretty_kv(w, "Jackpots", jackpot_summary(out.jackpots))?;

    writeln!(w)?;
    pretty_section(w, "Face Totals")?;
    let headers = ["face", "total"].map(String::from);
    let rows: Vec<Vec<String>> = out
        .faces
        .iter()
        .zip(&out.face_totals)
        .map(|(face, total)| vec![face.to_string(), total.to_string()])
        .collect();
    pretty_table(w, &headers, &rows)?;

    if let Some(counts) = &out.face_counts {
        writeln!(w)?;
        pretty_section(w, "Face Counts per Roll")?;
        let headers: Vec<String> = std::iter::once("roll #".to_string())
            .chain(counts.faces.iter().map(ToString::to_string))
            .collect();
        let rows: Vec<Vec<String>> = counts
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                std::iter::once((i + 1).to_string())
                    .chain(row.iter().map(ToString::to_string))
                    .collect()
            })
            .collect();
        pretty_table(w, &headers, &rows)?;
    }

    for (heading, entries) in [("Combinations", &out.combos), ("Permutations", &out.perms)] {
        writeln!(w)?;
        pretty_section(w, heading)?;
        let headers = ["faces", "count"].map(String::from);
        let rows: Vec<Vec<String>> = entries
            .iter()
            .map(|c| vec![join_faces(&c.faces), c.count.to_string()])
            .collect();
        pretty_table(w, &headers, &rows)?;
    }
    Ok(())
}
