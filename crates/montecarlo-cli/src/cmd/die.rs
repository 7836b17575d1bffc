//! `mc die`: build a single die, show its weights, optionally roll it.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use montecarlo_core::rng::rng_for;
use montecarlo_core::{Die, Face};
use serde::Serialize;

use crate::cmd::game_args::apply_weights;
use crate::output::{OutputMode, pretty_kv, pretty_section, pretty_table, render_mode};

/// Arguments for `mc die`.
#[derive(Args, Debug)]
pub struct DieArgs {
    /// Comma-separated faces, e.g. `1,2,3,4,5,6` or `H,T`.
    #[arg(long)]
    pub faces: String,

    /// Face weight as FACE=WEIGHT. Repeatable.
    #[arg(long = "weight", value_name = "FACE=WEIGHT")]
    pub weights: Vec<String>,

    /// Roll the die this many times after showing it.
    #[arg(long)]
    pub rolls: Option<usize>,

    /// Seed for reproducible rolls.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct FaceRow {
    face: Face,
    weight: f64,
    probability: f64,
}

/// JSON output for `mc die`.
#[derive(Debug, Serialize)]
struct DieOutput {
    faces: Vec<FaceRow>,
    total_weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    rolls: Option<Vec<Face>>,
}

/// Execute `mc die`.
pub fn run_die(args: &DieArgs, output: OutputMode) -> Result<()> {
    let mut die = Die::new(Face::parse_list(&args.faces)?)?;
    apply_weights(&mut die, &args.weights)?;

    let rolls = match args.rolls {
        Some(n) => Some(die.roll(&mut rng_for(args.seed), n)?),
        None => None,
    };

    let out = DieOutput {
        faces: die
            .state()
            .into_iter()
            .zip(die.probabilities())
            .map(|(row, probability)| FaceRow {
                face: row.face,
                weight: row.weight,
                probability,
            })
            .collect(),
        total_weight: die.total_weight(),
        rolls,
    };

    render_mode(output, &out, render_text, render_pretty)
}

fn render_text(out: &DieOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &out.faces {
        writeln!(
            w,
            "face={} weight={} probability={:.4}",
            row.face, row.weight, row.probability
        )?;
    }
    if let Some(rolls) = &out.rolls {
        writeln!(w, "rolls={}", join_faces(rolls))?;
    }
    Ok(())
}

fn render_pretty(out: &DieOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Die")?;
    pretty_kv(w, "Faces", out.faces.len().to_string())?;
    pretty_kv(w, "Total", out.total_weight.to_string())?;
    writeln!(w)?;
    let headers = ["face", "weight", "p"].map(String::from);
    let rows: Vec<Vec<String>> = out
        .faces
        .iter()
        .map(|row| {
            vec![
                row.face.to_string(),
                row.weight.to_string(),
                format!("{:.4}", row.probability),
            ]
        })
        .collect();
    pretty_table(w, &headers, &rows)?;

    if let Some(rolls) = &out.rolls {
        writeln!(w)?;
        pretty_section(w, &format!("Rolls ({})", rolls.len()))?;
        writeln!(w, "{}", join_faces(rolls))?;
    }
    Ok(())
}

pub fn join_faces(faces: &[Face]) -> String {
    faces
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
