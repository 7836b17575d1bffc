#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use montecarlo_core::config::{UserConfig, load_user_config};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "mc: weighted dice simulator",
    long_about = None
)]
struct Cli {
    /// Log debug events from the simulator to stderr. Overrides
    /// `MONTECARLO_LOG`.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Inspect and roll a single die",
        long_about = "Build one die from a face list, apply weights, show its state, and optionally roll it.",
        after_help = "EXAMPLES:\n    # A fair six-sided die\n    mc die --faces 1,2,3,4,5,6\n\n    # Load the six and roll 20 times\n    mc die --faces 1,2,3,4,5,6 --weight 6=5 --rolls 20 --seed 7\n\n    # Emit machine-readable output\n    mc die --faces H,T --format json"
    )]
    Die(cmd::die::DieArgs),

    #[command(
        about = "Play a game and print the roll table",
        long_about = "Roll every die in a game the requested number of times and print the results in wide or narrow form.",
        after_help = "EXAMPLES:\n    # Two fair dice, ten rolls\n    mc play --faces 1,2,3,4,5,6 --dice 2 --rolls 10\n\n    # From a game file, stacked output\n    mc play --config game.toml --form narrow\n\n    # Emit machine-readable output\n    mc play --faces H,T --dice 3 --seed 1 --format json"
    )]
    Play(cmd::play::PlayArgs),

    #[command(
        about = "Play a game and report roll statistics",
        long_about = "Play a game, then count jackpots, per-face totals, unordered combinations, and ordered permutations.",
        after_help = "EXAMPLES:\n    # Five dice, 1000 rolls\n    mc analyze --faces 1,2,3,4,5,6 --dice 5 --rolls 1000 --seed 42\n\n    # Only the ten most frequent outcomes\n    mc analyze --config game.toml --top 10\n\n    # Emit machine-readable output\n    mc analyze --config game.toml --format json"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        about = "Repeat a game across many seeds",
        long_about = "Play the same game once per seed and compare the observed jackpot rate with the rate implied by the weights.",
        after_help = "EXAMPLES:\n    # 100 seeds of three coins\n    mc sweep --faces H,T --dice 3 --rolls 50 --seeds 100\n\n    # Start at a specific seed\n    mc sweep --config game.toml --seeds 500 --seed-start 1000\n\n    # Emit machine-readable output\n    mc sweep --faces 1,2,3,4,5,6 --seeds 20 --format json"
    )]
    Sweep(cmd::sweep::SweepArgs),
}

const DEBUG_FILTER: &str = "montecarlo_core=debug,mc=debug,info";
const DEFAULT_FILTER: &str = "montecarlo_core=info,mc=info,warn";

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(DEBUG_FILTER)
    } else {
        EnvFilter::try_from_env("MONTECARLO_LOG").unwrap_or_else(|_| {
            EnvFilter::new(if env::var("DEBUG").is_ok() {
                DEBUG_FILTER
            } else {
                DEFAULT_FILTER
            })
        })
    };

    let format = env::var("MONTECARLO_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output; logs always go to stderr.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(verbose = cli.verbose, "tracing initialized");

    let user = load_user_config().unwrap_or_else(|err| {
        warn!("ignoring unreadable user config: {err:#}");
        UserConfig::default()
    });
    let output = resolve_output_mode(cli.format, cli.json, user.output.as_deref());

    let command_result = match &cli.command {
        Commands::Die(args) => cmd::die::run_die(args, output),
        Commands::Play(args) => cmd::play::run_play(args, &user, output),
        Commands::Analyze(args) => cmd::analyze::run_analyze(args, &user, output),
        Commands::Sweep(args) => cmd::sweep::run_sweep_cmd(args, &user, output),
    };

    if let Err(err) = command_result {
        render_error(output, &CliError::from_anyhow(&err))?;
        std::process::exit(1);
    }

    Ok(())
}
