//! Game selection shared by `mc play`, `mc analyze`, and `mc sweep`.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use montecarlo_core::config::{UserConfig, check_dice_count, load_game_config};
use montecarlo_core::{Die, Face, Game, MonteCarloError};
use tracing::debug;

/// Rolls per play when neither the flag nor a config file sets one.
pub const DEFAULT_ROLLS: usize = 10;

/// Describe the game either with a TOML file or inline flags.
#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// Game file (TOML) describing the dice.
    #[arg(long, short = 'c', conflicts_with_all = ["faces", "dice"])]
    pub config: Option<PathBuf>,

    /// Comma-separated faces for every die, e.g. `1,2,3,4,5,6`.
    #[arg(long)]
    pub faces: Option<String>,

    /// Number of identical dice built from `--faces`.
    #[arg(long, default_value = "2")]
    pub dice: usize,

    /// Face weight as FACE=WEIGHT, applied to every die that has FACE.
    /// Repeatable.
    #[arg(long = "weight", value_name = "FACE=WEIGHT")]
    pub weights: Vec<String>,

    /// Rolls per play.
    #[arg(long)]
    pub rolls: Option<usize>,

    /// Seed for reproducible rolls.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// A game ready to play plus the run parameters that came with it.
#[derive(Debug)]
pub struct LoadedGame {
    pub game: Game,
    pub rolls: usize,
    pub seed: Option<u64>,
}

impl GameArgs {
    /// Build the game. Flags override values from the game file.
    pub fn load(&self, user: &UserConfig) -> Result<LoadedGame> {
        let fallback_rolls = user.default_rolls.unwrap_or(DEFAULT_ROLLS);

        let (mut game, file_rolls, file_seed) = if let Some(path) = &self.config {
            let cfg = load_game_config(path)?;
            let game = cfg
                .build_game()
                .with_context(|| format!("Invalid game in {}", path.display()))?;
            (game, Some(cfg.rolls), cfg.seed)
        } else if let Some(raw) = &self.faces {
            if self.dice == 0 {
                bail!("--dice must be > 0");
            }
            check_dice_count(self.dice)?;
            let die = Die::new(Face::parse_list(raw)?)?;
            (Game::new(vec![die; self.dice])?, None, None)
        } else {
            bail!("pass --config <FILE> or --faces <LIST>");
        };

        apply_game_weights(&mut game, &self.weights)?;

        let loaded = LoadedGame {
            game,
            rolls: self.rolls.or(file_rolls).unwrap_or(fallback_rolls),
            seed: self.seed.or(file_seed),
        };
        debug!(
            dice = loaded.game.dice().len(),
            rolls = loaded.rolls,
            seed = ?loaded.seed,
            "game loaded"
        );
        Ok(loaded)
    }
}

fn split_weight(spec: &str) -> Result<(Face, &str)> {
    let Some((face, weight)) = spec.split_once('=') else {
        bail!("weight {spec:?} must look like FACE=WEIGHT");
    };
    Ok((face.parse()?, weight))
}

/// Apply `FACE=WEIGHT` overrides to a die.
pub fn apply_weights(die: &mut Die, specs: &[String]) -> Result<()> {
    for spec in specs {
        let (face, weight) = split_weight(spec)?;
        die.set_weight_str(&face, weight)?;
    }
    Ok(())
}

/// Apply `FACE=WEIGHT` overrides to every die carrying `FACE`. Dice without
/// that face are left alone; a face found on no die is an error.
pub fn apply_game_weights(game: &mut Game, specs: &[String]) -> Result<()> {
    for spec in specs {
        let (face, weight) = split_weight(spec)?;
        let mut matched = 0_usize;
        for die in game.dice_mut() {
            if die.weight(&face).is_some() {
                die.set_weight_str(&face, weight)?;
                matched += 1;
            }
        }
        if matched == 0 {
            let first = &game.dice()[0];
            let faces = first.faces();
            return Err(MonteCarloError::UnknownFace {
                face,
                first: faces[0].clone(),
                last: faces[faces.len() - 1].clone(),
            }
            .into());
        }
    }
    Ok(())
}
