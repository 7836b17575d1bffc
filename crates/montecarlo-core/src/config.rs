use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::die::Die;
use crate::error::MonteCarloError;
use crate::face::Face;
use crate::game::Game;

/// Most dice a single game may hold, across every `[[dice]]` entry.
pub const MAX_DICE: usize = 10_000;

/// Reject a dice count above [`MAX_DICE`].
///
/// # Errors
///
/// [`MonteCarloError::InvalidConfig`] when `count` exceeds the cap.
pub fn check_dice_count(count: usize) -> Result<(), MonteCarloError> {
    if count > MAX_DICE {
        return Err(MonteCarloError::InvalidConfig(format!(
            "{count} dice requested, at most {MAX_DICE} allowed"
        )));
    }
    Ok(())
}

/// A game described in TOML.
///
/// ```toml
/// seed = 42
/// rolls = 100
///
/// [[dice]]
/// faces = [1, 2, 3, 4, 5, 6]
/// weights = { "6" = 5.0 }
/// copies = 2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_rolls")]
    pub rolls: usize,
    #[serde(default)]
    pub dice: Vec<DieConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DieConfig {
    pub faces: Vec<Face>,
    /// Face (as written) to weight. Unlisted faces keep weight 1.
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
    /// How many identical dice this entry adds.
    #[serde(default = "default_copies")]
    pub copies: usize,
}

impl DieConfig {
    /// Build one die from this entry.
    ///
    /// # Errors
    ///
    /// Any [`Die::new`] / [`Die::set_weight`] failure, or
    /// [`MonteCarloError::UnknownFace`] if a weight key names no face.
    pub fn build_die(&self) -> Result<Die, MonteCarloError> {
        let mut die = Die::new(self.faces.clone())?;
        for (key, &weight) in &self.weights {
            let face = self
                .faces
                .iter()
                .find(|f| f.to_string() == *key)
                .cloned()
                .ok_or_else(|| MonteCarloError::UnknownFace {
                    face: key.parse().unwrap_or_else(|_| Face::Text(key.clone())),
                    first: self.faces[0].clone(),
                    last: self.faces[self.faces.len() - 1].clone(),
                })?;
            die.set_weight(&face, weight)?;
        }
        Ok(die)
    }
}

impl GameConfig {
    /// Validate every die entry and assemble the [`Game`].
    ///
    /// # Errors
    ///
    /// [`MonteCarloError::InvalidConfig`] for zero rolls, zero copies, or
    /// more than [`MAX_DICE`] dice in total,
    /// [`MonteCarloError::NoDice`] when no dice are listed, and any die
    /// construction failure.
    pub fn build_game(&self) -> Result<Game, MonteCarloError> {
        if self.rolls == 0 {
            return Err(MonteCarloError::InvalidConfig("rolls must be > 0".into()));
        }

        let mut dice = Vec::new();
        for (idx, entry) in self.dice.iter().enumerate() {
            if entry.copies == 0 {
                return Err(MonteCarloError::InvalidConfig(format!(
                    "dice[{idx}].copies must be > 0"
                )));
            }
            check_dice_count(dice.len().saturating_add(entry.copies))?;
            let die = entry.build_die()?;
            dice.extend(std::iter::repeat_n(die, entry.copies));
        }
        Game::new(dice)
    }
}

/// Load and parse a game file.
///
/// # Errors
///
/// Fails when the file cannot be read or is not a valid game description.
pub fn load_game_config(path: &Path) -> Result<GameConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<GameConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub default_rolls: Option<usize>,
}

/// Load `<config dir>/montecarlo/config.toml`, defaulting when absent.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };
    load_user_config_from(&config_dir.join("montecarlo/config.toml"))
}

/// Load a user config from an explicit path, defaulting when absent.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed.
pub fn load_user_config_from(path: &Path) -> Result<UserConfig> {
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Canonical output mode name for a user-supplied value.
#[must_use]
pub fn normalize_output_mode(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" | "human" => Some("pretty"),
        "text" | "table" => Some("text"),
        "json" => Some("json"),
        _ => None,
    }
}

const fn default_rolls() -> usize {
    10
}

const fn default_copies() -> usize {
    1
}
