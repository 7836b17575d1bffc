//! Multi-die game and its play table.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::die::Die;
use crate::error::{MonteCarloError, Result};
use crate::face::Face;

/// Shape of the table returned by [`Game::results`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Form {
    /// One row per roll, one column per die.
    #[default]
    Wide,
    /// One record per (roll, die) cell.
    Narrow,
}

impl FromStr for Form {
    type Err = MonteCarloError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wide" => Ok(Self::Wide),
            "narrow" => Ok(Self::Narrow),
            _ => Err(MonteCarloError::InvalidForm(s.to_string())),
        }
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wide => f.write_str("wide"),
            Self::Narrow => f.write_str("narrow"),
        }
    }
}

/// Column label for the die at zero-based `index`.
#[must_use]
pub fn die_label(index: usize) -> String {
    format!("die{}", index + 1)
}

/// Rectangular outcome table: `rows[r][d]` is the face die `d` showed on
/// roll `r + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Face>>,
}

impl PlayTable {
    #[must_use]
    pub fn rolls(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn dice_count(&self) -> usize {
        self.columns.len()
    }

    /// Faces die `index` showed, in roll order.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &Face> {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    /// Stack the table into one record per cell, ordered by roll then die.
    #[must_use]
    pub fn to_narrow(&self) -> Vec<NarrowRecord> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter().zip(&self.columns).map(move |(face, die)| NarrowRecord {
                    roll: r + 1,
                    die: die.clone(),
                    face: face.clone(),
                })
            })
            .collect()
    }
}

/// A single cell of the stacked table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrowRecord {
    /// One-based roll number.
    pub roll: usize,
    pub die: String,
    pub face: Face,
}

/// Play results in the requested [`Form`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PlayResults {
    Wide(PlayTable),
    Narrow(Vec<NarrowRecord>),
}

/// One or more dice rolled together.
#[derive(Debug, Clone)]
pub struct Game {
    dice: Vec<Die>,
    table: Option<PlayTable>,
}

impl Game {
    /// # Errors
    ///
    /// [`MonteCarloError::NoDice`] when `dice` is empty.
    pub fn new(dice: Vec<Die>) -> Result<Self> {
        if dice.is_empty() {
            return Err(MonteCarloError::NoDice);
        }
        Ok(Self { dice, table: None })
    }

    #[must_use]
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    /// Mutable access so weights can change between plays.
    pub fn dice_mut(&mut self) -> &mut [Die] {
        &mut self.dice
    }

    /// Roll every die `rolls` times and keep the table, replacing any
    /// previous play.
    ///
    /// # Errors
    ///
    /// [`MonteCarloError::InvalidRollCount`] for zero rolls, or whatever a
    /// die returns from [`Die::roll`].
    pub fn play<R: Rng + ?Sized>(&mut self, rng: &mut R, rolls: usize) -> Result<()> {
        if rolls == 0 {
            return Err(MonteCarloError::InvalidRollCount(rolls));
        }

        let mut rows: Vec<Vec<Face>> = (0..rolls)
            .map(|_| Vec::with_capacity(self.dice.len()))
            .collect();
        for die in &self.dice {
            for (row, face) in rows.iter_mut().zip(die.roll(rng, rolls)?) {
                row.push(face);
            }
        }

        debug!(rolls, dice = self.dice.len(), "game played");
        self.table = Some(PlayTable {
            columns: (0..self.dice.len()).map(die_label).collect(),
            rows,
        });
        Ok(())
    }

    /// The most recent play table.
    ///
    /// # Errors
    ///
    /// [`MonteCarloError::NotPlayed`] before the first [`Game::play`].
    pub fn table(&self) -> Result<&PlayTable> {
        self.table.as_ref().ok_or(MonteCarloError::NotPlayed)
    }

    /// The most recent play in wide or narrow form.
    ///
    /// # Errors
    ///
    /// [`MonteCarloError::NotPlayed`] before the first [`Game::play`].
    pub fn results(&self, form: Form) -> Result<PlayResults> {
        let table = self.table()?;
        Ok(match form {
            Form::Wide => PlayResults::Wide(table.clone()),
            Form::Narrow => PlayResults::Narrow(table.to_narrow()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded_rng;

    fn weighted_pair() -> Game {
        let mut a = Die::new((1..=6).map(Face::Int).collect()).expect("die");
        let mut b = a.clone();
        a.set_weight(&Face::Int(3), 4.0).expect("weight");
        b.set_weight(&Face::Int(4), 3.0).expect("weight");
        Game::new(vec![a, b]).expect("game")
    }

    #[test]
    fn empty_game_rejected() {
        assert!(matches!(Game::new(vec![]), Err(MonteCarloError::NoDice)));
    }

    #[test]
    fn results_before_play_fail() {
        let game = weighted_pair();
        assert_eq!(game.results(Form::Wide), Err(MonteCarloError::NotPlayed));
    }

    #[test]
    fn play_builds_rectangular_table() {
        let mut game = weighted_pair();
        let mut rng = seeded_rng(3);
        game.play(&mut rng, 10).expect("play");
        let table = game.table().expect("played");
        assert_eq!(table.rolls(), 10);
        assert_eq!(table.columns, vec!["die1", "die2"]);
        assert!(table.rows.iter().all(|row| row.len() == 2));
        assert_eq!(table.column(1).count(), 10);
    }

    #[test]
    fn zero_rolls_rejected() {
        let mut game = weighted_pair();
        let mut rng = seeded_rng(3);
        assert_eq!(
            game.play(&mut rng, 0),
            Err(MonteCarloError::InvalidRollCount(0))
        );
    }

    #[test]
    fn narrow_form_stacks_by_roll_then_die() {
        let mut game = weighted_pair();
        let mut rng = seeded_rng(11);
        game.play(&mut rng, 3).expect("play");
        let PlayResults::Narrow(records) = game.results(Form::Narrow).expect("narrow") else {
            panic!("expected narrow results");
        };
        let table = game.table().expect("played");
        assert_eq!(records.len(), 6);
        assert_eq!(records[0].roll, 1);
        assert_eq!(records[0].die, "die1");
        assert_eq!(records[1].die, "die2");
        assert_eq!(records[5].roll, 3);
        assert_eq!(records[3].face, table.rows[1][1]);
    }

    #[test]
    fn replaying_replaces_previous_table() {
        let mut game = weighted_pair();
        let mut rng = seeded_rng(5);
        game.play(&mut rng, 4).expect("play");
        game.play(&mut rng, 7).expect("play");
        assert_eq!(game.table().expect("played").rolls(), 7);
    }

    #[test]
    fn same_seed_same_table() {
        let mut g1 = weighted_pair();
        let mut g2 = weighted_pair();
        g1.play(&mut seeded_rng(42), 50).expect("play");
        g2.play(&mut seeded_rng(42), 50).expect("play");
        assert_eq!(g1.table().expect("t1"), g2.table().expect("t2"));
    }

    #[test]
    fn form_parsing() {
        assert_eq!("wide".parse::<Form>().expect("wide"), Form::Wide);
        assert_eq!("NARROW".parse::<Form>().expect("narrow"), Form::Narrow);
        assert_eq!(
            "tall".parse::<Form>(),
            Err(MonteCarloError::InvalidForm("tall".to_string()))
        );
    }
}
