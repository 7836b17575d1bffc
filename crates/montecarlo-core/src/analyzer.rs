//! Counting queries over a played game.
//!
//! The [`Analyzer`] snapshots a game's wide table when it is created, so
//! later plays of the same game do not change its answers.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::face::Face;
use crate::game::{Game, PlayTable};

/// Per-roll face frequencies: `rows[r][f]` is how many dice showed
/// `faces[f]` on roll `r + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceCounts {
    pub faces: Vec<Face>,
    pub rows: Vec<Vec<usize>>,
}

impl FaceCounts {
    /// Column totals across every roll.
    #[must_use]
    pub fn totals(&self) -> Vec<usize> {
        let mut totals = vec![0; self.faces.len()];
        for row in &self.rows {
            for (total, n) in totals.iter_mut().zip(row) {
                *total += n;
            }
        }
        totals
    }
}

/// How many rolls produced a given outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCount {
    pub faces: Vec<Face>,
    pub count: usize,
}

/// Statistics over one play of a [`Game`].
#[derive(Debug, Clone)]
pub struct Analyzer {
    table: PlayTable,
    faces: Vec<Face>,
}

impl Analyzer {
    /// Capture `game`'s current table.
    ///
    /// # Errors
    ///
    /// [`crate::MonteCarloError::NotPlayed`] if the game has no results.
    pub fn new(game: &Game) -> Result<Self> {
        let table = game.table()?.clone();
        let mut faces: Vec<Face> = Vec::new();
        for face in game.dice().iter().flat_map(|d| d.faces()) {
            if !faces.contains(face) {
                faces.push(face.clone());
            }
        }
        Ok(Self { table, faces })
    }

    #[must_use]
    pub const fn table(&self) -> &PlayTable {
        &self.table
    }

    /// Every face any die can show, in die order.
    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[must_use]
    pub fn rolls(&self) -> usize {
        self.table.rolls()
    }

    #[must_use]
    pub fn dice_count(&self) -> usize {
        self.table.dice_count()
    }

    /// Number of rolls where every die shows the same face.
    #[must_use]
    pub fn jackpot(&self) -> usize {
        self.table
            .rows
            .iter()
            .filter(|row| row.windows(2).all(|pair| pair[0] == pair[1]))
            .count()
    }

    /// Per-roll count of each face.
    #[must_use]
    pub fn face_count(&self) -> FaceCounts {
        let index: HashMap<&Face, usize> =
            self.faces.iter().enumerate().map(|(i, f)| (f, i)).collect();

        let rows = self
            .table
            .rows
            .iter()
            .map(|row| {
                let mut counts = vec![0_usize; self.faces.len()];
                for face in row {
                    if let Some(&i) = index.get(face) {
                        counts[i] += 1;
                    }
                }
                counts
            })
            .collect();

        FaceCounts {
            faces: self.faces.clone(),
            rows,
        }
    }

    /// Distinct unordered outcomes, least frequent first.
    #[must_use]
    pub fn combo_count(&self) -> Vec<OutcomeCount> {
        tally(self.table.rows.iter().map(|row| {
            let mut sorted = row.clone();
            sorted.sort();
            sorted
        }))
    }

    /// Distinct ordered outcomes, least frequent first.
    #[must_use]
    pub fn perm_count(&self) -> Vec<OutcomeCount> {
        tally(self.table.rows.iter().cloned())
    }
}

/// Group identical outcomes and order by ascending count, then outcome.
fn tally(outcomes: impl Iterator<Item = Vec<Face>>) -> Vec<OutcomeCount> {
    let mut groups: BTreeMap<Vec<Face>, usize> = BTreeMap::new();
    for outcome in outcomes {
        *groups.entry(outcome).or_default() += 1;
    }

    let mut counts: Vec<OutcomeCount> = groups
        .into_iter()
        .map(|(faces, count)| OutcomeCount { faces, count })
        .collect();
    // Stable sort keeps the BTreeMap's face order within equal counts.
    counts.sort_by_key(|c| c.count);
    counts
}
