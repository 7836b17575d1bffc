//! Weighted die.
//!
//! A [`Die`] owns a list of distinct faces and one non-negative weight per
//! face. Rolling draws faces independently with probability proportional to
//! their weight.

use std::collections::HashSet;

use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{MonteCarloError, Result};
use crate::face::Face;

/// Weight every face starts with.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// One row of a die's state table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceWeight {
    pub face: Face,
    pub weight: f64,
}

/// A die with distinct faces and mutable per-face weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Die {
    faces: Vec<Face>,
    weights: Vec<f64>,
}

impl Die {
    /// Create a fair die: every face weighted [`DEFAULT_WEIGHT`].
    ///
    /// # Errors
    ///
    /// Fails when `faces` is empty, holds a duplicate, or mixes integer and
    /// text faces.
    pub fn new(faces: Vec<Face>) -> Result<Self> {
        let Some(first) = faces.first() else {
            return Err(MonteCarloError::EmptyFaces);
        };
        let kind = first.kind();
        if faces.iter().any(|f| f.kind() != kind) {
            return Err(MonteCarloError::MixedFaceKinds);
        }

        let mut seen = HashSet::with_capacity(faces.len());
        for face in &faces {
            if !seen.insert(face) {
                return Err(MonteCarloError::DuplicateFace(face.clone()));
            }
        }

        let weights = vec![DEFAULT_WEIGHT; faces.len()];
        Ok(Self { faces, weights })
    }

    /// Create a die from `(face, weight)` pairs.
    ///
    /// # Errors
    ///
    /// Same as [`Die::new`] and [`Die::set_weight`].
    pub fn with_weights(pairs: impl IntoIterator<Item = (Face, f64)>) -> Result<Self> {
        let (faces, weights): (Vec<Face>, Vec<f64>) = pairs.into_iter().unzip();
        let mut die = Self::new(faces.clone())?;
        for (face, weight) in faces.iter().zip(weights) {
            die.set_weight(face, weight)?;
        }
        Ok(die)
    }

    /// Faces in construction order.
    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Weights aligned with [`Die::faces`].
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Current weight of `face`, if the die has it.
    #[must_use]
    pub fn weight(&self, face: &Face) -> Option<f64> {
        self.position(face).map(|idx| self.weights[idx])
    }

    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Weights normalized to sum to one. All zeros when the total is zero.
    #[must_use]
    pub fn probabilities(&self) -> Vec<f64> {
        let total = self.total_weight();
        if total <= 0.0 {
            return vec![0.0; self.weights.len()];
        }
        self.weights.iter().map(|w| w / total).collect()
    }

    /// Replace the weight of `face`, returning the previous weight.
    ///
    /// # Errors
    ///
    /// [`MonteCarloError::UnknownFace`] if the face is not on the die, or
    /// [`MonteCarloError::InvalidWeight`] if `weight` is negative, not
    /// finite, or would push the die's total weight past `f64::MAX`. A
    /// rejected weight leaves the die unchanged.
    pub fn set_weight(&mut self, face: &Face, weight: f64) -> Result<f64> {
        let idx = self.require_position(face)?;
        let others: f64 = self
            .weights
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != idx)
            .map(|(_, w)| w)
            .sum();
        if !weight.is_finite() || weight < 0.0 || !(others + weight).is_finite() {
            return Err(MonteCarloError::InvalidWeight {
                face: face.clone(),
                raw: weight.to_string(),
            });
        }

        let previous = std::mem::replace(&mut self.weights[idx], weight);
        debug!(%face, previous, weight, "die weight changed");
        if self.total_weight() <= 0.0 {
            warn!("every face on the die now has zero weight");
        }
        Ok(previous)
    }

    /// Like [`Die::set_weight`] but accepts a textual weight such as `"2.5"`.
    ///
    /// # Errors
    ///
    /// [`MonteCarloError::InvalidWeight`] if `raw` is not a number, plus
    /// everything [`Die::set_weight`] rejects.
    pub fn set_weight_str(&mut self, face: &Face, raw: &str) -> Result<f64> {
        self.require_position(face)?;
        let weight = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| MonteCarloError::InvalidWeight {
                face: face.clone(),
                raw: raw.to_string(),
            })?;
        self.set_weight(face, weight)
    }

    /// Roll the die `rolls` times.
    ///
    /// # Errors
    ///
    /// [`MonteCarloError::InvalidRollCount`] when `rolls` is zero and
    /// [`MonteCarloError::ZeroTotalWeight`] when no face can be drawn, and
    /// [`MonteCarloError::Internal`] if the weights cannot form a
    /// distribution.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R, rolls: usize) -> Result<Vec<Face>> {
        if rolls == 0 {
            return Err(MonteCarloError::InvalidRollCount(rolls));
        }
        let total = self.total_weight();
        if !total.is_finite() {
            return Err(MonteCarloError::Internal(format!(
                "total die weight {total} is not finite"
            )));
        }
        if total <= 0.0 {
            return Err(MonteCarloError::ZeroTotalWeight);
        }
        let dist = WeightedIndex::new(&self.weights)
            .map_err(|err| MonteCarloError::Internal(format!("weighted sampling: {err}")))?;

        Ok((0..rolls)
            .map(|_| self.faces[dist.sample(&mut *rng)].clone())
            .collect())
    }

    /// Snapshot of the die as a face/weight table.
    #[must_use]
    pub fn state(&self) -> Vec<FaceWeight> {
        self.faces
            .iter()
            .zip(&self.weights)
            .map(|(face, &weight)| FaceWeight {
                face: face.clone(),
                weight,
            })
            .collect()
    }

    fn position(&self, face: &Face) -> Option<usize> {
        self.faces.iter().position(|f| f == face)
    }

    fn require_position(&self, face: &Face) -> Result<usize> {
        self.position(face).ok_or_else(|| MonteCarloError::UnknownFace {
            face: face.clone(),
            first: self.faces[0].clone(),
            last: self.faces[self.faces.len() - 1].clone(),
        })
    }
}
