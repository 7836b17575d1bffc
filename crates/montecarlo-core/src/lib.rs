//! montecarlo-core library.
//!
//! Weighted dice, multi-die games, and counting statistics over their rolls.
//!
//! # Conventions
//!
//! - **Errors**: Domain failures are [`MonteCarloError`]; orchestration code
//!   (config loading, sweeps) returns `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`).
//! - **Randomness**: Every sampling API takes `&mut impl rand::Rng`; use
//!   [`rng::seeded_rng`] for reproducible runs.

pub mod analyzer;
pub mod config;
pub mod die;
pub mod error;
pub mod face;
pub mod game;
pub mod rng;
pub mod sweep;

pub use analyzer::{Analyzer, FaceCounts, OutcomeCount};
pub use die::{Die, FaceWeight};
pub use error::{ErrorCode, MonteCarloError};
pub use face::{Face, FaceKind};
pub use game::{Form, Game, NarrowRecord, PlayResults, PlayTable};
