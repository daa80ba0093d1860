//! CBB Core - college-basketball projection and line-edge engine.
//!
//! Turns team efficiency ratings into a simulated score distribution for a
//! single matchup, compares the projection against a sportsbook line, and
//! scores the resulting edge. Data loading and presentation live outside
//! this crate; it consumes a validated [`RatingsTable`] plus a [`BookLine`]
//! and returns a [`ProjectionResult`]. Optional Python bindings live behind
//! the `python` feature.

pub mod confidence;
pub mod config;
pub mod constants;
pub mod error;
pub mod lines;
pub mod matchup;
pub mod projection;
#[cfg(feature = "python")]
mod python;
pub mod simulate;
pub mod slate;
pub mod team;
pub mod win_prob;

pub use confidence::confidence_from_edges;
pub use config::{LeagueFourFactors, ModelConfig, OffenseModel, TieBreak};
pub use error::ProjectionError;
pub use lines::{compare, BookLine, LineAssessment, SpreadPlay, TotalPlay};
pub use matchup::{parameterize, MatchupContext, MatchupParameters};
pub use projection::{project_game, project_game_full, ProjectionResult};
pub use simulate::{simulate, simulate_seeded, SimulationBatch};
pub use slate::{project_slate, GameRequest};
pub use team::{FourFactorStats, RatingsTable, TeamRating};
pub use win_prob::analytic_home_win_prob;
