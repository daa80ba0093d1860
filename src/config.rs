use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ProjectionError;

/// Which points-per-possession model the parameterizer runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OffenseModel {
    /// Blend own offense with opponent defense, shrink toward the league
    /// average. The original baseline.
    #[default]
    AdditiveShrinkage,
    /// Efficiency ratios against the league average, with optional
    /// four-factor multipliers layered on top.
    MultiplicativeFourFactor,
}

/// Which side simulated ties count toward when estimating win probability.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieBreak {
    /// Home wins only on a strictly greater score; ties go to the away side.
    #[default]
    Away,
    /// Ties go to the home side.
    Home,
}

/// League-average four factors, the fallback for teams without their own.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeagueFourFactors {
    pub effective_fg_pct: f64,
    pub offensive_rebound_pct: f64,
    pub defensive_rebound_pct: f64,
    pub turnover_rate: f64,
}

impl Default for LeagueFourFactors {
    fn default() -> Self {
        LeagueFourFactors {
            effective_fg_pct: LEAGUE_AVG_EFG,
            offensive_rebound_pct: LEAGUE_AVG_OREB,
            defensive_rebound_pct: LEAGUE_AVG_DREB,
            turnover_rate: LEAGUE_AVG_TOV,
        }
    }
}

/// Every tunable of the model in one place.
///
/// The source application hard-codes these, with slightly different values
/// per evolution (home bonus anywhere from 1.2 to 3.2 points), so they are
/// configuration here rather than fixed behavior. Defaults follow the
/// baseline evolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// League average rating, points per 100 possessions.
    pub league_average_rating: f64,
    /// Additive home-court bonus in points.
    pub home_court_bonus: f64,
    /// Shrinkage of blended offense toward the league average, in [0, 1].
    pub shrinkage_factor: f64,
    /// Pace anchor in possessions per game.
    pub pace_anchor: f64,
    /// Damping of averaged pace toward the anchor, in [0, 1].
    pub pace_damping: f64,
    /// Floor on possessions, expected and sampled.
    pub min_possessions: f64,
    /// Standard deviation of sampled possessions.
    pub possession_sd: f64,
    /// Standard deviation of sampled points per possession.
    pub ppp_sd: f64,
    /// Monte Carlo sample count.
    pub sample_count: usize,
    /// Total edge (points) at which an over/under fires.
    pub total_edge_threshold: f64,
    /// Spread edge (points) at which a side fires.
    pub spread_edge_threshold: f64,
    /// Edge magnitude at which confidence saturates.
    pub confidence_ceiling: f64,
    pub offense_model: OffenseModel,
    pub tie_break: TieBreak,
    pub league_four_factors: LeagueFourFactors,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            league_average_rating: LEAGUE_AVG_RATING,
            home_court_bonus: HOME_COURT_BONUS,
            shrinkage_factor: SHRINKAGE_FACTOR,
            pace_anchor: PACE_ANCHOR,
            pace_damping: PACE_DAMPING,
            min_possessions: MIN_POSSESSIONS,
            possession_sd: POSSESSION_SD,
            ppp_sd: PPP_SD,
            sample_count: SAMPLE_COUNT,
            total_edge_threshold: TOTAL_EDGE_THRESHOLD,
            spread_edge_threshold: SPREAD_EDGE_THRESHOLD,
            confidence_ceiling: CONFIDENCE_CEILING,
            offense_model: OffenseModel::default(),
            tie_break: TieBreak::default(),
            league_four_factors: LeagueFourFactors::default(),
        }
    }
}

impl ModelConfig {
    /// Reject settings the model cannot run with.
    pub fn validate(&self) -> Result<(), ProjectionError> {
        let finite = [
            ("league_average_rating", self.league_average_rating),
            ("home_court_bonus", self.home_court_bonus),
            ("shrinkage_factor", self.shrinkage_factor),
            ("pace_anchor", self.pace_anchor),
            ("pace_damping", self.pace_damping),
            ("min_possessions", self.min_possessions),
            ("possession_sd", self.possession_sd),
            ("ppp_sd", self.ppp_sd),
            ("total_edge_threshold", self.total_edge_threshold),
            ("spread_edge_threshold", self.spread_edge_threshold),
            ("confidence_ceiling", self.confidence_ceiling),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ProjectionError::InvalidConfig(format!(
                    "{name} is {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.shrinkage_factor) {
            return Err(ProjectionError::InvalidConfig(format!(
                "shrinkage_factor {} outside [0, 1]",
                self.shrinkage_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.pace_damping) {
            return Err(ProjectionError::InvalidConfig(format!(
                "pace_damping {} outside [0, 1]",
                self.pace_damping
            )));
        }
        if self.possession_sd <= 0.0 || self.ppp_sd <= 0.0 {
            return Err(ProjectionError::InvalidConfig(
                "standard deviations must be positive".to_string(),
            ));
        }
        if self.sample_count == 0 {
            return Err(ProjectionError::InvalidConfig(
                "sample_count must be at least 1".to_string(),
            ));
        }
        if self.total_edge_threshold < 0.0 || self.spread_edge_threshold < 0.0 {
            return Err(ProjectionError::InvalidConfig(
                "edge thresholds must be non-negative".to_string(),
            ));
        }
        if self.confidence_ceiling <= 0.0 {
            return Err(ProjectionError::InvalidConfig(
                "confidence_ceiling must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
