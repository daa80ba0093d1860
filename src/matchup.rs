use tracing::debug;

use crate::config::{LeagueFourFactors, ModelConfig, OffenseModel};
use crate::constants::{FOUR_FACTOR_DAMPING, MIN_DENOMINATOR, W_EFG, W_REB, W_TOV};
use crate::error::ProjectionError;
use crate::team::TeamRating;

/// One matchup plus the settings it is projected under. Immutable for the
/// duration of a projection call.
#[derive(Clone, Copy, Debug)]
pub struct MatchupContext<'a> {
    pub away: &'a TeamRating,
    pub home: &'a TeamRating,
    pub config: &'a ModelConfig,
}

/// Inputs to the simulator, derived deterministically from a context.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchupParameters {
    pub expected_possessions: f64,
    pub away_ppp: f64,
    pub home_ppp: f64,
}

impl MatchupParameters {
    /// Deterministic baseline scores, for display alongside the simulation.
    /// The home bonus is an additive shift, never scaled into the PPP.
    pub fn expected_scores(&self, home_bonus: f64) -> (f64, f64) {
        (
            self.away_ppp * self.expected_possessions,
            self.home_ppp * self.expected_possessions + home_bonus,
        )
    }
}

/// Convert two teams' ratings into expected possessions and per-side points
/// per possession.
pub fn parameterize(ctx: &MatchupContext) -> Result<MatchupParameters, ProjectionError> {
    let config = ctx.config;

    // Average the teams' pace, then damp toward the anchor so small-sample
    // tempo extremes don't dominate the score.
    let raw_pace = (ctx.away.pace + ctx.home.pace) / 2.0;
    let damped = config.pace_anchor + (raw_pace - config.pace_anchor) * config.pace_damping;
    let expected_possessions = damped.max(config.min_possessions);

    let away_ppp = side_ppp(ctx.away, ctx.home, config)?;
    let home_ppp = side_ppp(ctx.home, ctx.away, config)?;

    debug!(
        away = %ctx.away.name,
        home = %ctx.home.name,
        expected_possessions,
        away_ppp,
        home_ppp,
        "parameterized matchup"
    );

    Ok(MatchupParameters {
        expected_possessions,
        away_ppp,
        home_ppp,
    })
}

fn side_ppp(
    own: &TeamRating,
    opp: &TeamRating,
    config: &ModelConfig,
) -> Result<f64, ProjectionError> {
    let league = config.league_average_rating;

    let ppp = match config.offense_model {
        OffenseModel::AdditiveShrinkage => {
            let raw_offense = (own.offensive_rating + opp.defensive_rating) / 2.0;
            let adjusted =
                (raw_offense - league) * (1.0 - config.shrinkage_factor) + league;
            adjusted / 100.0
        }
        OffenseModel::MultiplicativeFourFactor => {
            let base_ppp = league / 100.0;
            let own_ratio = own.offensive_rating / league.max(MIN_DENOMINATOR);
            let def_ratio = league / opp.defensive_rating.max(MIN_DENOMINATOR);
            base_ppp
                * own_ratio
                * def_ratio
                * four_factor_multiplier(own, opp, &config.league_four_factors)
        }
    };

    if !ppp.is_finite() {
        return Err(ProjectionError::DegenerateRatings {
            team: own.name.clone(),
            detail: format!(
                "points per possession is {ppp} (offense {}, opponent defense {})",
                own.offensive_rating, opp.defensive_rating
            ),
        });
    }

    Ok(ppp)
}

/// Secondary four-factor signal, combined multiplicatively and damped so it
/// never overwhelms the primary efficiency ratios. A side without four-factor
/// data contributes 1.0 per statistic (league-average fallback).
fn four_factor_multiplier(own: &TeamRating, opp: &TeamRating, league: &LeagueFourFactors) -> f64 {
    let offense = match own.four_factors {
        Some(ff) => {
            (ff.effective_fg_pct / league.effective_fg_pct.max(MIN_DENOMINATOR)).powf(W_EFG)
                * ((1.0 - ff.turnover_rate)
                    / (1.0 - league.turnover_rate).max(MIN_DENOMINATOR))
                .powf(W_TOV)
                * (ff.offensive_rebound_pct / league.offensive_rebound_pct.max(MIN_DENOMINATOR))
                    .powf(W_REB)
        }
        None => 1.0,
    };

    let defense = match opp.four_factors {
        Some(ff) => (ff.defensive_rebound_pct
            / league.defensive_rebound_pct.max(MIN_DENOMINATOR))
        .powf(W_REB),
        None => 1.0,
    };

    (offense * defense).powf(FOUR_FACTOR_DAMPING)
}
