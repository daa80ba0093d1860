use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::confidence::confidence_from_edges;
use crate::config::ModelConfig;
use crate::error::ProjectionError;
use crate::lines::{compare, BookLine, SpreadPlay, TotalPlay};
use crate::matchup::{parameterize, MatchupContext};
use crate::simulate::{simulate_seeded, SimulationBatch};
use crate::team::RatingsTable;

/// Full projection for one game: scores, ranges, probabilities, plays, and
/// confidence. A value object for the presentation layer; the caller decides
/// whether to persist or export it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub away_team: String,
    pub home_team: String,
    pub book: BookLine,
    pub mean_away_score: f64,
    pub mean_home_score: f64,
    pub model_total: f64,
    /// Positive means home favored by that many points.
    pub model_spread_home: f64,
    pub away_win_probability: f64,
    pub home_win_probability: f64,
    pub total_edge: f64,
    pub spread_edge: f64,
    pub total_play: TotalPlay,
    pub spread_play: SpreadPlay,
    /// 1 (no edge) to 10 (edge at or past the ceiling).
    pub confidence: u8,
    /// 25th/75th percentile of the simulated score per side.
    pub away_score_iqr: (f64, f64),
    pub home_score_iqr: (f64, f64),
}

/// Project one game and keep the raw batch for callers that want their own
/// percentiles or plots.
pub fn project_game_full(
    table: &RatingsTable,
    away_name: &str,
    home_name: &str,
    line: &BookLine,
    config: &ModelConfig,
    seed: Option<u64>,
) -> Result<(ProjectionResult, SimulationBatch), ProjectionError> {
    config.validate()?;

    let away = table.resolve(away_name)?;
    let home = table.resolve(home_name)?;

    let params = parameterize(&MatchupContext {
        away,
        home,
        config,
    })?;
    let batch = simulate_seeded(&params, config, seed)?;

    let assessment = compare(&batch, line, config);
    let confidence = confidence_from_edges(
        assessment.total_edge,
        assessment.spread_edge,
        config.confidence_ceiling,
    );

    let mean_away_score = batch.mean_away();
    let mean_home_score = batch.mean_home();
    let home_win_probability = batch.home_win_fraction(config.tie_break);

    let result = ProjectionResult {
        away_team: away.name.clone(),
        home_team: home.name.clone(),
        book: *line,
        mean_away_score,
        mean_home_score,
        model_total: mean_away_score + mean_home_score,
        model_spread_home: mean_home_score - mean_away_score,
        away_win_probability: 1.0 - home_win_probability,
        home_win_probability,
        total_edge: assessment.total_edge,
        spread_edge: assessment.spread_edge,
        total_play: assessment.total_play,
        spread_play: assessment.spread_play,
        confidence,
        away_score_iqr: (batch.away_percentile(0.25), batch.away_percentile(0.75)),
        home_score_iqr: (batch.home_percentile(0.25), batch.home_percentile(0.75)),
    };

    debug!(
        away = %result.away_team,
        home = %result.home_team,
        model_total = result.model_total,
        model_spread_home = result.model_spread_home,
        confidence = result.confidence,
        "projected game"
    );

    Ok((result, batch))
}

/// Project one game. Pass a seed for reproducible output; `None` draws from
/// entropy, so repeated calls differ within statistical tolerance.
pub fn project_game(
    table: &RatingsTable,
    away_name: &str,
    home_name: &str,
    line: &BookLine,
    config: &ModelConfig,
    seed: Option<u64>,
) -> Result<ProjectionResult, ProjectionError> {
    project_game_full(table, away_name, home_name, line, config, seed).map(|(result, _)| result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::TeamRating;
    use crate::win_prob::analytic_home_win_prob;

    fn scenario_table() -> RatingsTable {
        RatingsTable::from_rows(vec![
            TeamRating::new("TeamA", 110.0, 95.0, 70.0),
            TeamRating::new("TeamB", 100.0, 100.0, 66.0),
        ])
    }

    fn scenario_line() -> BookLine {
        BookLine::new(-5.0, 145.0).unwrap()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let table = scenario_table();
        let config = ModelConfig::default();
        let result =
            project_game(&table, "TeamA", "TeamB", &scenario_line(), &config, Some(11)).unwrap();

        // Deterministic expectations: away 71.4, home 69.112; the batch
        // means wander around them.
        assert!((result.mean_away_score - 71.4).abs() < 0.5);
        assert!((result.mean_home_score - 69.112).abs() < 0.5);
        assert!((result.model_total - 140.5).abs() < 1.0);

        // The away side's profile beats the home bonus here.
        assert!(result.model_spread_home < 0.0);
        assert!(result.away_win_probability > result.home_win_probability);

        // Book total 145 is ~4.5 above the model: UNDER. Book home edge of 5
        // against a model home edge of about -2.3: away side.
        assert_eq!(result.total_play, TotalPlay::Under);
        assert_eq!(result.spread_play, SpreadPlay::Away);

        // Spread edge ~-7.3 is past the 6.0 ceiling.
        assert_eq!(result.confidence, 10);

        assert!(
            (result.away_win_probability + result.home_win_probability - 1.0).abs() < 1e-12
        );
        assert!(result.away_score_iqr.0 < result.away_score_iqr.1);
        assert!(result.home_score_iqr.0 < result.home_score_iqr.1);
    }

    #[test]
    fn test_win_probability_reproducible_across_seeds() {
        let table = scenario_table();
        let config = ModelConfig::default();

        let mut estimates = Vec::new();
        for seed in [1u64, 99, 12345] {
            let result = project_game(
                &table,
                "TeamA",
                "TeamB",
                &scenario_line(),
                &config,
                Some(seed),
            )
            .unwrap();
            estimates.push(result.home_win_probability);
        }

        let lo = estimates.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = estimates.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(
            hi - lo < 0.04,
            "win probability spread across seeds too wide: {estimates:?}"
        );
    }

    #[test]
    fn test_monte_carlo_agrees_with_analytic_win_prob() {
        let table = scenario_table();
        let config = ModelConfig::default();
        let (result, batch) = project_game_full(
            &table,
            "TeamA",
            "TeamB",
            &scenario_line(),
            &config,
            Some(5),
        )
        .unwrap();
        assert_eq!(batch.len(), config.sample_count);

        let away = table.resolve("TeamA").unwrap();
        let home = table.resolve("TeamB").unwrap();
        let params = parameterize(&MatchupContext {
            away,
            home,
            config: &config,
        })
        .unwrap();
        let analytic = analytic_home_win_prob(
            &params,
            config.home_court_bonus,
            config.possession_sd,
            config.ppp_sd,
        );

        assert!(
            (result.home_win_probability - analytic).abs() < 0.025,
            "mc {} vs analytic {analytic}",
            result.home_win_probability
        );
    }

    #[test]
    fn test_substring_lookup_reaches_projection() {
        let table = RatingsTable::from_rows(vec![
            TeamRating::new("Duke Blue Devils", 118.2, 94.1, 69.5),
            TeamRating::new("Kansas Jayhawks", 115.7, 96.3, 67.2),
        ]);
        let line = BookLine::new(-2.5, 150.0).unwrap();
        let result = project_game(
            &table,
            "kansas",
            "duke",
            &line,
            &ModelConfig::default(),
            Some(1),
        )
        .unwrap();
        assert_eq!(result.away_team, "Kansas Jayhawks");
        assert_eq!(result.home_team, "Duke Blue Devils");
    }

    #[test]
    fn test_unknown_team_aborts_with_no_partial_result() {
        let table = scenario_table();
        let err = project_game(
            &table,
            "Zzzyzx",
            "TeamB",
            &scenario_line(),
            &ModelConfig::default(),
            Some(1),
        )
        .unwrap_err();
        assert!(matches!(err, ProjectionError::TeamNotFound { .. }));
    }

    #[test]
    fn test_invalid_config_rejected_before_lookup() {
        let table = scenario_table();
        let config = ModelConfig {
            sample_count: 0,
            ..ModelConfig::default()
        };
        let err = project_game(
            &table,
            "TeamA",
            "TeamB",
            &scenario_line(),
            &config,
            Some(1),
        )
        .unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidConfig(_)));
    }

    #[test]
    fn test_result_serializes_for_export() {
        let table = scenario_table();
        let result = project_game(
            &table,
            "TeamA",
            "TeamB",
            &scenario_line(),
            &ModelConfig::default(),
            Some(2),
        )
        .unwrap();

        let json = serde_json::to_string(&result).unwrap();
        let back: ProjectionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
