use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;
use crate::error::ProjectionError;
use crate::simulate::SimulationBatch;

/// Sportsbook line for one game. Negative home spread means the home side is
/// favored by that many points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookLine {
    pub home_spread: f64,
    pub total: f64,
}

impl BookLine {
    pub fn new(home_spread: f64, total: f64) -> Result<Self, ProjectionError> {
        if !home_spread.is_finite() {
            return Err(ProjectionError::InvalidLine {
                field: "home_spread",
                value: home_spread,
            });
        }
        if !total.is_finite() {
            return Err(ProjectionError::InvalidLine {
                field: "total",
                value: total,
            });
        }
        Ok(BookLine { home_spread, total })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TotalPlay {
    Over,
    Under,
    NoBet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpreadPlay {
    Home,
    Away,
    NoBet,
}

/// Model-vs-book comparison for one game.
///
/// A recommended side is always a claim on the book's own number, never a
/// new line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineAssessment {
    pub total_edge: f64,
    pub total_play: TotalPlay,
    pub spread_edge: f64,
    pub spread_play: SpreadPlay,
}

/// Compare simulated means against the book.
///
/// Thresholds are inclusive: an edge exactly at the threshold is a play, not
/// a push.
pub fn compare(batch: &SimulationBatch, line: &BookLine, config: &ModelConfig) -> LineAssessment {
    let mean_away = batch.mean_away();
    let mean_home = batch.mean_home();

    let model_total = mean_away + mean_home;
    let total_edge = model_total - line.total;
    let total_play = if total_edge >= config.total_edge_threshold {
        TotalPlay::Over
    } else if total_edge <= -config.total_edge_threshold {
        TotalPlay::Under
    } else {
        TotalPlay::NoBet
    };

    // Book convention is "home -x" when home is favored; flip the sign so
    // both numbers read "home favored by x".
    let model_spread_home = mean_home - mean_away;
    let book_home_edge = -line.home_spread;
    let spread_edge = model_spread_home - book_home_edge;
    let spread_play = if spread_edge >= config.spread_edge_threshold {
        SpreadPlay::Home
    } else if spread_edge <= -config.spread_edge_threshold {
        SpreadPlay::Away
    } else {
        SpreadPlay::NoBet
    };

    LineAssessment {
        total_edge,
        total_play,
        spread_edge,
        spread_play,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch_with_means(away: f64, home: f64) -> SimulationBatch {
        SimulationBatch {
            away_scores: vec![away; 4],
            home_scores: vec![home; 4],
        }
    }

    #[test]
    fn test_total_over_at_exact_threshold() {
        // Model total 147.0 against a 145.0 book: edge exactly 2.0 fires.
        let batch = batch_with_means(72.0, 75.0);
        let line = BookLine::new(-5.0, 145.0).unwrap();
        let assessment = compare(&batch, &line, &ModelConfig::default());

        assert!((assessment.total_edge - 2.0).abs() < 1e-12);
        assert_eq!(assessment.total_play, TotalPlay::Over);
    }

    #[test]
    fn test_total_under_and_no_bet() {
        let config = ModelConfig::default();
        let line = BookLine::new(0.0, 145.0).unwrap();

        let under = compare(&batch_with_means(70.0, 70.0), &line, &config);
        assert_eq!(under.total_play, TotalPlay::Under);

        let quiet = compare(&batch_with_means(72.0, 72.5), &line, &config);
        assert_eq!(quiet.total_play, TotalPlay::NoBet);
    }

    #[test]
    fn test_spread_sign_convention() {
        // Model has home by 3; book has home by 5 (spread -5.0). Edge is -2,
        // past the 1.5 threshold on the away side.
        let batch = batch_with_means(70.0, 73.0);
        let line = BookLine::new(-5.0, 143.0).unwrap();
        let assessment = compare(&batch, &line, &ModelConfig::default());

        assert!((assessment.spread_edge - (-2.0)).abs() < 1e-12);
        assert_eq!(assessment.spread_play, SpreadPlay::Away);
    }

    #[test]
    fn test_spread_home_side() {
        // Model has home by 6; book only asks for 3.
        let batch = batch_with_means(70.0, 76.0);
        let line = BookLine::new(-3.0, 150.0).unwrap();
        let assessment = compare(&batch, &line, &ModelConfig::default());

        assert!((assessment.spread_edge - 3.0).abs() < 1e-12);
        assert_eq!(assessment.spread_play, SpreadPlay::Home);
    }

    #[test]
    fn test_swap_sides_negates_spread_edge_keeps_total_edge() {
        let config = ModelConfig::default();
        let line = BookLine::new(-5.0, 145.0).unwrap();
        let flipped = BookLine::new(5.0, 145.0).unwrap();

        let forward = compare(&batch_with_means(71.4, 69.1), &line, &config);
        let backward = compare(&batch_with_means(69.1, 71.4), &flipped, &config);

        assert!((forward.total_edge - backward.total_edge).abs() < 1e-12);
        assert!((forward.spread_edge + backward.spread_edge).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_non_finite_line() {
        assert!(matches!(
            BookLine::new(f64::NAN, 145.0),
            Err(ProjectionError::InvalidLine {
                field: "home_spread",
                ..
            })
        ));
        assert!(matches!(
            BookLine::new(-5.0, f64::INFINITY),
            Err(ProjectionError::InvalidLine { field: "total", .. })
        ));
    }
}
