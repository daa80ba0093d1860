//! Python bindings for the projection core.
//!
//! The UI collaborator loads ratings, collects the book line, and renders
//! the result; everything numeric happens here.

use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;

use crate::config::{ModelConfig, OffenseModel, TieBreak};
use crate::constants::{HOME_COURT_BONUS, LEAGUE_AVG_RATING, SAMPLE_COUNT, SHRINKAGE_FACTOR};
use crate::error::ProjectionError;
use crate::lines::{BookLine, SpreadPlay, TotalPlay};
use crate::projection::{project_game, ProjectionResult};
use crate::slate::{project_slate, GameRequest};
use crate::team::{FourFactorStats, RatingsTable, TeamRating};

impl From<ProjectionError> for PyErr {
    fn from(err: ProjectionError) -> PyErr {
        match err {
            ProjectionError::TeamNotFound { .. } => PyKeyError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Validated ratings table, built once per data refresh.
#[pyclass(name = "RatingsTable")]
#[derive(Clone)]
pub struct PyRatingsTable {
    inner: RatingsTable,
}

type RawRow = (String, f64, f64, f64, Option<(f64, f64, f64, f64)>);

#[pymethods]
impl PyRatingsTable {
    /// Build from `(name, offensive_rating, defensive_rating, pace,
    /// four_factors)` rows, where `four_factors` is `None` or
    /// `(efg, oreb, dreb, tov)` fractions. Invalid rows are dropped.
    #[new]
    pub fn new(rows: Vec<RawRow>) -> Self {
        let rows = rows
            .into_iter()
            .map(|(name, offense, defense, pace, factors)| {
                let rating = TeamRating::new(name, offense, defense, pace);
                match factors {
                    Some((efg, oreb, dreb, tov)) => rating.with_four_factors(FourFactorStats {
                        effective_fg_pct: efg,
                        offensive_rebound_pct: oreb,
                        defensive_rebound_pct: dreb,
                        turnover_rate: tov,
                    }),
                    None => rating,
                }
            })
            .collect();
        PyRatingsTable {
            inner: RatingsTable::from_rows(rows),
        }
    }

    /// Resolve a user-supplied name to the canonical team name.
    pub fn resolve(&self, name: &str) -> PyResult<String> {
        Ok(self.inner.resolve(name)?.name.clone())
    }

    pub fn team_names(&self) -> Vec<String> {
        self.inner.teams().iter().map(|t| t.name.clone()).collect()
    }

    pub fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!("RatingsTable({} teams)", self.inner.len())
    }
}

/// Model settings; defaults mirror the baseline configuration.
#[pyclass(name = "ModelConfig")]
#[derive(Clone)]
pub struct PyModelConfig {
    inner: ModelConfig,
}

#[pymethods]
impl PyModelConfig {
    #[new]
    #[pyo3(signature = (
        home_court_bonus = HOME_COURT_BONUS,
        shrinkage_factor = SHRINKAGE_FACTOR,
        sample_count = SAMPLE_COUNT,
        multiplicative = false,
        ties_to_home = false,
    ))]
    pub fn new(
        home_court_bonus: f64,
        shrinkage_factor: f64,
        sample_count: usize,
        multiplicative: bool,
        ties_to_home: bool,
    ) -> Self {
        PyModelConfig {
            inner: ModelConfig {
                home_court_bonus,
                shrinkage_factor,
                sample_count,
                offense_model: if multiplicative {
                    OffenseModel::MultiplicativeFourFactor
                } else {
                    OffenseModel::AdditiveShrinkage
                },
                tie_break: if ties_to_home {
                    TieBreak::Home
                } else {
                    TieBreak::Away
                },
                ..ModelConfig::default()
            },
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ModelConfig(bonus={}, shrinkage={}, sims={})",
            self.inner.home_court_bonus, self.inner.shrinkage_factor, self.inner.sample_count
        )
    }
}

/// Projection result with per-field getters for the presentation layer.
#[pyclass(name = "Projection")]
pub struct PyProjection {
    inner: ProjectionResult,
}

#[pymethods]
impl PyProjection {
    #[getter]
    fn away_team(&self) -> String {
        self.inner.away_team.clone()
    }

    #[getter]
    fn home_team(&self) -> String {
        self.inner.home_team.clone()
    }

    #[getter]
    fn mean_away_score(&self) -> f64 {
        self.inner.mean_away_score
    }

    #[getter]
    fn mean_home_score(&self) -> f64 {
        self.inner.mean_home_score
    }

    #[getter]
    fn model_total(&self) -> f64 {
        self.inner.model_total
    }

    #[getter]
    fn model_spread_home(&self) -> f64 {
        self.inner.model_spread_home
    }

    #[getter]
    fn away_win_probability(&self) -> f64 {
        self.inner.away_win_probability
    }

    #[getter]
    fn home_win_probability(&self) -> f64 {
        self.inner.home_win_probability
    }

    #[getter]
    fn total_edge(&self) -> f64 {
        self.inner.total_edge
    }

    #[getter]
    fn spread_edge(&self) -> f64 {
        self.inner.spread_edge
    }

    #[getter]
    fn total_play(&self) -> &'static str {
        match self.inner.total_play {
            TotalPlay::Over => "OVER",
            TotalPlay::Under => "UNDER",
            TotalPlay::NoBet => "NO BET",
        }
    }

    #[getter]
    fn spread_play(&self) -> &'static str {
        match self.inner.spread_play {
            SpreadPlay::Home => "HOME",
            SpreadPlay::Away => "AWAY",
            SpreadPlay::NoBet => "NO BET",
        }
    }

    #[getter]
    fn confidence(&self) -> u8 {
        self.inner.confidence
    }

    #[getter]
    fn away_score_iqr(&self) -> (f64, f64) {
        self.inner.away_score_iqr
    }

    #[getter]
    fn home_score_iqr(&self) -> (f64, f64) {
        self.inner.home_score_iqr
    }

    fn __repr__(&self) -> String {
        format!(
            "Projection({} {:.1} @ {} {:.1}, conf {}/10)",
            self.inner.away_team,
            self.inner.mean_away_score,
            self.inner.home_team,
            self.inner.mean_home_score,
            self.inner.confidence
        )
    }
}

/// Project one game against a book line.
#[pyfunction]
#[pyo3(signature = (table, away, home, home_spread, total, config = None, seed = None))]
fn py_project_game(
    table: &PyRatingsTable,
    away: &str,
    home: &str,
    home_spread: f64,
    total: f64,
    config: Option<PyModelConfig>,
    seed: Option<u64>,
) -> PyResult<PyProjection> {
    let line = BookLine::new(home_spread, total)?;
    let config = config.map(|c| c.inner).unwrap_or_default();
    let result = project_game(&table.inner, away, home, &line, &config, seed)?;
    Ok(PyProjection { inner: result })
}

/// Project a slate of `(away, home, home_spread, total)` games in parallel.
/// Returns one `(projection, error_message)` pair per game.
#[pyfunction]
#[pyo3(signature = (table, games, config = None, seed = None))]
fn py_project_slate(
    table: &PyRatingsTable,
    games: Vec<(String, String, f64, f64)>,
    config: Option<PyModelConfig>,
    seed: Option<u64>,
) -> PyResult<Vec<(Option<PyProjection>, Option<String>)>> {
    let mut requests = Vec::with_capacity(games.len());
    for (away, home, home_spread, total) in games {
        requests.push(GameRequest::new(away, home, BookLine::new(home_spread, total)?));
    }
    let config = config.map(|c| c.inner).unwrap_or_default();

    Ok(project_slate(&table.inner, &requests, &config, seed)
        .into_iter()
        .map(|result| match result {
            Ok(projection) => (Some(PyProjection { inner: projection }), None),
            Err(err) => (None, Some(err.to_string())),
        })
        .collect())
}

/// Python module definition
#[pymodule]
fn cbb_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyRatingsTable>()?;
    m.add_class::<PyModelConfig>()?;
    m.add_class::<PyProjection>()?;

    m.add_function(wrap_pyfunction!(py_project_game, m)?)?;
    m.add_function(wrap_pyfunction!(py_project_slate, m)?)?;

    m.add("LEAGUE_AVG_RATING", LEAGUE_AVG_RATING)?;
    m.add("HOME_COURT_BONUS", HOME_COURT_BONUS)?;
    m.add("SAMPLE_COUNT", SAMPLE_COUNT)?;

    Ok(())
}
