use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ProjectionError;

/// Four-factor shooting/possession stats, stored as fractions in [0, 1].
///
/// Free-throw rate is not part of this model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FourFactorStats {
    pub effective_fg_pct: f64,
    pub offensive_rebound_pct: f64,
    pub defensive_rebound_pct: f64,
    pub turnover_rate: f64,
}

impl FourFactorStats {
    fn is_valid(&self) -> bool {
        [
            self.effective_fg_pct,
            self.offensive_rebound_pct,
            self.defensive_rebound_pct,
            self.turnover_rate,
        ]
        .iter()
        .all(|v| v.is_finite() && (0.0..=1.0).contains(v))
    }
}

/// Team with opponent-adjusted efficiency ratings and pace.
///
/// Ratings are points per 100 possessions; pace is possessions per 40
/// minutes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamRating {
    pub name: String,
    pub offensive_rating: f64,
    pub defensive_rating: f64,
    pub pace: f64,
    /// Optional secondary signal for the multiplicative model.
    pub four_factors: Option<FourFactorStats>,
}

impl TeamRating {
    pub fn new(name: impl Into<String>, offensive_rating: f64, defensive_rating: f64, pace: f64) -> Self {
        TeamRating {
            name: name.into(),
            offensive_rating,
            defensive_rating,
            pace,
            four_factors: None,
        }
    }

    pub fn with_four_factors(mut self, four_factors: FourFactorStats) -> Self {
        self.four_factors = Some(four_factors);
        self
    }

    fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && self.offensive_rating.is_finite()
            && self.defensive_rating.is_finite()
            && self.pace.is_finite()
            && self.four_factors.map_or(true, |ff| ff.is_valid())
    }
}

/// Validated, ordered collection of team ratings.
///
/// Names are unique case-insensitively; table order is insertion order and
/// decides ambiguous substring lookups.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RatingsTable {
    teams: Vec<TeamRating>,
}

impl RatingsTable {
    /// Build a table from raw rows, dropping any that fail validation.
    ///
    /// Rows with non-finite numbers, empty names, out-of-range four factors,
    /// or a name already in the table are skipped with a warning, matching
    /// how the upstream loader discards unparseable CSV rows.
    pub fn from_rows(rows: Vec<TeamRating>) -> Self {
        let mut teams = Vec::with_capacity(rows.len());
        let mut seen: HashSet<String> = HashSet::with_capacity(rows.len());

        for row in rows {
            if !row.is_valid() {
                warn!(team = %row.name, "dropping ratings row with invalid fields");
                continue;
            }
            if !seen.insert(row.name.to_lowercase()) {
                warn!(team = %row.name, "dropping duplicate ratings row");
                continue;
            }
            teams.push(row);
        }

        RatingsTable { teams }
    }

    /// Resolve a user-supplied name to a team.
    ///
    /// Exact case-insensitive match wins; otherwise the first row whose name
    /// contains the query as a case-insensitive substring. When several rows
    /// contain the query, the first in table order is returned; callers who
    /// need a specific team should pass the full name.
    pub fn resolve(&self, name: &str) -> Result<&TeamRating, ProjectionError> {
        let query = name.to_lowercase();

        if let Some(team) = self
            .teams
            .iter()
            .find(|t| t.name.to_lowercase() == query)
        {
            return Ok(team);
        }

        self.teams
            .iter()
            .find(|t| t.name.to_lowercase().contains(&query))
            .ok_or_else(|| ProjectionError::TeamNotFound {
                name: name.to_string(),
            })
    }

    pub fn teams(&self) -> &[TeamRating] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table() -> RatingsTable {
        RatingsTable::from_rows(vec![
            TeamRating::new("Duke Blue Devils", 118.2, 94.1, 69.5),
            TeamRating::new("Kansas Jayhawks", 115.7, 96.3, 67.2),
            TeamRating::new("Duquesne Dukes", 103.0, 104.5, 66.0),
        ])
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let table = make_table();
        let team = table.resolve("duke blue devils").unwrap();
        assert_eq!(team.name, "Duke Blue Devils");
    }

    #[test]
    fn test_substring_match() {
        let table = make_table();
        let team = table.resolve("duke").unwrap();
        assert_eq!(team.name, "Duke Blue Devils");
    }

    #[test]
    fn test_substring_match_no_exact_row() {
        let table = make_table();
        // No row named "Dukes", but "Duquesne Dukes" contains it.
        let team = table.resolve("Dukes").unwrap();
        assert_eq!(team.name, "Duquesne Dukes");
    }

    #[test]
    fn test_ambiguous_substring_takes_first_in_table_order() {
        let table = make_table();
        let team = table.resolve("du").unwrap();
        assert_eq!(team.name, "Duke Blue Devils");
    }

    #[test]
    fn test_unknown_team() {
        let table = make_table();
        let err = table.resolve("Zzzyzx").unwrap_err();
        assert_eq!(
            err,
            ProjectionError::TeamNotFound {
                name: "Zzzyzx".to_string()
            }
        );
    }

    #[test]
    fn test_from_rows_drops_non_finite() {
        let table = RatingsTable::from_rows(vec![
            TeamRating::new("Good", 110.0, 100.0, 68.0),
            TeamRating::new("Bad", f64::NAN, 100.0, 68.0),
            TeamRating::new("Worse", 110.0, 100.0, f64::INFINITY),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.teams()[0].name, "Good");
    }

    #[test]
    fn test_from_rows_drops_duplicates() {
        let table = RatingsTable::from_rows(vec![
            TeamRating::new("Duke", 118.0, 94.0, 69.0),
            TeamRating::new("DUKE", 100.0, 100.0, 65.0),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.teams()[0].offensive_rating, 118.0);
    }

    #[test]
    fn test_from_rows_drops_out_of_range_four_factors() {
        let bad = TeamRating::new("Bad", 110.0, 100.0, 68.0).with_four_factors(FourFactorStats {
            effective_fg_pct: 51.0, // percent, not a fraction
            offensive_rebound_pct: 0.30,
            defensive_rebound_pct: 0.70,
            turnover_rate: 0.18,
        });
        let table = RatingsTable::from_rows(vec![bad]);
        assert!(table.is_empty());
    }
}
