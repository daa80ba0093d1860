/// League average adjusted efficiency (points per 100 possessions)
pub const LEAGUE_AVG_RATING: f64 = 105.0;

/// Home-court bonus in points, added to the home score at simulation time
pub const HOME_COURT_BONUS: f64 = 2.2;

/// Shrinkage of blended offense toward the league average (early-season guard)
pub const SHRINKAGE_FACTOR: f64 = 0.12;

/// Anchor possessions-per-game for pace damping
pub const PACE_ANCHOR: f64 = 68.0;

/// Damping of averaged pace toward the anchor
pub const PACE_DAMPING: f64 = 0.5;

/// Floor on possessions, expected and sampled
pub const MIN_POSSESSIONS: f64 = 50.0;

/// Standard deviation of possessions per game
pub const POSSESSION_SD: f64 = 4.5;

/// Standard deviation of points per possession
pub const PPP_SD: f64 = 0.055;

/// Monte Carlo sample count
pub const SAMPLE_COUNT: usize = 8000;

/// Minimum total edge (points) to recommend an over/under
pub const TOTAL_EDGE_THRESHOLD: f64 = 2.0;

/// Minimum spread edge (points) to recommend a side
pub const SPREAD_EDGE_THRESHOLD: f64 = 1.5;

/// Edge magnitude at which confidence saturates at 10
pub const CONFIDENCE_CEILING: f64 = 6.0;

/// Four-factor exponents: effective FG%, ball security, rebounding
pub const W_EFG: f64 = 0.40;
pub const W_TOV: f64 = 0.25;
pub const W_REB: f64 = 0.20;

/// Damping exponent on the combined four-factor multiplier
pub const FOUR_FACTOR_DAMPING: f64 = 0.5;

/// Denominator floor for the multiplicative model's rating ratios
pub const MIN_DENOMINATOR: f64 = 1e-6;

/// League-average four factors, used when a team has no four-factor data
pub const LEAGUE_AVG_EFG: f64 = 0.51;
pub const LEAGUE_AVG_OREB: f64 = 0.30;
pub const LEAGUE_AVG_DREB: f64 = 0.70;
pub const LEAGUE_AVG_TOV: f64 = 0.18;
