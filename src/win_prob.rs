use statrs::distribution::{ContinuousCDF, Normal};

use crate::matchup::MatchupParameters;

/// Closed-form approximation of the home side's win probability.
///
/// Uses the same variance decomposition as the simulator: shared possessions
/// `P ~ N(p, sp^2)` and an independent per-side PPP draw, so the score margin
/// is `D = P * X + bonus` with `X ~ N(dppp, 2 * ppp_sd^2)`. Then
/// `Var(D) = (p^2 + sp^2) * 2 * ppp_sd^2 + sp^2 * dppp^2` and
/// `P(home wins) = Phi(E[D] / sd(D))`. The possession floor is ignored here;
/// it only binds in pathological configurations.
///
/// Cheap cross-check for the Monte Carlo estimate; the report itself uses
/// the empirical fraction.
pub fn analytic_home_win_prob(
    params: &MatchupParameters,
    home_bonus: f64,
    possession_sd: f64,
    ppp_sd: f64,
) -> f64 {
    let dppp = params.home_ppp - params.away_ppp;
    let mean_margin = params.expected_possessions * dppp + home_bonus;

    let variance = (params.expected_possessions.powi(2) + possession_sd.powi(2))
        * 2.0
        * ppp_sd.powi(2)
        + possession_sd.powi(2) * dppp.powi(2);

    if variance <= 0.0 {
        return if mean_margin > 0.0 {
            1.0
        } else if mean_margin < 0.0 {
            0.0
        } else {
            0.5
        };
    }

    let normal = Normal::new(0.0, 1.0).unwrap();
    normal.cdf(mean_margin / variance.sqrt())
}
