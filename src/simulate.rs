use rand::distributions::Distribution;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use statrs::distribution::Normal;

use crate::config::{ModelConfig, TieBreak};
use crate::error::ProjectionError;
use crate::matchup::MatchupParameters;

/// One batch of simulated final scores, index-aligned across sides.
///
/// Produced fresh per request and never shared across matchups.
#[derive(Clone, Debug, Default)]
pub struct SimulationBatch {
    pub away_scores: Vec<f64>,
    pub home_scores: Vec<f64>,
}

impl SimulationBatch {
    pub fn len(&self) -> usize {
        self.away_scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.away_scores.is_empty()
    }

    pub fn mean_away(&self) -> f64 {
        mean(&self.away_scores)
    }

    pub fn mean_home(&self) -> f64 {
        mean(&self.home_scores)
    }

    pub fn away_percentile(&self, q: f64) -> f64 {
        percentile(&self.away_scores, q)
    }

    pub fn home_percentile(&self, q: f64) -> f64 {
        percentile(&self.home_scores, q)
    }

    /// Fraction of samples the home side wins, ties counted per `tie_break`.
    pub fn home_win_fraction(&self, tie_break: TieBreak) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let wins = self
            .away_scores
            .iter()
            .zip(&self.home_scores)
            .filter(|(a, h)| match tie_break {
                TieBreak::Away => h > a,
                TieBreak::Home => h >= a,
            })
            .count();
        wins as f64 / self.len() as f64
    }
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Floor-index quantile of an unsorted sequence, `q` in [0, 1].
fn percentile(xs: &[f64], q: f64) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    let idx = ((q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64).floor() as usize)
        .min(sorted.len() - 1);
    sorted[idx]
}

/// Draw a batch of simulated final scores.
///
/// Three variance sources, and only three: possessions are drawn once per
/// sample and shared by both sides (both teams play the same game), while
/// each side's points per possession is drawn independently. The home bonus
/// is an additive shift applied after scoring. Collapsing these into one
/// score-variance term would change the correlation between the two sides
/// and silently move the implied win probability.
pub fn simulate<R: Rng>(
    params: &MatchupParameters,
    home_bonus: f64,
    sample_count: usize,
    possession_sd: f64,
    ppp_sd: f64,
    min_possessions: f64,
    rng: &mut R,
) -> Result<SimulationBatch, ProjectionError> {
    let possessions = Normal::new(params.expected_possessions, possession_sd)
        .map_err(|e| ProjectionError::InvalidConfig(format!("possession distribution: {e}")))?;
    let away_ppp = Normal::new(params.away_ppp, ppp_sd)
        .map_err(|e| ProjectionError::InvalidConfig(format!("away ppp distribution: {e}")))?;
    let home_ppp = Normal::new(params.home_ppp, ppp_sd)
        .map_err(|e| ProjectionError::InvalidConfig(format!("home ppp distribution: {e}")))?;

    let mut away_scores = Vec::with_capacity(sample_count);
    let mut home_scores = Vec::with_capacity(sample_count);

    for _ in 0..sample_count {
        let poss = possessions.sample(rng).max(min_possessions);
        away_scores.push(away_ppp.sample(rng) * poss);
        home_scores.push(home_ppp.sample(rng) * poss + home_bonus);
    }

    Ok(SimulationBatch {
        away_scores,
        home_scores,
    })
}

/// Simulate with the batch settings taken from a config and an optional
/// seed; `None` draws from entropy.
pub fn simulate_seeded(
    params: &MatchupParameters,
    config: &ModelConfig,
    seed: Option<u64>,
) -> Result<SimulationBatch, ProjectionError> {
    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    simulate(
        params,
        config.home_court_bonus,
        config.sample_count,
        config.possession_sd,
        config.ppp_sd,
        config.min_possessions,
        &mut rng,
    )
}
