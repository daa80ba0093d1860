use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::config::ModelConfig;
use crate::error::ProjectionError;
use crate::lines::BookLine;
use crate::projection::{project_game, ProjectionResult};
use crate::team::RatingsTable;

/// One game on a slate: team names as the user typed them, plus the book's
/// line for that game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameRequest {
    pub away: String,
    pub home: String,
    pub line: BookLine,
}

impl GameRequest {
    pub fn new(away: impl Into<String>, home: impl Into<String>, line: BookLine) -> Self {
        GameRequest {
            away: away.into(),
            home: home.into(),
            line,
        }
    }
}

/// Project a slate of games in parallel over an immutable ratings snapshot.
///
/// Per-game seeds are drawn sequentially from a master RNG before the fan
/// out, so a seeded slate is reproducible regardless of scheduling. A failed
/// game (unknown team, bad line) yields an `Err` in its slot without
/// aborting the rest of the slate.
pub fn project_slate(
    table: &RatingsTable,
    requests: &[GameRequest],
    config: &ModelConfig,
    seed: Option<u64>,
) -> Vec<Result<ProjectionResult, ProjectionError>> {
    let mut master = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    let seeds: Vec<u64> = requests.iter().map(|_| master.gen()).collect();

    requests
        .par_iter()
        .zip(seeds)
        .map(|(request, game_seed)| {
            project_game(
                table,
                &request.away,
                &request.home,
                &request.line,
                config,
                Some(game_seed),
            )
        })
        .collect()
}
