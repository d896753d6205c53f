//! Maps a requested skill tier to a move-selection strategy

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Move, Symbol};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::memo_cache::SharedMemoCache;
use crate::search::SearchEngine;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Difficulty {
    /// Uniformly random legal move
    Easy,
    /// Bounded minimax search
    Medium,
    /// Currently the exact same search as `Medium`
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(EngineError::UnknownDifficulty(s.trim().to_string())),
        }
    }
}

/// A computer opponent: owns the search engine and the random source
pub struct BotPlayer {
    config: EngineConfig,
    engine: SearchEngine,
    rng: StdRng,
}

impl BotPlayer {
    /// Creates a new `BotPlayer` with its own memo cache
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let capacity = config.validate()?;
        Ok(Self::build(config, SharedMemoCache::new(capacity)))
    }

    /// Creates a new `BotPlayer` sharing an existing memo cache
    pub fn new_with_cache(config: EngineConfig, cache: SharedMemoCache) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::build(config, cache))
    }

    fn build(config: EngineConfig, cache: SharedMemoCache) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            engine: SearchEngine::new_with_cache(cache),
            rng,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Picks a move for `symbol` at the given tier, `None` on a full board
    pub fn choose_move(&mut self, board: &Board, symbol: Symbol, difficulty: Difficulty) -> Option<Move> {
        match difficulty {
            Difficulty::Easy => self.random_move(board),
            // Hard has no deeper search or different weights (yet)
            Difficulty::Medium | Difficulty::Hard => {
                let depth = self.config.search_depth;
                self.engine.choose_best_move(board, symbol, depth)
            }
        }
    }

    /// Picks a move for a tier given by name
    ///
    /// Returns `None` for an unknown tier as well as for a full board; callers
    /// that need to tell the two apart should parse [`Difficulty`] themselves.
    pub fn choose_bot_move(&mut self, board: &Board, symbol: Symbol, difficulty: &str) -> Option<Move> {
        match difficulty.parse::<Difficulty>() {
            Ok(difficulty) => self.choose_move(board, symbol, difficulty),
            Err(err) => {
                warn!("{}", err);
                None
            }
        }
    }

    /// Uniformly random legal move, no lookahead
    pub fn random_move(&mut self, board: &Board) -> Option<Move> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..moves.len());
        Some(moves.as_slice()[idx])
    }
}
