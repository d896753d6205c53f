//! Depth-limited minimax search with alpha-beta pruning

use rayon::prelude::*;
use tracing::{debug, trace};

use std::num::NonZeroUsize;

use crate::board::{Board, Move, Symbol};
use crate::evaluation::evaluate;
use crate::memo_cache::{MemoKey, SharedMemoCache};

/// Score of a position from the bot's point of view
pub type Score = i32;

/// Remaining plies to search
pub type Depth = u32;

/// Lower sentinel of the search window, below any reachable score
pub const SCORE_MIN: Score = Score::MIN;
/// Upper sentinel of the search window, above any reachable score
pub const SCORE_MAX: Score = Score::MAX;

/// Base score of a position the bot has won, plus the remaining depth
pub const WIN_SCORE: Score = 10_000;
/// Base score of a position the opponent has won, minus the remaining depth
pub const LOSS_SCORE: Score = -50_000;

/// A minimax searcher backed by an exact-match memo cache
///
/// # Position Scoring
/// A position where the bot already has four in a row scores
/// `WIN_SCORE + depth`, one where the opponent has scores
/// `LOSS_SCORE - depth`. With `depth` counting the plies still to search,
/// earlier wins score higher and earlier losses score lower. Positions at the
/// search horizon, or full boards, get the static evaluation.
#[derive(Clone)]
pub struct SearchEngine {
    /// The number of nodes searched by this engine so far (for diagnostics only)
    pub node_count: usize,
    /// The number of nodes answered from the memo cache
    pub cache_hits: usize,
    cache: SharedMemoCache,
}

impl SearchEngine {
    /// Creates a new `SearchEngine` with a private cache of the given capacity
    pub fn new(cache_capacity: NonZeroUsize) -> Self {
        Self::new_with_cache(SharedMemoCache::new(cache_capacity))
    }

    /// Creates a new `SearchEngine` using an existing (possibly shared) cache
    pub fn new_with_cache(cache: SharedMemoCache) -> Self {
        Self {
            node_count: 0,
            cache_hits: 0,
            cache,
        }
    }

    pub fn cache(&self) -> &SharedMemoCache {
        &self.cache
    }

    /// Scores `board` for `bot`, `maximizing` when it is the bot's turn
    pub fn search(
        &mut self,
        board: &Board,
        depth: Depth,
        alpha: Score,
        beta: Score,
        maximizing: bool,
        bot: Symbol,
    ) -> Score {
        self.node_count += 1;

        let key = MemoKey::new(board, depth, alpha, beta, maximizing, bot);
        if let Some(score) = self.cache.get(&key) {
            self.cache_hits += 1;
            return score;
        }

        let score = self.search_uncached(board, depth, alpha, beta, maximizing, bot);
        self.cache.set(key, score);
        score
    }

    fn search_uncached(
        &mut self,
        board: &Board,
        depth: Depth,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
        bot: Symbol,
    ) -> Score {
        let opponent = bot.other();

        // terminal positions are checked before the horizon
        if board.has_four_in_a_row(bot) {
            return WIN_SCORE + depth as Score;
        }
        if board.has_four_in_a_row(opponent) {
            return LOSS_SCORE - depth as Score;
        }
        if depth == 0 || board.is_full() {
            return evaluate(board, bot);
        }

        let mover = if maximizing { bot } else { opponent };
        let mut best = if maximizing { SCORE_MIN } else { SCORE_MAX };

        let moves = board.legal_moves();
        for &candidate in moves.iter() {
            let mut next = *board;
            let applied = next.apply_move(candidate, mover);
            assert!(applied, "search generated illegal move {}", candidate);

            let score = self.search(&next, depth - 1, alpha, beta, !maximizing, bot);
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            // the remaining siblings cannot change the ancestor's choice
            if beta <= alpha {
                break;
            }
        }
        best
    }

    /// Scores every legal root move for `bot`, in move order
    ///
    /// Each root child is searched `depth - 1` plies deep with the full window.
    pub fn score_moves(&mut self, board: &Board, bot: Symbol, depth: Depth) -> Vec<(Move, Score)> {
        let child_depth = depth.saturating_sub(1);
        board
            .legal_moves()
            .iter()
            .map(|&candidate| {
                let mut next = *board;
                let applied = next.apply_move(candidate, bot);
                assert!(applied, "search generated illegal move {}", candidate);

                let score = self.search(&next, child_depth, SCORE_MIN, SCORE_MAX, false, bot);
                trace!(%candidate, score, "root move scored");
                (candidate, score)
            })
            .collect()
    }

    /// Calculates the best move for `bot`, or `None` on a full board
    ///
    /// Ties go to the earliest move: lowest row, `Left` before `Right`.
    pub fn choose_best_move(&mut self, board: &Board, bot: Symbol, depth: Depth) -> Option<Move> {
        let nodes_before = self.node_count;
        let scored = self.score_moves(board, bot, depth);
        let best = pick_best(&scored);

        if let Some((best_move, score)) = best {
            debug!(
                %bot,
                depth,
                best_move = %best_move,
                score,
                nodes = self.node_count - nodes_before,
                cache_hits = self.cache_hits,
                "root search complete"
            );
        }
        best.map(|(best_move, _)| best_move)
    }

    /// Same as [`SearchEngine::choose_best_move`], scoring the root moves in parallel
    ///
    /// Root children are searched independently with the full window, so the
    /// chosen move is the same as in the sequential search. All workers share
    /// this engine's cache.
    pub fn choose_best_move_parallel(
        &mut self,
        board: &Board,
        bot: Symbol,
        depth: Depth,
    ) -> Option<Move> {
        let child_depth = depth.saturating_sub(1);
        let cache = &self.cache;

        let results: Vec<(Move, Score, usize, usize)> = board
            .legal_moves()
            .as_slice()
            .par_iter()
            .map(|&candidate| {
                let mut worker = SearchEngine::new_with_cache(cache.clone());
                let mut next = *board;
                let applied = next.apply_move(candidate, bot);
                assert!(applied, "search generated illegal move {}", candidate);

                let score = worker.search(&next, child_depth, SCORE_MIN, SCORE_MAX, false, bot);
                (candidate, score, worker.node_count, worker.cache_hits)
            })
            .collect();

        let mut scored = Vec::with_capacity(results.len());
        for (candidate, score, nodes, hits) in results {
            self.node_count += nodes;
            self.cache_hits += hits;
            scored.push((candidate, score));
        }

        let best = pick_best(&scored);
        if let Some((best_move, score)) = best {
            debug!(%bot, depth, best_move = %best_move, score, "parallel root search complete");
        }
        best.map(|(best_move, _)| best_move)
    }
}

// first move with a strictly greater score wins
fn pick_best(scored: &[(Move, Score)]) -> Option<(Move, Score)> {
    let mut best: Option<(Move, Score)> = None;
    for &(candidate, score) in scored.iter() {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }
    best
}
