//! Static evaluation of non-terminal positions
//!
//! A position is scored by sliding a 4-cell window over every row, column and
//! diagonal and summing a fixed score per window. A window only counts if it
//! can still become a line for one side: windows holding both symbols score 0.
//!
//! The table is deliberately lopsided. Letting the opponent complete a line
//! costs five times what completing one's own line earns, so a search that is
//! cut off before reaching a real terminal position leans towards defence.

use crate::board::{Board, Cell, Symbol, Window, LINE, WINDOWS};
use crate::search::Score;

/// Own line completed
pub const OWN_FOUR: Score = 10_000;
pub const OWN_THREE: Score = 500;
pub const OWN_TWO: Score = 50;
pub const OWN_ONE: Score = 5;

/// Opponent line completed
pub const OPPONENT_FOUR: Score = -50_000;
pub const OPPONENT_THREE: Score = -10_000;
pub const OPPONENT_TWO: Score = -1_000;
pub const OPPONENT_ONE: Score = -100;

/// Scores a window from its marker counts
///
/// `own + opponent + empty` is always `LINE`.
pub fn window_score(own: usize, opponent: usize, empty: usize) -> Score {
    debug_assert_eq!(own + opponent + empty, LINE);
    match (own, opponent, empty) {
        (4, 0, 0) => OWN_FOUR,
        (3, 0, 1) => OWN_THREE,
        (2, 0, 2) => OWN_TWO,
        (1, 0, 3) => OWN_ONE,
        (0, 4, 0) => OPPONENT_FOUR,
        (0, 3, 1) => OPPONENT_THREE,
        (0, 2, 2) => OPPONENT_TWO,
        (0, 1, 3) => OPPONENT_ONE,
        // mixed windows can never become a line, the empty window favours nobody
        _ => 0,
    }
}

/// Counts (own, opponent, empty) markers of `window` as seen by `symbol`
pub fn classify_window(board: &Board, window: &Window, symbol: Symbol) -> (usize, usize, usize) {
    let own_cell = Cell::from(symbol);
    let mut counts = (0, 0, 0);
    for &(row, col) in window.iter() {
        let cell = board.cell(row, col);
        if cell == own_cell {
            counts.0 += 1;
        } else if cell.is_empty() {
            counts.2 += 1;
        } else {
            counts.1 += 1;
        }
    }
    counts
}

/// Heuristic score of `board` from the point of view of `symbol`
///
/// Not antisymmetric: `evaluate(b, X) != -evaluate(b, O)` whenever any window
/// holds markers of only one side.
pub fn evaluate(board: &Board, symbol: Symbol) -> Score {
    WINDOWS
        .iter()
        .map(|window| {
            let (own, opponent, empty) = classify_window(board, window, symbol);
            window_score(own, opponent, empty)
        })
        .sum()
}
