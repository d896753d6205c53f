use crate::board::Side;

/// Errors raised by the checked entry points of the engine.
///
/// The hot paths (`apply_move`, the search, the dispatcher) report ordinary
/// domain conditions through `bool` / `Option` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid move, row {row} is full (dropped from the {side})")]
    IllegalMove { row: usize, side: Side },

    #[error("Invalid move, row {row} out of range. Rows must be between 0 and {max}")]
    RowOutOfRange { row: usize, max: usize },

    #[error("unknown difficulty '{0}' (expected 'easy', 'medium' or 'hard')")]
    UnknownDifficulty(String),

    #[error("could not parse '{0}' as a move, expected <row><L|R> such as 3L")]
    ParseMove(String),

    #[error("could not parse board: {0}")]
    ParseBoard(String),

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}
