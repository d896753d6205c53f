//! Grid representation, sideways insertion and terminal detection

use std::fmt;
use std::str::FromStr;

use crate::{error::EngineError, HEIGHT, WIDTH};

/// Number of markers in a winning line
pub const LINE: usize = 4;

/// Number of cells on the board
pub const CELLS: usize = WIDTH * HEIGHT;

/// Upper bound on the number of legal moves in any position (two sides per row)
pub const MAX_MOVES: usize = 2 * HEIGHT;

/// Number of in-bounds 4-cell windows over all four orientations
pub const NUM_WINDOWS: usize = HEIGHT * (WIDTH - LINE + 1)
    + (HEIGHT - LINE + 1) * WIDTH
    + 2 * (HEIGHT - LINE + 1) * (WIDTH - LINE + 1);

/// A window is a run of `LINE` (row, column) coordinates
pub type Window = [(usize, usize); LINE];

/// Enumerates every window in the order: rightward, downward, down-right, down-left
pub const fn all_windows() -> [Window; NUM_WINDOWS] {
    let mut windows = [[(0, 0); LINE]; NUM_WINDOWS];
    let mut n = 0;

    let mut row = 0;
    while row < HEIGHT {
        let mut col = 0;
        while col < WIDTH {
            if col + LINE - 1 < WIDTH {
                let mut k = 0;
                while k < LINE {
                    windows[n][k] = (row, col + k);
                    k += 1;
                }
                n += 1;
            }
            if row + LINE - 1 < HEIGHT {
                let mut k = 0;
                while k < LINE {
                    windows[n][k] = (row + k, col);
                    k += 1;
                }
                n += 1;
            }
            if row + LINE - 1 < HEIGHT && col + LINE - 1 < WIDTH {
                let mut k = 0;
                while k < LINE {
                    windows[n][k] = (row + k, col + k);
                    k += 1;
                }
                n += 1;
            }
            if row + LINE - 1 < HEIGHT && col >= LINE - 1 {
                let mut k = 0;
                while k < LINE {
                    windows[n][k] = (row + k, col - k);
                    k += 1;
                }
                n += 1;
            }
            col += 1;
        }
        row += 1;
    }
    windows
}

/// Every window of the board, computed at compile time
pub static WINDOWS: [Window; NUM_WINDOWS] = all_windows();

/// One of the two player markers
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// The opposing symbol
    pub fn other(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Symbol::X => 'x',
            Symbol::O => 'o',
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '_',
            Cell::X => 'x',
            Cell::O => 'o',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            '_' => Some(Cell::Empty),
            'x' => Some(Cell::X),
            'o' => Some(Cell::O),
            _ => None,
        }
    }
}

impl From<Symbol> for Cell {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => Cell::X,
            Symbol::O => Cell::O,
        }
    }
}

/// The open end of a row a marker is pushed in from
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    pub row: usize,
    pub side: Side,
}

impl Move {
    pub const fn new(row: usize, side: Side) -> Self {
        Self { row, side }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.side {
            Side::Left => 'L',
            Side::Right => 'R',
        };
        write!(f, "{}{}", self.row, side)
    }
}

impl FromStr for Move {
    type Err = EngineError;

    /// Parses `<row><L|R>`, e.g. `3L` or `0r`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parse_error = || EngineError::ParseMove(trimmed.to_string());

        let side_char = trimmed.chars().last().ok_or_else(parse_error)?;
        let side = match side_char.to_ascii_uppercase() {
            'L' => Side::Left,
            'R' => Side::Right,
            _ => return Err(parse_error()),
        };
        let row = trimmed[..trimmed.len() - side_char.len_utf8()]
            .trim()
            .parse::<usize>()
            .map_err(|_| parse_error())?;
        if row >= HEIGHT {
            return Err(EngineError::RowOutOfRange {
                row,
                max: HEIGHT - 1,
            });
        }
        Ok(Self::new(row, side))
    }
}

/// Fixed-capacity list of moves, kept in insertion order
#[derive(Copy, Clone, Debug)]
pub struct MoveList {
    size: usize,
    moves: [Move; MAX_MOVES],
}

impl MoveList {
    pub fn new() -> Self {
        Self {
            size: 0,
            moves: [Move::new(0, Side::Left); MAX_MOVES],
        }
    }

    pub fn push(&mut self, new_move: Move) {
        self.moves[self.size] = new_move;
        self.size += 1;
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.size]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    pub fn contains(&self, candidate: &Move) -> bool {
        self.as_slice().contains(candidate)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A 7x7 grid, row 0 at the top, column 0 at the left end of each row
///
/// `Board` is `Copy`: search explores private copies and never undoes moves.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    cells: [[Cell; WIDTH]; HEIGHT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    pub fn row(&self, row: usize) -> &[Cell; WIDTH] {
        &self.cells[row]
    }

    /// A row accepts a marker from either side while any of its cells is empty
    pub fn row_playable(&self, row: usize) -> bool {
        row < HEIGHT && self.cells[row].iter().any(Cell::is_empty)
    }

    // first empty column scanning from the move's side
    fn landing_column(&self, candidate: Move) -> Option<usize> {
        let row = &self.cells[candidate.row];
        match candidate.side {
            Side::Left => (0..WIDTH).find(|&col| row[col].is_empty()),
            Side::Right => (0..WIDTH).rev().find(|&col| row[col].is_empty()),
        }
    }

    /// Drops `symbol` into the row from the move's side
    ///
    /// Returns `false` and leaves the board untouched if the row is full
    /// (or does not exist).
    pub fn apply_move(&mut self, candidate: Move, symbol: Symbol) -> bool {
        if candidate.row >= HEIGHT {
            return false;
        }
        match self.landing_column(candidate) {
            Some(col) => {
                self.cells[candidate.row][col] = symbol.into();
                true
            }
            None => false,
        }
    }

    /// Like [`Board::apply_move`], but reports why a move was rejected
    ///
    /// Returns the column the marker landed in.
    pub fn play_checked(&mut self, candidate: Move, symbol: Symbol) -> Result<usize, EngineError> {
        if candidate.row >= HEIGHT {
            return Err(EngineError::RowOutOfRange {
                row: candidate.row,
                max: HEIGHT - 1,
            });
        }
        let col = self
            .landing_column(candidate)
            .ok_or(EngineError::IllegalMove {
                row: candidate.row,
                side: candidate.side,
            })?;
        self.cells[candidate.row][col] = symbol.into();
        Ok(col)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    pub fn num_markers(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| !cell.is_empty()).count()
    }

    /// All legal moves, ascending row with `Left` before `Right`
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        for row in 0..HEIGHT {
            if self.row_playable(row) {
                moves.push(Move::new(row, Side::Left));
                moves.push(Move::new(row, Side::Right));
            }
        }
        moves
    }

    pub fn has_four_in_a_row(&self, symbol: Symbol) -> bool {
        let target = Cell::from(symbol);
        WINDOWS
            .iter()
            .any(|window| window.iter().all(|&(row, col)| self.cells[row][col] == target))
    }

    pub fn winner(&self) -> Option<Symbol> {
        [Symbol::X, Symbol::O]
            .iter()
            .copied()
            .find(|&symbol| self.has_four_in_a_row(symbol))
    }

    /// Full board with no line of four for either symbol
    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winner().is_none()
    }

    /// Canonical row-major flattening used for memoization keys
    pub fn encode(&self) -> [u8; CELLS] {
        let mut code = [0; CELLS];
        for (idx, cell) in self.cells.iter().flatten().enumerate() {
            code[idx] = cell.to_char() as u8;
        }
        code
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.cells.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for cell in row.iter() {
                write!(f, "{}", cell.to_char())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = EngineError;

    /// Parses `HEIGHT` lines of `WIDTH` characters from `x`, `o` and `_`
    ///
    /// Blank lines and surrounding whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Self::new();
        let mut rows = s.lines().map(str::trim).filter(|line| !line.is_empty());

        for row in 0..HEIGHT {
            let line = rows.next().ok_or_else(|| {
                EngineError::ParseBoard(format!("expected {} rows, found {}", HEIGHT, row))
            })?;
            if line.chars().count() != WIDTH {
                return Err(EngineError::ParseBoard(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    line.chars().count(),
                    WIDTH
                )));
            }
            for (col, c) in line.chars().enumerate() {
                board.cells[row][col] = Cell::from_char(c).ok_or_else(|| {
                    EngineError::ParseBoard(format!("unknown cell '{}' in row {}", c, row))
                })?;
            }
        }
        if rows.next().is_some() {
            return Err(EngineError::ParseBoard(format!(
                "more than {} rows given",
                HEIGHT
            )));
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use proptest::prelude::*;

    #[test]
    fn window_count() {
        // 7x7: 28 horizontal, 28 vertical, 16 per diagonal family
        assert_eq!(NUM_WINDOWS, 88);
        for window in WINDOWS.iter() {
            for &(row, col) in window.iter() {
                assert!(row < HEIGHT && col < WIDTH);
            }
        }
    }

    #[test]
    fn left_and_right_insertion() -> Result<()> {
        let mut board = Board::new();
        assert!(board.apply_move(Move::new(2, Side::Left), Symbol::X));
        assert!(board.apply_move(Move::new(2, Side::Left), Symbol::O));
        assert!(board.apply_move(Move::new(2, Side::Right), Symbol::X));

        assert_eq!(board.cell(2, 0), Cell::X);
        assert_eq!(board.cell(2, 1), Cell::O);
        assert_eq!(board.cell(2, WIDTH - 1), Cell::X);
        assert_eq!(board.num_markers(), 3);

        // the right end is taken, so the next right insert lands one further in
        assert_eq!(board.play_checked(Move::new(2, Side::Right), Symbol::O)?, WIDTH - 2);
        Ok(())
    }

    #[test]
    fn full_row_is_rejected_without_mutation() -> Result<()> {
        let mut board: Board = "
            _______
            _______
            _______
            xoxoxox
            _______
            _______
            _______"
            .parse()?;
        let before = board;

        assert!(!board.apply_move(Move::new(3, Side::Left), Symbol::X));
        assert!(!board.apply_move(Move::new(3, Side::Right), Symbol::O));
        assert_eq!(board, before);
        assert_eq!(
            board.play_checked(Move::new(3, Side::Left), Symbol::X),
            Err(EngineError::IllegalMove {
                row: 3,
                side: Side::Left
            })
        );
        assert!(!board.apply_move(Move::new(HEIGHT, Side::Left), Symbol::X));
        assert_eq!(board, before);
        Ok(())
    }

    #[test]
    fn legal_move_order() -> Result<()> {
        let board: Board = "
            xoxoxox
            _______
            xoxoxox
            _______
            xoxoxox
            _______
            oxoxox_"
            .parse()?;
        let moves: Vec<String> = board.legal_moves().iter().map(|m| m.to_string()).collect();
        assert_eq!(moves, ["1L", "1R", "3L", "3R", "5L", "5R", "6L", "6R"]);
        assert_eq!(Board::new().legal_moves().len(), MAX_MOVES);
        Ok(())
    }

    #[test]
    fn three_is_not_four() -> Result<()> {
        // one run of three and one run of four per orientation
        let cases = [
            ("xxx____\n_______\n_______\n_______\n_______\n_______\n_______", false),
            ("_xxxx__\n_______\n_______\n_______\n_______\n_______\n_______", true),
            ("x______\nx______\nx______\n_______\n_______\n_______\n_______", false),
            ("_______\n_______\n______x\n______x\n______x\n______x\n_______", true),
            ("x______\n_x_____\n__x____\n_______\n_______\n_______\n_______", false),
            ("_______\n_______\n_______\n___x___\n____x__\n_____x_\n______x", true),
            ("______x\n_____x_\n____x__\n_______\n_______\n_______\n_______", false),
            ("_______\n_______\n_______\n___x___\n__x____\n_x_____\nx______", true),
        ];
        for (text, expected) in cases.iter() {
            let board: Board = text.parse()?;
            assert_eq!(board.has_four_in_a_row(Symbol::X), *expected, "{}", text);
            assert!(!board.has_four_in_a_row(Symbol::O));
        }
        Ok(())
    }

    #[test]
    fn lines_do_not_wrap() -> Result<()> {
        // xx at the end of row 0 and xx at the start of row 1 are adjacent in memory
        let board: Board =
            "_____xx\nxx_____\n_______\n_______\n_______\n_______\n_______".parse()?;
        assert!(!board.has_four_in_a_row(Symbol::X));
        Ok(())
    }

    #[test]
    fn parse_and_display() -> Result<()> {
        let text = "x______\n_o_____\n_______\n_______\n_______\n_______\n______x";
        let board: Board = text.parse()?;
        assert_eq!(board.to_string(), text);

        assert!("x______".parse::<Board>().is_err());
        assert!("x_____\n".repeat(HEIGHT).parse::<Board>().is_err());
        assert!("q______\n".repeat(HEIGHT).parse::<Board>().is_err());
        assert!("_______\n".repeat(HEIGHT + 1).parse::<Board>().is_err());
        Ok(())
    }

    #[test]
    fn parse_moves() -> Result<()> {
        assert_eq!("3L".parse::<Move>()?, Move::new(3, Side::Left));
        assert_eq!(" 6r ".parse::<Move>()?, Move::new(6, Side::Right));
        assert_eq!(
            "7L".parse::<Move>(),
            Err(EngineError::RowOutOfRange { row: 7, max: 6 })
        );
        assert!("L".parse::<Move>().is_err());
        assert!("3".parse::<Move>().is_err());
        assert!("".parse::<Move>().is_err());
        Ok(())
    }

    #[test]
    fn encoding_is_row_major() {
        let mut board = Board::new();
        board.apply_move(Move::new(0, Side::Right), Symbol::O);
        board.apply_move(Move::new(1, Side::Left), Symbol::X);
        let code = board.encode();
        assert_eq!(code[WIDTH - 1], b'o');
        assert_eq!(code[WIDTH], b'x');
        assert_eq!(code.iter().filter(|&&c| c == b'_').count(), CELLS - 2);
    }

    proptest! {
        #[test]
        fn apply_move_changes_exactly_one_cell_or_none(
            moves in prop::collection::vec((0..HEIGHT, any::<bool>(), any::<bool>()), 0..120)
        ) {
            let mut board = Board::new();
            for (row, left, is_x) in moves {
                let side = if left { Side::Left } else { Side::Right };
                let symbol = if is_x { Symbol::X } else { Symbol::O };
                let before = board;
                let applied = board.apply_move(Move::new(row, side), symbol);

                let changed: Vec<(usize, usize)> = (0..HEIGHT)
                    .flat_map(|r| (0..WIDTH).map(move |c| (r, c)))
                    .filter(|&(r, c)| before.cell(r, c) != board.cell(r, c))
                    .collect();

                if applied {
                    prop_assert_eq!(changed.len(), 1);
                    let (r, c) = changed[0];
                    prop_assert_eq!(r, row);
                    prop_assert_eq!(board.cell(r, c), Cell::from(symbol));
                    // everything between the chosen side and the landing cell was occupied
                    let first_empty = match side {
                        Side::Left => (0..WIDTH).find(|&col| before.cell(row, col).is_empty()),
                        Side::Right => (0..WIDTH).rev().find(|&col| before.cell(row, col).is_empty()),
                    };
                    prop_assert_eq!(Some(c), first_empty);
                } else {
                    prop_assert!(changed.is_empty());
                    prop_assert!(!before.row_playable(row));
                    prop_assert_eq!(before, board);
                }
            }
        }
    }
}
