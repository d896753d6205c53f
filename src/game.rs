use anyhow::{anyhow, Result};
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use sideways4_ai::{Board, Cell, Move, Symbol, HEIGHT, WIDTH};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won(Symbol),
    Draw,
}

/// Turn and status bookkeeping for one game in the terminal
#[derive(Clone)]
pub struct Game {
    pub board: Board,
    pub to_move: Symbol,
    pub history: Vec<Move>,
    pub state: GameState,
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Symbol::X,
            history: Vec::new(),
            state: GameState::Playing,
        }
    }

    /// Plays a move for the side to move and updates the game state
    ///
    /// The turn only passes on while the game is still being played.
    pub fn play_checked(&mut self, candidate: Move) -> Result<GameState> {
        if self.state != GameState::Playing {
            return Err(anyhow!("Game already ended"));
        }
        self.board.play_checked(candidate, self.to_move)?;
        self.history.push(candidate);

        self.state = if self.board.has_four_in_a_row(self.to_move) {
            GameState::Won(self.to_move)
        } else if self.board.is_full() {
            GameState::Draw
        } else {
            self.to_move = self.to_move.other();
            GameState::Playing
        };
        Ok(self.state)
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();

        stdout.queue(PrintStyledContent(style(format!(
            "\n   {}\n",
            "-".repeat(WIDTH)
        ))))?;
        for row in 0..HEIGHT {
            stdout.queue(PrintStyledContent(style(format!("{} L", row))))?;
            for cell in self.board.row(row).iter() {
                stdout.queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match cell {
                            Cell::X => Color::Red,
                            Cell::O => Color::Yellow,
                            Cell::Empty => Color::DarkBlue,
                        }),
                ))?;
            }
            stdout.queue(PrintStyledContent(style("R\n")))?;
        }
        stdout.flush()?;
        Ok(())
    }
}
