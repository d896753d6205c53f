#[cfg(test)]
pub mod test {
    use anyhow::{anyhow, Result};
    use std::time::Instant;

    use crate::board::{Board, Move, Side, Symbol};
    use crate::config::EngineConfig;
    use crate::difficulty::{BotPlayer, Difficulty};
    use crate::evaluation::{classify_window, evaluate, window_score, OWN_THREE};
    use crate::{apply_move, board_full, check_winner};

    #[test]
    pub fn three_from_the_left_then_four() -> Result<()> {
        let mut board = Board::new();
        for _ in 0..3 {
            assert!(apply_move(&mut board, Move::new(3, Side::Left), Symbol::X));
        }
        assert!(!check_winner(&board, Symbol::X));

        // the window over columns 0..=3 of row 3 sits in the (3 own, 1 empty) bucket
        let window = [(3, 0), (3, 1), (3, 2), (3, 3)];
        let (own, opponent, empty) = classify_window(&board, &window, Symbol::X);
        assert_eq!((own, opponent, empty), (3, 0, 1));
        assert_eq!(window_score(own, opponent, empty), OWN_THREE);
        assert!(evaluate(&board, Symbol::X) >= OWN_THREE);

        assert!(apply_move(&mut board, Move::new(3, Side::Left), Symbol::X));
        assert!(check_winner(&board, Symbol::X));
        assert!(!check_winner(&board, Symbol::O));
        assert_eq!(board.winner(), Some(Symbol::X));
        Ok(())
    }

    #[test]
    pub fn full_board_without_a_line() -> Result<()> {
        let board: Board = "
            xxooxxo
            ooxxoox
            xxooxxo
            ooxxoox
            xxooxxo
            ooxxoox
            xxooxxo"
            .parse()?;
        assert!(board_full(&board));
        assert!(!check_winner(&board, Symbol::X));
        assert!(!check_winner(&board, Symbol::O));
        assert!(board.is_draw());

        let mut bot = BotPlayer::new(EngineConfig::default().with_seed(5))?;
        for difficulty in Difficulty::ALL.iter() {
            for &symbol in [Symbol::X, Symbol::O].iter() {
                assert_eq!(bot.choose_move(&board, symbol, *difficulty), None);
                assert_eq!(bot.choose_bot_move(&board, symbol, difficulty.as_str()), None);
            }
        }
        Ok(())
    }

    #[test]
    pub fn filling_the_board_by_moves() -> Result<()> {
        // the draw position above, built through the insertion rule row by row
        let rows = ["xxooxxo", "ooxxoox"];
        let mut board = Board::new();
        for row in 0..crate::HEIGHT {
            let pattern = rows[row % 2];
            for c in pattern.chars() {
                let symbol = if c == 'x' { Symbol::X } else { Symbol::O };
                board.play_checked(Move::new(row, Side::Left), symbol)?;
            }
            assert!(!board.row_playable(row));
        }
        let expected: Board = (0..crate::HEIGHT)
            .map(|row| rows[row % 2])
            .collect::<Vec<_>>()
            .join("\n")
            .parse()?;
        assert_eq!(board, expected);
        assert!(board.is_draw());
        Ok(())
    }

    #[test]
    pub fn bot_game_runs_to_completion() -> Result<()> {
        let mut medium = BotPlayer::new(EngineConfig::default().with_seed(11))?;
        let mut easy = BotPlayer::new(EngineConfig::default().with_seed(12))?;

        let mut board = Board::new();
        let mut symbol = Symbol::X;
        let start_time = Instant::now();
        let mut plies = 0;

        while board.winner().is_none() && !board.is_full() {
            let chosen = if symbol == Symbol::X {
                medium.choose_move(&board, symbol, Difficulty::Medium)
            } else {
                easy.choose_move(&board, symbol, Difficulty::Easy)
            }
            .ok_or_else(|| anyhow!("no move on a board with empty cells:\n{}", board))?;

            board.play_checked(chosen, symbol)?;
            symbol = symbol.other();
            plies += 1;
        }

        println!(
            "Medium vs Easy: {} plies in {:.3}s, winner {:?}, {} nodes searched",
            plies,
            start_time.elapsed().as_secs_f64(),
            board.winner(),
            medium.engine().node_count
        );
        assert!(plies <= crate::WIDTH * crate::HEIGHT);
        Ok(())
    }
}
