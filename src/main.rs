use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Write};

use sideways4_ai::config::{EngineConfig, DEFAULT_CACHE_CAPACITY, DEFAULT_SEARCH_DEPTH};
use sideways4_ai::*;

mod game;
use game::*;

/// Play Sideways Four in the terminal, against the computer or a friend
#[derive(Parser)]
#[command(name = "sideways4", about = "Play Sideways Four in the terminal")]
struct Cli {
    /// Bot difficulty: easy, medium or hard
    #[arg(long, default_value = "medium")]
    difficulty: Difficulty,

    /// Plies searched by the medium and hard bots
    #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: u32,

    /// Maximum number of memoized search results
    #[arg(long, default_value_t = DEFAULT_CACHE_CAPACITY)]
    cache_capacity: usize,

    /// Seed for the easy bot's random moves
    #[arg(long)]
    seed: Option<u64>,
}

fn ask_yes_no(question: &str) -> Result<bool> {
    let stdin = stdin();
    loop {
        let mut buffer = String::new();
        print!("{} y/n: ", question);
        stdout().flush()?;
        stdin.read_line(&mut buffer)?;
        match buffer.trim().to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = EngineConfig::default()
        .with_search_depth(cli.depth)
        .with_cache_capacity(cli.cache_capacity);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    // keep the bot out here so its memo cache is re-used between moves
    let mut bot = BotPlayer::new(config)?;

    println!("Welcome to Sideways Four ({} bot)\n", cli.difficulty);
    println!("Push a marker into a row from its left or right end, e.g. 3L or 0R.");
    println!("Four in a row in any direction wins.\n");

    let bot_players = (
        ask_yes_no("Is player x bot controlled?")?,
        ask_yes_no("Is player o bot controlled?")?,
    );

    let stdin = stdin();
    let mut game = Game::new();

    // game loop
    loop {
        game.display()?;

        match game.state {
            GameState::Playing => {
                let bot_to_move = match game.to_move {
                    Symbol::X => bot_players.0,
                    Symbol::O => bot_players.1,
                };

                let next_move = if bot_to_move {
                    println!("Bot ({}) is thinking...", game.to_move);
                    stdout().flush()?;

                    // slow down play if both players are bots
                    if bot_players == (true, true) {
                        std::thread::sleep(std::time::Duration::new(1, 0));
                    }

                    match bot.choose_move(&game.board, game.to_move, cli.difficulty) {
                        Some(chosen) => {
                            println!("Bot ({}) plays {}", game.to_move, chosen);
                            chosen
                        }
                        // play_checked ends the game on a full board before this is reached
                        None => break,
                    }
                } else {
                    print!("Player {} move input > ", game.to_move);
                    stdout().flush()?;
                    let mut input_str = String::new();
                    stdin.read_line(&mut input_str)?;

                    match input_str.parse::<Move>() {
                        Err(err) => {
                            println!("{}", err);
                            continue;
                        }
                        Ok(parsed) => parsed,
                    }
                };

                if let Err(err) = game.play_checked(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            GameState::Won(symbol) => {
                println!("Player {} wins after {} moves!", symbol, game.history.len());
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}
