use anyhow::{anyhow, Result};
use clap::Parser;
use indicatif::*;
use rayon::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::time::Instant;

use sideways4_ai::config::{EngineConfig, DEFAULT_CACHE_CAPACITY, DEFAULT_SEARCH_DEPTH};
use sideways4_ai::memo_cache::SharedMemoCache;
use sideways4_ai::*;

/// Pit two bot tiers against each other over many games
#[derive(Parser)]
#[command(name = "self_play", about = "Bot-vs-bot matches between difficulty tiers")]
struct Cli {
    /// Tier of the first bot
    #[arg(long, default_value = "medium")]
    first: Difficulty,

    /// Tier of the second bot
    #[arg(long, default_value = "easy")]
    second: Difficulty,

    /// Number of games, the bots take turns opening
    #[arg(long, default_value_t = 100)]
    games: u64,

    /// Plies searched by the medium and hard bots
    #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: u32,

    /// Maximum number of memoized search results, shared by all games
    #[arg(long, default_value_t = DEFAULT_CACHE_CAPACITY)]
    cache_capacity: usize,

    /// Base seed, game i seeds its bots from seed + 2i and seed + 2i + 1
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Outcome {
    FirstWins,
    SecondWins,
    Draw,
}

/// Plays one game to the end; the bot holding `Symbol::X` opens
fn play_game(
    x_bot: &mut BotPlayer,
    x_tier: Difficulty,
    o_bot: &mut BotPlayer,
    o_tier: Difficulty,
) -> Result<Option<Symbol>> {
    let mut board = Board::new();
    let mut symbol = Symbol::X;

    loop {
        let chosen = match symbol {
            Symbol::X => x_bot.choose_move(&board, symbol, x_tier),
            Symbol::O => o_bot.choose_move(&board, symbol, o_tier),
        }
        .ok_or_else(|| anyhow!("bot found no move on a playable board:\n{}", board))?;

        board.play_checked(chosen, symbol)?;
        if board.has_four_in_a_row(symbol) {
            return Ok(Some(symbol));
        }
        if board.is_full() {
            return Ok(None);
        }
        symbol = symbol.other();
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
    let config = EngineConfig::default()
        .with_search_depth(cli.depth)
        .with_cache_capacity(cli.cache_capacity);
    let capacity = config.validate()?;
    let cache = SharedMemoCache::new(capacity);

    let start = Instant::now();
    let progress = ProgressBar::new(cli.games);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing {msg}: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );
    progress.set_message(&format!("{} vs {}", cli.first, cli.second));

    let outcomes = (0..cli.games)
        .into_par_iter()
        .map(|game| -> Result<Outcome> {
            let mut first = BotPlayer::new_with_cache(
                config.clone().with_seed(cli.seed.wrapping_add(2 * game)),
                cache.clone(),
            )?;
            let mut second = BotPlayer::new_with_cache(
                config.clone().with_seed(cli.seed.wrapping_add(2 * game + 1)),
                cache.clone(),
            )?;

            // alternate who opens
            let first_is_x = game % 2 == 0;
            let winner = if first_is_x {
                play_game(&mut first, cli.first, &mut second, cli.second)?
            } else {
                play_game(&mut second, cli.second, &mut first, cli.first)?
            };
            progress.inc(1);

            Ok(match winner {
                None => Outcome::Draw,
                Some(Symbol::X) if first_is_x => Outcome::FirstWins,
                Some(Symbol::O) if !first_is_x => Outcome::FirstWins,
                Some(_) => Outcome::SecondWins,
            })
        })
        .collect::<Result<Vec<Outcome>>>()?;

    progress.finish();

    let count = |outcome: Outcome| outcomes.iter().filter(|&&o| o == outcome).count();
    println!(
        "{} (first) wins: {}, {} (second) wins: {}, draws: {}",
        cli.first,
        count(Outcome::FirstWins),
        cli.second,
        count(Outcome::SecondWins),
        count(Outcome::Draw)
    );

    let stats = cache.stats();
    info!(
        hits = stats.hits,
        misses = stats.misses,
        entries = stats.len,
        "memo cache usage"
    );
    println!(
        "Played {} games in {}",
        outcomes.len(),
        HumanDuration(start.elapsed())
    );
    Ok(())
}
