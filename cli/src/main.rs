use std::hash::{DefaultHasher, Hash, Hasher};
use std::io;

use anyhow::Context;
use clap::{Parser, Subcommand};
use parlor_core as game;

mod decision;
mod puzzle;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long, global = true)]
    seed: Option<String>,

    #[command(subcommand)]
    game: GameArgs,
}

#[derive(Subcommand, Debug)]
enum GameArgs {
    /// Reveal hidden numbers one by one and stop on the biggest
    Decision {
        /// How many hidden tiles to play with
        #[arg(short, long, default_value_t = game::StoppingConfig::DEFAULT_TILES)]
        tiles: game::TileCount,
    },
    /// Slide the tiles back into order
    Puzzle {
        /// Width and height of the board
        #[arg(long, default_value_t = game::PuzzleConfig::DEFAULT_SIZE)]
        size: u8,

        /// Random moves used to shuffle the solved board
        #[arg(long, default_value_t = game::PuzzleConfig::DEFAULT_SHUFFLE_MOVES)]
        shuffle: u16,
    },
}

/// Numeric seeds are used as-is, anything else is hashed.
fn parse_seed(seed: &str) -> u64 {
    seed.parse().unwrap_or_else(|_| {
        let mut hasher = DefaultHasher::new();
        seed.hash(&mut hasher);
        hasher.finish()
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args
        .seed
        .as_deref()
        .map(parse_seed)
        .unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();

    match args.game {
        GameArgs::Decision { tiles } => {
            let config = game::StoppingConfig::new(tiles);
            let engine =
                game::StoppingEngine::new_game(config, game::RandomTileGenerator::new(seed));
            decision::DecisionSession::new(engine)
                .play(stdin, stdout)
                .context("decision game aborted")?;
        }
        GameArgs::Puzzle { size, shuffle } => {
            let config = game::PuzzleConfig::new(size, shuffle);
            let engine =
                game::SlideEngine::new_game(config, game::ShuffleBoardGenerator::new(seed));
            puzzle::PuzzleSession::new(engine)
                .play(stdin, stdout)
                .context("puzzle aborted")?;
        }
    }

    Ok(())
}
