//! PGN Replay - command-line game viewer.
//!
//! Games that stop on an unreadable move are reported and skipped; only
//! file and configuration errors end the process with a failure.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use pgn_replay::config::ReplayConfig;
use pgn_replay::library::list_pgn_files;
use pgn_replay::pgn::{load_games, PgnGame};
use pgn_replay::render::render_frame;
use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pgn-replay")]
#[command(about = "Replays chess games from PGN files")]
struct Cli {
    /// Log every applied move
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List PGN files and the games in each
    List {
        /// Directory to scan (defaults to games_dir from replay.toml)
        dir: Option<PathBuf>,
    },
    /// Replay the games of a PGN file, or of every file in the games directory
    Play {
        /// PGN file to play
        file: Option<PathBuf>,
        /// Play only this game (1-based)
        #[arg(short, long)]
        game: Option<usize>,
        /// Play the games in random order
        #[arg(long)]
        shuffle: bool,
        /// Swap the configured board orientation
        #[arg(long)]
        flip: bool,
        /// Print the board after every ply
        #[arg(long)]
        every_ply: bool,
    },
    /// Print the position of one game after a number of plies
    Show {
        /// PGN file containing the game
        file: PathBuf,
        /// Game number in the file (1-based)
        #[arg(short, long, default_value = "1")]
        game: usize,
        /// Number of plies to play
        #[arg(short, long)]
        ply: usize,
        /// Swap the configured board orientation
        #[arg(long)]
        flip: bool,
    },
}

struct PlayOptions {
    view_from_white: bool,
    every_ply: bool,
    shuffle: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ReplayConfig::load().with_context(|| {
        format!(
            "Failed to load {}",
            ReplayConfig::config_path().display()
        )
    })?;

    match cli.command {
        Commands::List { dir } => run_list(dir.as_deref().unwrap_or(&config.games_dir)),
        Commands::Play {
            file,
            game,
            shuffle,
            flip,
            every_ply,
        } => {
            let options = PlayOptions {
                view_from_white: config.view_from_white != flip,
                every_ply: every_ply || config.every_ply,
                shuffle: shuffle || config.shuffle,
            };
            run_play(file.as_deref(), game, &config.games_dir, &options)
        }
        Commands::Show {
            file,
            game,
            ply,
            flip,
        } => run_show(&file, game, ply, config.view_from_white != flip),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_list(dir: &Path) -> anyhow::Result<()> {
    let files = list_pgn_files(dir)?;
    if files.is_empty() {
        tracing::info!("No PGN files in {}", dir.display());
    }

    for path in files {
        let games = match load_games(&path) {
            Ok(games) => games,
            Err(e) => {
                tracing::warn!("{}", e);
                continue;
            }
        };
        println!("{} ({} games)", path.display(), games.len());
        for (i, game) in games.iter().enumerate() {
            println!("  {:>3}. {} [{} plies]", i + 1, game.title(), game.replay().len());
        }
    }
    Ok(())
}

fn run_play(
    file: Option<&Path>,
    game: Option<usize>,
    games_dir: &Path,
    options: &PlayOptions,
) -> anyhow::Result<()> {
    let files = match file {
        Some(path) => vec![path.to_path_buf()],
        None => list_pgn_files(games_dir)?,
    };
    if files.is_empty() {
        tracing::info!("No PGN files in {}", games_dir.display());
    }

    for path in &files {
        let mut games = match load_games(path) {
            Ok(games) => games,
            Err(e) if file.is_none() => {
                tracing::warn!("{}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(number) = game {
            match select_game(games, number, path) {
                Ok(selected) => games = vec![selected],
                Err(e) if file.is_none() => {
                    tracing::warn!("{}", e);
                    continue;
                }
                Err(e) => return Err(e),
            }
        } else if options.shuffle {
            games.shuffle(&mut rand::thread_rng());
        }

        tracing::info!("{}: {} games", path.display(), games.len());
        for pgn_game in &games {
            play_game(pgn_game, options);
        }
    }
    Ok(())
}

fn play_game(game: &PgnGame, options: &PlayOptions) {
    let title = game.title();
    tracing::info!("Playing {}", title);

    let mut replay = game.replay();
    if options.every_ply {
        println!("{}", render_frame(&title, &replay, options.view_from_white));
    }

    loop {
        match replay.step() {
            Ok(Some(_)) if options.every_ply => {
                println!("{}", render_frame(&title, &replay, options.view_from_white));
            }
            Ok(Some(_)) => {}
            Ok(None) => break,
            Err(_) => {
                tracing::info!("Skipping the rest of {}", title);
                break;
            }
        }
    }

    if !options.every_ply {
        println!("{}", render_frame(&title, &replay, options.view_from_white));
    }
}

fn run_show(file: &Path, game: usize, ply: usize, view_from_white: bool) -> anyhow::Result<()> {
    let games = load_games(file)?;
    let game = select_game(games, game, file)?;

    let mut replay = game.replay();
    if let Err(e) = replay.seek(ply) {
        tracing::warn!("Showing the last readable position: {}", e);
    }
    println!("{}", render_frame(&game.title(), &replay, view_from_white));
    Ok(())
}

fn select_game(games: Vec<PgnGame>, number: usize, path: &Path) -> anyhow::Result<PgnGame> {
    let count = games.len();
    match number.checked_sub(1).and_then(|i| games.into_iter().nth(i)) {
        Some(game) => Ok(game),
        None => bail!(
            "Game {} not found in {} ({} games)",
            number,
            path.display(),
            count
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const ONE_GAME: &str = "[Event \"A\"]\n[White \"Ann\"]\n[Black \"Bob\"]\n\n1. e4 e5 1-0\n";
    const TWO_GAMES: &str = "[Event \"A\"]\n\n1. d4 d5 *\n\n[Event \"B\"]\n\n1. c4 e5 *\n";

    fn options() -> PlayOptions {
        PlayOptions {
            view_from_white: true,
            every_ply: false,
            shuffle: false,
        }
    }

    #[test]
    fn test_play_game_number_skips_short_files_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.pgn"), ONE_GAME).unwrap();
        fs::write(dir.path().join("b.pgn"), TWO_GAMES).unwrap();

        assert!(run_play(None, Some(2), dir.path(), &options()).is_ok());
    }

    #[test]
    fn test_play_game_number_missing_in_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.pgn");
        fs::write(&path, ONE_GAME).unwrap();

        let err = run_play(Some(&path), Some(2), dir.path(), &options()).unwrap_err();
        assert!(err.to_string().contains("Game 2 not found"));
    }

    #[test]
    fn test_select_game_is_one_based() {
        let games = pgn_replay::pgn::parse_games(TWO_GAMES);
        let path = Path::new("two.pgn");
        assert!(select_game(games.clone(), 0, path).is_err());
        assert_eq!(select_game(games.clone(), 2, path).unwrap(), games[1]);
        assert!(select_game(games, 3, path).is_err());
    }
}
