use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use game_2048::logging::setup_logging;
use game_2048::recording::{record_or_log, BestScores, MultiStore, SqliteStore};
use game_2048::services::{run_batch, BotDriver, HumanDriver};
use game_2048::ui::{LineInput, NullRenderer, Renderer, TerminalRenderer};
use game_2048::{GameConfig, SpawnTable};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SpawnPreset {
    /// Only 2s
    Bot,
    /// 1s, 2s and 4s
    Classic,
}

impl From<SpawnPreset> for SpawnTable {
    fn from(preset: SpawnPreset) -> Self {
        match preset {
            SpawnPreset::Bot => SpawnTable::bot(),
            SpawnPreset::Classic => SpawnTable::classic(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "game_2048", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Write rotating log files here instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// SQLite database of every recorded game
    #[arg(long, global = true, default_value = "db/game_records.db")]
    db: PathBuf,

    /// CSV of the best score per grid size
    #[arg(long, global = true, default_value = "bestScores.csv")]
    best_scores: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One bot game
    Play(GameArgs),
    /// Several bot games in a row
    Batch {
        /// Number of games
        #[arg(short = 'n', long, default_value_t = 100)]
        runs: usize,
        #[command(flatten)]
        game: GameArgs,
    },
    /// Play yourself, one move per line
    Human(GameArgs),
    /// Print stored results and best scores
    Records {
        /// Drop and recreate the results table first
        #[arg(long, default_value_t = false)]
        reset: bool,
    },
}

#[derive(Args, Debug, Clone)]
struct GameArgs {
    /// JSON file with a full game configuration; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid side length
    #[arg(long)]
    size: Option<usize>,

    /// Max tile that wins the game
    #[arg(long, conflicts_with = "no_win_threshold")]
    win_threshold: Option<u32>,

    /// Play until no move is left
    #[arg(long, default_value_t = false)]
    no_win_threshold: bool,

    /// Spawned tile distribution
    #[arg(long, value_enum)]
    spawn: Option<SpawnPreset>,

    /// RNG seed for a replayable game
    #[arg(long)]
    seed: Option<u64>,

    /// Rollouts per candidate move
    #[arg(short = 's', long)]
    searches: Option<usize>,

    /// Moves per rollout
    #[arg(short = 'd', long)]
    depth: Option<usize>,

    /// Cost per empty cell
    #[arg(long)]
    empty_weight: Option<u64>,

    /// Grow searches and depth by one every N moves
    #[arg(long)]
    scale_every: Option<usize>,

    /// Run rollouts on all cores
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Do not draw the board
    #[arg(short = 'q', long, default_value_t = false)]
    quiet: bool,
}

impl GameArgs {
    fn to_config(&self, preset: GameConfig) -> game_2048::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => preset,
        };
        if let Some(size) = self.size {
            config.size = size;
        }
        if self.no_win_threshold {
            config.win_threshold = None;
        } else if let Some(threshold) = self.win_threshold {
            config.win_threshold = Some(threshold);
        }
        if let Some(spawn) = self.spawn {
            config.spawn_table = spawn.into();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(searches) = self.searches {
            config.search.searches_per_move = searches;
            config.search.max_searches_per_move = config.search.max_searches_per_move.max(searches);
        }
        if let Some(depth) = self.depth {
            config.search.search_depth = depth;
            config.search.max_search_depth = config.search.max_search_depth.max(depth);
        }
        if let Some(weight) = self.empty_weight {
            config.search.empty_spot_weight = weight;
        }
        if self.scale_every.is_some() {
            config.search.scaling_coefficient = self.scale_every;
        }
        config.search.parallel_rollouts |= self.parallel;
        config.validate()?;
        Ok(config)
    }

    fn renderer(&self) -> Box<dyn Renderer + Send> {
        if self.quiet {
            Box::new(NullRenderer)
        } else {
            Box::new(TerminalRenderer::stdout())
        }
    }
}

/// Every store that could be opened; a broken one is logged and skipped.
fn open_stores(db: &Path, best_scores: &Path) -> MultiStore {
    let mut stores = MultiStore::new();
    match SqliteStore::open(db) {
        Ok(store) => stores = stores.with(Box::new(store)),
        Err(e) => log::error!("Cannot open results database {}: {}", db.display(), e),
    }
    match BestScores::open(best_scores) {
        Ok(store) => stores = stores.with(Box::new(store)),
        Err(e) => log::error!("Cannot open best scores {}: {}", best_scores.display(), e),
    }
    stores
}

/// Raise `cancel` on Ctrl+C so the running game stops at its next turn.
fn watch_ctrl_c(cancel: Arc<AtomicBool>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                log::warn!("Ctrl+C received, stopping after the current turn");
                cancel.store(true, Ordering::Relaxed);
            }
            Err(e) => log::error!("Cannot listen for Ctrl+C: {}", e),
        }
    });
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _logger = setup_logging(&cli.log_level, cli.log_dir.as_deref())?;
    log::info!("{} v{}", game_2048::NAME, game_2048::VERSION);

    let cancel = Arc::new(AtomicBool::new(false));

    match cli.command {
        Command::Play(args) => {
            let config = args.to_config(GameConfig::bot())?;
            let mut renderer = args.renderer();
            let mut stores = open_stores(&cli.db, &cli.best_scores);
            watch_ctrl_c(Arc::clone(&cancel));

            let (session, seed) = tokio::task::spawn_blocking(move || {
                let mut driver = BotDriver::new(config)?;
                let session = driver.play(renderer.as_mut(), &cancel)?;
                if let Some(result) = session.to_result() {
                    record_or_log(&mut stores, &result);
                }
                Ok::<_, game_2048::GameError>((session, driver.seed()))
            })
            .await??;

            if let Some(outcome) = session.outcome() {
                println!(
                    "{}: score {} in {} moves ({:.1}s), replay with --seed {}",
                    outcome,
                    session.score(),
                    session.move_count(),
                    session.elapsed().as_secs_f64(),
                    seed
                );
            }
        }
        Command::Batch { runs, game } => {
            let config = game.to_config(GameConfig::bot())?;
            let mut renderer = game.renderer();
            let mut stores = open_stores(&cli.db, &cli.best_scores);
            watch_ctrl_c(Arc::clone(&cancel));

            let summary = tokio::task::spawn_blocking(move || {
                run_batch(&config, runs, &mut stores, renderer.as_mut(), &cancel)
            })
            .await??;

            println!(
                "{} games: {} won, {} lost, {} cancelled ({:.1}% wins)",
                summary.runs,
                summary.wins,
                summary.losses,
                summary.cancelled,
                summary.win_rate() * 100.0
            );
            println!(
                "best {} | mean score {:.1} | mean time {:.2}s | {} recorded",
                summary.best_score, summary.mean_score, summary.mean_elapsed_secs, summary.recorded
            );
        }
        Command::Human(args) => {
            let size = args.size.unwrap_or(4);
            let config = args.to_config(GameConfig::classic(size))?;
            let mut renderer = args.renderer();
            let mut stores = open_stores(&cli.db, &cli.best_scores);

            let seed = tokio::task::spawn_blocking(move || {
                let mut driver = HumanDriver::new(config)?;
                let mut input = LineInput::stdin();
                let session = driver.play(&mut input, renderer.as_mut())?;
                if let Some(result) = session.to_result() {
                    record_or_log(&mut stores, &result);
                }
                Ok::<_, game_2048::GameError>(driver.seed())
            })
            .await??;
            println!("tile seed was {}", seed);
        }
        Command::Records { reset } => {
            let store = SqliteStore::open(&cli.db)?;
            if reset {
                store.reset()?;
                log::warn!("Results table reset in {}", cli.db.display());
            }
            for record in store.all_records()? {
                let r = &record.result;
                println!(
                    "#{:<5} {}x{} score {:>6} {} {:>5} moves {:>8.2}s  {}",
                    record.id,
                    r.grid_size,
                    r.grid_size,
                    r.score,
                    if r.won { "WON " } else { "LOST" },
                    r.moves,
                    r.elapsed_secs,
                    r.timestamp
                );
            }
            let summary = store.summary()?;
            println!(
                "{} games, {} won, best {}, mean time {:.2}s",
                summary.runs, summary.wins, summary.best_score, summary.mean_elapsed_secs
            );

            let best = BestScores::open(&cli.best_scores)?;
            println!("GRID SIZE  BEST SCORE");
            for (size, score) in best.entries() {
                println!("{:>9}  {:>10}", size, score);
            }
        }
    }

    Ok(())
}
