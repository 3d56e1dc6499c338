// Nim between two expectiminimax players, or solve a Nim position

use clap::Parser;
use expectiminimax::agent::ai::{solve_with_iterative_deepening, GameScoring, TranspositionTable};
use expectiminimax::agent::{NegamaxPlayer, Player};
use expectiminimax::config::{ChancePruning, MatchConfig, SearchConfig};
use expectiminimax::game_repr::{Nim, NimMove, WIN_SCORE};
use expectiminimax::orchestrator::Match;
use expectiminimax::SearchError;
use std::process;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sticks per pile, comma separated
    #[arg(long, value_delimiter = ',', default_value = "5,5,5,5")]
    piles: Vec<u32>,

    /// Search depth of the player moving first
    #[arg(long, default_value_t = 10)]
    first_depth: u32,

    /// Search depth of the player moving second
    #[arg(long, default_value_t = 4)]
    second_depth: u32,

    /// Values beyond this count as a certain win or loss
    #[arg(long, default_value_t = WIN_SCORE)]
    win_score: f64,

    /// Every move may backfire and take one stick fewer
    #[arg(long)]
    stochastic: bool,

    #[arg(long, default_value_t = 0.1)]
    backfire_probability: f64,

    /// Seed for the backfire dice
    #[arg(long)]
    seed: Option<u64>,

    /// Let chance outcomes share the alpha-beta window
    #[arg(long)]
    shared_window: bool,

    /// Search without a transposition table
    #[arg(long)]
    no_table: bool,

    /// Moves played before the engines take over, e.g. `--opening 2,3 --opening 1,1`
    #[arg(long)]
    opening: Vec<NimMove>,

    /// Solve the position up to this depth instead of playing it
    #[arg(long)]
    solve: Option<u32>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn search_config(&self, depth: u32) -> SearchConfig {
        let chance_pruning = if self.shared_window {
            ChancePruning::SharedWindow
        } else {
            ChancePruning::Exact
        };

        SearchConfig {
            backfire_probability: self.backfire_probability,
            use_table: !self.no_table,
            ..SearchConfig::with_depth(depth)
        }
        .win_score(self.win_score)
        .chance_pruning(chance_pruning)
    }

    fn game(&self) -> Result<Nim, SearchError> {
        let mut nim = Nim::new(self.piles.clone()).with_deterministic(!self.stochastic);
        for mv in &self.opening {
            nim.play(mv)?;
        }
        Ok(nim)
    }
}

fn solve(args: &Args, max_depth: u32) -> Result<(), SearchError> {
    let mut nim = args.game()?;
    let mut table = (!args.no_table).then(TranspositionTable::new);

    let solution = solve_with_iterative_deepening(
        &mut nim,
        &GameScoring,
        1..=max_depth,
        args.win_score,
        table.as_mut(),
    )?;

    println!("{}: {:?} at depth {}", nim, solution.outcome, solution.depth);
    if let Some(mv) = solution.best_move {
        println!("best move {} (score {:.4})", mv, solution.score);
    }
    Ok(())
}

fn play(args: &Args) -> Result<(), SearchError> {
    let mut first: NegamaxPlayer<Nim> = NegamaxPlayer::new(args.search_config(args.first_depth))
        .with_name(format!("Player 1 (depth {})", args.first_depth));
    let mut second: NegamaxPlayer<Nim> = NegamaxPlayer::new(args.search_config(args.second_depth))
        .with_name(format!("Player 2 (depth {})", args.second_depth));

    let config = MatchConfig {
        backfire_probability: args.backfire_probability,
        seed: args.seed,
        ..MatchConfig::default()
    };

    let mut nim = args.game()?;
    log::info!("starting position {}", nim);
    let report = Match::new(&mut first, &mut second, config).play(&mut nim)?;

    for played in &report.moves {
        let note = if played.backfired { " (backfired)" } else { "" };
        println!("player {}: {}{}", played.player + 1, played.played, note);
    }

    if report.finished {
        let winner = if report.player_to_move == 0 { &first } else { &second };
        println!("{} wins after {} moves", winner.name(), report.plies());
    } else {
        println!("no result after {} moves", report.plies());
    }
    println!(
        "mean think time: {:?} / {:?}, {} backfires",
        report.mean_think_time[0], report.mean_think_time[1], report.backfires
    );
    Ok(())
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .init();

    let result = match args.solve {
        Some(max_depth) => solve(&args, max_depth),
        None => play(&args),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        process::exit(1);
    }
}
