//! `stargrid` — find and draw a shortest path on a grid.
//!
//! Run: cargo run --bin stargrid -- [--grid demo/grids/maze.txt] [--color]
//!
//! Exit status: 0 when a path is found, 2 when none exists, 1 on error.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use stargrid_demo::{Options, exit_status, run};
use stargrid_paths::{Heuristic, OpenSetKind, SearchConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HeuristicArg {
    /// 10 × Manhattan distance
    Manhattan,
    /// Exact obstacle-free cost with diagonals
    Octile,
    /// 10 × Chebyshev distance
    Chebyshev,
    /// No estimate (Dijkstra)
    Zero,
}

impl From<HeuristicArg> for Heuristic {
    fn from(h: HeuristicArg) -> Self {
        match h {
            HeuristicArg::Manhattan => Heuristic::Manhattan,
            HeuristicArg::Octile => Heuristic::Octile,
            HeuristicArg::Chebyshev => Heuristic::Chebyshev,
            HeuristicArg::Zero => Heuristic::Zero,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OpenSetArg {
    /// Full scan per selection
    Linear,
    /// Binary heap
    Heap,
}

impl From<OpenSetArg> for OpenSetKind {
    fn from(o: OpenSetArg) -> Self {
        match o {
            OpenSetArg::Linear => OpenSetKind::Linear,
            OpenSetArg::Heap => OpenSetKind::Heap,
        }
    }
}

#[derive(Parser)]
#[command(name = "stargrid")]
#[command(about = "Find a shortest path on a grid with A* and draw it", long_about = None)]
#[command(version)]
struct Args {
    /// Layout file (# obstacle, . free, O start, X target).
    /// Defaults to the built-in 7x5 wall scenario.
    #[arg(long)]
    grid: Option<PathBuf>,

    /// Remaining-cost estimate
    #[arg(long, value_enum, default_value = "manhattan")]
    heuristic: HeuristicArg,

    /// Frontier implementation
    #[arg(long, value_enum, default_value = "linear")]
    open_set: OpenSetArg,

    /// Colour the output
    #[arg(long)]
    color: bool,

    /// One character per cell instead of bracketed markers
    #[arg(long)]
    compact: bool,

    /// Print search counters after the grid
    #[arg(long)]
    stats: bool,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let opts = Options {
        grid: args.grid,
        config: SearchConfig::default()
            .with_heuristic(args.heuristic.into())
            .with_open_set(args.open_set.into()),
        color: args.color,
        compact: args.compact,
        stats: args.stats,
    };
    let result = run(&opts, &mut io::stdout().lock());
    if let Err(e) = &result {
        log::error!("{e}");
        eprintln!("error: {e}");
    }
    ExitCode::from(exit_status(&result))
}
