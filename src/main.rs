//! CLI entry point for the tactics battle simulator

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tactics_sim::{
    arena::Arena,
    config::MatchupConfig,
    patch::Patch,
    report::MatchupStats,
    simulation::{run_battle, run_battles_parallel, run_battles_sequential},
};

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "tactics-sim")]
#[command(version)]
#[command(about = "Monte-Carlo simulator for 4v4 tactical battles", long_about = None)]
struct Args {
    /// Path to the matchup file naming both teams (YAML or JSON)
    matchup: PathBuf,

    /// Patch file with equipment, ability and base-stat tables
    #[arg(long)]
    patch: Option<PathBuf>,

    /// Arena layout file
    #[arg(long)]
    arena: Option<PathBuf>,

    /// Number of battles to run
    #[arg(short, long, default_value = "1000")]
    num_sims: u64,

    /// Use parallel processing
    #[arg(short, long, default_value = "false")]
    parallel: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Show timing information
    #[arg(short, long, default_value = "false")]
    timing: bool,

    /// Run a single battle and print its event trace
    #[arg(long, default_value = "false")]
    trace: bool,

    /// Seed for the traced battle; random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let matchup = match MatchupConfig::from_file(&args.matchup) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error loading matchup: {}", e);
            std::process::exit(1);
        }
    };
    let patch = match &args.patch {
        Some(path) => match Patch::from_file(path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error loading patch: {}", e);
                std::process::exit(1);
            }
        },
        None => Patch::default(),
    };
    let arena = match &args.arena {
        Some(path) => match Arena::from_file(path) {
            Ok(a) => a,
            Err(e) => {
                eprintln!("Error loading arena: {}", e);
                std::process::exit(1);
            }
        },
        None => Arena::default(),
    };

    if args.trace {
        let seed = args.seed.unwrap_or_else(rand::random);
        println!("Seed: {}", seed);
        let report = match run_battle(&matchup, &patch, &arena, seed, true) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Simulation error: {}", e);
                std::process::exit(1);
            }
        };
        for line in report.trace.as_deref().unwrap_or(&[]) {
            println!("{}", line);
        }
        println!();
        if report.timeout {
            println!("Result: stalemate after {} ticks", report.ticks);
        } else if report.left_wins {
            println!("Result: left team wins at tick {}", report.ticks);
        } else {
            println!("Result: right team wins at tick {}", report.ticks);
        }
        return;
    }

    tracing::info!(num_sims = args.num_sims, parallel = args.parallel, "starting batch");
    let start = Instant::now();
    let results = if args.parallel {
        run_battles_parallel(&matchup, &patch, &arena, args.num_sims)
    } else {
        run_battles_sequential(&matchup, &patch, &arena, args.num_sims)
    };
    let results = match results {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Simulation error: {}", e);
            std::process::exit(1);
        }
    };
    let elapsed = start.elapsed();
    let stats = MatchupStats::from_results(&results);

    match args.output {
        OutputFormat::Text => {
            println!("=== Matchup Results ===");
            println!("Battles: {}", stats.runs);
            println!();
            println!("Left Win Rate: {:.1}%", stats.left_win_rate * 100.0);
            println!("Timeouts: {} ({:.1}%)", stats.timeouts, stats.timeout_rate * 100.0);
            println!();
            println!("Average Ticks: {:.1}", stats.avg_ticks);
            println!("Tick Range: {} - {}", stats.min_ticks, stats.max_ticks);

            if args.timing {
                println!();
                println!("--- Performance ---");
                println!("Total time: {:.3}s", elapsed.as_secs_f64());
                println!(
                    "Per battle: {:.3}ms",
                    elapsed.as_secs_f64() * 1000.0 / stats.runs.max(1) as f64
                );
                println!(
                    "Battles/sec: {:.0}",
                    stats.runs as f64 / elapsed.as_secs_f64()
                );
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "battles": stats.runs,
                "parallel": args.parallel,
                "elapsed_seconds": elapsed.as_secs_f64(),
                "stats": {
                    "left_wins": stats.left_wins,
                    "left_win_rate": stats.left_win_rate,
                    "timeouts": stats.timeouts,
                    "timeout_rate": stats.timeout_rate,
                    "avg_ticks": stats.avg_ticks,
                    "min_ticks": stats.min_ticks,
                    "max_ticks": stats.max_ticks,
                }
            });
            match serde_json::to_string_pretty(&output) {
                Ok(s) => println!("{}", s),
                Err(e) => {
                    eprintln!("Error encoding output: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
