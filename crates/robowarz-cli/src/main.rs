//! RoboWarz CLI - run a match between the built-in combatants.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod bots;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use robowarz_core::render::{roster_status, ArenaView};
use robowarz_core::{Arena, Battle, GameConfig, MatchOutcome};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// RoboWarz - turn-based robot battles on a hazardous grid
#[derive(Parser, Debug)]
#[command(name = "robowarz")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file (defaults apply to missing fields)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the arena RNG (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Round limit (overrides the config file)
    #[arg(short, long)]
    rounds: Option<u32>,

    /// Only print the final result
    #[arg(short, long)]
    quiet: bool,

    /// Do not pause between rounds
    #[arg(long)]
    no_delay: bool,

    /// List the built-in combatants and exit
    #[arg(long)]
    list: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

fn print_state(arena: &Arena, config: &GameConfig, title: &str) {
    println!("\n=== {title} ===");
    print!("{}", ArenaView::new(arena).grid_numbers(config.show_grid_numbers));
    println!("\n=== ROBOT STATUS ===");
    print!("{}", roster_status(arena));
}

fn run(args: &Args) -> Result<()> {
    let registry = bots::registry();
    if args.list {
        for name in registry.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    if let Some(rounds) = args.rounds {
        config.max_rounds = rounds;
    }
    init_tracing(config.verbose_logging);

    let names: Vec<String> = if config.roster.is_empty() {
        registry.names().map(str::to_string).collect()
    } else {
        config.roster.clone()
    };
    if names.is_empty() {
        bail!("no combatants to enter");
    }
    let combatants = registry.build_roster(&names)?;
    info!(count = combatants.len(), roster = ?names, "loaded combatants");

    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    let arena = Arena::new(&config, combatants, seed).context("arena setup failed")?;

    let show = !args.quiet && config.watch_live;
    let delay = Duration::from_millis(config.turn_delay_ms);
    let pace = show && !args.no_delay && !delay.is_zero();
    if show {
        print_state(&arena, &config, "INITIAL STATE");
    }

    let mut battle = Battle::new(arena, config.max_rounds);
    let max_rounds = battle.max_rounds();
    let outcome = battle.run_with(|summary, arena| {
        if !show {
            return;
        }
        println!("\n--- ROUND {} / {} ---", summary.round, max_rounds);
        print_state(arena, &config, "ARENA STATE");
        if pace && !summary.finished && summary.round < max_rounds {
            thread::sleep(delay);
        }
    });

    if !args.quiet {
        print_state(battle.arena(), &config, "FINAL STATE");
    }
    println!("\nSeed {seed}, {} rounds played", battle.round());
    match outcome {
        MatchOutcome::Winner { name, .. } => println!("WINNER: {name}"),
        MatchOutcome::Draw => println!("DRAW: no robots survived"),
        MatchOutcome::Timeout { alive } => {
            println!("TIMEOUT: {} robots still standing", alive.len());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
