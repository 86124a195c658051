//! Play resolution CLI
//!
//! Batch Monte-Carlo driver over the built-in sample pairings, plus a
//! single-play mode that prints the full modifier breakdown.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use gp_core::{
    data, refine_pass, refine_run, run_trials, DefenseAlignment, DefensiveCall, OffenseAlignment,
    PlayCall, PlayCategory, PlayResolutionEngine, ResolutionConfig, Situation,
};

#[derive(Parser)]
#[command(name = "gp_cli")]
#[command(about = "Resolve simulated plays from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Matchup {
    /// I-formation power run vs a 4-3 base front
    PowerRun,
    /// Shotgun quick slant vs a nickel blitz
    QuickSlant,
}

impl Matchup {
    fn build(self) -> (PlayCall, DefensiveCall, OffenseAlignment, DefenseAlignment) {
        match self {
            Matchup::PowerRun => data::sample_power_run(),
            Matchup::QuickSlant => data::sample_quick_slant(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run many seeded trials and print a summary
    Simulate {
        /// Base RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Number of independent trials
        #[arg(long, default_value = "1000")]
        trials: u32,

        /// Which built-in pairing to run
        #[arg(long, value_enum, default_value = "power-run")]
        matchup: Matchup,

        /// Use the arcade tuning preset
        #[arg(long, default_value = "false")]
        arcade: bool,

        /// Emit the summary as JSON instead of a table
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Resolve a single play and print the breakdown
    Resolve {
        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Which built-in pairing to run
        #[arg(long, value_enum, default_value = "power-run")]
        matchup: Matchup,

        /// Run the player-rating refinement pass with the sample cast
        #[arg(long, default_value = "false")]
        refine: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { seed, trials, matchup, arcade, json } => {
            simulate(seed, trials, matchup, arcade, json)
        }
        Commands::Resolve { seed, matchup, refine } => resolve_one(seed, matchup, refine),
    }
}

fn simulate(seed: u64, trials: u32, matchup: Matchup, arcade: bool, json: bool) -> Result<()> {
    let config = if arcade { ResolutionConfig::arcade() } else { ResolutionConfig::default() };
    let engine = PlayResolutionEngine::new(config);
    let (offense, defense, off_alignment, def_alignment) = matchup.build();
    let situation = Situation::default();

    let started = chrono::Local::now();
    let summary = run_trials(
        &engine,
        &offense,
        &defense,
        &off_alignment,
        &def_alignment,
        &situation,
        seed,
        trials,
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{} vs {} ({} trials, seed {})", offense.label, defense.label, trials, seed);
    println!("started {}", started.format("%Y-%m-%d %H:%M:%S"));
    println!();
    println!(
        "  yards: mean {:+.2}, min {:+}, max {:+}",
        summary.mean_yards, summary.min_yards, summary.max_yards
    );
    println!("  turnovers: {} ({:.1}%)", summary.turnovers, pct(summary.turnovers, trials));
    println!();
    println!("  {:<20} {:>8} {:>7}", "outcome", "count", "share");
    for (outcome, count) in &summary.outcome_counts {
        println!("  {:<20} {:>8} {:>6.1}%", outcome.label(), count, pct(*count, trials));
    }

    Ok(())
}

fn resolve_one(seed: u64, matchup: Matchup, refine: bool) -> Result<()> {
    let engine = PlayResolutionEngine::new(ResolutionConfig::default());
    let (offense, defense, off_alignment, def_alignment) = matchup.build();
    let situation = Situation::default();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let result = engine.resolve_play(
        &offense,
        &defense,
        &off_alignment,
        &def_alignment,
        &situation,
        &mut rng,
    )?;

    println!("{}", result.description);
    println!();
    println!(
        "  roll {} ({}A/{}D) {:+} = {} -> {} for {} yard(s) to the {}",
        result.dice_roll,
        result.advantage_dice,
        result.disadvantage_dice,
        result.total_modifier,
        result.final_total,
        result.outcome.label(),
        result.yards_gained,
        result.lane.label(),
    );
    println!(
        "  modifiers: formation {:+}, situation {:+}, complexity {:+}, tactical {:+}, lane {:+}",
        result.breakdown.formation,
        result.breakdown.situation,
        result.breakdown.complexity,
        result.breakdown.tactical,
        result.breakdown.lane,
    );
    for factor in result.analysis.advantages.iter().chain(&result.analysis.disadvantages) {
        println!("  factor {:+}: {}", factor.impact, factor.description);
    }

    if refine {
        let execution = match offense.category() {
            PlayCategory::Pass => {
                let (qb, receiver, defender) = data::sample_pass_cast();
                refine_pass(&qb, &receiver, &defender, &result, &situation, &mut rng)
            }
            _ => {
                let (runner, defenders) = data::sample_run_cast();
                refine_run(&runner, &defenders, &result, &mut rng)
            }
        };
        println!();
        println!("  execution: {}", execution.description());
        println!("  key players: {}", execution.key_players.join(", "));
    }

    Ok(())
}

fn pct(count: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}
