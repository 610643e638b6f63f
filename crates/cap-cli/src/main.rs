//! CLI frontend for the capslot slot machine.

mod commands;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::Context;
use commands::history::HistoryFormat;

#[derive(Parser)]
#[command(
    name = "capslot",
    about = "A visa lottery slot machine",
    version,
    propagate_version = true
)]
struct Cli {
    /// Machine state file
    #[arg(long, global = true, default_value = ".capslot.json")]
    state: PathBuf,

    /// RNG seed for reproducible spins
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Custom outcome catalog (JSON)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Spin the reels
    Spin {
        /// Number of reels
        #[arg(short, long, default_value = "3")]
        reels: usize,

        /// Animate the reels in the terminal
        #[arg(short, long)]
        animate: bool,
    },

    /// Insert coins
    Coin {
        /// Number of coins to insert
        #[arg(short, long, default_value = "1")]
        count: u32,
    },

    /// Show or update the player profile (an empty value clears a field)
    Profile {
        /// Highest completed education (e.g. "PhD", "High School")
        #[arg(long)]
        education: Option<String>,

        /// Prevailing wage level (L1-L5)
        #[arg(long)]
        wage: Option<String>,

        /// Occupation category (e.g. STEM, Healthcare, Other)
        #[arg(long)]
        occupation: Option<String>,
    },

    /// Show how the current win probability is computed
    Odds,

    /// Show coins, lock, profile, and last spin
    Status,

    /// Show the machine history
    History {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: HistoryFormat,
    },

    /// List the outcome catalog
    Catalog,

    /// Draw many outcomes and report the observed rates
    Simulate {
        /// Number of draws
        #[arg(short, long, default_value = "100000")]
        draws: u64,

        /// Win probability to draw with (default: current odds)
        #[arg(short, long)]
        probability: Option<f64>,
    },

    /// Clear the spin lock
    Unlock,

    /// Clear profile, coins, lock, and last spin (history is kept)
    Reset,
}

fn main() {
    logging::init_tracing();

    let cli = Cli::parse();
    let ctx = Context {
        state_path: cli.state,
        seed: cli.seed,
        catalog: cli.catalog,
    };

    let result = match cli.command {
        Commands::Spin { reels, animate } => commands::spin::run(&ctx, reels, animate),
        Commands::Coin { count } => commands::coin::run(&ctx, count),
        Commands::Profile {
            education,
            wage,
            occupation,
        } => commands::profile::run(&ctx, education, wage, occupation),
        Commands::Odds => commands::odds::run(&ctx),
        Commands::Status => commands::status::run(&ctx),
        Commands::History { format } => commands::history::run(&ctx, format),
        Commands::Catalog => commands::catalog::run(&ctx),
        Commands::Simulate { draws, probability } => {
            commands::simulate::run(&ctx, draws, probability)
        }
        Commands::Unlock => commands::unlock::run(&ctx),
        Commands::Reset => commands::reset::run(&ctx),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
