mod args;
mod config;
mod global;
mod handlers;

use clap::{Parser, Subcommand};

use args::{CapsArgs, ConfigArgs, NetworkArgs, RunArgs};
use global::GlobalArgs;

#[derive(Parser)]
#[command(name = "blank-prune")]
#[command(version)]
#[command(about = "Prune blank bytes from 16- and 32-byte batches with SIMD permutes and sorting networks", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prune one batch group and print the valid bytes
    Run(RunArgs),

    /// Show detected SIMD features and which kernels can run
    Caps(CapsArgs),

    /// Print a sorting network's gather tables and validate it
    Network(NetworkArgs),

    /// Show settings and sample batches
    Config(ConfigArgs),
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load settings and samples with user overrides
    let prune_config = config::load_config()?;
    config::init_logging(&cli.global, &prune_config.settings);

    match cli.command {
        Commands::Run(args) => handlers::run::handle(args, &prune_config),
        Commands::Caps(args) => handlers::caps::handle(args),
        Commands::Network(args) => handlers::network::handle(args),
        Commands::Config(args) => handlers::config::handle(args, &prune_config),
    }
}
