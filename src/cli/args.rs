use blank_prune::{Tier, Variant, Width};
use clap::{ArgGroup, Args};
use std::path::PathBuf;

/// Arguments for pruning one batch group
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").multiple(false)))]
pub struct RunArgs {
    /// Text to prune (reads stdin if no source is given)
    #[arg(group = "source")]
    pub text: Option<String>,

    /// Read the batch from a file
    #[arg(short = 'f', long, group = "source")]
    pub file: Option<PathBuf>,

    /// Use a named sample batch from the config
    #[arg(short = 's', long, group = "source")]
    pub sample: Option<String>,

    /// Generate a random batch with about 30% blanks
    #[arg(long, group = "source")]
    pub random: bool,

    /// Seed for --random
    #[arg(long, requires = "random")]
    pub seed: Option<u64>,

    /// Algorithm: scalar, naive-single, naive-double, semi, full
    #[arg(short = 'V', long)]
    pub variant: Option<Variant>,

    /// Batch width in bytes: 16 or 32
    #[arg(short = 'w', long)]
    pub width: Option<Width>,

    /// Instruction tier: portable, ssse3, neon (default: best detected)
    #[arg(short = 't', long)]
    pub tier: Option<Tier>,

    /// Print every output lane, not just the valid prefix
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the capability report
#[derive(Args, Debug)]
pub struct CapsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for printing a sorting network
#[derive(Args, Debug)]
pub struct NetworkArgs {
    /// Network width: a power of two from 2 to 128
    #[arg(short = 'w', long, default_value_t = 16)]
    pub width: usize,

    /// Print only the summary line, not the stage tables
    #[arg(long)]
    pub summary: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for showing configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// List the sample batches
    #[arg(long)]
    pub samples: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
