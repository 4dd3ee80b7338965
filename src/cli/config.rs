use blank_prune::{Capability, PruneConfig, PruneError, Pruner, Settings};
use tracing_subscriber::EnvFilter;

use crate::cli::args::RunArgs;
use crate::cli::global::GlobalArgs;

/// Load settings and samples with user overrides.
///
/// Override warnings go to stderr through a temporary subscriber, since
/// the real one needs the loaded log level.
pub fn load_config() -> Result<PruneConfig, PruneError> {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .finish();
    tracing::subscriber::with_default(subscriber, PruneConfig::load_with_overrides)
}

/// Install the global subscriber: RUST_LOG, then -v/-q, then settings.
pub fn init_logging(global: &GlobalArgs, settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(global.log_filter().unwrap_or(settings.log_level()))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

/// Resolve variant, width and tier from flags, falling back to settings.
pub fn resolve_pruner(args: &RunArgs, settings: &Settings) -> Result<Pruner, PruneError> {
    let variant = args.variant.unwrap_or_else(|| settings.variant());
    let width = args.width.unwrap_or_else(|| settings.width());
    match args.tier.or(settings.tier) {
        Some(tier) => Pruner::new(variant, Capability::new(width, tier)),
        None => Pruner::auto(variant, width),
    }
}
