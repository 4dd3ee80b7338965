pub mod capability;
pub mod config;

pub use capability::{Capability, Tier, Width};
pub use config::{PruneConfig, SampleConfig, Settings, Variant};
