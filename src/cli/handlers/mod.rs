pub mod caps;
pub mod config;
pub mod network;
pub mod run;
