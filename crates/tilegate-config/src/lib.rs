//! Configuration system for the tilegate server core.
//!
//! Settings persist to disk as RON files. Supports CLI overrides via clap,
//! hot-reload detection, and forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{BouncerConfig, Config, DebugConfig, WorldConfig, default_config_dir};
pub use error::ConfigError;
