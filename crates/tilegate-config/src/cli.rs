//! Command-line argument parsing for the `tilegate` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Replays a captured tile-rect packet against a freshly built world.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "tilegate", about = "Validate and apply a tile-rect packet")]
pub struct CliArgs {
    /// Raw packet file (envelope followed by encoded cells).
    pub packet: PathBuf,

    /// World width in tiles.
    #[arg(long)]
    pub world_width: Option<u32>,

    /// World height in tiles.
    #[arg(long)]
    pub world_height: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Replaying player's tile X.
    #[arg(long, default_value_t = 0)]
    pub player_x: i32,

    /// Replaying player's tile Y.
    #[arg(long, default_value_t = 0)]
    pub player_y: i32,

    /// Replaying player's interaction range in tiles.
    #[arg(long, default_value_t = 16)]
    pub range: i32,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.world_width {
            self.world.width = w;
        }
        if let Some(h) = args.world_height {
            self.world.height = h;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
