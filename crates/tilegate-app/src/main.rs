//! The `tilegate` binary: replays a captured tile-rect packet through the
//! validation pipeline and prints what happened.

mod replay;

use clap::Parser;
use tilegate_config::{CliArgs, Config, default_config_dir};
use tracing::info;

use crate::replay::{LocalPlayer, replay_file, summarize};

fn main() {
    let args = CliArgs::parse();

    // Load or create config, then apply CLI overrides
    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    tilegate_log::init_logging(
        config.debug.log_dir.as_deref(),
        cfg!(debug_assertions),
        Some(&config),
    );

    info!(
        "Replaying {} against a {}x{} world",
        args.packet.display(),
        config.world.width,
        config.world.height
    );

    let player = LocalPlayer::new(args.player_x, args.player_y, args.range);
    match replay_file(&args.packet, &config, &player) {
        Ok(report) => println!("{}", summarize(&report)),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
