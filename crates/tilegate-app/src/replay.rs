//! Offline replay of a captured tile-rect packet.
//!
//! Stands in for the server's live collaborators: a single local player
//! with build rights inside a square reach, and logging sinks for resync
//! payloads and tile entities.

use std::path::{Path, PathBuf};

use tilegate_bouncer::{
    BanList, Broadcaster, EntityKind, EntityPlacer, PlacementError, PlayerContext, RectHandler,
    RectReport, Services,
};
use tilegate_config::{Config, WorldConfig};
use tilegate_world::{GridError, ItemId, TileGrid, TileType, WorldTile};
use tracing::info;

/// Failures before the pipeline runs.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// The packet file could not be read.
    #[error("failed to read packet {path}: {source}")]
    ReadPacket {
        /// Packet file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The configured world could not be allocated.
    #[error("failed to build world: {0}")]
    World(#[from] GridError),
}

// ---------------------------------------------------------------------------
// Local collaborators
// ---------------------------------------------------------------------------

/// The replaying player.
#[derive(Debug, Clone)]
pub struct LocalPlayer {
    x: i32,
    y: i32,
    range: i32,
}

impl LocalPlayer {
    /// A player standing at `(x, y)` reaching `range` tiles in every direction.
    pub fn new(x: i32, y: i32, range: i32) -> Self {
        Self { x, y, range }
    }
}

impl PlayerContext for LocalPlayer {
    fn name(&self) -> &str {
        "local"
    }

    fn can_edit_client_side(&self) -> bool {
        false
    }

    fn has_build_permission(&self, _x: i32, _y: i32) -> bool {
        true
    }

    fn is_in_range(&self, x: i32, y: i32) -> bool {
        (x - self.x).abs() <= self.range && (y - self.y).abs() <= self.range
    }

    fn is_throttled(&self) -> bool {
        false
    }

    fn is_disabled(&self) -> bool {
        false
    }

    fn accessories(&self) -> &[ItemId] {
        &[]
    }

    fn send_rect(&self, payload: &[u8]) {
        info!("Resync to local player: {} bytes", payload.len());
    }
}

/// Logs broadcast payloads instead of sending them.
#[derive(Debug, Default)]
pub struct LogBroadcaster;

impl Broadcaster for LogBroadcaster {
    fn broadcast_rect(&self, payload: &[u8]) {
        info!("Broadcast resync: {} bytes", payload.len());
    }
}

/// Logs entity placements and accepts them all.
#[derive(Debug, Default)]
pub struct LogEntityPlacer;

impl EntityPlacer for LogEntityPlacer {
    fn place_entity(&self, x: i32, y: i32, kind: EntityKind) -> Result<(), PlacementError> {
        info!("Placed {kind:?} entity (id {}) at ({x}, {y})", kind.id());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

/// Allocates the world described by the `world` config section.
pub fn build_world(config: &WorldConfig) -> Result<TileGrid, GridError> {
    let fill = config
        .fill_type
        .map(|ty| WorldTile::solid(TileType(ty)))
        .unwrap_or(WorldTile::EMPTY);
    TileGrid::filled(config.width, config.height, fill)
}

/// Runs the packet at `path` through the pipeline as `player`.
pub fn replay_file(
    path: &Path,
    config: &Config,
    player: &LocalPlayer,
) -> Result<RectReport, ReplayError> {
    let data = std::fs::read(path).map_err(|source| ReplayError::ReadPacket {
        path: path.to_path_buf(),
        source,
    })?;
    let mut world = build_world(&config.world)?;
    Ok(replay(&data, config, player, &mut world))
}

/// Runs `data` through the pipeline against `world`.
pub fn replay(data: &[u8], config: &Config, player: &LocalPlayer, world: &mut TileGrid) -> RectReport {
    let handler = RectHandler::from_config(&config.bouncer);
    let bans = BanList::from_config(&config.bouncer);
    let services = Services {
        bans: &bans,
        entities: &LogEntityPlacer,
        broadcaster: &LogBroadcaster,
    };
    handler.handle(data, player, world, &services)
}

/// Human-readable summary of a report.
pub fn summarize(report: &RectReport) -> String {
    let mut out = String::new();
    match report.header {
        Some(h) => out.push_str(&format!(
            "rect {}x{} at ({}, {})\n",
            h.width, h.height, h.x, h.y
        )),
        None => out.push_str("rect <undecodable>\n"),
    }
    out.push_str(&format!("outcome: {:?}\n", report.outcome));
    out.push_str(&format!(
        "applied: {} unit(s), {} cell(s)\n",
        report.applied.len(),
        report.cells_applied()
    ));
    for unit in &report.applied {
        out.push_str(&format!(
            "  + ({}, {}) {}x{} {:?}\n",
            unit.x, unit.y, unit.width, unit.height, unit.mask
        ));
    }
    out.push_str(&format!("rejected: {}\n", report.rejected.len()));
    for rejection in &report.rejected {
        out.push_str(&format!("  - {rejection}\n"));
    }
    out.push_str(&format!("resync: {:?}", report.resync));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilegate_bouncer::{RectOutcome, ResyncTarget};
    use tilegate_protocol::{ProposedTile, RectHeader, TileRect, encode_rect};
    use tilegate_world::{FrameImportance, TileAccess};

    fn small_config() -> Config {
        let mut config = Config::default();
        config.world.width = 32;
        config.world.height = 32;
        config
    }

    #[test]
    fn test_build_world_uses_fill_type() {
        let mut config = small_config().world;
        config.fill_type = Some(TileType::STONE.0);
        let world = build_world(&config).unwrap();
        assert!(world.tile(31, 31).unwrap().is_active_type(TileType::STONE));
    }

    #[test]
    fn test_replay_converts_stone() {
        let mut config = small_config();
        config.world.fill_type = Some(TileType::STONE.0);
        let mut world = build_world(&config.world).unwrap();
        let rect = TileRect::uniform(
            RectHeader::new(2, 2, 1, 1),
            ProposedTile::with_type(TileType::EBONSTONE, -1, -1),
        );
        let data = encode_rect(&rect, &FrameImportance::vanilla());

        let report = replay(&data, &config, &LocalPlayer::new(0, 0, 16), &mut world);

        assert_eq!(report.outcome, RectOutcome::Handled);
        assert_eq!(report.resync, ResyncTarget::All);
        assert!(world.tile(2, 2).unwrap().is_active_type(TileType::EBONSTONE));
        assert!(summarize(&report).contains("applied: 1 unit(s), 1 cell(s)"));
    }

    #[test]
    fn test_replay_respects_reach() {
        let mut config = small_config();
        config.world.fill_type = Some(TileType::STONE.0);
        let mut world = build_world(&config.world).unwrap();
        let rect = TileRect::uniform(
            RectHeader::new(20, 20, 1, 1),
            ProposedTile::with_type(TileType::EBONSTONE, -1, -1),
        );
        let data = encode_rect(&rect, &FrameImportance::vanilla());

        let report = replay(&data, &config, &LocalPlayer::new(0, 0, 4), &mut world);

        assert!(report.applied.is_empty());
        assert!(world.tile(20, 20).unwrap().is_active_type(TileType::STONE));
    }

    #[test]
    fn test_replay_file_reports_missing_packet() {
        let dir = tempfile::tempdir().unwrap();
        let err = replay_file(
            &dir.path().join("missing.bin"),
            &small_config(),
            &LocalPlayer::new(0, 0, 16),
        )
        .unwrap_err();
        assert!(matches!(err, ReplayError::ReadPacket { .. }));
    }

    #[test]
    fn test_replay_file_reads_packet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rect.bin");
        let rect = TileRect::uniform(RectHeader::new(1, 1, 1, 1), ProposedTile::EMPTY);
        std::fs::write(&path, encode_rect(&rect, &FrameImportance::vanilla())).unwrap();

        let report = replay_file(&path, &small_config(), &LocalPlayer::new(0, 0, 16)).unwrap();
        assert_eq!(report.header, Some(RectHeader::new(1, 1, 1, 1)));
    }

    #[test]
    fn test_summary_of_malformed_packet() {
        let mut world = build_world(&small_config().world).unwrap();
        let report = replay(&[1, 2], &small_config(), &LocalPlayer::new(0, 0, 16), &mut world);
        let text = summarize(&report);
        assert!(text.contains("<undecodable>"));
        assert!(text.contains("malformed packet") || text.contains("MalformedPacket"));
    }
}
