//! State Applier: copies the permitted attribute categories of a proposed
//! cell onto the authoritative one.

use tilegate_protocol::ProposedTile;
use tilegate_world::{FrameImportance, INVALID_FRAME, UpdateMask, WorldTile};

/// Writes the categories in `mask` from `proposed` into `tile`.
///
/// Fields outside `mask` are never touched. Applying the same proposal
/// twice yields the same tile as applying it once.
pub fn apply_tile(
    tile: &mut WorldTile,
    proposed: &ProposedTile,
    mask: UpdateMask,
    frames: &FrameImportance,
) {
    if mask.contains(UpdateMask::TILE) {
        let type_changed = tile.tile_type != proposed.tile_type;
        tile.active = proposed.active;
        tile.tile_type = proposed.tile_type;
        if frames.is_frame_important(proposed.tile_type) {
            tile.frame_x = proposed.frame_x;
            tile.frame_y = proposed.frame_y;
        } else if type_changed || !tile.active {
            tile.frame_x = INVALID_FRAME;
            tile.frame_y = INVALID_FRAME;
        }
    }

    if mask.contains(UpdateMask::WALL) {
        tile.wall = proposed.wall;
    }

    if mask.contains(UpdateMask::TILE_PAINT) {
        tile.tile_paint = proposed.tile_paint;
    }

    if mask.contains(UpdateMask::WALL_PAINT) {
        tile.wall_paint = proposed.wall_paint;
    }

    if mask.contains(UpdateMask::LIQUID) {
        tile.liquid = proposed.liquid;
        tile.liquid_type = proposed.liquid_type;
    }

    if mask.contains(UpdateMask::SLOPE) {
        tile.half_brick = proposed.half_brick;
        tile.slope = proposed.slope;
    }

    if mask.contains(UpdateMask::WIRING) {
        tile.wires = proposed.wires;
    }

    if mask.contains(UpdateMask::ACTUATOR) {
        tile.actuator = proposed.actuator;
        tile.inactive = proposed.inactive;
    }
}
