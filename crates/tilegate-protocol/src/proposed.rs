//! Decoded, not-yet-validated per-cell state.

use tilegate_world::{INVALID_FRAME, TileType, WallType, WorldTile};

/// The state a client proposes for one cell of a tile rectangle.
///
/// Mirrors [`WorldTile`] field for field. Fields the wire did not carry hold
/// their canonical empty value: type `0` and invalid frames for inactive
/// cells, invalid frames for types whose frames are not transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposedTile {
    /// Whether the cell should hold a tile.
    pub active: bool,
    /// Proposed tile type.
    pub tile_type: TileType,
    /// Proposed horizontal frame.
    pub frame_x: i16,
    /// Proposed vertical frame.
    pub frame_y: i16,
    /// Proposed wall type.
    pub wall: WallType,
    /// Liquid amount.
    pub liquid: u8,
    /// Liquid kind.
    pub liquid_type: u8,
    /// Tile paint color.
    pub tile_paint: u8,
    /// Wall paint color.
    pub wall_paint: u8,
    /// Half-brick shape.
    pub half_brick: bool,
    /// Slope shape (3 bits).
    pub slope: u8,
    /// Wire channels red, blue, green, yellow.
    pub wires: [bool; 4],
    /// Actuator installed.
    pub actuator: bool,
    /// Tile toggled inactive.
    pub inactive: bool,
}

impl ProposedTile {
    /// An empty proposal: no tile, no wall, no liquid.
    pub const EMPTY: Self = Self {
        active: false,
        tile_type: TileType::DIRT,
        frame_x: INVALID_FRAME,
        frame_y: INVALID_FRAME,
        wall: WallType::NONE,
        liquid: 0,
        liquid_type: 0,
        tile_paint: 0,
        wall_paint: 0,
        half_brick: false,
        slope: 0,
        wires: [false; 4],
        actuator: false,
        inactive: false,
    };

    /// An active tile of `tile_type` with the given frames.
    pub fn with_type(tile_type: TileType, frame_x: i16, frame_y: i16) -> Self {
        Self {
            active: true,
            tile_type,
            frame_x,
            frame_y,
            ..Self::EMPTY
        }
    }

    /// Style index encoded in the horizontal frame (18 px per style column).
    pub fn style(&self) -> i16 {
        self.frame_x / 18
    }
}

impl Default for ProposedTile {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl From<&WorldTile> for ProposedTile {
    fn from(tile: &WorldTile) -> Self {
        Self {
            active: tile.active,
            tile_type: tile.tile_type,
            frame_x: tile.frame_x,
            frame_y: tile.frame_y,
            wall: tile.wall,
            liquid: tile.liquid,
            liquid_type: tile.liquid_type,
            tile_paint: tile.tile_paint,
            wall_paint: tile.wall_paint,
            half_brick: tile.half_brick,
            slope: tile.slope,
            wires: tile.wires,
            actuator: tile.actuator,
            inactive: tile.inactive,
        }
    }
}
