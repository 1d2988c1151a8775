//! The authoritative per-cell record and the attribute categories an update
//! may touch.

use bitflags::bitflags;

use crate::ids::{TileType, WallType};

/// Frame value meaning "no valid frame; recompute before use".
pub const INVALID_FRAME: i16 = -1;

bitflags! {
    /// Attribute categories of a [`WorldTile`]. An apply with mask `M` leaves
    /// every field outside `M` untouched.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct UpdateMask: u8 {
        /// Active flag, tile type, frame values.
        const TILE = 1 << 0;
        /// Wall type.
        const WALL = 1 << 1;
        /// Tile paint color.
        const TILE_PAINT = 1 << 2;
        /// Wall paint color.
        const WALL_PAINT = 1 << 3;
        /// Liquid amount and liquid type.
        const LIQUID = 1 << 4;
        /// Half-brick flag and slope.
        const SLOPE = 1 << 5;
        /// The four wire channels.
        const WIRING = 1 << 6;
        /// Actuator and inactive flags.
        const ACTUATOR = 1 << 7;
    }
}

/// One authoritative world cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldTile {
    /// Whether a tile occupies the cell.
    pub active: bool,
    /// Tile type; meaningful only while `active`.
    pub tile_type: TileType,
    /// Horizontal frame (style/sub-cell) or [`INVALID_FRAME`].
    pub frame_x: i16,
    /// Vertical frame or [`INVALID_FRAME`].
    pub frame_y: i16,
    /// Wall type behind the tile.
    pub wall: WallType,
    /// Liquid amount (0 = dry, 255 = full).
    pub liquid: u8,
    /// Liquid kind discriminant.
    pub liquid_type: u8,
    /// Tile paint color (0 = unpainted).
    pub tile_paint: u8,
    /// Wall paint color (0 = unpainted).
    pub wall_paint: u8,
    /// Half-brick shape.
    pub half_brick: bool,
    /// Slope shape (0 = full block).
    pub slope: u8,
    /// Wire channels red, blue, green, yellow.
    pub wires: [bool; 4],
    /// Actuator installed.
    pub actuator: bool,
    /// Tile toggled inactive by its actuator.
    pub inactive: bool,
}

impl WorldTile {
    /// An empty cell: no tile, no wall, no liquid, invalid frames.
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

    /// An active tile of the given type with cleared frames.
    pub fn solid(tile_type: TileType) -> Self {
        Self {
            active: true,
            tile_type,
            ..Self::EMPTY
        }
    }

    /// Returns `true` when a tile of type `ty` currently occupies the cell.
    pub fn is_active_type(&self, ty: TileType) -> bool {
        self.active && self.tile_type == ty
    }
}

impl Default for WorldTile {
    fn default() -> Self {
        Self::EMPTY
    }
}
