//! Authoritative tile-grid world: tile and wall identifiers, the per-cell
//! [`WorldTile`] record, [`UpdateMask`] categories, and the pre-allocated
//! [`TileGrid`] arena behind the [`TileAccess`] contract.

pub mod grid;
pub mod ids;
pub mod registry;
pub mod tile;

pub use grid::{GridError, SharedGrid, TileAccess, TileGrid};
pub use ids::{ItemId, TILE_TYPE_COUNT, TileType, WallType};
pub use registry::FrameImportance;
pub use tile::{INVALID_FRAME, UpdateMask, WorldTile};
