//! Per-type tile metadata: which tile types carry meaningful frame values.
//!
//! A frame-important tile stores its style and sub-cell position in
//! `frame_x`/`frame_y`, so those values are transmitted on the wire and kept
//! by the applier. Every other type has its frames recomputed locally and the
//! server clears them. The table is built once at startup and then only read.

use crate::ids::{TILE_TYPE_COUNT, TileType};

/// Dense `TileType -> bool` lookup of frame-important tile types.
#[derive(Debug, Clone)]
pub struct FrameImportance {
    /// `flags[id] == true` when type `id` is frame-important.
    flags: Vec<bool>,
}

/// Frame-important types known to the stock content tables.
const VANILLA_FRAME_IMPORTANT: &[TileType] = &[
    TileType::PLANTS,
    TileType::TORCHES,
    TileType::CLOSED_DOOR,
    TileType::OPEN_DOOR,
    TileType::BOTTLES,
    TileType::TABLES,
    TileType::CHAIRS,
    TileType::ANVILS,
    TileType::FURNACES,
    TileType::WORK_BENCHES,
    TileType::CONTAINERS,
    TileType::SUNFLOWER,
    TileType::CANDLES,
    TileType::CHANDELIERS,
    TileType::HANGING_LANTERNS,
    TileType::WATER_CANDLE,
    TileType::SIGNS,
    TileType::JUNGLE_PLANTS2,
    TileType::BEDS,
    TileType::IMMATURE_HERBS,
    TileType::MATURE_HERBS,
    TileType::BLOOMING_HERBS,
    TileType::TOMBSTONES,
    TileType::DRESSERS,
    TileType::LAMPS,
    TileType::BOOKCASES,
    TileType::GRANDFATHER_CLOCKS,
    TileType::STATUES,
    TileType::HALLOWED_PLANTS,
    TileType::HALLOWED_PLANTS2,
    TileType::PRESSURE_PLATES,
    TileType::SWITCHES,
    TileType::MUSIC_BOXES,
    TileType::PLATINUM_CANDLE,
    TileType::WATER_FOUNTAIN,
    TileType::CANNON,
    TileType::LAND_MINE,
    TileType::CAMPFIRE,
    TileType::PEACE_CANDLE,
    TileType::MINECART_TRACK,
    TileType::WEAPONS_RACK,
    TileType::TARGET_DUMMY,
    TileType::TRAPDOOR_OPEN,
    TileType::TRAPDOOR_CLOSED,
    TileType::TALL_GATE_CLOSED,
    TileType::TALL_GATE_OPEN,
    TileType::ITEM_FRAME,
    TileType::LUNAR_MONOLITH,
    TileType::LOGIC_SENSOR,
    TileType::WIRE_PIPE,
    TileType::ANNOUNCEMENT_BOX,
    TileType::WEIGHTED_PRESSURE_PLATE,
    TileType::PROJECTILE_PRESSURE_PAD,
    TileType::DISPLAY_DOLL,
    TileType::WEAPONS_RACK2,
    TileType::HAT_RACK,
    TileType::BLOOD_MOON_MONOLITH,
    TileType::VOID_MONOLITH,
    TileType::FOOD_PLATTER,
    TileType::TELEPORTATION_PYLON,
    TileType::ASH_PLANTS,
];

impl FrameImportance {
    /// Builds the table for the stock content set.
    pub fn vanilla() -> Self {
        Self::from_types(VANILLA_FRAME_IMPORTANT.iter().copied())
    }

    /// Builds a table in which exactly the given types are frame-important.
    pub fn from_types(types: impl IntoIterator<Item = TileType>) -> Self {
        let mut flags = vec![false; TILE_TYPE_COUNT as usize];
        for ty in types {
            let idx = ty.0 as usize;
            if idx >= flags.len() {
                flags.resize(idx + 1, false);
            }
            flags[idx] = true;
        }
        Self { flags }
    }

    /// Returns `true` if frames of `ty` are meaningful. Unknown types are not.
    pub fn is_frame_important(&self, ty: TileType) -> bool {
        self.flags.get(ty.0 as usize).copied().unwrap_or(false)
    }
}

impl Default for FrameImportance {
    fn default() -> Self {
        Self::vanilla()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objects_are_frame_important() {
        let table = FrameImportance::vanilla();
        assert!(table.is_frame_important(TileType::ITEM_FRAME));
        assert!(table.is_frame_important(TileType::PLANTS));
        assert!(table.is_frame_important(TileType::LAND_MINE));
    }

    #[test]
    fn test_terrain_is_not_frame_important() {
        let table = FrameImportance::vanilla();
        assert!(!table.is_frame_important(TileType::DIRT));
        assert!(!table.is_frame_important(TileType::STONE));
        assert!(!table.is_frame_important(TileType::GRASS));
    }

    #[test]
    fn test_unknown_type_is_not_frame_important() {
        let table = FrameImportance::vanilla();
        assert!(!table.is_frame_important(TileType(u16::MAX)));
    }

    #[test]
    fn test_custom_table_grows_for_large_ids() {
        let table = FrameImportance::from_types([TileType(2000)]);
        assert!(table.is_frame_important(TileType(2000)));
        assert!(!table.is_frame_important(TileType::PLANTS));
    }
}
