//! Object Shape Table: multi-cell footprints of composite tile objects and
//! the tile entities some of them carry.
//!
//! A tile type listed here always arrives as part of a composite object, so
//! the segmenter treats a cell carrying it as the object's anchor. Built once
//! at startup; read-only afterwards.

use tilegate_world::{TILE_TYPE_COUNT, TileType};

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Tile entity kinds with auxiliary persistent data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Training dummy.
    TrainingDummy,
    /// Item frame.
    ItemFrame,
    /// Logic sensor.
    LogicSensor,
    /// Display doll (mannequin).
    DisplayDoll,
    /// Weapon rack.
    WeaponsRack,
    /// Hat rack.
    HatRack,
    /// Food platter (plate).
    FoodPlatter,
    /// Teleportation pylon.
    TeleportationPylon,
}

impl EntityKind {
    /// Entity type identifier used by the world's entity store.
    pub fn id(self) -> u8 {
        match self {
            Self::TrainingDummy => 0,
            Self::ItemFrame => 1,
            Self::LogicSensor => 2,
            Self::DisplayDoll => 3,
            Self::WeaponsRack => 4,
            Self::HatRack => 5,
            Self::FoodPlatter => 6,
            Self::TeleportationPylon => 7,
        }
    }
}

// ---------------------------------------------------------------------------
// ObjectShape
// ---------------------------------------------------------------------------

/// Footprint and placement metadata of one composite object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectShape {
    /// Footprint width in cells.
    pub width: u8,
    /// Footprint height in cells.
    pub height: u8,
    /// Row offset from the cell carrying the type to the footprint's top row.
    pub anchor_offset_y: i8,
    /// Tile entity placed alongside the object, if any.
    pub entity: Option<EntityKind>,
}

impl ObjectShape {
    /// A plain `width × height` footprint anchored at its top-left cell.
    pub const fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            anchor_offset_y: 0,
            entity: None,
        }
    }

    /// Attaches a tile entity kind.
    pub const fn with_entity(mut self, entity: EntityKind) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Shifts the footprint's top row relative to the typed cell.
    pub const fn with_offset_y(mut self, offset: i8) -> Self {
        self.anchor_offset_y = offset;
        self
    }
}

const VANILLA_SHAPES: &[(TileType, ObjectShape)] = &[
    (TileType::TORCHES, ObjectShape::new(1, 1)),
    (TileType::CLOSED_DOOR, ObjectShape::new(1, 3)),
    (TileType::OPEN_DOOR, ObjectShape::new(2, 3)),
    (TileType::BOTTLES, ObjectShape::new(1, 1)),
    (TileType::TABLES, ObjectShape::new(3, 2)),
    (TileType::CHAIRS, ObjectShape::new(1, 2)),
    (TileType::ANVILS, ObjectShape::new(2, 1)),
    (TileType::FURNACES, ObjectShape::new(3, 2)),
    (TileType::WORK_BENCHES, ObjectShape::new(2, 1)),
    (TileType::CONTAINERS, ObjectShape::new(2, 2)),
    (TileType::SUNFLOWER, ObjectShape::new(2, 4)),
    (TileType::CANDLES, ObjectShape::new(1, 1)),
    (TileType::CHANDELIERS, ObjectShape::new(3, 3)),
    (TileType::HANGING_LANTERNS, ObjectShape::new(1, 2)),
    (TileType::WATER_CANDLE, ObjectShape::new(1, 1)),
    (TileType::SIGNS, ObjectShape::new(2, 2)),
    (TileType::BEDS, ObjectShape::new(4, 2)),
    (TileType::IMMATURE_HERBS, ObjectShape::new(1, 1)),
    (TileType::MATURE_HERBS, ObjectShape::new(1, 1)),
    (TileType::BLOOMING_HERBS, ObjectShape::new(1, 1)),
    (TileType::TOMBSTONES, ObjectShape::new(2, 2)),
    (TileType::DRESSERS, ObjectShape::new(3, 2)),
    (TileType::LAMPS, ObjectShape::new(1, 3)),
    (TileType::BOOKCASES, ObjectShape::new(3, 4)),
    (TileType::GRANDFATHER_CLOCKS, ObjectShape::new(2, 5)),
    (TileType::STATUES, ObjectShape::new(2, 3)),
    (TileType::PRESSURE_PLATES, ObjectShape::new(1, 1)),
    (TileType::SWITCHES, ObjectShape::new(1, 1)),
    (TileType::MUSIC_BOXES, ObjectShape::new(2, 2)),
    (TileType::PLATINUM_CANDLE, ObjectShape::new(1, 1)),
    (TileType::WATER_FOUNTAIN, ObjectShape::new(2, 4)),
    (TileType::CANNON, ObjectShape::new(4, 3)),
    (TileType::CAMPFIRE, ObjectShape::new(3, 2)),
    (TileType::PEACE_CANDLE, ObjectShape::new(1, 1)),
    (TileType::MINECART_TRACK, ObjectShape::new(1, 1)),
    (TileType::WEAPONS_RACK, ObjectShape::new(3, 3)),
    (
        TileType::TARGET_DUMMY,
        ObjectShape::new(2, 3).with_entity(EntityKind::TrainingDummy),
    ),
    (TileType::TRAPDOOR_OPEN, ObjectShape::new(2, 2)),
    // Closing a trapdoor also clears the open trapdoor cells above it.
    (
        TileType::TRAPDOOR_CLOSED,
        ObjectShape::new(2, 3).with_offset_y(-1),
    ),
    // Taller than any rectangle the server admits.
    (TileType::TALL_GATE_CLOSED, ObjectShape::new(1, 5)),
    (TileType::TALL_GATE_OPEN, ObjectShape::new(1, 5)),
    (
        TileType::ITEM_FRAME,
        ObjectShape::new(2, 2).with_entity(EntityKind::ItemFrame),
    ),
    (TileType::LUNAR_MONOLITH, ObjectShape::new(2, 3)),
    (
        TileType::LOGIC_SENSOR,
        ObjectShape::new(1, 1).with_entity(EntityKind::LogicSensor),
    ),
    (TileType::ANNOUNCEMENT_BOX, ObjectShape::new(2, 2)),
    (TileType::WEIGHTED_PRESSURE_PLATE, ObjectShape::new(1, 1)),
    (TileType::PROJECTILE_PRESSURE_PAD, ObjectShape::new(1, 1)),
    (
        TileType::DISPLAY_DOLL,
        ObjectShape::new(2, 3).with_entity(EntityKind::DisplayDoll),
    ),
    (
        TileType::WEAPONS_RACK2,
        ObjectShape::new(3, 3).with_entity(EntityKind::WeaponsRack),
    ),
    (
        TileType::HAT_RACK,
        ObjectShape::new(3, 4).with_entity(EntityKind::HatRack),
    ),
    (TileType::BLOOD_MOON_MONOLITH, ObjectShape::new(2, 3)),
    (TileType::VOID_MONOLITH, ObjectShape::new(2, 3)),
    (
        TileType::FOOD_PLATTER,
        ObjectShape::new(1, 1).with_entity(EntityKind::FoodPlatter),
    ),
    (
        TileType::TELEPORTATION_PYLON,
        ObjectShape::new(3, 4).with_entity(EntityKind::TeleportationPylon),
    ),
];

// ---------------------------------------------------------------------------
// ObjectShapeTable
// ---------------------------------------------------------------------------

/// Dense `TileType -> ObjectShape` lookup.
#[derive(Debug, Clone)]
pub struct ObjectShapeTable {
    shapes: Vec<Option<ObjectShape>>,
}

impl ObjectShapeTable {
    /// Shapes of the stock content set.
    pub fn vanilla() -> Self {
        Self::from_entries(VANILLA_SHAPES.iter().copied())
    }

    /// Builds a table from explicit `(type, shape)` entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (TileType, ObjectShape)>) -> Self {
        let mut shapes = vec![None; TILE_TYPE_COUNT as usize];
        for (ty, shape) in entries {
            let idx = ty.0 as usize;
            if idx >= shapes.len() {
                shapes.resize(idx + 1, None);
            }
            shapes[idx] = Some(shape);
        }
        Self { shapes }
    }

    /// Footprint of `ty`, or `None` for single-cell terrain types.
    pub fn shape(&self, ty: TileType) -> Option<&ObjectShape> {
        self.shapes.get(ty.0 as usize)?.as_ref()
    }

    /// Tile entity associated with `ty`.
    pub fn entity(&self, ty: TileType) -> Option<EntityKind> {
        self.shape(ty)?.entity
    }
}

impl Default for ObjectShapeTable {
    fn default() -> Self {
        Self::vanilla()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_furniture_has_footprint() {
        let table = ObjectShapeTable::vanilla();
        let frame = table.shape(TileType::ITEM_FRAME).unwrap();
        assert_eq!((frame.width, frame.height), (2, 2));
        let candle = table.shape(TileType::CANDLES).unwrap();
        assert_eq!((candle.width, candle.height), (1, 1));
    }

    #[test]
    fn test_terrain_has_no_shape() {
        let table = ObjectShapeTable::vanilla();
        assert!(table.shape(TileType::DIRT).is_none());
        assert!(table.shape(TileType::PLANTS).is_none());
        assert!(table.shape(TileType::LAND_MINE).is_none());
        assert!(table.shape(TileType(u16::MAX)).is_none());
    }

    #[test]
    fn test_entity_backed_types() {
        let table = ObjectShapeTable::vanilla();
        assert_eq!(
            table.entity(TileType::ITEM_FRAME),
            Some(EntityKind::ItemFrame)
        );
        assert_eq!(
            table.entity(TileType::TELEPORTATION_PYLON),
            Some(EntityKind::TeleportationPylon)
        );
        assert_eq!(table.entity(TileType::SIGNS), None);
        assert_eq!(table.entity(TileType::STONE), None);
    }

    #[test]
    fn test_closed_trapdoor_footprint_starts_above() {
        let table = ObjectShapeTable::vanilla();
        let trapdoor = table.shape(TileType::TRAPDOOR_CLOSED).unwrap();
        assert_eq!(trapdoor.anchor_offset_y, -1);
        assert_eq!((trapdoor.width, trapdoor.height), (2, 3));
    }

    #[test]
    fn test_entity_ids_are_distinct() {
        let kinds = [
            EntityKind::TrainingDummy,
            EntityKind::ItemFrame,
            EntityKind::LogicSensor,
            EntityKind::DisplayDoll,
            EntityKind::WeaponsRack,
            EntityKind::HatRack,
            EntityKind::FoodPlatter,
            EntityKind::TeleportationPylon,
        ];
        let mut ids: Vec<u8> = kinds.iter().map(|k| k.id()).collect();
        ids.dedup();
        assert_eq!(ids.len(), kinds.len());
    }
}
