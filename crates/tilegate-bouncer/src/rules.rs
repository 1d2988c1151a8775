//! Data-driven legality tables.
//!
//! Every per-type exception the validator knows about lives here as data:
//! which objects may be edited in place, which may change type, which plants
//! may be grown by foot-gear and on what, and which tile and wall identifiers
//! convert into each other. The validator itself only looks things up.

use std::collections::{HashMap, HashSet};

use tilegate_world::{FrameImportance, ItemId, TILE_TYPE_COUNT, TileType, WallType};

use crate::shapes::ObjectShapeTable;

// ---------------------------------------------------------------------------
// ObjectRule
// ---------------------------------------------------------------------------

/// Legality of rectangle updates to one composite object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObjectRule {
    /// An existing object of this type may be re-sent with changed state.
    pub same_type_edit: bool,
    /// The object may replace a cell holding a different type.
    pub type_change: bool,
}

impl ObjectRule {
    const SAME_TYPE: Self = Self {
        same_type_edit: true,
        type_change: false,
    };
    const TYPE_CHANGE: Self = Self {
        same_type_edit: false,
        type_change: true,
    };
}

const SAME_TYPE_EDITS: &[TileType] = &[
    TileType::PRESSURE_PLATES,
    TileType::WEIGHTED_PRESSURE_PLATE,
    TileType::PROJECTILE_PRESSURE_PAD,
    TileType::CANDLES,
    TileType::PEACE_CANDLE,
    TileType::WATER_CANDLE,
    TileType::PLATINUM_CANDLE,
    TileType::SIGNS,
    TileType::ANNOUNCEMENT_BOX,
    TileType::CAMPFIRE,
    TileType::IMMATURE_HERBS,
    TileType::MATURE_HERBS,
    TileType::BLOOMING_HERBS,
    TileType::SUNFLOWER,
    TileType::LUNAR_MONOLITH,
    TileType::BLOOD_MOON_MONOLITH,
    TileType::VOID_MONOLITH,
    TileType::MUSIC_BOXES,
    TileType::MINECART_TRACK,
    TileType::CANNON,
    TileType::WATER_FOUNTAIN,
    TileType::TRAPDOOR_OPEN,
    TileType::TRAPDOOR_CLOSED,
];

// Entity-backed objects arrive this way when first placed.
const TYPE_CHANGES: &[TileType] = &[
    TileType::TARGET_DUMMY,
    TileType::ITEM_FRAME,
    TileType::LOGIC_SENSOR,
    TileType::DISPLAY_DOLL,
    TileType::WEAPONS_RACK2,
    TileType::HAT_RACK,
    TileType::FOOD_PLATTER,
    TileType::TELEPORTATION_PYLON,
];

// ---------------------------------------------------------------------------
// FloraRule
// ---------------------------------------------------------------------------

/// Where and in which styles a plant may be grown by foot-gear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloraRule {
    /// The plant tile type.
    pub plant: TileType,
    /// Grass types the cell below must hold.
    pub grasses: HashSet<TileType>,
    /// Permitted styles (`frame_x / 18`).
    pub styles: HashSet<i16>,
}

impl FloraRule {
    fn new(
        plant: TileType,
        grasses: impl IntoIterator<Item = TileType>,
        styles: impl IntoIterator<Item = i16>,
    ) -> Self {
        Self {
            plant,
            grasses: grasses.into_iter().collect(),
            styles: styles.into_iter().collect(),
        }
    }

    /// Returns `true` when `style` may be grown.
    pub fn allows_style(&self, style: i16) -> bool {
        self.styles.contains(&style)
    }

    /// Returns `true` when the plant can grow on `ground`.
    pub fn grows_on(&self, ground: TileType) -> bool {
        self.grasses.contains(&ground)
    }
}

fn vanilla_flora() -> HashMap<TileType, FloraRule> {
    let plant_styles = (6..=24).chain([27, 30, 33, 36, 39, 42]);
    let hallowed = [TileType::HALLOWED_GRASS, TileType::GOLF_GRASS_HALLOWED];

    [
        FloraRule::new(
            TileType::PLANTS,
            [TileType::GRASS, TileType::GOLF_GRASS],
            plant_styles,
        ),
        FloraRule::new(TileType::HALLOWED_PLANTS, hallowed, [4, 6]),
        FloraRule::new(TileType::HALLOWED_PLANTS2, hallowed, [2, 3, 4, 6, 7]),
        FloraRule::new(TileType::JUNGLE_PLANTS2, [TileType::JUNGLE_GRASS], 9..=16),
        FloraRule::new(TileType::ASH_PLANTS, [TileType::ASH_GRASS], 6..=10),
    ]
    .into_iter()
    .map(|rule| (rule.plant, rule))
    .collect()
}

// ---------------------------------------------------------------------------
// Conversion families
// ---------------------------------------------------------------------------

const MOSSES: &[TileType] = &[
    TileType::GREEN_MOSS,
    TileType::BROWN_MOSS,
    TileType::RED_MOSS,
    TileType::BLUE_MOSS,
    TileType::PURPLE_MOSS,
    TileType::LAVA_MOSS,
    TileType::KRYPTON_MOSS,
    TileType::XENON_MOSS,
    TileType::ARGON_MOSS,
    TileType::VIOLET_MOSS,
    TileType::RAINBOW_MOSS,
];

const MOSS_BRICKS: &[TileType] = &[
    TileType::GREEN_MOSS_BRICK,
    TileType::BROWN_MOSS_BRICK,
    TileType::RED_MOSS_BRICK,
    TileType::BLUE_MOSS_BRICK,
    TileType::PURPLE_MOSS_BRICK,
    TileType::LAVA_MOSS_BRICK,
    TileType::KRYPTON_MOSS_BRICK,
    TileType::XENON_MOSS_BRICK,
    TileType::ARGON_MOSS_BRICK,
    TileType::VIOLET_MOSS_BRICK,
    TileType::RAINBOW_MOSS_BRICK,
];

fn vanilla_tile_families() -> Vec<Vec<TileType>> {
    let mut stone = vec![
        TileType::STONE,
        TileType::EBONSTONE,
        TileType::PEARLSTONE,
        TileType::CRIMSTONE,
    ];
    stone.extend_from_slice(MOSSES);

    vec![
        stone,
        vec![
            TileType::GRASS,
            TileType::CORRUPT_GRASS,
            TileType::HALLOWED_GRASS,
            TileType::CRIMSON_GRASS,
            TileType::GOLF_GRASS,
            TileType::GOLF_GRASS_HALLOWED,
        ],
        vec![
            TileType::ICE_BLOCK,
            TileType::CORRUPT_ICE,
            TileType::HALLOWED_ICE,
            TileType::FLESH_ICE,
        ],
        vec![
            TileType::SAND,
            TileType::EBONSAND,
            TileType::PEARLSAND,
            TileType::CRIMSAND,
        ],
        vec![
            TileType::SANDSTONE,
            TileType::CORRUPT_SANDSTONE,
            TileType::CRIMSON_SANDSTONE,
            TileType::HALLOW_SANDSTONE,
        ],
        vec![
            TileType::HARDENED_SAND,
            TileType::CORRUPT_HARDENED_SAND,
            TileType::CRIMSON_HARDENED_SAND,
            TileType::HALLOW_HARDENED_SAND,
        ],
        vec![
            TileType::CORRUPT_THORNS,
            TileType::JUNGLE_THORNS,
            TileType::CRIMSON_THORNS,
        ],
        MOSSES.to_vec(),
        MOSS_BRICKS.to_vec(),
    ]
}

fn vanilla_wall_families() -> Vec<Vec<WallType>> {
    vec![
        vec![
            WallType::STONE,
            WallType::EBONSTONE_UNSAFE,
            WallType::PEARLSTONE_BRICK_UNSAFE,
            WallType::CRIMSTONE_UNSAFE,
        ],
        vec![
            WallType::GRASS_UNSAFE,
            WallType::CORRUPT_GRASS_UNSAFE,
            WallType::HALLOWED_GRASS_UNSAFE,
            WallType::CRIMSON_GRASS_UNSAFE,
        ],
        vec![
            WallType::SANDSTONE,
            WallType::CORRUPT_SANDSTONE,
            WallType::CRIMSON_SANDSTONE,
            WallType::HALLOW_SANDSTONE,
        ],
        vec![
            WallType::HARDENED_SAND,
            WallType::CORRUPT_HARDENED_SAND,
            WallType::CRIMSON_HARDENED_SAND,
            WallType::HALLOW_HARDENED_SAND,
        ],
    ]
}

// ---------------------------------------------------------------------------
// TileRules
// ---------------------------------------------------------------------------

/// All read-only tables the pipeline consults.
#[derive(Debug, Clone)]
pub struct TileRules {
    /// Which tile types carry frame values on the wire.
    pub frames: FrameImportance,
    /// Composite object footprints.
    pub shapes: ObjectShapeTable,
    objects: Vec<ObjectRule>,
    flora: HashMap<TileType, FloraRule>,
    tile_families: Vec<Vec<TileType>>,
    wall_families: Vec<Vec<WallType>>,
    mowing: Vec<(TileType, TileType)>,
    growth_accessories: Vec<ItemId>,
}

impl TileRules {
    /// The stock rule set.
    pub fn vanilla() -> Self {
        let mut objects = vec![ObjectRule::default(); TILE_TYPE_COUNT as usize];
        for ty in SAME_TYPE_EDITS {
            objects[ty.0 as usize] = ObjectRule::SAME_TYPE;
        }
        for ty in TYPE_CHANGES {
            objects[ty.0 as usize] = ObjectRule::TYPE_CHANGE;
        }

        Self {
            frames: FrameImportance::vanilla(),
            shapes: ObjectShapeTable::vanilla(),
            objects,
            flora: vanilla_flora(),
            tile_families: vanilla_tile_families(),
            wall_families: vanilla_wall_families(),
            mowing: vec![
                (TileType::GRASS, TileType::GOLF_GRASS),
                (TileType::HALLOWED_GRASS, TileType::GOLF_GRASS_HALLOWED),
            ],
            growth_accessories: vec![
                ItemId::FLOWER_BOOTS,
                ItemId::FAIRY_BOOTS,
                ItemId::HELLFIRE_TREADS,
            ],
        }
    }

    /// Rectangle legality of object type `ty`. Unknown types allow nothing.
    pub fn object_rule(&self, ty: TileType) -> ObjectRule {
        self.objects.get(ty.0 as usize).copied().unwrap_or_default()
    }

    /// Foot-gear growth rule for `plant`.
    pub fn flora_rule(&self, plant: TileType) -> Option<&FloraRule> {
        self.flora.get(&plant)
    }

    /// Returns `true` if any worn item enables foot-gear growth.
    pub fn wears_growth_accessory(&self, worn: &[ItemId]) -> bool {
        worn.iter().any(|item| self.growth_accessories.contains(item))
    }

    /// Returns `true` if `to` is the mowed form of `from`.
    pub fn is_mowing(&self, from: TileType, to: TileType) -> bool {
        self.mowing.contains(&(from, to))
    }

    /// Returns `true` if both tile types belong to the same conversion family.
    pub fn tile_converts(&self, from: TileType, to: TileType) -> bool {
        self.tile_families
            .iter()
            .any(|family| family.contains(&from) && family.contains(&to))
    }

    /// Returns `true` if both wall types belong to the same conversion family.
    pub fn wall_converts(&self, from: WallType, to: WallType) -> bool {
        self.wall_families
            .iter()
            .any(|family| family.contains(&from) && family.contains(&to))
    }
}

impl Default for TileRules {
    fn default() -> Self {
        Self::vanilla()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_rules_are_exclusive() {
        let rules = TileRules::vanilla();
        let sign = rules.object_rule(TileType::SIGNS);
        assert!(sign.same_type_edit && !sign.type_change);
        let frame = rules.object_rule(TileType::ITEM_FRAME);
        assert!(frame.type_change && !frame.same_type_edit);
        assert_eq!(rules.object_rule(TileType::CONTAINERS), ObjectRule::default());
        assert_eq!(rules.object_rule(TileType(u16::MAX)), ObjectRule::default());
    }

    #[test]
    fn test_editable_objects_fit_the_largest_rect() {
        let rules = TileRules::vanilla();
        let max = usize::from(tilegate_protocol::MAX_RECT_SIZE);
        for ty in SAME_TYPE_EDITS.iter().chain(TYPE_CHANGES) {
            let Some(shape) = rules.shapes.shape(*ty) else {
                continue;
            };
            assert!(
                shape.width as usize <= max && shape.height as usize <= max,
                "{ty:?} footprint {}x{} cannot arrive in one rect",
                shape.width,
                shape.height
            );
        }
    }

    #[test]
    fn test_tall_gates_are_not_editable() {
        let rules = TileRules::vanilla();
        assert_eq!(rules.object_rule(TileType::TALL_GATE_OPEN), ObjectRule::default());
        assert_eq!(rules.object_rule(TileType::TALL_GATE_CLOSED), ObjectRule::default());
    }

    #[test]
    fn test_every_type_change_object_has_an_entity() {
        let rules = TileRules::vanilla();
        for ty in TYPE_CHANGES {
            assert!(rules.shapes.entity(*ty).is_some(), "{ty:?} has no entity");
        }
    }

    #[test]
    fn test_stone_converts_to_moss() {
        let rules = TileRules::vanilla();
        assert!(rules.tile_converts(TileType::STONE, TileType::CRIMSTONE));
        assert!(rules.tile_converts(TileType::STONE, TileType::GREEN_MOSS));
        assert!(rules.tile_converts(TileType::GREEN_MOSS, TileType::LAVA_MOSS));
        assert!(!rules.tile_converts(TileType::STONE, TileType::SAND));
        assert!(!rules.tile_converts(TileType::GREEN_MOSS, TileType::GREEN_MOSS_BRICK));
        assert!(!rules.tile_converts(TileType::DIRT, TileType::DIRT));
    }

    #[test]
    fn test_jungle_grass_is_not_convertible() {
        let rules = TileRules::vanilla();
        assert!(rules.tile_converts(TileType::GRASS, TileType::CRIMSON_GRASS));
        assert!(!rules.tile_converts(TileType::JUNGLE_GRASS, TileType::GRASS));
    }

    #[test]
    fn test_wall_families() {
        let rules = TileRules::vanilla();
        assert!(rules.wall_converts(WallType::STONE, WallType::CRIMSTONE_UNSAFE));
        assert!(rules.wall_converts(WallType::HARDENED_SAND, WallType::HALLOW_HARDENED_SAND));
        assert!(!rules.wall_converts(WallType::STONE, WallType::SANDSTONE));
        assert!(!rules.wall_converts(WallType::NONE, WallType::NONE));
    }

    #[test]
    fn test_flora_tables() {
        let rules = TileRules::vanilla();
        let plants = rules.flora_rule(TileType::PLANTS).unwrap();
        assert!(plants.grows_on(TileType::GOLF_GRASS));
        assert!(!plants.grows_on(TileType::HALLOWED_GRASS));
        assert!(plants.allows_style(6) && plants.allows_style(24) && plants.allows_style(42));
        assert!(!plants.allows_style(5) && !plants.allows_style(25));
        assert!(rules.flora_rule(TileType::STONE).is_none());
    }

    #[test]
    fn test_growth_accessories_and_mowing() {
        let rules = TileRules::vanilla();
        assert!(rules.wears_growth_accessory(&[ItemId(1), ItemId::FAIRY_BOOTS]));
        assert!(!rules.wears_growth_accessory(&[ItemId(1)]));
        assert!(rules.is_mowing(TileType::GRASS, TileType::GOLF_GRASS));
        assert!(!rules.is_mowing(TileType::GOLF_GRASS, TileType::GRASS));
    }
}
