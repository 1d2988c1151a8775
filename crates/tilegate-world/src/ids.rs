//! Compact identifiers for tile types, wall types, and items.
//!
//! Numeric values follow the client's content tables; they travel on the
//! wire unchanged.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TileType
// ---------------------------------------------------------------------------

/// Tile type identifier (2 bytes on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct TileType(pub u16);

#[allow(missing_docs)]
impl TileType {
    pub const DIRT: Self = Self(0);
    pub const STONE: Self = Self(1);
    pub const GRASS: Self = Self(2);
    pub const PLANTS: Self = Self(3);
    pub const TORCHES: Self = Self(4);
    pub const CLOSED_DOOR: Self = Self(10);
    pub const OPEN_DOOR: Self = Self(11);
    pub const BOTTLES: Self = Self(13);
    pub const TABLES: Self = Self(14);
    pub const CHAIRS: Self = Self(15);
    pub const ANVILS: Self = Self(16);
    pub const FURNACES: Self = Self(17);
    pub const WORK_BENCHES: Self = Self(18);
    pub const CONTAINERS: Self = Self(21);
    pub const CORRUPT_GRASS: Self = Self(23);
    pub const EBONSTONE: Self = Self(25);
    pub const SUNFLOWER: Self = Self(27);
    pub const CORRUPT_THORNS: Self = Self(32);
    pub const CANDLES: Self = Self(33);
    pub const CHANDELIERS: Self = Self(34);
    pub const HANGING_LANTERNS: Self = Self(42);
    pub const WATER_CANDLE: Self = Self(49);
    pub const SAND: Self = Self(53);
    pub const SIGNS: Self = Self(55);
    pub const MUD: Self = Self(59);
    pub const JUNGLE_GRASS: Self = Self(60);
    pub const JUNGLE_THORNS: Self = Self(69);
    pub const JUNGLE_PLANTS2: Self = Self(74);
    pub const BEDS: Self = Self(79);
    pub const IMMATURE_HERBS: Self = Self(82);
    pub const MATURE_HERBS: Self = Self(83);
    pub const BLOOMING_HERBS: Self = Self(84);
    pub const TOMBSTONES: Self = Self(85);
    pub const DRESSERS: Self = Self(88);
    pub const LAMPS: Self = Self(93);
    pub const BOOKCASES: Self = Self(101);
    pub const GRANDFATHER_CLOCKS: Self = Self(104);
    pub const STATUES: Self = Self(105);
    pub const HALLOWED_GRASS: Self = Self(109);
    pub const HALLOWED_PLANTS: Self = Self(110);
    pub const EBONSAND: Self = Self(112);
    pub const HALLOWED_PLANTS2: Self = Self(113);
    pub const PEARLSAND: Self = Self(116);
    pub const PEARLSTONE: Self = Self(117);
    pub const PRESSURE_PLATES: Self = Self(135);
    pub const SWITCHES: Self = Self(136);
    pub const MUSIC_BOXES: Self = Self(139);
    pub const ICE_BLOCK: Self = Self(161);
    pub const CORRUPT_ICE: Self = Self(163);
    pub const HALLOWED_ICE: Self = Self(164);
    pub const PLATINUM_CANDLE: Self = Self(174);
    pub const GREEN_MOSS: Self = Self(179);
    pub const BROWN_MOSS: Self = Self(180);
    pub const RED_MOSS: Self = Self(181);
    pub const BLUE_MOSS: Self = Self(182);
    pub const PURPLE_MOSS: Self = Self(183);
    pub const CRIMSON_GRASS: Self = Self(199);
    pub const FLESH_ICE: Self = Self(200);
    pub const CRIMSTONE: Self = Self(203);
    pub const WATER_FOUNTAIN: Self = Self(207);
    pub const CANNON: Self = Self(209);
    pub const LAND_MINE: Self = Self(210);
    pub const CAMPFIRE: Self = Self(215);
    pub const CRIMSAND: Self = Self(234);
    pub const PEACE_CANDLE: Self = Self(270);
    pub const MINECART_TRACK: Self = Self(314);
    pub const WEAPONS_RACK: Self = Self(334);
    pub const CRIMSON_THORNS: Self = Self(352);
    pub const TARGET_DUMMY: Self = Self(378);
    pub const LAVA_MOSS: Self = Self(381);
    pub const TRAPDOOR_OPEN: Self = Self(386);
    pub const TRAPDOOR_CLOSED: Self = Self(387);
    pub const TALL_GATE_CLOSED: Self = Self(388);
    pub const TALL_GATE_OPEN: Self = Self(389);
    pub const ITEM_FRAME: Self = Self(395);
    pub const SANDSTONE: Self = Self(396);
    pub const HARDENED_SAND: Self = Self(397);
    pub const CORRUPT_HARDENED_SAND: Self = Self(398);
    pub const CRIMSON_HARDENED_SAND: Self = Self(399);
    pub const CORRUPT_SANDSTONE: Self = Self(400);
    pub const CRIMSON_SANDSTONE: Self = Self(401);
    pub const HALLOW_HARDENED_SAND: Self = Self(402);
    pub const HALLOW_SANDSTONE: Self = Self(403);
    pub const LUNAR_MONOLITH: Self = Self(410);
    pub const LOGIC_SENSOR: Self = Self(423);
    pub const WIRE_PIPE: Self = Self(424);
    pub const ANNOUNCEMENT_BOX: Self = Self(425);
    pub const WEIGHTED_PRESSURE_PLATE: Self = Self(428);
    pub const PROJECTILE_PRESSURE_PAD: Self = Self(442);
    pub const DISPLAY_DOLL: Self = Self(470);
    pub const WEAPONS_RACK2: Self = Self(471);
    pub const HAT_RACK: Self = Self(475);
    pub const GOLF_GRASS: Self = Self(477);
    pub const BLOOD_MOON_MONOLITH: Self = Self(480);
    pub const GOLF_GRASS_HALLOWED: Self = Self(492);
    pub const VOID_MONOLITH: Self = Self(509);
    pub const GREEN_MOSS_BRICK: Self = Self(512);
    pub const BROWN_MOSS_BRICK: Self = Self(513);
    pub const RED_MOSS_BRICK: Self = Self(514);
    pub const BLUE_MOSS_BRICK: Self = Self(515);
    pub const PURPLE_MOSS_BRICK: Self = Self(516);
    pub const LAVA_MOSS_BRICK: Self = Self(517);
    pub const FOOD_PLATTER: Self = Self(520);
    pub const KRYPTON_MOSS: Self = Self(534);
    pub const KRYPTON_MOSS_BRICK: Self = Self(535);
    pub const XENON_MOSS: Self = Self(536);
    pub const XENON_MOSS_BRICK: Self = Self(537);
    pub const ARGON_MOSS: Self = Self(539);
    pub const ARGON_MOSS_BRICK: Self = Self(540);
    pub const TELEPORTATION_PYLON: Self = Self(597);
    pub const VIOLET_MOSS: Self = Self(625);
    pub const VIOLET_MOSS_BRICK: Self = Self(626);
    pub const RAINBOW_MOSS: Self = Self(627);
    pub const RAINBOW_MOSS_BRICK: Self = Self(628);
    pub const ASH_GRASS: Self = Self(633);
    pub const ASH_PLANTS: Self = Self(637);
}

/// One past the highest known tile type.
pub const TILE_TYPE_COUNT: u16 = 693;

// ---------------------------------------------------------------------------
// WallType
// ---------------------------------------------------------------------------

/// Wall type identifier (2 bytes on the wire). `0` means no wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct WallType(pub u16);

#[allow(missing_docs)]
impl WallType {
    pub const NONE: Self = Self(0);
    pub const STONE: Self = Self(1);
    pub const EBONSTONE_UNSAFE: Self = Self(3);
    pub const PEARLSTONE_BRICK_UNSAFE: Self = Self(28);
    pub const GRASS_UNSAFE: Self = Self(63);
    pub const CORRUPT_GRASS_UNSAFE: Self = Self(69);
    pub const HALLOWED_GRASS_UNSAFE: Self = Self(70);
    pub const CRIMSON_GRASS_UNSAFE: Self = Self(81);
    pub const CRIMSTONE_UNSAFE: Self = Self(83);
    pub const SANDSTONE: Self = Self(187);
    pub const HARDENED_SAND: Self = Self(216);
    pub const CORRUPT_HARDENED_SAND: Self = Self(217);
    pub const CRIMSON_HARDENED_SAND: Self = Self(218);
    pub const HALLOW_HARDENED_SAND: Self = Self(219);
    pub const CORRUPT_SANDSTONE: Self = Self(220);
    pub const CRIMSON_SANDSTONE: Self = Self(221);
    pub const HALLOW_SANDSTONE: Self = Self(222);
}

// ---------------------------------------------------------------------------
// ItemId
// ---------------------------------------------------------------------------

/// Item identifier, used for worn accessories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub i32);

#[allow(missing_docs)]
impl ItemId {
    pub const FLOWER_BOOTS: Self = Self(3990);
    pub const HELLFIRE_TREADS: Self = Self(5214);
    pub const FAIRY_BOOTS: Self = Self(5215);
}
