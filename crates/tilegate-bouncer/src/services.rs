//! Collaborator contracts the pipeline depends on but does not implement:
//! the requesting player's permissions and state, delivery of resync
//! payloads, tile bans, and the tile entity store.

use std::collections::HashSet;

use tilegate_config::BouncerConfig;
use tilegate_world::{ItemId, TileType};

use crate::error::PlacementError;
use crate::shapes::EntityKind;

/// The requesting player as seen by the pipeline.
pub trait PlayerContext {
    /// Display name used in log lines.
    fn name(&self) -> &str;

    /// Holds the "unrestricted client-side editing" capability.
    fn can_edit_client_side(&self) -> bool;

    /// May build at `(x, y)`.
    fn has_build_permission(&self, x: i32, y: i32) -> bool;

    /// May build over every cell of the `width × height` area at `(x, y)`.
    fn has_build_permission_for_footprint(&self, x: i32, y: i32, width: u8, height: u8) -> bool {
        (0..i32::from(height)).all(|dy| {
            (0..i32::from(width)).all(|dx| self.has_build_permission(x + dx, y + dy))
        })
    }

    /// `(x, y)` is within the player's reach.
    fn is_in_range(&self, x: i32, y: i32) -> bool;

    /// The player is rate limited for tile edits.
    fn is_throttled(&self) -> bool;

    /// The player is disabled.
    fn is_disabled(&self) -> bool;

    /// Items currently worn in accessory slots.
    fn accessories(&self) -> &[ItemId];

    /// Sends an encoded rectangle to this player only.
    fn send_rect(&self, payload: &[u8]);
}

/// Delivers an encoded rectangle to every connected observer.
pub trait Broadcaster {
    /// Sends `payload` to all observers.
    fn broadcast_rect(&self, payload: &[u8]);
}

/// Server tile ban policy.
pub trait TileBans {
    /// Returns `true` when `ty` may not be placed.
    fn is_banned(&self, ty: TileType) -> bool;
}

/// Tile entity store.
pub trait EntityPlacer {
    /// Creates the entity of `kind` anchored at `(x, y)`.
    fn place_entity(&self, x: i32, y: i32, kind: EntityKind) -> Result<(), PlacementError>;
}

/// Ban list read from the configuration.
#[derive(Debug, Clone, Default)]
pub struct BanList {
    banned: HashSet<TileType>,
}

impl BanList {
    /// Builds a ban list from raw tile identifiers.
    pub fn new(banned: impl IntoIterator<Item = u16>) -> Self {
        Self {
            banned: banned.into_iter().map(TileType).collect(),
        }
    }

    /// Ban list from the `bouncer` config section.
    pub fn from_config(config: &BouncerConfig) -> Self {
        Self::new(config.banned_tiles.iter().copied())
    }

    /// Number of banned types.
    pub fn len(&self) -> usize {
        self.banned.len()
    }

    /// Returns `true` when nothing is banned.
    pub fn is_empty(&self) -> bool {
        self.banned.is_empty()
    }
}

impl TileBans for BanList {
    fn is_banned(&self, ty: TileType) -> bool {
        self.banned.contains(&ty)
    }
}

/// Borrowed collaborators for one request.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    /// Tile ban policy.
    pub bans: &'a dyn TileBans,
    /// Tile entity store.
    pub entities: &'a dyn EntityPlacer,
    /// Observer fan-out.
    pub broadcaster: &'a dyn Broadcaster,
}
