//! Legality Validator: decides which attribute categories of a unit may be
//! applied, if any.

use tilegate_protocol::{ProposedTile, TileRect};
use tilegate_world::{TileAccess, UpdateMask, WorldTile};

use crate::error::{PolicyReason, Rejection};
use crate::rules::{FloraRule, TileRules};
use crate::segment::ObjectSegment;
use crate::services::{PlayerContext, TileBans};

/// Checks a composite object against permissions, bans and the object
/// rule table. On success every footprint cell may take the TILE category.
pub fn validate_object<W: TileAccess + ?Sized>(
    rules: &TileRules,
    object: &ObjectSegment,
    rect: &TileRect,
    world: &W,
    player: &dyn PlayerContext,
    bans: &dyn TileBans,
) -> Result<UpdateMask, Rejection> {
    let header = rect.header();
    let (ox, oy) = object.origin(&header);
    let (ax, ay) = header.world_pos(object.col, object.row);
    let shape = &object.shape;

    if !player.has_build_permission_for_footprint(ox, oy, shape.width, shape.height) {
        return Err(Rejection::PermissionDenied { x: ox, y: oy });
    }

    if bans.is_banned(object.tile_type) {
        return Err(Rejection::policy(ax, ay, PolicyReason::BannedTile));
    }

    let existing = world
        .tile(ax, ay)
        .ok_or(Rejection::OutOfWorld { x: ax, y: ay })?;
    let rule = rules.object_rule(object.tile_type);
    if existing.is_active_type(object.tile_type) {
        if !rule.same_type_edit {
            return Err(Rejection::policy(ax, ay, PolicyReason::SameTypeEdit));
        }
    } else if !rule.type_change {
        return Err(Rejection::policy(ax, ay, PolicyReason::TypeChange));
    }

    Ok(UpdateMask::TILE)
}

/// Checks a lone cell against the single-tile interactions, in order: flora
/// growth, mechanism triggers, mowing, conversion spread.
pub fn validate_single<W: TileAccess + ?Sized>(
    rules: &TileRules,
    col: usize,
    row: usize,
    rect: &TileRect,
    world: &W,
    player: &dyn PlayerContext,
) -> Result<UpdateMask, Rejection> {
    let header = rect.header();
    let (x, y) = header.world_pos(col, row);
    if !header.is_single_tile() {
        return Err(Rejection::policy(x, y, PolicyReason::NotSingleTileRect));
    }

    let proposed = rect
        .get(col, row)
        .ok_or(Rejection::OutOfWorld { x, y })?;
    let existing = world.tile(x, y).ok_or(Rejection::OutOfWorld { x, y })?;
    let unmatched = Rejection::policy(x, y, PolicyReason::UnmatchedSingleTile);

    if rules.wears_growth_accessory(player.accessories())
        && let Some(flora) = rules.flora_rule(proposed.tile_type)
    {
        let below = world.tile(x, y + 1);
        return if flora_grows(flora, existing, below, proposed) {
            Ok(UpdateMask::TILE)
        } else {
            Err(unmatched)
        };
    }

    if is_mechanism_trigger(existing, proposed) {
        return Ok(UpdateMask::TILE);
    }

    if existing.active
        && proposed.active
        && rules.is_mowing(existing.tile_type, proposed.tile_type)
    {
        return Ok(UpdateMask::TILE);
    }

    let mut mask = UpdateMask::empty();
    if existing.active
        && proposed.active
        && rules.tile_converts(existing.tile_type, proposed.tile_type)
    {
        mask |= UpdateMask::TILE;
    }
    if rules.wall_converts(existing.wall, proposed.wall) {
        mask |= UpdateMask::WALL;
    }

    if mask.is_empty() {
        Err(unmatched)
    } else {
        Ok(mask)
    }
}

fn flora_grows(
    flora: &FloraRule,
    existing: &WorldTile,
    below: Option<&WorldTile>,
    proposed: &ProposedTile,
) -> bool {
    let Some(below) = below else {
        return false;
    };
    proposed.active
        && !existing.active
        && below.active
        && flora.grows_on(below.tile_type)
        && flora.allows_style(proposed.style())
}

fn is_mechanism_trigger(existing: &WorldTile, proposed: &ProposedTile) -> bool {
    use tilegate_world::TileType;

    // Stepping on a land mine detonates it.
    let mine_detonated = existing.is_active_type(TileType::LAND_MINE) && !proposed.active;
    // Junction boxes re-send themselves when their direction is toggled.
    let junction_toggled = existing.is_active_type(TileType::WIRE_PIPE)
        && proposed.active
        && proposed.tile_type == TileType::WIRE_PIPE;
    mine_detonated || junction_toggled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{Segment, segment};
    use crate::services::BanList;
    use crate::test_support::FakePlayer;
    use tilegate_protocol::RectHeader;
    use tilegate_world::{ItemId, TileGrid, TileType, WallType};

    fn single(tile: ProposedTile) -> TileRect {
        TileRect::uniform(RectHeader::new(5, 5, 1, 1), tile)
    }

    fn check_single(
        world: &TileGrid,
        rect: &TileRect,
        player: &FakePlayer,
    ) -> Result<UpdateMask, Rejection> {
        validate_single(&TileRules::vanilla(), 0, 0, rect, world, player)
    }

    fn booted() -> FakePlayer {
        FakePlayer {
            worn: vec![ItemId::FLOWER_BOOTS],
            ..FakePlayer::default()
        }
    }

    fn object_of(rect: &TileRect, world: &TileGrid) -> ObjectSegment {
        let plan = segment(rect, &TileRules::vanilla(), world, &FakePlayer::default());
        match plan.segments.first() {
            Some(Segment::Object(object)) => *object,
            other => panic!("expected an object, got {other:?}"),
        }
    }

    #[test]
    fn test_flora_grows_on_matching_grass() {
        let mut world = TileGrid::new(16, 16).unwrap();
        world.set(5, 6, WorldTile::solid(TileType::GRASS));
        let rect = single(ProposedTile::with_type(TileType::PLANTS, 18 * 8, 0));
        assert_eq!(check_single(&world, &rect, &booted()), Ok(UpdateMask::TILE));
    }

    #[test]
    fn test_flora_needs_boots() {
        let mut world = TileGrid::new(16, 16).unwrap();
        world.set(5, 6, WorldTile::solid(TileType::GRASS));
        let rect = single(ProposedTile::with_type(TileType::PLANTS, 18 * 8, 0));
        assert!(check_single(&world, &rect, &FakePlayer::default()).is_err());
    }

    #[test]
    fn test_flora_rejects_wrong_grass_style_or_occupied_cell() {
        let mut world = TileGrid::new(16, 16).unwrap();
        world.set(5, 6, WorldTile::solid(TileType::CRIMSON_GRASS));
        let rect = single(ProposedTile::with_type(TileType::PLANTS, 18 * 8, 0));
        assert!(check_single(&world, &rect, &booted()).is_err());

        world.set(5, 6, WorldTile::solid(TileType::GRASS));
        let bad_style = single(ProposedTile::with_type(TileType::PLANTS, 18 * 2, 0));
        assert!(check_single(&world, &bad_style, &booted()).is_err());

        world.set(5, 5, WorldTile::solid(TileType::PLANTS));
        assert!(check_single(&world, &rect, &booted()).is_err());
    }

    #[test]
    fn test_flora_at_bottom_edge_is_rejected() {
        let world = TileGrid::new(16, 6).unwrap();
        let rect = single(ProposedTile::with_type(TileType::PLANTS, 18 * 8, 0));
        assert!(check_single(&world, &rect, &booted()).is_err());
    }

    #[test]
    fn test_land_mine_detonation() {
        let mut world = TileGrid::new(16, 16).unwrap();
        world.set(5, 5, WorldTile::solid(TileType::LAND_MINE));
        let rect = single(ProposedTile::EMPTY);
        assert_eq!(
            check_single(&world, &rect, &FakePlayer::default()),
            Ok(UpdateMask::TILE)
        );
    }

    #[test]
    fn test_wire_pipe_toggle() {
        let mut world = TileGrid::new(16, 16).unwrap();
        world.set(5, 5, WorldTile::solid(TileType::WIRE_PIPE));
        let rect = single(ProposedTile::with_type(TileType::WIRE_PIPE, 18, 0));
        assert_eq!(
            check_single(&world, &rect, &FakePlayer::default()),
            Ok(UpdateMask::TILE)
        );

        // A fresh junction cannot be placed this way.
        world.set(5, 5, WorldTile::EMPTY);
        assert!(check_single(&world, &rect, &FakePlayer::default()).is_err());
    }

    #[test]
    fn test_mowing() {
        let mut world = TileGrid::new(16, 16).unwrap();
        world.set(5, 5, WorldTile::solid(TileType::HALLOWED_GRASS));
        let rect = single(ProposedTile::with_type(TileType::GOLF_GRASS_HALLOWED, -1, -1));
        assert_eq!(
            check_single(&world, &rect, &FakePlayer::default()),
            Ok(UpdateMask::TILE)
        );
    }

    #[test]
    fn test_tile_and_wall_conversion_combine() {
        let mut world = TileGrid::new(16, 16).unwrap();
        world.set(
            5,
            5,
            WorldTile {
                wall: WallType::STONE,
                ..WorldTile::solid(TileType::STONE)
            },
        );
        let rect = single(ProposedTile {
            wall: WallType::CRIMSTONE_UNSAFE,
            ..ProposedTile::with_type(TileType::CRIMSTONE, -1, -1)
        });
        assert_eq!(
            check_single(&world, &rect, &FakePlayer::default()),
            Ok(UpdateMask::TILE | UpdateMask::WALL)
        );

        let wall_only = single(ProposedTile {
            wall: WallType::CRIMSTONE_UNSAFE,
            ..ProposedTile::with_type(TileType::SAND, -1, -1)
        });
        assert_eq!(
            check_single(&world, &wall_only, &FakePlayer::default()),
            Ok(UpdateMask::WALL)
        );
    }

    #[test]
    fn test_conversion_needs_an_existing_tile() {
        let world = TileGrid::new(16, 16).unwrap();
        let rect = single(ProposedTile::with_type(TileType::STONE, -1, -1));
        assert_eq!(
            check_single(&world, &rect, &FakePlayer::default()),
            Err(Rejection::policy(5, 5, PolicyReason::UnmatchedSingleTile))
        );
    }

    #[test]
    fn test_single_tile_in_larger_rect_rejected() {
        let mut world = TileGrid::new(16, 16).unwrap();
        world.set(5, 5, WorldTile::solid(TileType::STONE));
        let rect = TileRect::uniform(
            RectHeader::new(5, 5, 2, 1),
            ProposedTile::with_type(TileType::CRIMSTONE, -1, -1),
        );
        let result = validate_single(&TileRules::vanilla(), 0, 0, &rect, &world, &FakePlayer::default());
        assert_eq!(
            result,
            Err(Rejection::policy(5, 5, PolicyReason::NotSingleTileRect))
        );
    }

    #[test]
    fn test_object_same_type_edit_rules() {
        let mut world = TileGrid::new(16, 16).unwrap();
        let rules = TileRules::vanilla();
        let bans = BanList::default();
        let player = FakePlayer::default();

        world.set(2, 2, WorldTile::solid(TileType::SIGNS));
        let sign = TileRect::uniform(
            RectHeader::new(2, 2, 2, 2),
            ProposedTile::with_type(TileType::SIGNS, 36, 0),
        );
        let object = object_of(&sign, &world);
        assert_eq!(
            validate_object(&rules, &object, &sign, &world, &player, &bans),
            Ok(UpdateMask::TILE)
        );

        world.set(8, 8, WorldTile::solid(TileType::CONTAINERS));
        let chest = TileRect::uniform(
            RectHeader::new(8, 8, 2, 2),
            ProposedTile::with_type(TileType::CONTAINERS, 0, 0),
        );
        let object = object_of(&chest, &world);
        assert_eq!(
            validate_object(&rules, &object, &chest, &world, &player, &bans),
            Err(Rejection::policy(8, 8, PolicyReason::SameTypeEdit))
        );
    }

    #[test]
    fn test_object_type_change_rules() {
        let world = TileGrid::new(16, 16).unwrap();
        let rules = TileRules::vanilla();
        let bans = BanList::default();
        let player = FakePlayer::default();

        let dummy = TileRect::uniform(
            RectHeader::new(0, 0, 2, 3),
            ProposedTile::with_type(TileType::TARGET_DUMMY, 0, 0),
        );
        let object = object_of(&dummy, &world);
        assert!(validate_object(&rules, &object, &dummy, &world, &player, &bans).is_ok());

        let sign = TileRect::uniform(
            RectHeader::new(0, 0, 2, 2),
            ProposedTile::with_type(TileType::SIGNS, 0, 0),
        );
        let object = object_of(&sign, &world);
        assert_eq!(
            validate_object(&rules, &object, &sign, &world, &player, &bans),
            Err(Rejection::policy(0, 0, PolicyReason::TypeChange))
        );
    }

    #[test]
    fn test_object_footprint_permission_and_bans() {
        let world = TileGrid::new(16, 16).unwrap();
        let rules = TileRules::vanilla();
        let rect = TileRect::uniform(
            RectHeader::new(3, 3, 2, 2),
            ProposedTile::with_type(TileType::ITEM_FRAME, 0, 0),
        );
        let object = object_of(&rect, &world);

        let mut player = FakePlayer::default();
        player.denied.insert((4, 4));
        assert_eq!(
            validate_object(&rules, &object, &rect, &world, &player, &BanList::default()),
            Err(Rejection::PermissionDenied { x: 3, y: 3 })
        );

        let bans = BanList::new([TileType::ITEM_FRAME.0]);
        assert_eq!(
            validate_object(&rules, &object, &rect, &world, &FakePlayer::default(), &bans),
            Err(Rejection::policy(3, 3, PolicyReason::BannedTile))
        );
    }
}
