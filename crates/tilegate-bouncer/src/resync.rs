//! Resynchronizer: serializes the authoritative state of a rectangle so
//! clients that applied an optimistic update can be corrected.

use tilegate_protocol::{ProposedTile, RectHeader, TileRect, encode_rect};
use tilegate_world::{FrameImportance, TileAccess};

/// Who receives the authoritative rectangle after a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResyncTarget {
    /// Nobody.
    None,
    /// The requesting player only.
    Origin,
    /// Every connected observer.
    All,
}

/// Captures the world cells covered by `header`. Cells outside the world
/// are captured as empty.
pub fn snapshot<W: TileAccess + ?Sized>(world: &W, header: RectHeader) -> TileRect {
    TileRect::from_fn(header, |col, row| {
        let (x, y) = header.world_pos(col, row);
        world
            .tile(x, y)
            .map(ProposedTile::from)
            .unwrap_or(ProposedTile::EMPTY)
    })
}

/// Encodes the authoritative rectangle covered by `header`.
pub fn encode_authoritative<W: TileAccess + ?Sized>(
    world: &W,
    header: RectHeader,
    frames: &FrameImportance,
) -> Vec<u8> {
    encode_rect(&snapshot(world, header), frames)
}
