//! The rectangle envelope and the decoded grid of proposed cells.

use crate::proposed::ProposedTile;

/// Largest width or height the protocol allows for a tile rectangle.
pub const MAX_RECT_SIZE: u8 = 4;

/// Encoded size of [`RectHeader`] in bytes.
pub const RECT_HEADER_LEN: usize = 6;

/// Packet envelope: world-relative origin plus dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectHeader {
    /// Origin column (left edge).
    pub x: i16,
    /// Origin row (top edge).
    pub y: i16,
    /// Width in cells.
    pub width: u8,
    /// Height in cells.
    pub height: u8,
}

impl RectHeader {
    /// Creates a header.
    pub fn new(x: i16, y: i16, width: u8, height: u8) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Number of cells the envelope declares.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Absolute world coordinate of the cell at `(col, row)`.
    pub fn world_pos(&self, col: usize, row: usize) -> (i32, i32) {
        (
            i32::from(self.x) + col as i32,
            i32::from(self.y) + row as i32,
        )
    }

    /// Returns `true` for a 1×1 rectangle.
    pub fn is_single_tile(&self) -> bool {
        self.width == 1 && self.height == 1
    }
}

/// A decoded rectangle: envelope plus `width * height` proposed cells stored
/// row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRect {
    header: RectHeader,
    tiles: Vec<ProposedTile>,
}

impl TileRect {
    /// Builds a rectangle by evaluating `f(col, row)` for every cell.
    pub fn from_fn(header: RectHeader, mut f: impl FnMut(usize, usize) -> ProposedTile) -> Self {
        let mut tiles = Vec::with_capacity(header.cell_count());
        for row in 0..header.height as usize {
            for col in 0..header.width as usize {
                tiles.push(f(col, row));
            }
        }
        Self { header, tiles }
    }

    /// Builds a rectangle with every cell set to `tile`.
    pub fn uniform(header: RectHeader, tile: ProposedTile) -> Self {
        Self::from_fn(header, |_, _| tile)
    }

    pub(crate) fn from_parts(header: RectHeader, tiles: Vec<ProposedTile>) -> Self {
        debug_assert_eq!(tiles.len(), header.cell_count());
        Self { header, tiles }
    }

    /// The envelope.
    pub fn header(&self) -> RectHeader {
        self.header
    }

    /// Width in cells.
    pub fn width(&self) -> usize {
        self.header.width as usize
    }

    /// Height in cells.
    pub fn height(&self) -> usize {
        self.header.height as usize
    }

    /// The proposed cell at `(col, row)`, or `None` outside the rectangle.
    pub fn get(&self, col: usize, row: usize) -> Option<&ProposedTile> {
        if col >= self.width() || row >= self.height() {
            return None;
        }
        self.tiles.get(col + row * self.width())
    }

    /// All cells in row-major order.
    pub fn tiles(&self) -> &[ProposedTile] {
        &self.tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilegate_world::TileType;

    #[test]
    fn test_world_pos_offsets_from_origin() {
        let header = RectHeader::new(-2, 100, 3, 2);
        assert_eq!(header.world_pos(0, 0), (-2, 100));
        assert_eq!(header.world_pos(2, 1), (0, 101));
    }

    #[test]
    fn test_from_fn_is_row_major() {
        let header = RectHeader::new(0, 0, 3, 2);
        let rect = TileRect::from_fn(header, |col, row| {
            ProposedTile::with_type(TileType((row * 10 + col) as u16), -1, -1)
        });
        let types: Vec<u16> = rect.tiles().iter().map(|t| t.tile_type.0).collect();
        assert_eq!(types, vec![0, 1, 2, 10, 11, 12]);
        assert_eq!(rect.get(2, 1).unwrap().tile_type, TileType(12));
    }

    #[test]
    fn test_get_outside_rect_is_none() {
        let rect = TileRect::uniform(RectHeader::new(0, 0, 2, 2), ProposedTile::EMPTY);
        assert!(rect.get(2, 0).is_none());
        assert!(rect.get(0, 2).is_none());
    }

    #[test]
    fn test_single_tile_detection() {
        assert!(RectHeader::new(0, 0, 1, 1).is_single_tile());
        assert!(!RectHeader::new(0, 0, 1, 2).is_single_tile());
    }
}
