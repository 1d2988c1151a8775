//! Rect Segmenter: splits a rectangle into composite objects and single
//! tiles.
//!
//! Cells are visited row-major. A cell whose proposed type has an object
//! shape anchors that object and claims its whole footprint; every other
//! cell is a single-tile unit. Each cell belongs to at most one unit, which
//! the [`ProcessedGrid`] enforces. Footprints anchored below their top row
//! (the closed trapdoor) are claimed before the walk starts.

use tilegate_protocol::{ProposedTile, RectHeader, TileRect};
use tilegate_world::{TileAccess, TileType};

use crate::error::{PolicyReason, Rejection};
use crate::rules::TileRules;
use crate::services::PlayerContext;
use crate::shapes::ObjectShape;

// ---------------------------------------------------------------------------
// ProcessedGrid
// ---------------------------------------------------------------------------

/// Per-request bitset of cells already claimed by a unit or skipped.
#[derive(Debug, Clone)]
pub struct ProcessedGrid {
    width: usize,
    height: usize,
    words: Vec<u64>,
}

impl ProcessedGrid {
    /// A grid with nothing processed.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            words: vec![0; (width * height).div_ceil(64)],
        }
    }

    fn bit(&self, col: usize, row: usize) -> Option<(usize, u64)> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let idx = col + row * self.width;
        Some((idx / 64, 1 << (idx % 64)))
    }

    /// Returns `true` when `(col, row)` is processed. Cells outside the grid
    /// count as processed.
    pub fn is_processed(&self, col: usize, row: usize) -> bool {
        match self.bit(col, row) {
            Some((word, mask)) => self.words[word] & mask != 0,
            None => true,
        }
    }

    /// Marks one cell. Out-of-grid cells are ignored.
    pub fn mark(&mut self, col: usize, row: usize) {
        if let Some((word, mask)) = self.bit(col, row) {
            self.words[word] |= mask;
        }
    }

    /// Marks the `width × height` area at `(col, row)`, clipped to the grid.
    pub fn mark_area(&mut self, col: usize, row: usize, width: usize, height: usize) {
        for r in row..(row + height).min(self.height) {
            for c in col..(col + width).min(self.width) {
                self.mark(c, r);
            }
        }
    }

    /// Returns `true` if any cell of the area is processed.
    pub fn any_in_area(&self, col: usize, row: usize, width: usize, height: usize) -> bool {
        (row..row + height).any(|r| (col..col + width).any(|c| self.is_processed(c, r)))
    }

    /// Number of processed cells.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

// ---------------------------------------------------------------------------
// Segments
// ---------------------------------------------------------------------------

/// A composite object claimed from the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectSegment {
    /// Column of the cell carrying the object type.
    pub col: usize,
    /// Row of the cell carrying the object type.
    pub row: usize,
    /// Top row of the footprint (differs from `row` for offset anchors).
    pub top: usize,
    /// Proposed object type.
    pub tile_type: TileType,
    /// Footprint.
    pub shape: ObjectShape,
}

impl ObjectSegment {
    /// World coordinate of the footprint's top-left cell.
    pub fn origin(&self, header: &RectHeader) -> (i32, i32) {
        header.world_pos(self.col, self.top)
    }

    /// Rectangle-relative `(col, row)` of every footprint cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let (col, top) = (self.col, self.top);
        let (w, h) = (self.shape.width as usize, self.shape.height as usize);
        (top..top + h).flat_map(move |r| (col..col + w).map(move |c| (c, r)))
    }
}

/// One unit of work for the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// A composite object.
    Object(ObjectSegment),
    /// A lone cell.
    Single {
        /// Rectangle column.
        col: usize,
        /// Rectangle row.
        row: usize,
    },
}

/// Result of segmenting one rectangle.
#[derive(Debug, Clone, Default)]
pub struct SegmentPlan {
    /// Units to validate, in visit order.
    pub segments: Vec<Segment>,
    /// Cells or objects skipped during the walk.
    pub skipped: Vec<Rejection>,
}

/// Walks `rect` row-major and partitions it into units.
///
/// Objects whose footprint starts above their typed cell are claimed in a
/// pass before the walk, so the rows above them are still free. Does not
/// touch the world; it is only consulted for its bounds.
pub fn segment<W: TileAccess + ?Sized>(
    rect: &TileRect,
    rules: &TileRules,
    world: &W,
    player: &dyn PlayerContext,
) -> SegmentPlan {
    let header = rect.header();
    let (width, height) = (rect.width(), rect.height());
    let mut processed = ProcessedGrid::new(width, height);
    let mut plan = SegmentPlan::default();

    for row in 0..height {
        for col in 0..width {
            let (x, y) = header.world_pos(col, row);
            if let Some(proposed) = rect.get(col, row)
                && let Some(shape) = object_shape(rules, proposed)
                && shape.anchor_offset_y != 0
                && !processed.is_processed(col, row)
                && cell_rejection(world, player, x, y).is_none()
                && let Some(top) = footprint_top(&shape, col, row, width, height, &processed)
            {
                let object = ObjectSegment {
                    col,
                    row,
                    top,
                    tile_type: proposed.tile_type,
                    shape,
                };
                claim(object, &header, world, &mut processed, &mut plan);
            }
        }
    }

    for row in 0..height {
        for col in 0..width {
            if processed.is_processed(col, row) {
                continue;
            }
            let (x, y) = header.world_pos(col, row);

            if let Some(rejection) = cell_rejection(world, player, x, y) {
                tracing::debug!("{}: {rejection}", player.name());
                processed.mark(col, row);
                plan.skipped.push(rejection);
                continue;
            }

            let Some(proposed) = rect.get(col, row) else {
                processed.mark(col, row);
                continue;
            };
            let Some(shape) = object_shape(rules, proposed) else {
                processed.mark(col, row);
                plan.segments.push(Segment::Single { col, row });
                continue;
            };

            let Some(top) = footprint_top(&shape, col, row, width, height, &processed) else {
                tracing::debug!(
                    "{}: {:?} at ({x}, {y}) does not fit the rectangle",
                    player.name(),
                    proposed.tile_type
                );
                processed.mark_area(col, row, width - col, height - row);
                plan.skipped
                    .push(Rejection::policy(x, y, PolicyReason::ObjectDoesNotFit));
                continue;
            };

            let object = ObjectSegment {
                col,
                row,
                top,
                tile_type: proposed.tile_type,
                shape,
            };
            claim(object, &header, world, &mut processed, &mut plan);
        }
    }

    debug_assert_eq!(processed.count(), width * height);
    plan
}

fn object_shape(rules: &TileRules, proposed: &ProposedTile) -> Option<ObjectShape> {
    if proposed.active {
        rules.shapes.shape(proposed.tile_type).copied()
    } else {
        None
    }
}

/// Why the cell at world `(x, y)` cannot start a unit, if it cannot.
fn cell_rejection<W: TileAccess + ?Sized>(
    world: &W,
    player: &dyn PlayerContext,
    x: i32,
    y: i32,
) -> Option<Rejection> {
    if !world.in_bounds(x, y) {
        Some(Rejection::OutOfWorld { x, y })
    } else if !player.has_build_permission(x, y) {
        Some(Rejection::PermissionDenied { x, y })
    } else if !player.is_in_range(x, y) {
        Some(Rejection::OutOfRange { x, y })
    } else {
        None
    }
}

/// Top row of the footprint typed at `(col, row)` when it lies inside the
/// rectangle and overlaps no processed cell.
fn footprint_top(
    shape: &ObjectShape,
    col: usize,
    row: usize,
    width: usize,
    height: usize,
    processed: &ProcessedGrid,
) -> Option<usize> {
    let top = row.checked_add_signed(isize::from(shape.anchor_offset_y))?;
    let (w, h) = (shape.width as usize, shape.height as usize);
    let fits = col + w <= width && top + h <= height && !processed.any_in_area(col, top, w, h);
    fits.then_some(top)
}

fn claim<W: TileAccess + ?Sized>(
    object: ObjectSegment,
    header: &RectHeader,
    world: &W,
    processed: &mut ProcessedGrid,
    plan: &mut SegmentPlan,
) {
    let shape = object.shape;
    processed.mark_area(
        object.col,
        object.top,
        shape.width as usize,
        shape.height as usize,
    );

    let (ox, oy) = object.origin(header);
    let far = (ox + i32::from(shape.width) - 1, oy + i32::from(shape.height) - 1);
    if !world.in_bounds(ox, oy) || !world.in_bounds(far.0, far.1) {
        plan.skipped.push(Rejection::OutOfWorld { x: ox, y: oy });
        return;
    }
    plan.segments.push(Segment::Object(object));
}
