//! Pre-allocated world grid and the access contract the pipeline relies on.
//!
//! Cells live in one flat row-major `Vec<WorldTile>` indexed by
//! `x + y * width`. The grid never allocates after construction.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::tile::WorldTile;

// ---------------------------------------------------------------------------
// TileAccess
// ---------------------------------------------------------------------------

/// Read/write access to authoritative cells by absolute world coordinate.
///
/// Coordinates outside `0..width` × `0..height` yield `None`.
pub trait TileAccess {
    /// World width in tiles.
    fn width(&self) -> i32;

    /// World height in tiles.
    fn height(&self) -> i32;

    /// Returns the cell at `(x, y)`.
    fn tile(&self, x: i32, y: i32) -> Option<&WorldTile>;

    /// Returns the cell at `(x, y)` for in-place mutation.
    fn tile_mut(&mut self, x: i32, y: i32) -> Option<&mut WorldTile>;

    /// Returns `true` if `(x, y)` lies inside the world.
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width() && y < self.height()
    }
}

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Reasons a grid cannot be allocated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// One of the dimensions is zero.
    #[error("world dimensions must be non-zero, got {width}x{height}")]
    ZeroSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// A dimension does not fit the signed coordinate space.
    #[error("world dimensions {width}x{height} exceed the coordinate range")]
    TooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

// ---------------------------------------------------------------------------
// TileGrid
// ---------------------------------------------------------------------------

/// Flat arena of [`WorldTile`]s covering the whole world.
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: i32,
    height: i32,
    cells: Vec<WorldTile>,
}

impl TileGrid {
    /// Allocates an empty world of `width` × `height` cells.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        Self::filled(width, height, WorldTile::EMPTY)
    }

    /// Allocates a world with every cell set to `fill`.
    pub fn filled(width: u32, height: u32, fill: WorldTile) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroSize { width, height });
        }
        let (Ok(w), Ok(h)) = (i32::try_from(width), i32::try_from(height)) else {
            return Err(GridError::TooLarge { width, height });
        };
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(GridError::TooLarge { width, height })?;

        tracing::debug!("Allocating {width}x{height} tile grid ({len} cells)");
        Ok(Self {
            width: w,
            height: h,
            cells: vec![fill; len],
        })
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Overwrites the cell at `(x, y)`. Returns `false` when out of bounds.
    pub fn set(&mut self, x: i32, y: i32, tile: WorldTile) -> bool {
        match self.tile_mut(x, y) {
            Some(cell) => {
                *cell = tile;
                true
            }
            None => false,
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(x as usize + y as usize * self.width as usize)
        } else {
            None
        }
    }
}

impl TileAccess for TileGrid {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn tile(&self, x: i32, y: i32) -> Option<&WorldTile> {
        let idx = self.index(x, y)?;
        self.cells.get(idx)
    }

    fn tile_mut(&mut self, x: i32, y: i32) -> Option<&mut WorldTile> {
        let idx = self.index(x, y)?;
        self.cells.get_mut(idx)
    }
}

// ---------------------------------------------------------------------------
// SharedGrid
// ---------------------------------------------------------------------------

/// A [`TileGrid`] shared between per-player pipelines.
///
/// Holding the write guard gives whole-grid exclusion for one rectangle's
/// read-modify-write sequence.
#[derive(Debug, Clone)]
pub struct SharedGrid {
    inner: Arc<RwLock<TileGrid>>,
}

impl SharedGrid {
    /// Wraps a grid for shared access.
    pub fn new(grid: TileGrid) -> Self {
        Self {
            inner: Arc::new(RwLock::new(grid)),
        }
    }

    /// Acquires shared read access.
    ///
    /// A poisoned lock is recovered: the grid is plain data and every
    /// mutation leaves it in a valid state.
    pub fn read(&self) -> RwLockReadGuard<'_, TileGrid> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquires exclusive write access.
    pub fn write(&self) -> RwLockWriteGuard<'_, TileGrid> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
