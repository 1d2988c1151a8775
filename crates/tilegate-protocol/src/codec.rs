//! Binary encoding and decoding of tile rectangles.
//!
//! ## Envelope
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 2 | Origin x (`i16`, little-endian) |
//! | 2 | 2 | Origin y (`i16`, little-endian) |
//! | 4 | 1 | Width (`u8`) |
//! | 5 | 1 | Height (`u8`) |
//! | 6 | … | `width × height` cells, row-major |
//!
//! ## Cell
//!
//! | Field | Size | Present when |
//! |-------|------|--------------|
//! | flags1 | 1 | always |
//! | flags2 | 1 | always |
//! | tile paint | 1 | `flags2` bit 2 |
//! | wall paint | 1 | `flags2` bit 3 |
//! | tile type | 2 | `flags1` bit 0 (active) |
//! | frame x, frame y | 2 + 2 | active and the type is frame-important |
//! | wall type | 2 | `flags1` bit 2 |
//! | liquid amount, liquid type | 1 + 1 | `flags1` bit 3 |
//!
//! `flags1`: bit0 active, bit2 wall, bit3 liquid, bit4 wire 1, bit5 half
//! brick, bit6 actuator, bit7 inactive. `flags2`: bit0 wire 2, bit1 wire 3,
//! bit2 tile paint, bit3 wall paint, bits 4-6 slope, bit7 wire 4.
//!
//! Cells are variable-length, so a payload matches its envelope only when
//! decoding consumes every byte exactly.

use tilegate_world::{FrameImportance, INVALID_FRAME, TileType, WallType};

use crate::proposed::ProposedTile;
use crate::rect::{RECT_HEADER_LEN, RectHeader, TileRect};

const F1_ACTIVE: u8 = 1 << 0;
const F1_WALL: u8 = 1 << 2;
const F1_LIQUID: u8 = 1 << 3;
const F1_WIRE1: u8 = 1 << 4;
const F1_HALF_BRICK: u8 = 1 << 5;
const F1_ACTUATOR: u8 = 1 << 6;
const F1_INACTIVE: u8 = 1 << 7;

const F2_WIRE2: u8 = 1 << 0;
const F2_WIRE3: u8 = 1 << 1;
const F2_TILE_PAINT: u8 = 1 << 2;
const F2_WALL_PAINT: u8 = 1 << 3;
const F2_SLOPE_SHIFT: u8 = 4;
const F2_SLOPE_MASK: u8 = 0b0111_0000;
const F2_WIRE4: u8 = 1 << 7;

/// Errors produced while decoding a tile rectangle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Fewer bytes than the envelope header needs.
    #[error("header truncated: expected {RECT_HEADER_LEN} bytes, got {actual}")]
    HeaderTruncated {
        /// Bytes available.
        actual: usize,
    },
    /// The envelope declares a rectangle with no cells.
    #[error("empty rectangle: {width}x{height}")]
    EmptyRect {
        /// Declared width.
        width: u8,
        /// Declared height.
        height: u8,
    },
    /// The payload ended inside a cell.
    #[error("cell {cell} truncated at byte offset {offset}")]
    CellTruncated {
        /// Row-major index of the incomplete cell.
        cell: usize,
        /// Offset at which the read failed.
        offset: usize,
    },
    /// Bytes remain after the last declared cell.
    #[error("{0} trailing bytes after the last cell")]
    TrailingBytes(usize),
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Cursor over a byte slice; every read fails with `None` at end of input.
struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn read_u8(&mut self) -> Option<u8> {
        let v = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(v)
    }

    fn read_u16_le(&mut self) -> Option<u16> {
        let bytes = self.data.get(self.pos..self.pos + 2)?;
        self.pos += 2;
        Some(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn read_i16_le(&mut self) -> Option<i16> {
        Some(self.read_u16_le()? as i16)
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decodes a full packet (envelope and cells).
///
/// Returns an error if the header is short, the rectangle is empty, or the
/// cell payload is not exactly `width × height` cells long.
pub fn decode_rect(data: &[u8], frames: &FrameImportance) -> Result<TileRect, DecodeError> {
    if data.len() < RECT_HEADER_LEN {
        return Err(DecodeError::HeaderTruncated { actual: data.len() });
    }
    let header = RectHeader {
        x: i16::from_le_bytes([data[0], data[1]]),
        y: i16::from_le_bytes([data[2], data[3]]),
        width: data[4],
        height: data[5],
    };
    decode_cells(header, &data[RECT_HEADER_LEN..], frames)
}

/// Decodes the cell payload for an already parsed envelope.
pub fn decode_cells(
    header: RectHeader,
    payload: &[u8],
    frames: &FrameImportance,
) -> Result<TileRect, DecodeError> {
    if header.width == 0 || header.height == 0 {
        return Err(DecodeError::EmptyRect {
            width: header.width,
            height: header.height,
        });
    }

    let mut reader = ByteReader::new(payload);
    let mut tiles = Vec::with_capacity(header.cell_count());
    for cell in 0..header.cell_count() {
        let tile = decode_cell(&mut reader, frames).ok_or(DecodeError::CellTruncated {
            cell,
            offset: RECT_HEADER_LEN + reader.position(),
        })?;
        tiles.push(tile);
    }

    if reader.remaining() > 0 {
        return Err(DecodeError::TrailingBytes(reader.remaining()));
    }

    tracing::trace!(
        "Decoded {}x{} rect at ({}, {})",
        header.width,
        header.height,
        header.x,
        header.y
    );
    Ok(TileRect::from_parts(header, tiles))
}

fn decode_cell(reader: &mut ByteReader<'_>, frames: &FrameImportance) -> Option<ProposedTile> {
    let flags1 = reader.read_u8()?;
    let flags2 = reader.read_u8()?;

    let mut tile = ProposedTile {
        active: flags1 & F1_ACTIVE != 0,
        half_brick: flags1 & F1_HALF_BRICK != 0,
        actuator: flags1 & F1_ACTUATOR != 0,
        inactive: flags1 & F1_INACTIVE != 0,
        slope: (flags2 & F2_SLOPE_MASK) >> F2_SLOPE_SHIFT,
        wires: [
            flags1 & F1_WIRE1 != 0,
            flags2 & F2_WIRE2 != 0,
            flags2 & F2_WIRE3 != 0,
            flags2 & F2_WIRE4 != 0,
        ],
        ..ProposedTile::EMPTY
    };

    if flags2 & F2_TILE_PAINT != 0 {
        tile.tile_paint = reader.read_u8()?;
    }
    if flags2 & F2_WALL_PAINT != 0 {
        tile.wall_paint = reader.read_u8()?;
    }
    if tile.active {
        tile.tile_type = TileType(reader.read_u16_le()?);
        if frames.is_frame_important(tile.tile_type) {
            tile.frame_x = reader.read_i16_le()?;
            tile.frame_y = reader.read_i16_le()?;
        }
    }
    if flags1 & F1_WALL != 0 {
        tile.wall = WallType(reader.read_u16_le()?);
    }
    if flags1 & F1_LIQUID != 0 {
        tile.liquid = reader.read_u8()?;
        tile.liquid_type = reader.read_u8()?;
    }

    Some(tile)
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encodes a rectangle (envelope and cells) in the layout [`decode_rect`]
/// reads.
///
/// A zero wall, zero paint or zero liquid amount is omitted from the cell.
pub fn encode_rect(rect: &TileRect, frames: &FrameImportance) -> Vec<u8> {
    let header = rect.header();
    let mut buf = Vec::with_capacity(RECT_HEADER_LEN + header.cell_count() * 8);

    buf.extend_from_slice(&header.x.to_le_bytes());
    buf.extend_from_slice(&header.y.to_le_bytes());
    buf.push(header.width);
    buf.push(header.height);

    for tile in rect.tiles() {
        encode_cell(&mut buf, tile, frames);
    }
    buf
}

fn encode_cell(buf: &mut Vec<u8>, tile: &ProposedTile, frames: &FrameImportance) {
    let has_wall = tile.wall != WallType::NONE;
    let has_liquid = tile.liquid != 0;

    let mut flags1 = 0u8;
    let mut flags2 = (tile.slope << F2_SLOPE_SHIFT) & F2_SLOPE_MASK;
    let bits1 = [
        (tile.active, F1_ACTIVE),
        (has_wall, F1_WALL),
        (has_liquid, F1_LIQUID),
        (tile.wires[0], F1_WIRE1),
        (tile.half_brick, F1_HALF_BRICK),
        (tile.actuator, F1_ACTUATOR),
        (tile.inactive, F1_INACTIVE),
    ];
    for (set, bit) in bits1 {
        if set {
            flags1 |= bit;
        }
    }
    let bits2 = [
        (tile.wires[1], F2_WIRE2),
        (tile.wires[2], F2_WIRE3),
        (tile.tile_paint != 0, F2_TILE_PAINT),
        (tile.wall_paint != 0, F2_WALL_PAINT),
        (tile.wires[3], F2_WIRE4),
    ];
    for (set, bit) in bits2 {
        if set {
            flags2 |= bit;
        }
    }

    buf.push(flags1);
    buf.push(flags2);
    if tile.tile_paint != 0 {
        buf.push(tile.tile_paint);
    }
    if tile.wall_paint != 0 {
        buf.push(tile.wall_paint);
    }
    if tile.active {
        buf.extend_from_slice(&tile.tile_type.0.to_le_bytes());
        if frames.is_frame_important(tile.tile_type) {
            // Cleared frames are sent as zero; the client recomputes them.
            let fx = if tile.frame_x == INVALID_FRAME { 0 } else { tile.frame_x };
            let fy = if tile.frame_y == INVALID_FRAME { 0 } else { tile.frame_y };
            buf.extend_from_slice(&fx.to_le_bytes());
            buf.extend_from_slice(&fy.to_le_bytes());
        }
    }
    if has_wall {
        buf.extend_from_slice(&tile.wall.0.to_le_bytes());
    }
    if has_liquid {
        buf.push(tile.liquid);
        buf.push(tile.liquid_type);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
