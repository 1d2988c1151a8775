//! Wire format for the rectangular tile-update packet.
//!
//! [`decode_rect`] turns a raw payload into a [`TileRect`] of
//! [`ProposedTile`]s without validating any of it; [`encode_rect`] writes the
//! same layout and is used to resend authoritative state.

pub mod codec;
pub mod proposed;
pub mod rect;

pub use codec::{DecodeError, decode_cells, decode_rect, encode_rect};
pub use proposed::ProposedTile;
pub use rect::{MAX_RECT_SIZE, RECT_HEADER_LEN, RectHeader, TileRect};
