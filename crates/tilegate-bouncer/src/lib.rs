//! Server-side validation of client tile-rectangle updates.
//!
//! A rectangle request flows through [`RectHandler`]: the payload is decoded,
//! checked by the admission gate, split into composite objects and single
//! tiles, each unit is checked against the legality tables in [`TileRules`],
//! permitted categories are applied to the world, and the authoritative
//! rectangle is sent back out so clients stay consistent.

pub mod apply;
pub mod error;
pub mod gate;
pub mod handler;
pub mod resync;
pub mod rules;
pub mod segment;
pub mod services;
pub mod shapes;
pub mod validate;

#[cfg(test)]
mod test_support;

pub use apply::apply_tile;
pub use error::{PlacementError, PolicyReason, Rejection};
pub use gate::{Admission, RectLimits, admit};
pub use handler::{AppliedUnit, RectHandler, RectOutcome, RectReport};
pub use resync::{ResyncTarget, encode_authoritative, snapshot};
pub use rules::{FloraRule, ObjectRule, TileRules};
pub use segment::{ObjectSegment, ProcessedGrid, Segment, SegmentPlan, segment};
pub use services::{BanList, Broadcaster, EntityPlacer, PlayerContext, Services, TileBans};
pub use shapes::{EntityKind, ObjectShape, ObjectShapeTable};
pub use validate::{validate_object, validate_single};
