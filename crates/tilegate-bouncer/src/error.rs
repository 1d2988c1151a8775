//! Rejection taxonomy of the rectangle pipeline.

use tilegate_protocol::DecodeError;

/// Why a legality rule refused a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyReason {
    /// The proposed tile type is on the ban list.
    BannedTile,
    /// Same-type edit of a type that does not allow in-place edits.
    SameTypeEdit,
    /// Type-changing placement of a type that does not allow it.
    TypeChange,
    /// The object's footprint does not fit inside the rectangle.
    ObjectDoesNotFit,
    /// No single-tile interaction matched.
    UnmatchedSingleTile,
    /// A non-object tile inside a rectangle larger than 1×1.
    NotSingleTileRect,
}

impl std::fmt::Display for PolicyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::BannedTile => "banned tile type",
            Self::SameTypeEdit => "same-type edit not allowed",
            Self::TypeChange => "type change not allowed",
            Self::ObjectDoesNotFit => "object footprint exceeds rectangle",
            Self::UnmatchedSingleTile => "no single-tile interaction matched",
            Self::NotSingleTileRect => "single tile outside a 1x1 rectangle",
        };
        f.write_str(text)
    }
}

/// Reason a whole request or one unit of it was refused.
///
/// Whole-packet variants (`MalformedPacket`, `ProtocolViolation`,
/// `Throttled`, `Disabled`) end the request. The others skip one cell or
/// object and processing continues with the rest of the rectangle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The payload could not be decoded.
    #[error("malformed packet: {0}")]
    MalformedPacket(#[from] DecodeError),
    /// The rectangle exceeds the configured maximum dimensions.
    #[error("rectangle {width}x{height} exceeds maximum {max_width}x{max_height}")]
    ProtocolViolation {
        /// Declared width.
        width: u8,
        /// Declared height.
        height: u8,
        /// Configured maximum width.
        max_width: u8,
        /// Configured maximum height.
        max_height: u8,
    },
    /// The requester may not build over the unit.
    #[error("no build permission at ({x}, {y})")]
    PermissionDenied {
        /// World column.
        x: i32,
        /// World row.
        y: i32,
    },
    /// The unit is outside the requester's reach.
    #[error("({x}, {y}) is out of range")]
    OutOfRange {
        /// World column.
        x: i32,
        /// World row.
        y: i32,
    },
    /// A legality rule refused the unit.
    #[error("rejected at ({x}, {y}): {reason}")]
    PolicyRejected {
        /// World column.
        x: i32,
        /// World row.
        y: i32,
        /// Which rule refused it.
        reason: PolicyReason,
    },
    /// The requester is rate limited.
    #[error("requester is throttled")]
    Throttled,
    /// The requester is disabled.
    #[error("requester is disabled")]
    Disabled,
    /// The unit lies outside the world.
    #[error("({x}, {y}) is outside the world")]
    OutOfWorld {
        /// World column.
        x: i32,
        /// World row.
        y: i32,
    },
}

impl Rejection {
    /// Returns `true` when the rejection aborts the whole request.
    pub fn is_whole_packet(&self) -> bool {
        matches!(
            self,
            Self::MalformedPacket(_) | Self::ProtocolViolation { .. } | Self::Throttled | Self::Disabled
        )
    }

    pub(crate) fn policy(x: i32, y: i32, reason: PolicyReason) -> Self {
        Self::PolicyRejected { x, y, reason }
    }
}

/// Failure reported by the tile entity store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// An entity already exists at the anchor.
    #[error("an entity already occupies ({x}, {y})")]
    Occupied {
        /// Anchor column.
        x: i32,
        /// Anchor row.
        y: i32,
    },
    /// The store refused the entity.
    #[error("entity store refused placement: {0}")]
    Refused(String),
}
