//! The rectangle pipeline: decode, admit, segment, validate, apply, resync.
//!
//! [`RectHandler::handle`] never fails. Every outcome, including malformed
//! input, is described by the returned [`RectReport`].

use tilegate_config::BouncerConfig;
use tilegate_protocol::{RectHeader, TileRect, decode_rect};
use tilegate_world::{SharedGrid, TileAccess, UpdateMask};

use crate::apply::apply_tile;
use crate::error::Rejection;
use crate::gate::{Admission, RectLimits, admit};
use crate::resync::{ResyncTarget, encode_authoritative};
use crate::rules::TileRules;
use crate::segment::{ObjectSegment, Segment, segment};
use crate::services::{PlayerContext, Services};
use crate::validate::{validate_object, validate_single};

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// How the request as a whole was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RectOutcome {
    /// Validated by the server; any subset of units may have been applied.
    Handled,
    /// Applied verbatim for a requester trusted to edit client-side.
    ClientTrusted,
    /// Refused before any unit was considered.
    Rejected(Rejection),
}

/// A unit written to the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedUnit {
    /// World column of the unit's top-left cell.
    pub x: i32,
    /// World row of the unit's top-left cell.
    pub y: i32,
    /// Width in cells.
    pub width: u8,
    /// Height in cells.
    pub height: u8,
    /// Categories written.
    pub mask: UpdateMask,
}

impl AppliedUnit {
    fn cell(x: i32, y: i32, mask: UpdateMask) -> Self {
        Self {
            x,
            y,
            width: 1,
            height: 1,
            mask,
        }
    }
}

/// Outcome of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RectReport {
    /// Decoded envelope; `None` when the packet was malformed.
    pub header: Option<RectHeader>,
    /// Whole-request resolution.
    pub outcome: RectOutcome,
    /// Units written to the world.
    pub applied: Vec<AppliedUnit>,
    /// Units skipped, with their reasons.
    pub rejected: Vec<Rejection>,
    /// Who was sent the authoritative rectangle.
    pub resync: ResyncTarget,
}

impl RectReport {
    fn rejected(header: Option<RectHeader>, rejection: Rejection, resync: ResyncTarget) -> Self {
        debug_assert!(rejection.is_whole_packet(), "{rejection:?} is per-unit");
        Self {
            header,
            outcome: RectOutcome::Rejected(rejection),
            applied: Vec::new(),
            rejected: Vec::new(),
            resync,
        }
    }

    /// Number of world cells written.
    pub fn cells_applied(&self) -> usize {
        self.applied
            .iter()
            .map(|unit| unit.width as usize * unit.height as usize)
            .sum()
    }
}

// ---------------------------------------------------------------------------
// RectHandler
// ---------------------------------------------------------------------------

/// Validates and applies rectangular tile updates.
#[derive(Debug, Clone, Default)]
pub struct RectHandler {
    rules: TileRules,
    limits: RectLimits,
}

impl RectHandler {
    /// Creates a handler over explicit tables and limits.
    pub fn new(rules: TileRules, limits: RectLimits) -> Self {
        Self { rules, limits }
    }

    /// Stock rules with limits from the `bouncer` config section.
    pub fn from_config(config: &BouncerConfig) -> Self {
        Self::new(TileRules::vanilla(), RectLimits::from_config(config))
    }

    /// The rule tables in use.
    pub fn rules(&self) -> &TileRules {
        &self.rules
    }

    /// The size limits in use.
    pub fn limits(&self) -> RectLimits {
        self.limits
    }

    /// Runs the pipeline on `grid`, holding its write lock until the
    /// authoritative rectangle has been serialized.
    pub fn handle_shared(
        &self,
        data: &[u8],
        player: &dyn PlayerContext,
        grid: &SharedGrid,
        services: &Services<'_>,
    ) -> RectReport {
        let mut guard = grid.write();
        self.handle(data, player, &mut *guard, services)
    }

    /// Runs the pipeline for one packet from `player`.
    pub fn handle<W: TileAccess + ?Sized>(
        &self,
        data: &[u8],
        player: &dyn PlayerContext,
        world: &mut W,
        services: &Services<'_>,
    ) -> RectReport {
        let rect = match decode_rect(data, &self.rules.frames) {
            Ok(rect) => rect,
            Err(err) => {
                tracing::warn!("Malformed tile rect from {}: {err}", player.name());
                return RectReport::rejected(None, err.into(), ResyncTarget::None);
            }
        };
        let header = rect.header();

        match admit(&header, player, &self.limits) {
            Ok(Admission::ClientTrusted) => {
                tracing::debug!(
                    "Applying {}x{} rect at ({}, {}) from {} verbatim",
                    header.width,
                    header.height,
                    header.x,
                    header.y,
                    player.name()
                );
                let applied = self.apply_verbatim(&rect, world);
                self.broadcast(world, header, services);
                RectReport {
                    header: Some(header),
                    outcome: RectOutcome::ClientTrusted,
                    applied,
                    rejected: Vec::new(),
                    resync: ResyncTarget::All,
                }
            }
            Ok(Admission::Validate) => self.validate_and_apply(&rect, player, world, services),
            Err(rejection @ Rejection::ProtocolViolation { .. }) => {
                tracing::warn!("{} sent an oversized tile rect: {rejection}", player.name());
                RectReport::rejected(Some(header), rejection, ResyncTarget::None)
            }
            Err(rejection) => {
                tracing::debug!("Rejected tile rect from {}: {rejection}", player.name());
                let payload = encode_authoritative(world, header, &self.rules.frames);
                player.send_rect(&payload);
                RectReport::rejected(Some(header), rejection, ResyncTarget::Origin)
            }
        }
    }

    fn validate_and_apply<W: TileAccess + ?Sized>(
        &self,
        rect: &TileRect,
        player: &dyn PlayerContext,
        world: &mut W,
        services: &Services<'_>,
    ) -> RectReport {
        let header = rect.header();
        let plan = segment(rect, &self.rules, world, player);
        let mut applied = Vec::with_capacity(plan.segments.len());
        let mut rejected = plan.skipped;

        for unit in &plan.segments {
            let result = match unit {
                Segment::Object(object) => {
                    validate_object(&self.rules, object, rect, world, player, services.bans)
                        .map(|mask| self.apply_object(object, mask, rect, world, services))
                }
                Segment::Single { col, row } => {
                    validate_single(&self.rules, *col, *row, rect, world, player).map(|mask| {
                        let (x, y) = header.world_pos(*col, *row);
                        self.apply_cell(rect, *col, *row, mask, world);
                        AppliedUnit::cell(x, y, mask)
                    })
                }
            };
            match result {
                Ok(unit) => applied.push(unit),
                Err(rejection) => rejected.push(rejection),
            }
        }

        for rejection in &rejected {
            tracing::debug!("Skipped tile rect unit from {}: {rejection}", player.name());
        }

        self.broadcast(world, header, services);
        RectReport {
            header: Some(header),
            outcome: RectOutcome::Handled,
            applied,
            rejected,
            resync: ResyncTarget::All,
        }
    }

    fn apply_object<W: TileAccess + ?Sized>(
        &self,
        object: &ObjectSegment,
        mask: UpdateMask,
        rect: &TileRect,
        world: &mut W,
        services: &Services<'_>,
    ) -> AppliedUnit {
        for (col, row) in object.cells() {
            self.apply_cell(rect, col, row, mask, world);
        }

        let (x, y) = object.origin(&rect.header());
        if let Some(kind) = object.shape.entity
            && let Err(err) = services.entities.place_entity(x, y, kind)
        {
            tracing::warn!("Failed to place {kind:?} entity at ({x}, {y}): {err}");
        }

        AppliedUnit {
            x,
            y,
            width: object.shape.width,
            height: object.shape.height,
            mask,
        }
    }

    fn apply_cell<W: TileAccess + ?Sized>(
        &self,
        rect: &TileRect,
        col: usize,
        row: usize,
        mask: UpdateMask,
        world: &mut W,
    ) {
        let (x, y) = rect.header().world_pos(col, row);
        if let (Some(proposed), Some(tile)) = (rect.get(col, row), world.tile_mut(x, y)) {
            apply_tile(tile, proposed, mask, &self.rules.frames);
        }
    }

    fn apply_verbatim<W: TileAccess + ?Sized>(
        &self,
        rect: &TileRect,
        world: &mut W,
    ) -> Vec<AppliedUnit> {
        let header = rect.header();
        let mut applied = Vec::new();
        for row in 0..rect.height() {
            for col in 0..rect.width() {
                let (x, y) = header.world_pos(col, row);
                if world.in_bounds(x, y) {
                    self.apply_cell(rect, col, row, UpdateMask::all(), world);
                    applied.push(AppliedUnit::cell(x, y, UpdateMask::all()));
                }
            }
        }
        applied
    }

    fn broadcast<W: TileAccess + ?Sized>(
        &self,
        world: &W,
        header: RectHeader,
        services: &Services<'_>,
    ) {
        let payload = encode_authoritative(world, header, &self.rules.frames);
        services.broadcaster.broadcast_rect(&payload);
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
