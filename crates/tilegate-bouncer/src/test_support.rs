//! In-memory collaborators shared by the unit and pipeline tests.

use std::cell::RefCell;
use std::collections::HashSet;

use tilegate_world::ItemId;

use crate::error::PlacementError;
use crate::services::{BanList, Broadcaster, EntityPlacer, PlayerContext, Services};
use crate::shapes::EntityKind;

/// Scriptable requester. Everything is permitted unless configured otherwise.
#[derive(Debug)]
pub struct FakePlayer {
    pub name: String,
    pub client_side: bool,
    pub throttled: bool,
    pub disabled: bool,
    /// Cells without build permission.
    pub denied: HashSet<(i32, i32)>,
    /// `(center_x, center_y, radius)`; `None` reaches everywhere.
    pub reach: Option<(i32, i32, i32)>,
    pub worn: Vec<ItemId>,
    pub sent: RefCell<Vec<Vec<u8>>>,
}

impl Default for FakePlayer {
    fn default() -> Self {
        Self {
            name: "tester".to_string(),
            client_side: false,
            throttled: false,
            disabled: false,
            denied: HashSet::new(),
            reach: None,
            worn: Vec::new(),
            sent: RefCell::new(Vec::new()),
        }
    }
}

impl PlayerContext for FakePlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn can_edit_client_side(&self) -> bool {
        self.client_side
    }

    fn has_build_permission(&self, x: i32, y: i32) -> bool {
        !self.denied.contains(&(x, y))
    }

    fn is_in_range(&self, x: i32, y: i32) -> bool {
        match self.reach {
            Some((cx, cy, r)) => (x - cx).abs() <= r && (y - cy).abs() <= r,
            None => true,
        }
    }

    fn is_throttled(&self) -> bool {
        self.throttled
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn accessories(&self) -> &[ItemId] {
        &self.worn
    }

    fn send_rect(&self, payload: &[u8]) {
        self.sent.borrow_mut().push(payload.to_vec());
    }
}

/// Records every broadcast payload.
#[derive(Debug, Default)]
pub struct RecordingBroadcaster {
    pub sent: RefCell<Vec<Vec<u8>>>,
}

impl Broadcaster for RecordingBroadcaster {
    fn broadcast_rect(&self, payload: &[u8]) {
        self.sent.borrow_mut().push(payload.to_vec());
    }
}

/// Records placements; optionally refuses them all.
#[derive(Debug, Default)]
pub struct RecordingPlacer {
    pub placed: RefCell<Vec<(i32, i32, EntityKind)>>,
    pub refuse: bool,
}

impl EntityPlacer for RecordingPlacer {
    fn place_entity(&self, x: i32, y: i32, kind: EntityKind) -> Result<(), PlacementError> {
        if self.refuse {
            return Err(PlacementError::Occupied { x, y });
        }
        self.placed.borrow_mut().push((x, y, kind));
        Ok(())
    }
}

/// Owned collaborator set for one test.
#[derive(Debug, Default)]
pub struct Harness {
    pub bans: BanList,
    pub placer: RecordingPlacer,
    pub broadcaster: RecordingBroadcaster,
}

impl Harness {
    pub fn services(&self) -> Services<'_> {
        Services {
            bans: &self.bans,
            entities: &self.placer,
            broadcaster: &self.broadcaster,
        }
    }

    pub fn broadcasts(&self) -> usize {
        self.broadcaster.sent.borrow().len()
    }
}
