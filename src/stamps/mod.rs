//! Fixed structure templates laid out relative to the base anchor.
//!
//! The anchor sits at a fixed horizontal offset from the primary spawn so
//! the spawn ends up on the west arm of a symmetric cross:
//!
//! ```text
//!             Link
//!
//!        E  E  E  E  E
//!        E  T  r  T  E
//! Spawn  r  r  S  r  r  Spawn
//!        E  T  r  T  E
//!        E  E  E  E  E
//!
//!             Spawn
//! ```
//!
//! `S` is storage on the anchor, `T` towers, `E` extensions and `r` the
//! roads generated around each anchor structure.

pub mod cross;
pub mod extension;
pub mod tower;

use crate::kind::StructureKind;
use crate::location::Location;

/// Offset from the primary spawn to the base anchor.
pub const ANCHOR_OFFSET: (i8, i8) = (3, 0);

/// A placement within a stamp: structure kind at a relative offset from the stamp anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StampPlacement {
    pub kind: StructureKind,
    pub dx: i8,
    pub dy: i8,
}

/// A fixed arrangement of structures relative to an anchor point.
#[derive(Clone, Debug)]
pub struct Stamp {
    pub name: &'static str,
    pub placements: Vec<StampPlacement>,
}

impl Stamp {
    /// Get all placements with absolute coordinates given an anchor position.
    /// Placements that fall outside the room are dropped; terrain and cost
    /// are not checked here.
    pub fn place_at(&self, anchor_x: i16, anchor_y: i16) -> Vec<(Location, StructureKind)> {
        self.placements
            .iter()
            .filter_map(|p| {
                Location::checked_from_i16(anchor_x + p.dx as i16, anchor_y + p.dy as i16)
                    .map(|loc| (loc, p.kind))
            })
            .collect()
    }

    /// True if no two placements share an offset.
    pub fn validate(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.placements.iter().all(|p| seen.insert((p.dx, p.dy)))
    }
}

/// Helper to create a StampPlacement.
pub const fn sp(kind: StructureKind, dx: i8, dy: i8) -> StampPlacement {
    StampPlacement { kind, dx, dy }
}

/// Every template stamp, in placement order.
pub fn base_stamps() -> Vec<Stamp> {
    vec![
        cross::cross_stamp(),
        tower::tower_stamp(),
        extension::extension_stamp(),
    ]
}
