//! Towers occupy the four diagonal neighbours of the anchor, leaving the
//! orthogonal neighbours free for the storage road ring.

use super::*;

pub fn tower_stamp() -> Stamp {
    Stamp {
        name: "tower",
        placements: vec![
            sp(StructureKind::Tower, -1, -1),
            sp(StructureKind::Tower, 1, -1),
            sp(StructureKind::Tower, 1, 1),
            sp(StructureKind::Tower, -1, 1),
        ],
    }
}
