//! Twelve extensions on the Chebyshev ring of radius 2 around the anchor:
//! the four corners, then the eight tiles beside them. The four axis tiles
//! of the ring are left for roads.

use super::*;

pub fn extension_stamp() -> Stamp {
    Stamp {
        name: "extension",
        placements: vec![
            sp(StructureKind::Extension, -2, -2),
            sp(StructureKind::Extension, 2, -2),
            sp(StructureKind::Extension, 2, 2),
            sp(StructureKind::Extension, -2, 2),
            sp(StructureKind::Extension, -1, -2),
            sp(StructureKind::Extension, 1, -2),
            sp(StructureKind::Extension, 2, -1),
            sp(StructureKind::Extension, 2, 1),
            sp(StructureKind::Extension, 1, 2),
            sp(StructureKind::Extension, -1, 2),
            sp(StructureKind::Extension, -2, 1),
            sp(StructureKind::Extension, -2, -1),
        ],
    }
}
