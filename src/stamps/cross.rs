use super::*;

/// Storage on the anchor, the two auxiliary spawns on the east and south
/// arms, the link on the north arm.
pub fn cross_stamp() -> Stamp {
    Stamp {
        name: "cross",
        placements: vec![
            sp(StructureKind::Spawn, 3, 0),
            sp(StructureKind::Spawn, 0, 3),
            sp(StructureKind::Storage, 0, 0),
            sp(StructureKind::Link, 0, -3),
        ],
    }
}
