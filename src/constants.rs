use crate::kind::StructureKind;

pub const ROOM_WIDTH: u8 = 50;
pub const ROOM_HEIGHT: u8 = 50;
pub const ROOM_AREA: usize = (ROOM_WIDTH as usize) * (ROOM_HEIGHT as usize);

/// Cost of a tile that was never stamped (room border).
pub const COST_UNSET: u8 = 0;
/// Walkable, buildable tile.
pub const COST_PLAIN: u8 = 1;
/// Tile holding a container: passable but expensive.
pub const COST_CONTAINER: u8 = 5;
/// Absolute veto on construction and movement.
pub const COST_BLOCKED: u8 = 255;

/// Ticks between placement passes of the build scheduler.
pub const DEFAULT_BUILD_CADENCE: u32 = 100;
/// Operation budget handed to the path search for source roads.
pub const DEFAULT_PATH_MAX_OPS: u32 = 100;
/// Swamp is treated like plain terrain when laying source roads.
pub const DEFAULT_PATH_SWAMP_COST: u8 = 1;
/// Controller level below which sources are left unconnected.
pub const DEFAULT_SOURCE_MIN_CONTROLLER_LEVEL: u8 = 2;

/// Maximum number of a given structure kind allowed at a given RCL.
/// Returns 0 if the structure is not available at that RCL.
/// Based on the Screeps API: <https://docs.screeps.com/control.html>
///
/// Note: Container and Road have no per-RCL limits beyond the room-wide cap.
/// Rampart and Wall share the same limits.
pub fn max_structures_at_rcl(kind: StructureKind, rcl: u8) -> u32 {
    match kind {
        StructureKind::Spawn => match rcl {
            0 => 0,
            1..=6 => 1,
            7 => 2,
            _ => 3,
        },
        StructureKind::Extension => match rcl {
            0 | 1 => 0,
            2 => 5,
            3 => 10,
            4 => 20,
            5 => 30,
            6 => 40,
            7 => 50,
            _ => 60,
        },
        StructureKind::Link => match rcl {
            0..=4 => 0,
            5 => 2,
            6 => 3,
            7 => 4,
            _ => 6,
        },
        StructureKind::Storage => match rcl {
            0..=3 => 0,
            _ => 1,
        },
        StructureKind::Tower => match rcl {
            0..=2 => 0,
            3..=4 => 1,
            5..=6 => 2,
            7 => 3,
            _ => 6,
        },
        StructureKind::Rampart | StructureKind::Wall => match rcl {
            0 | 1 => 0,
            _ => 2500,
        },
        StructureKind::Container => 5,
        StructureKind::Road => 2500,
    }
}
