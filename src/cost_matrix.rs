//! Per-room buildability/passability grid.
//!
//! The matrix is a pure function of a `RoomDataSource` snapshot. Every
//! interior tile is stamped from terrain, then overlaid in order by pending
//! construction sites, sources, structures and creeps (later wins). Border
//! tiles are left unset. Once computed the matrix is never edited; callers
//! replace it wholesale.

use crate::constants::*;
use crate::location::*;
use crate::room_data::*;
use crate::terrain::*;
use serde::{Deserialize, Serialize};

use screeps::constants::StructureType;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostMatrix {
    room_name: String,
    matrix: RoomDataArray<u8>,
}

impl CostMatrix {
    fn empty(room_name: impl Into<String>) -> Self {
        CostMatrix {
            room_name: room_name.into(),
            matrix: RoomDataArray::new(COST_UNSET),
        }
    }

    pub fn room_name(&self) -> &str {
        &self.room_name
    }

    /// The stamped cost for a tile. Out-of-room coordinates read as blocked.
    pub fn get(&self, x: u8, y: u8) -> u8 {
        if x < ROOM_WIDTH && y < ROOM_HEIGHT {
            *self.matrix.get(x as usize, y as usize)
        } else {
            COST_BLOCKED
        }
    }

    pub fn get_at(&self, loc: Location) -> u8 {
        self.get(loc.x(), loc.y())
    }

    /// 255 is an absolute veto on construction, whatever is being planned.
    pub fn is_blocked(&self, loc: Location) -> bool {
        self.get_at(loc) == COST_BLOCKED
    }

    /// True if every interior cell holds a recognised cost and every border
    /// cell is either unset or carries an overlay stamp.
    pub fn is_well_formed(&self) -> bool {
        self.matrix.iter().all(|((x, y), cost)| {
            let loc = Location::from_xy(x as u8, y as u8);
            match *cost {
                COST_PLAIN | COST_CONTAINER | COST_BLOCKED => true,
                COST_UNSET => !loc.is_interior(),
                _ => false,
            }
        })
    }

    #[inline]
    pub(crate) fn set(&mut self, loc: Location, cost: u8) {
        self.matrix.set(loc.x() as usize, loc.y() as usize, cost);
    }
}

/// Structure overlay: containers stay passable, walls defer to terrain,
/// everything else (roads and ramparts included) blocks construction.
fn structure_cost(structure_type: StructureType) -> Option<u8> {
    match structure_type {
        StructureType::Container => Some(COST_CONTAINER),
        StructureType::Wall => None,
        _ => Some(COST_BLOCKED),
    }
}

/// Compute a fresh cost matrix from the current room snapshot.
pub fn compute_cost_matrix(room: &dyn RoomDataSource) -> CostMatrix {
    let terrain = room.get_terrain();
    let mut matrix = CostMatrix::empty(room.room_name());

    for y in 1..ROOM_HEIGHT - 1 {
        for x in 1..ROOM_WIDTH - 1 {
            let cost = if terrain.is_wall(x, y) {
                COST_BLOCKED
            } else {
                COST_PLAIN
            };
            matrix.set(Location::from_xy(x, y), cost);
        }
    }

    for site in room.get_construction_sites() {
        matrix.set(site.location, COST_BLOCKED);
    }

    for source in room.get_sources() {
        matrix.set(source.location, COST_BLOCKED);
    }

    for structure in room.get_structures() {
        if let Some(cost) = structure_cost(structure.structure_type) {
            matrix.set(structure.location, cost);
        }
    }

    for creep in room.get_creeps() {
        matrix.set(*creep, COST_BLOCKED);
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walled_terrain(walls: &[(u8, u8)]) -> FastRoomTerrain {
        let mut buffer = vec![0u8; ROOM_AREA];
        for &(x, y) in walls {
            buffer[Location::from_xy(x, y).index()] = TerrainFlags::WALL.bits();
        }
        FastRoomTerrain::new(buffer)
    }

    #[test]
    fn wall_terrain_is_blocked() {
        let walls = [(1, 1), (10, 20), (48, 48), (25, 3)];
        let room = WorldSnapshot::new("W1N1", walled_terrain(&walls));
        let matrix = compute_cost_matrix(&room);

        for (x, y) in walls {
            assert_eq!(matrix.get(x, y), COST_BLOCKED);
        }
        assert_eq!(matrix.get(2, 2), COST_PLAIN);
    }

    #[test]
    fn border_is_left_unset() {
        let room = WorldSnapshot::new("W1N1", FastRoomTerrain::plain());
        let matrix = compute_cost_matrix(&room);

        assert_eq!(matrix.get(0, 10), COST_UNSET);
        assert_eq!(matrix.get(49, 10), COST_UNSET);
        assert_eq!(matrix.get(10, 0), COST_UNSET);
        assert_eq!(matrix.get(10, 49), COST_UNSET);
        assert!(matrix.is_well_formed());
    }

    #[test]
    fn overlays_stamp_in_order() {
        let room = WorldSnapshot::new("W1N1", walled_terrain(&[(30, 30)]))
            .with_site(Location::from_xy(5, 5), StructureType::Extension)
            .with_source("src", Location::from_xy(6, 6))
            .with_structure(Location::from_xy(7, 7), StructureType::Road)
            .with_structure(Location::from_xy(8, 8), StructureType::Rampart)
            .with_structure(Location::from_xy(9, 9), StructureType::Container)
            .with_structure(Location::from_xy(30, 30), StructureType::Wall)
            .with_structure(Location::from_xy(11, 11), StructureType::Wall)
            .with_creep(Location::from_xy(12, 12))
            .with_creep(Location::from_xy(9, 9));
        let matrix = compute_cost_matrix(&room);

        assert_eq!(matrix.get(5, 5), COST_BLOCKED);
        assert_eq!(matrix.get(6, 6), COST_BLOCKED);
        assert_eq!(matrix.get(7, 7), COST_BLOCKED);
        assert_eq!(matrix.get(8, 8), COST_BLOCKED);
        assert_eq!(matrix.get(30, 30), COST_BLOCKED);
        assert_eq!(matrix.get(11, 11), COST_PLAIN);
        assert_eq!(matrix.get(12, 12), COST_BLOCKED);
        // creep standing on the container wins
        assert_eq!(matrix.get(9, 9), COST_BLOCKED);
        assert!(matrix.is_well_formed());
    }

    #[test]
    fn container_stays_passable() {
        let room = WorldSnapshot::new("W1N1", FastRoomTerrain::plain())
            .with_structure(Location::from_xy(20, 21), StructureType::Container);
        let matrix = compute_cost_matrix(&room);

        assert_eq!(matrix.get(20, 21), COST_CONTAINER);
        assert!(!matrix.is_blocked(Location::from_xy(20, 21)));
    }

    #[test]
    fn out_of_room_reads_as_blocked() {
        let matrix = compute_cost_matrix(&WorldSnapshot::new("W1N1", FastRoomTerrain::plain()));
        assert_eq!(matrix.get(50, 3), COST_BLOCKED);
    }

    #[test]
    fn stray_cost_is_malformed() {
        let mut matrix = compute_cost_matrix(&WorldSnapshot::new("W1N1", FastRoomTerrain::plain()));
        matrix.set(Location::from_xy(4, 4), 7);
        assert!(!matrix.is_well_formed());
    }
}
