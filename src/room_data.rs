//! Point-in-time view of a room, as consumed by the cost matrix and the
//! planner. Implementations exist for both in-game (screeps API, see
//! `game::snapshot_room`) and offline (hand-built `WorldSnapshot`) use.

use crate::location::*;
use crate::terrain::*;

use screeps::constants::StructureType;

/// A built structure in the room.
#[derive(Clone, Debug)]
pub struct ExistingStructure {
    pub location: Location,
    pub structure_type: StructureType,
}

/// A construction site that has not been finished yet.
#[derive(Clone, Debug)]
pub struct PendingSite {
    pub location: Location,
    pub structure_type: StructureType,
}

/// An energy source and its stable identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceInfo {
    pub id: String,
    pub location: Location,
}

/// Trait for providing room data to the planner.
pub trait RoomDataSource {
    fn room_name(&self) -> &str;
    fn get_terrain(&self) -> &FastRoomTerrain;
    fn get_structures(&self) -> &[ExistingStructure];
    fn get_construction_sites(&self) -> &[PendingSite];
    fn get_sources(&self) -> &[SourceInfo];
    /// Tiles currently occupied by mobile units.
    fn get_creeps(&self) -> &[Location];
    /// The spawn the base layout is anchored on, if the room has one.
    fn primary_spawn(&self) -> Option<Location>;
    fn controller_level(&self) -> Option<u8>;
}

/// An owned snapshot, filled in by hand or captured from the game.
#[derive(Clone)]
pub struct WorldSnapshot {
    pub room_name: String,
    pub terrain: FastRoomTerrain,
    pub structures: Vec<ExistingStructure>,
    pub construction_sites: Vec<PendingSite>,
    pub sources: Vec<SourceInfo>,
    pub creeps: Vec<Location>,
    pub primary_spawn: Option<Location>,
    pub controller_level: Option<u8>,
}

impl WorldSnapshot {
    /// An empty room with the given terrain.
    pub fn new(room_name: impl Into<String>, terrain: FastRoomTerrain) -> Self {
        WorldSnapshot {
            room_name: room_name.into(),
            terrain,
            structures: Vec::new(),
            construction_sites: Vec::new(),
            sources: Vec::new(),
            creeps: Vec::new(),
            primary_spawn: None,
            controller_level: None,
        }
    }

    /// Record a spawn structure and make it the primary spawn if none is set.
    pub fn with_spawn(mut self, location: Location) -> Self {
        self.structures.push(ExistingStructure {
            location,
            structure_type: StructureType::Spawn,
        });
        self.primary_spawn.get_or_insert(location);
        self
    }

    pub fn with_structure(mut self, location: Location, structure_type: StructureType) -> Self {
        self.structures.push(ExistingStructure {
            location,
            structure_type,
        });
        self
    }

    pub fn with_site(mut self, location: Location, structure_type: StructureType) -> Self {
        self.construction_sites.push(PendingSite {
            location,
            structure_type,
        });
        self
    }

    pub fn with_source(mut self, id: impl Into<String>, location: Location) -> Self {
        self.sources.push(SourceInfo {
            id: id.into(),
            location,
        });
        self
    }

    pub fn with_creep(mut self, location: Location) -> Self {
        self.creeps.push(location);
        self
    }

    pub fn with_controller_level(mut self, level: u8) -> Self {
        self.controller_level = Some(level);
        self
    }
}

impl RoomDataSource for WorldSnapshot {
    fn room_name(&self) -> &str {
        &self.room_name
    }

    fn get_terrain(&self) -> &FastRoomTerrain {
        &self.terrain
    }

    fn get_structures(&self) -> &[ExistingStructure] {
        &self.structures
    }

    fn get_construction_sites(&self) -> &[PendingSite] {
        &self.construction_sites
    }

    fn get_sources(&self) -> &[SourceInfo] {
        &self.sources
    }

    fn get_creeps(&self) -> &[Location] {
        &self.creeps
    }

    fn primary_spawn(&self) -> Option<Location> {
        self.primary_spawn
    }

    fn controller_level(&self) -> Option<u8> {
        self.controller_level
    }
}
