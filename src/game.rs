//! Game-API implementations of the planner seams. Only compiled with the
//! `screeps` feature; everything else in the crate runs natively.

use crate::construction::*;
use crate::error::*;
use crate::kind::*;
use crate::location::*;
use crate::pathing::*;
use crate::room_data::*;
use crate::store::*;
use crate::terrain::*;
use log::*;
use screeps::*;

/// `findPath` options without a cost callback.
type SingleRoomPathOptions = FindPathOptions<fn(RoomName, CostMatrix) -> SingleRoomCostResult, SingleRoomCostResult>;

fn location_of(pos: Position) -> Location {
    Location::from_xy(pos.x().u8(), pos.y().u8())
}

/// Capture everything the planner reads from a room this tick.
pub fn snapshot_room(room: &Room) -> WorldSnapshot {
    let terrain = FastRoomTerrain::new(room.get_terrain().get_raw_buffer().to_vec());

    let structures = room
        .find(find::STRUCTURES, None)
        .iter()
        .map(|s| ExistingStructure {
            location: location_of(s.pos()),
            structure_type: s.structure_type(),
        })
        .collect();

    let construction_sites = room
        .find(find::MY_CONSTRUCTION_SITES, None)
        .iter()
        .map(|site| PendingSite {
            location: location_of(site.pos()),
            structure_type: site.structure_type(),
        })
        .collect();

    let sources = room
        .find(find::SOURCES, None)
        .iter()
        .map(|source| SourceInfo {
            id: source.id().to_string(),
            location: location_of(source.pos()),
        })
        .collect();

    let creeps = room
        .find(find::MY_CREEPS, None)
        .iter()
        .map(|creep| location_of(creep.pos()))
        .collect();

    let primary_spawn = room
        .find(find::MY_SPAWNS, None)
        .first()
        .map(|spawn| location_of(spawn.pos()));

    WorldSnapshot {
        room_name: room.name().to_string(),
        terrain,
        structures,
        construction_sites,
        sources,
        creeps,
        primary_spawn,
        controller_level: room.controller().map(|c| c.level()),
    }
}

impl ConstructionBackend for Room {
    fn create_construction_site(&mut self, location: Location, kind: StructureKind) -> Result<(), String> {
        Room::create_construction_site(self, location.x(), location.y(), kind.structure_type(), None)
            .map_err(|err| format!("{:?}", err))
    }
}

impl PathProvider for Room {
    fn find_path(&self, from: Location, to: Location, options: &PathOptions) -> Vec<Location> {
        let room_name = self.name();
        let origin = RoomPosition::new(from.x(), from.y(), room_name);
        let goal = RoomPosition::new(to.x(), to.y(), room_name);

        let find_options = SingleRoomPathOptions::default()
            .max_ops(options.max_ops)
            .ignore_creeps(options.ignore_creeps)
            .ignore_destructible_structures(options.ignore_destructible_structures)
            .swamp_cost(options.swamp_cost);

        match Room::find_path(self, &origin, &goal, Some(find_options)) {
            Path::Vectorized(steps) => steps
                .iter()
                .filter_map(|step| Location::checked_from_i16(step.x as i16, step.y as i16))
                .collect(),
            Path::Serialized(_) => {
                warn!("Unexpected serialized path in {}", room_name);
                Vec::new()
            }
        }
    }
}

pub fn game_tick() -> u32 {
    game::time()
}

/// Read the planner store from a raw memory segment. The segment must have
/// been made active on an earlier tick. A missing or empty segment yields an
/// empty store.
pub fn load_segment(segment: u8) -> Result<PlannerStore, PlannerError> {
    match raw_memory::segments().get(segment) {
        Some(data) if !data.is_empty() => PlannerStore::from_json(&data),
        _ => Ok(PlannerStore::new()),
    }
}

/// Write the planner store back. Must happen before the tick returns.
pub fn save_segment(segment: u8, store: &PlannerStore) -> Result<(), PlannerError> {
    let data = store.to_json()?;
    raw_memory::segments().set(segment, data);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_options_build_without_a_callback() {
        let _options = SingleRoomPathOptions::default()
            .max_ops(100)
            .ignore_creeps(true)
            .swamp_cost(1);
    }
}
