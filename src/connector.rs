//! Source connector: lays one road from the primary spawn to each energy
//! source and a container on the tile next to the source.
//!
//! Every source is attempted exactly once per room lifetime. The source id
//! is recorded as mapped after the attempt whether or not the placements
//! succeeded, so pathfinding is never repeated tick after tick. A path with
//! fewer than two tiles has no container tile, and a path that stops short
//! of the source would put the container in the wrong place; both are
//! logged and skipped.

use crate::construction::*;
use crate::cost_matrix::*;
use crate::kind::*;
use crate::location::*;
use crate::pathing::*;
use crate::room_data::*;
use crate::store::*;
use log::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// The source was connected on an earlier tick.
    AlreadyMapped,
    /// The controller is below the level at which sources get connected.
    BelowLevel,
    /// The path was too short to hold a container; nothing was placed.
    PathTooShort { length: usize },
    /// The path ended at `reached` instead of the source; nothing was placed.
    Unreachable { reached: Location },
    Connected {
        roads_attempted: usize,
        roads_placed: usize,
        container: Location,
        container_placed: bool,
    },
}

pub fn connect_source(
    source: &SourceInfo,
    primary_spawn: Location,
    matrix: &CostMatrix,
    memory: &mut RoomPlannerMemory,
    pathing: &dyn PathProvider,
    backend: &mut dyn ConstructionBackend,
    options: &PathOptions,
) -> ConnectOutcome {
    if memory.is_source_mapped(&source.id) {
        return ConnectOutcome::AlreadyMapped;
    }

    let path = pathing.find_path(primary_spawn, source.location, options);

    let outcome = if path.len() < 2 {
        warn!(
            "Path from spawn {} to source {} in {} has {} tiles, skipping roads and container",
            primary_spawn,
            source.id,
            matrix.room_name(),
            path.len()
        );
        ConnectOutcome::PathTooShort { length: path.len() }
    } else if let Some(reached) = path.last().copied().filter(|last| *last != source.location) {
        warn!(
            "Path from spawn {} to source {} in {} stops at {}, skipping roads and container",
            primary_spawn,
            source.id,
            matrix.room_name(),
            reached
        );
        ConnectOutcome::Unreachable { reached }
    } else {
        // The last tile is the source itself, the one before it holds the container.
        let container = path[path.len() - 2];
        let roads = &path[..path.len() - 2];

        let roads_placed = roads
            .iter()
            .filter(|tile| place(backend, matrix, **tile, StructureKind::Road))
            .count();
        let container_placed = place(backend, matrix, container, StructureKind::Container);

        memory.record_source_container(&source.id, container);

        info!(
            "Connected source {} in {}: {}/{} roads, container at {} ({})",
            source.id,
            matrix.room_name(),
            roads_placed,
            roads.len(),
            container,
            if container_placed { "placed" } else { "not placed" }
        );

        ConnectOutcome::Connected {
            roads_attempted: roads.len(),
            roads_placed,
            container,
            container_placed,
        }
    };

    memory.mark_source_mapped(&source.id);

    outcome
}
