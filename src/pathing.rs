//! Path computation seam used by the source connector.
//!
//! Paths follow the engine's `Room.findPath` convention: the start tile is
//! excluded and the goal tile is the last element.

use crate::constants::*;
use crate::location::*;
use crate::terrain::*;
use pathfinding::directed::astar::astar;
use serde::{Deserialize, Serialize};
use std::cell::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathOptions {
    pub max_ops: u32,
    pub ignore_creeps: bool,
    pub ignore_destructible_structures: bool,
    pub swamp_cost: u8,
}

impl Default for PathOptions {
    fn default() -> Self {
        PathOptions {
            max_ops: DEFAULT_PATH_MAX_OPS,
            ignore_creeps: true,
            ignore_destructible_structures: true,
            swamp_cost: DEFAULT_PATH_SWAMP_COST,
        }
    }
}

pub trait PathProvider {
    /// Tiles from `from` (exclusive) to `to` (inclusive) when the goal is
    /// reached. When it is not, providers may return a partial path that
    /// stops short of `to` (the engine does) or an empty one
    /// (`TerrainPathProvider` does); callers must check the last tile.
    fn find_path(&self, from: Location, to: Location, options: &PathOptions) -> Vec<Location>;
}

/// Offline path provider: A* over terrain only. Walls are impassable except
/// for the goal tile; creeps and structures are never considered. An
/// exhausted operation budget yields an empty path, never a partial one.
pub struct TerrainPathProvider<'a> {
    terrain: &'a FastRoomTerrain,
}

impl<'a> TerrainPathProvider<'a> {
    pub fn new(terrain: &'a FastRoomTerrain) -> Self {
        TerrainPathProvider { terrain }
    }
}

impl<'a> PathProvider for TerrainPathProvider<'a> {
    fn find_path(&self, from: Location, to: Location, options: &PathOptions) -> Vec<Location> {
        let terrain = self.terrain;
        let swamp_cost = options.swamp_cost.max(1) as u32;
        let ops = Cell::new(0u32);

        let result = astar(
            &from,
            |&loc| {
                ops.set(ops.get() + 1);
                let exhausted = ops.get() > options.max_ops;
                NEIGHBORS_8
                    .iter()
                    .filter(move |_| !exhausted)
                    .filter_map(move |&(dx, dy)| {
                        let next = loc.checked_add(dx, dy)?;
                        if next == to {
                            return Some((next, 1));
                        }
                        if terrain.is_wall_at(next) {
                            return None;
                        }
                        let cost = if terrain.is_swamp(next.x(), next.y()) {
                            swamp_cost
                        } else {
                            1
                        };
                        Some((next, cost))
                    })
                    .collect::<Vec<_>>()
            },
            |&loc| loc.distance_to(to) as u32,
            |&loc| loc == to,
        );

        result
            .map(|(path, _cost)| path.into_iter().skip(1).collect())
            .unwrap_or_default()
    }
}
