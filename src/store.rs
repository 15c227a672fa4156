//! Per-room persisted planner state.
//!
//! The cost matrix and the layout are derived caches and can be thrown away
//! at any time. The mapped-source registry is not: it records work already
//! done and cannot be rebuilt from the world.

use crate::cost_matrix::*;
use crate::error::*;
use crate::location::*;
use crate::plan::*;
use crate::room_data::*;
use fnv::{FnvHashMap, FnvHashSet};
use log::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RoomPlannerMemory {
    #[serde(default, rename = "m", skip_serializing_if = "Option::is_none")]
    cost_matrix: Option<CostMatrix>,
    #[serde(default, rename = "l", skip_serializing_if = "Option::is_none")]
    layout: Option<BaseStructures>,
    #[serde(default, rename = "s")]
    mapped_sources: FnvHashSet<String>,
    #[serde(default, rename = "c")]
    source_containers: FnvHashMap<String, Vec<Location>>,
}

impl RoomPlannerMemory {
    pub fn cost_matrix(&self) -> Option<&CostMatrix> {
        self.cost_matrix.as_ref()
    }

    /// Swap in a freshly computed matrix. The old one is dropped whole.
    pub fn replace_cost_matrix(&mut self, matrix: CostMatrix) -> &CostMatrix {
        self.cost_matrix.insert(matrix)
    }

    /// Read-through: the cached matrix, computing it from `room` on a miss.
    pub fn cost_matrix_or_compute(&mut self, room: &dyn RoomDataSource) -> &CostMatrix {
        self.cost_matrix
            .get_or_insert_with(|| compute_cost_matrix(room))
    }

    pub fn layout(&self) -> Option<&BaseStructures> {
        self.layout.as_ref()
    }

    pub fn layout_mut(&mut self) -> Option<&mut BaseStructures> {
        self.layout.as_mut()
    }

    pub fn set_layout(&mut self, layout: BaseStructures) -> &mut BaseStructures {
        self.layout.insert(layout)
    }

    /// Read-through: the cached layout, or `generate` run against the cached
    /// (or freshly computed) cost matrix on a miss. A hit never touches the
    /// generator.
    pub fn layout_or_generate<F>(&mut self, room: &dyn RoomDataSource, generate: F) -> &mut BaseStructures
    where
        F: FnOnce(&CostMatrix) -> BaseStructures,
    {
        let cost_matrix = &mut self.cost_matrix;
        self.layout.get_or_insert_with(|| {
            let matrix = cost_matrix.get_or_insert_with(|| compute_cost_matrix(room));
            generate(matrix)
        })
    }

    /// Drop the cached layout and cost matrix so both are recomputed on the
    /// next read. Mapped sources are kept.
    pub fn reset_layout(&mut self) {
        self.layout = None;
        self.cost_matrix = None;
    }

    pub fn is_source_mapped(&self, source_id: &str) -> bool {
        self.mapped_sources.contains(source_id)
    }

    /// Returns false if the source was already recorded.
    pub fn mark_source_mapped(&mut self, source_id: &str) -> bool {
        self.mapped_sources.insert(source_id.to_string())
    }

    pub fn mapped_source_count(&self) -> usize {
        self.mapped_sources.len()
    }

    pub fn record_source_container(&mut self, source_id: &str, location: Location) {
        let containers = self
            .source_containers
            .entry(source_id.to_string())
            .or_default();
        if !containers.contains(&location) {
            containers.push(location);
        }
    }

    pub fn source_containers(&self, source_id: &str) -> &[Location] {
        self.source_containers
            .get(source_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// The most recently planned container for a source, for harvesters to
    /// stand on.
    pub fn source_container(&self, source_id: &str) -> Option<Location> {
        self.source_containers(source_id).last().copied()
    }

    /// Forget every connected source so the connector runs for them again.
    pub fn reset_sources(&mut self) {
        self.mapped_sources.clear();
        self.source_containers.clear();
    }
}

/// All per-room planner state, keyed by room name.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlannerStore {
    rooms: FnvHashMap<String, RoomPlannerMemory>,
}

impl PlannerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn room(&self, room_name: &str) -> Option<&RoomPlannerMemory> {
        self.rooms.get(room_name)
    }

    pub fn room_mut(&mut self, room_name: &str) -> &mut RoomPlannerMemory {
        self.rooms.entry(room_name.to_string()).or_default()
    }

    /// Drop all state for rooms that are no longer visible or owned.
    pub fn retain_rooms<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.rooms.retain(|name, _| {
            let retained = keep(name);
            if !retained {
                info!("Dropping planner state for {}", name);
            }
            retained
        });
    }

    pub fn to_json(&self) -> Result<String, PlannerError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(data: &str) -> Result<Self, PlannerError> {
        Ok(serde_json::from_str(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::*;
    use crate::terrain::*;

    #[test]
    fn reset_layout_keeps_mapped_sources() {
        let room = WorldSnapshot::new("W1N1", FastRoomTerrain::plain());
        let mut store = PlannerStore::new();
        let memory = store.room_mut("W1N1");
        memory.cost_matrix_or_compute(&room);
        memory.set_layout(BaseStructures::new());
        memory.mark_source_mapped("src1");

        memory.reset_layout();

        assert!(memory.layout().is_none());
        assert!(memory.cost_matrix().is_none());
        assert!(memory.is_source_mapped("src1"));
    }

    #[test]
    fn layout_is_generated_only_on_a_miss() {
        let room = WorldSnapshot::new("W1N1", FastRoomTerrain::plain());
        let mut memory = RoomPlannerMemory::default();
        let mut calls = 0;

        for _ in 0..2 {
            memory.layout_or_generate(&room, |matrix| {
                calls += 1;
                assert_eq!(matrix.room_name(), "W1N1");
                BaseStructures::new()
            });
        }

        assert_eq!(calls, 1);
        assert!(memory.cost_matrix().is_some());
    }

    #[test]
    fn mapping_a_source_twice_is_a_noop() {
        let mut memory = RoomPlannerMemory::default();
        assert!(memory.mark_source_mapped("src1"));
        assert!(!memory.mark_source_mapped("src1"));
        assert_eq!(memory.mapped_source_count(), 1);
    }

    #[test]
    fn source_containers_are_unique_per_source() {
        let mut memory = RoomPlannerMemory::default();
        memory.record_source_container("src1", Location::from_xy(5, 5));
        memory.record_source_container("src1", Location::from_xy(5, 5));
        memory.record_source_container("src1", Location::from_xy(6, 5));

        assert_eq!(memory.source_containers("src1").len(), 2);
        assert_eq!(memory.source_container("src1"), Some(Location::from_xy(6, 5)));
        assert_eq!(memory.source_container("other"), None);
    }

    #[test]
    fn store_survives_a_json_round_trip() {
        let room = WorldSnapshot::new("W1N1", FastRoomTerrain::plain());
        let mut store = PlannerStore::new();
        let memory = store.room_mut("W1N1");
        memory.cost_matrix_or_compute(&room);
        let layout = memory.set_layout(BaseStructures::new());
        layout.insert(StructureKind::Road, StructPos::unbuilt(Location::from_xy(3, 4)));
        memory.mark_source_mapped("src1");
        memory.record_source_container("src1", Location::from_xy(9, 9));

        let restored = PlannerStore::from_json(&store.to_json().unwrap()).unwrap();
        let memory = restored.room("W1N1").unwrap();

        assert_eq!(memory.cost_matrix(), store.room("W1N1").unwrap().cost_matrix());
        assert_eq!(memory.layout(), store.room("W1N1").unwrap().layout());
        assert!(memory.is_source_mapped("src1"));
        assert_eq!(memory.source_container("src1"), Some(Location::from_xy(9, 9)));
    }

    #[test]
    fn garbage_blob_is_a_store_error() {
        assert!(matches!(PlannerStore::from_json("{not json"), Err(PlannerError::Store(_))));
    }

    #[test]
    fn retain_rooms_drops_unlisted_rooms() {
        let mut store = PlannerStore::new();
        store.room_mut("W1N1");
        store.room_mut("W2N2");
        store.retain_rooms(|name| name == "W1N1");

        assert!(store.room("W1N1").is_some());
        assert!(store.room("W2N2").is_none());
    }
}
