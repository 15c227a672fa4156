//! Public API for the base planner.
//!
//! The `PlannerBuilder` provides a fluent API for configuring the planner.
//! The resulting `BasePlanner` is stateless: everything that must survive
//! between ticks lives in the `PlannerStore` passed into each call, and the
//! caller is responsible for persisting the store before the tick returns.

use crate::connector::*;
use crate::constants::*;
use crate::construction::*;
use crate::cost_matrix::*;
use crate::error::*;
use crate::kind::*;
use crate::layout::*;
use crate::location::*;
use crate::pathing::*;
use crate::room_data::*;
use crate::store::*;
use fnv::FnvHashMap;
use log::*;
use serde::{Deserialize, Serialize};

pub use crate::plan::should_build_structures;

/// Tunables for the planner. Missing fields fall back to their defaults, so
/// a partial JSON blob from Memory is accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Ticks between placement passes. 0 and 1 both mean every tick.
    pub build_cadence: u32,
    pub path_max_ops: u32,
    pub path_swamp_cost: u8,
    pub path_ignore_creeps: bool,
    pub path_ignore_destructible: bool,
    /// Sources are left alone below this controller level.
    pub source_min_controller_level: u8,
    /// Skip slots of a kind once the controller level's cap is reached.
    pub respect_controller_limits: bool,
    /// Upper bound on construction attempts per placement pass.
    pub max_placements_per_run: Option<usize>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            build_cadence: DEFAULT_BUILD_CADENCE,
            path_max_ops: DEFAULT_PATH_MAX_OPS,
            path_swamp_cost: DEFAULT_PATH_SWAMP_COST,
            path_ignore_creeps: true,
            path_ignore_destructible: true,
            source_min_controller_level: DEFAULT_SOURCE_MIN_CONTROLLER_LEVEL,
            respect_controller_limits: true,
            max_placements_per_run: None,
        }
    }
}

impl PlannerConfig {
    pub fn path_options(&self) -> PathOptions {
        PathOptions {
            max_ops: self.path_max_ops,
            ignore_creeps: self.path_ignore_creeps,
            ignore_destructible_structures: self.path_ignore_destructible,
            swamp_cost: self.path_swamp_cost,
        }
    }

    pub fn is_build_tick(&self, tick: u32) -> bool {
        self.build_cadence <= 1 || tick % self.build_cadence == 0
    }
}

/// Result of one `ensure_layout_built` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildReport {
    /// Every slot in the layout already has a site.
    Complete,
    /// Work remains but this is not a cadence tick.
    Throttled,
    Placed {
        attempted: usize,
        placed: usize,
        /// Slots held back by controller caps or the per-run limit.
        skipped: usize,
    },
}

/// Result of one `run` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub build: BuildReport,
    pub sources: Vec<(String, ConnectOutcome)>,
}

/// Fluent builder for configuring the planner.
pub struct PlannerBuilder {
    config: PlannerConfig,
    generator: Box<dyn LayoutGenerator>,
}

impl PlannerBuilder {
    /// Default configuration and the fixed base template.
    pub fn new() -> Self {
        PlannerBuilder {
            config: PlannerConfig::default(),
            generator: Box::new(BaseTemplateLayout::default()),
        }
    }

    /// Replace the whole configuration, e.g. one read from Memory.
    pub fn config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn layout_generator(mut self, generator: Box<dyn LayoutGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn build_cadence(mut self, ticks: u32) -> Self {
        self.config.build_cadence = ticks;
        self
    }

    pub fn path_max_ops(mut self, max_ops: u32) -> Self {
        self.config.path_max_ops = max_ops;
        self
    }

    pub fn path_swamp_cost(mut self, cost: u8) -> Self {
        self.config.path_swamp_cost = cost;
        self
    }

    pub fn path_ignore_creeps(mut self, ignore: bool) -> Self {
        self.config.path_ignore_creeps = ignore;
        self
    }

    pub fn path_ignore_destructible(mut self, ignore: bool) -> Self {
        self.config.path_ignore_destructible = ignore;
        self
    }

    pub fn source_min_controller_level(mut self, level: u8) -> Self {
        self.config.source_min_controller_level = level;
        self
    }

    pub fn respect_controller_limits(mut self, respect: bool) -> Self {
        self.config.respect_controller_limits = respect;
        self
    }

    pub fn max_placements_per_run(mut self, limit: Option<usize>) -> Self {
        self.config.max_placements_per_run = limit;
        self
    }

    pub fn build(self) -> BasePlanner {
        BasePlanner {
            config: self.config,
            generator: self.generator,
        }
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        PlannerBuilder::new()
    }
}

pub struct BasePlanner {
    config: PlannerConfig,
    generator: Box<dyn LayoutGenerator>,
}

impl Default for BasePlanner {
    fn default() -> Self {
        PlannerBuilder::default().build()
    }
}

impl BasePlanner {
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    fn primary_spawn(room: &dyn RoomDataSource) -> Result<Location, PlannerError> {
        room.primary_spawn().ok_or_else(|| PlannerError::NoPrimarySpawn {
            room: room.room_name().to_string(),
        })
    }

    /// The per-tick entry point for base construction.
    ///
    /// The layout is generated on the first call for a room and read back
    /// from the store afterwards. On cadence ticks every unbuilt slot is
    /// offered to the placement primitive against a freshly computed cost
    /// matrix; slots whose site was created are marked built for good, the
    /// rest are retried on the next cadence tick.
    pub fn ensure_layout_built(
        &self,
        store: &mut PlannerStore,
        room: &dyn RoomDataSource,
        backend: &mut dyn ConstructionBackend,
        tick: u32,
    ) -> Result<BuildReport, PlannerError> {
        let primary_spawn = Self::primary_spawn(room)?;
        let memory = store.room_mut(room.room_name());
        let generator = &self.generator;
        let layout = memory.layout_or_generate(room, |matrix| generator.generate(primary_spawn, matrix));

        if !should_build_structures(layout) {
            return Ok(BuildReport::Complete);
        }

        if !self.config.is_build_tick(tick) {
            trace!("Skipping placement for {} on tick {}", room.room_name(), tick);
            return Ok(BuildReport::Throttled);
        }

        let matrix = compute_cost_matrix(room);
        let level = if self.config.respect_controller_limits {
            room.controller_level()
        } else {
            None
        };

        let mut built_counts: FnvHashMap<StructureKind, u32> = FnvHashMap::default();
        let mut attempted = 0;
        let mut placed = 0;
        let mut skipped = 0;

        for (kind, location) in layout.unbuilt() {
            if self
                .config
                .max_placements_per_run
                .map(|limit| attempted >= limit)
                .unwrap_or(false)
            {
                skipped += 1;
                continue;
            }

            let built = built_counts
                .entry(kind)
                .or_insert_with(|| layout.built_count(kind) as u32);

            if let Some(level) = level {
                if *built >= max_structures_at_rcl(kind, level) {
                    skipped += 1;
                    continue;
                }
            }

            attempted += 1;
            if place(backend, &matrix, location, kind) {
                layout.mark_built(kind, location);
                *built += 1;
                placed += 1;
            }
        }

        info!(
            "Placement pass for {} on tick {}: {}/{} sites placed, {} held back",
            room.room_name(),
            tick,
            placed,
            attempted,
            skipped
        );

        memory.replace_cost_matrix(matrix);

        Ok(BuildReport::Placed {
            attempted,
            placed,
            skipped,
        })
    }

    /// Connect every source in the room that has not been connected yet.
    /// Does nothing below the configured controller level.
    pub fn connect_sources(
        &self,
        store: &mut PlannerStore,
        room: &dyn RoomDataSource,
        pathing: &dyn PathProvider,
        backend: &mut dyn ConstructionBackend,
    ) -> Result<Vec<(String, ConnectOutcome)>, PlannerError> {
        let primary_spawn = Self::primary_spawn(room)?;
        let sources = room.get_sources();
        let level = room.controller_level().unwrap_or(0);

        if level < self.config.source_min_controller_level {
            return Ok(sources
                .iter()
                .map(|source| (source.id.clone(), ConnectOutcome::BelowLevel))
                .collect());
        }

        let memory = store.room_mut(room.room_name());

        if sources.iter().all(|source| memory.is_source_mapped(&source.id)) {
            return Ok(sources
                .iter()
                .map(|source| (source.id.clone(), ConnectOutcome::AlreadyMapped))
                .collect());
        }

        let matrix = compute_cost_matrix(room);
        let options = self.config.path_options();

        let outcomes = sources
            .iter()
            .map(|source| {
                let outcome = connect_source(source, primary_spawn, &matrix, memory, pathing, backend, &options);
                (source.id.clone(), outcome)
            })
            .collect();

        memory.replace_cost_matrix(matrix);

        Ok(outcomes)
    }

    /// Build pass followed by source connection, as the tick loop calls it.
    pub fn run(
        &self,
        store: &mut PlannerStore,
        room: &dyn RoomDataSource,
        pathing: &dyn PathProvider,
        backend: &mut dyn ConstructionBackend,
        tick: u32,
    ) -> Result<RunReport, PlannerError> {
        let build = self.ensure_layout_built(store, room, backend, tick)?;
        let sources = self.connect_sources(store, room, pathing, backend)?;

        Ok(RunReport { build, sources })
    }

    /// Discard the cached layout and cost matrix for a room. The next call
    /// regenerates both from the current world.
    pub fn reset_layout(&self, store: &mut PlannerStore, room_name: &str) {
        info!("Resetting base layout for {}", room_name);
        store.room_mut(room_name).reset_layout();
    }

    /// Forget which sources were connected so they are connected again.
    pub fn reset_sources(&self, store: &mut PlannerStore, room_name: &str) {
        info!("Resetting source connections for {}", room_name);
        store.room_mut(room_name).reset_sources();
    }
}
