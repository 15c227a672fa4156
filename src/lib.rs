pub mod connector;
pub mod constants;
pub mod construction;
pub mod cost_matrix;
pub mod error;
pub mod kind;
pub mod layout;
pub mod location;
pub mod pathing;
pub mod plan;
pub mod planner;
pub mod room_data;
pub mod stamps;
pub mod store;
pub mod terrain;

#[cfg(feature = "screeps")]
pub mod game;

pub use connector::{connect_source, ConnectOutcome};
pub use construction::{place, try_place, ConstructionBackend};
pub use cost_matrix::{compute_cost_matrix, CostMatrix};
pub use error::{PlacementError, PlannerError};
pub use kind::StructureKind;
pub use layout::{generate_layout, roads_around, BaseTemplateLayout, LayoutGenerator};
pub use location::Location;
pub use pathing::{PathOptions, PathProvider, TerrainPathProvider};
pub use plan::{BaseStructures, StructPos};
pub use planner::*;
pub use room_data::{RoomDataSource, SourceInfo, WorldSnapshot};
pub use store::{PlannerStore, RoomPlannerMemory};
