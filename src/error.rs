use crate::kind::StructureKind;
use crate::location::Location;
use thiserror::Error;

/// Why a construction site could not be placed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("cost matrix rejected {kind} at {location}")]
    Blocked {
        kind: StructureKind,
        location: Location,
    },
    #[error("engine rejected {kind} at {location}: {reason}")]
    Rejected {
        kind: StructureKind,
        location: Location,
        reason: String,
    },
}

/// Failures that stop the planner from running for a room this tick.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("room {room} has no primary spawn")]
    NoPrimarySpawn { room: String },
    #[error("planner store could not be decoded: {0}")]
    Store(#[from] serde_json::Error),
}
