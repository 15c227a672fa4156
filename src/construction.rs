//! The shared placement primitive used by the build scheduler and the
//! source connector.

use crate::cost_matrix::*;
use crate::error::*;
use crate::kind::*;
use crate::location::*;
use log::*;

/// Something that can create construction sites. The game implementation
/// lives in `game`; tests use recording fakes.
pub trait ConstructionBackend {
    /// Ask the engine for a construction site. `Err` carries the engine's
    /// reason (site cap, invalid target, controller level, ...).
    fn create_construction_site(&mut self, location: Location, kind: StructureKind) -> Result<(), String>;
}

/// Validate a tile against the cost matrix and, if allowed, create a
/// construction site there.
pub fn try_place(
    backend: &mut dyn ConstructionBackend,
    matrix: &CostMatrix,
    location: Location,
    kind: StructureKind,
) -> Result<(), PlacementError> {
    if matrix.is_blocked(location) {
        return Err(PlacementError::Blocked { kind, location });
    }

    backend
        .create_construction_site(location, kind)
        .map_err(|reason| PlacementError::Rejected {
            kind,
            location,
            reason,
        })
}

/// `try_place` with failures logged and folded into a bool.
pub fn place(
    backend: &mut dyn ConstructionBackend,
    matrix: &CostMatrix,
    location: Location,
    kind: StructureKind,
) -> bool {
    match try_place(backend, matrix, location, kind) {
        Ok(()) => {
            debug!("Placed {} site at {} in {}", kind, location, matrix.room_name());
            true
        }
        Err(err) => {
            debug!("{} in {}", err, matrix.room_name());
            false
        }
    }
}
