//! Base layout generation.
//!
//! The layout is a fixed template anchored on the primary spawn. Every
//! candidate slot is checked against the cost matrix once; border tiles and
//! tiles the matrix vetoes are dropped silently, so a layout never contains an invalid tile.
//! A category may end up empty (e.g. a spawn close to the room edge) and
//! that is a valid result.

use crate::cost_matrix::*;
use crate::kind::*;
use crate::location::*;
use crate::plan::*;
use crate::stamps::*;
use crate::terrain::*;
use itertools::Itertools;
use log::*;

/// Produces the slot list for a room. Generation runs once per room
/// lifetime; the planner memoizes the result in the room store.
pub trait LayoutGenerator {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    fn generate(&self, primary_spawn: Location, matrix: &CostMatrix) -> BaseStructures;
}

/// The default fixed-template generator.
pub struct BaseTemplateLayout {
    stamps: Vec<Stamp>,
}

impl Default for BaseTemplateLayout {
    fn default() -> Self {
        BaseTemplateLayout {
            stamps: base_stamps(),
        }
    }
}

impl LayoutGenerator for BaseTemplateLayout {
    fn name(&self) -> &str {
        "base_template"
    }

    fn generate(&self, primary_spawn: Location, matrix: &CostMatrix) -> BaseStructures {
        let mut layout = BaseStructures::new();
        layout.insert(StructureKind::Spawn, StructPos::built(primary_spawn));

        let anchor_x = primary_spawn.x() as i16 + ANCHOR_OFFSET.0 as i16;
        let anchor_y = primary_spawn.y() as i16 + ANCHOR_OFFSET.1 as i16;

        // Roads ring the spawns, storage and link wherever the template put
        // them, even when the tile itself was rejected.
        let mut road_anchors = vec![primary_spawn];

        for stamp in &self.stamps {
            for (location, kind) in stamp.place_at(anchor_x, anchor_y) {
                if matches!(
                    kind,
                    StructureKind::Spawn | StructureKind::Storage | StructureKind::Link
                ) {
                    road_anchors.push(location);
                }
                if is_valid_slot(matrix, location) {
                    layout.insert(kind, StructPos::unbuilt(location));
                }
            }
        }

        layout.extend(StructureKind::Road, roads_around(&road_anchors, matrix));

        info!(
            "Generated {} layout for {} anchored at {}: {} slots",
            self.name(),
            matrix.room_name(),
            primary_spawn,
            layout.len()
        );

        layout
    }
}

/// A tile may hold a planned structure iff it is off the room border and
/// the matrix does not veto it.
fn is_valid_slot(matrix: &CostMatrix, location: Location) -> bool {
    location.is_interior() && !matrix.is_blocked(location)
}

/// Road slots at orthogonal distance 1 and 2 around each anchor, in
/// east, west, south, north order per distance. Vetoed and out-of-room
/// tiles are dropped; a tile shared by two anchors appears once.
pub fn roads_around(anchors: &[Location], matrix: &CostMatrix) -> Vec<StructPos> {
    anchors
        .iter()
        .flat_map(|anchor| {
            (1..=2i16).flat_map(move |distance| {
                NEIGHBORS_4.iter().filter_map(move |&(dx, dy)| {
                    Location::checked_from_i16(
                        anchor.x() as i16 + dx as i16 * distance,
                        anchor.y() as i16 + dy as i16 * distance,
                    )
                })
            })
        })
        .filter(|location| is_valid_slot(matrix, *location))
        .unique()
        .map(StructPos::unbuilt)
        .collect()
}

/// Generate the default template layout.
pub fn generate_layout(primary_spawn: Location, matrix: &CostMatrix) -> BaseStructures {
    BaseTemplateLayout::default().generate(primary_spawn, matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::room_data::*;
    use screeps::constants::StructureType;

    fn loc(x: u8, y: u8) -> Location {
        Location::from_xy(x, y)
    }

    fn open_matrix() -> CostMatrix {
        compute_cost_matrix(&WorldSnapshot::new("W1N1", FastRoomTerrain::plain()))
    }

    fn positions(slots: &[StructPos]) -> Vec<(u8, u8)> {
        slots.iter().map(|s| (s.x, s.y)).collect()
    }

    #[test]
    fn roads_around_single_anchor() {
        let roads = roads_around(&[loc(25, 25)], &open_matrix());

        assert_eq!(
            positions(&roads),
            vec![
                (26, 25),
                (24, 25),
                (25, 26),
                (25, 24),
                (27, 25),
                (23, 25),
                (25, 27),
                (25, 23),
            ]
        );
        assert!(roads.iter().all(|r| !r.built));
    }

    #[test]
    fn roads_around_skips_blocked_tiles() {
        let mut matrix = open_matrix();
        for (x, y) in [(26, 25), (24, 25), (25, 26), (25, 24)] {
            matrix.set(loc(x, y), COST_BLOCKED);
        }
        for (x, y) in [(27, 25), (23, 25), (25, 27), (25, 23)] {
            matrix.set(loc(x, y), 0);
        }

        let roads = roads_around(&[loc(25, 25)], &matrix);

        assert_eq!(positions(&roads), vec![(27, 25), (23, 25), (25, 27), (25, 23)]);
        assert!(roads.iter().all(|r| !r.built));
    }

    #[test]
    fn roads_around_no_anchors_is_empty() {
        assert!(roads_around(&[], &open_matrix()).is_empty());
    }

    #[test]
    fn template_on_open_ground() {
        let layout = generate_layout(loc(20, 25), &open_matrix());

        assert_eq!(
            layout.slots(StructureKind::Spawn),
            &[
                StructPos::built(loc(20, 25)),
                StructPos::unbuilt(loc(26, 25)),
                StructPos::unbuilt(loc(23, 28)),
            ]
        );
        assert_eq!(positions(layout.slots(StructureKind::Storage)), vec![(23, 25)]);
        assert_eq!(positions(layout.slots(StructureKind::Link)), vec![(23, 22)]);
        assert_eq!(
            positions(layout.slots(StructureKind::Tower)),
            vec![(22, 24), (24, 24), (24, 26), (22, 26)]
        );
        assert_eq!(layout.count(StructureKind::Extension), 12);
        assert_eq!(layout.count(StructureKind::Container), 0);
        assert!(layout.count(StructureKind::Road) > 0);
    }

    #[test]
    fn template_slots_never_collide() {
        let layout = generate_layout(loc(20, 25), &open_matrix());
        let all: Vec<Location> = layout.iter().map(|(_, s)| s.location()).collect();

        assert_eq!(all.len(), all.iter().unique().count());
    }

    #[test]
    fn primary_spawn_is_kept_even_when_blocked() {
        let room = WorldSnapshot::new("W1N1", FastRoomTerrain::plain()).with_spawn(loc(20, 25));
        let matrix = compute_cost_matrix(&room);
        assert!(matrix.is_blocked(loc(20, 25)));

        let layout = generate_layout(loc(20, 25), &matrix);
        assert_eq!(layout.get(StructureKind::Spawn, loc(20, 25)), Some(StructPos::built(loc(20, 25))));
    }

    #[test]
    fn blocked_tiles_are_dropped() {
        let room = WorldSnapshot::new("W1N1", FastRoomTerrain::plain())
            .with_structure(loc(23, 25), StructureType::Storage)
            .with_creep(loc(22, 24));
        let matrix = compute_cost_matrix(&room);
        let layout = generate_layout(loc(20, 25), &matrix);

        assert!(layout.slots(StructureKind::Storage).is_empty());
        assert_eq!(layout.count(StructureKind::Tower), 3);
        assert!(layout.iter().all(|(kind, slot)| {
            kind == StructureKind::Spawn && slot.built || !matrix.is_blocked(slot.location())
        }));
        // roads still ring the rejected storage tile
        assert!(layout.get(StructureKind::Road, loc(24, 25)).is_some());
    }

    #[test]
    fn border_tiles_never_get_slots() {
        let layout = generate_layout(loc(47, 25), &open_matrix());

        assert!(layout
            .iter()
            .all(|(_, slot)| slot.location().is_interior()));
        assert!(layout.get(StructureKind::Extension, loc(49, 23)).is_none());
        assert!(layout.get(StructureKind::Tower, loc(49, 24)).is_none());
        assert!(layout.get(StructureKind::Road, loc(49, 25)).is_none());
        assert_eq!(layout.get(StructureKind::Extension, loc(48, 24)), Some(StructPos::unbuilt(loc(48, 24))));
    }

    #[test]
    fn roads_around_skips_the_room_border() {
        let roads = roads_around(&[loc(1, 25)], &open_matrix());

        assert_eq!(positions(&roads), vec![(2, 25), (1, 26), (1, 24), (3, 25), (1, 27), (1, 23)]);
    }

    #[test]
    fn layout_is_deterministic() {
        let room = WorldSnapshot::new("W1N1", FastRoomTerrain::plain())
            .with_spawn(loc(12, 30))
            .with_source("a", loc(14, 27));
        let matrix = compute_cost_matrix(&room);

        let first = serde_json::to_string(&generate_layout(loc(12, 30), &matrix)).unwrap();
        let second = serde_json::to_string(&generate_layout(loc(12, 30), &matrix)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn edge_spawn_leaves_categories_empty() {
        let layout = generate_layout(loc(48, 25), &open_matrix());

        // anchor at x=51 is outside the room
        assert!(layout.slots(StructureKind::Storage).is_empty());
        assert!(layout.slots(StructureKind::Tower).is_empty());
        assert_eq!(layout.count(StructureKind::Spawn), 1);
        assert!(layout.iter().all(|(_, s)| s.x < 50 && s.y < 50));
    }
}
